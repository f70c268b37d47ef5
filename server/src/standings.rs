
use league::OpponentRecord;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct Row 
{
    id: usize,
    kind: String,
    artifact: String,
    rating: String,
    uncertainty: String,
    games: u64
}

impl From<& OpponentRecord> for Row 
{
    fn from (record: & OpponentRecord) -> Row 
    {
        Row 
        {
            id: record.id,
            kind: record.kind.clone(),
            artifact: record.artifact_ref.clone(),
            rating: format!("{:.1}", record.rating.mu),
            uncertainty: format!("{:.1}", record.rating.sigma),
            games: record.rating.games
        }
    }
}

///
/// Renders records as a plain-text table, in the order given.
///
pub fn render (records: & [OpponentRecord]) -> String 
{
    Table::new(records.iter().map(Row::from)).to_string()
}

#[cfg(test)]
mod tests 
{
    use super::*;

    use league::{Metadata, Outcome, Registry};

    #[test]
    fn table_lists_every_opponent ()
    {
        let registry = Registry::default();
        registry.register("runs/ckpt_001.pt", Metadata::new()).unwrap();
        registry.register("runs/ckpt_002.pt", Metadata::new()).unwrap();
        registry.report_result(1, 0, Outcome::AWins).unwrap();

        let table = render(& registry.standings());
        assert!(table.contains("runs/ckpt_001.pt"));
        assert!(table.contains("runs/ckpt_002.pt"));
        assert!(table.contains("1016.0"));
        assert!(table.find("runs/ckpt_002.pt").unwrap() < table.find("runs/ckpt_001.pt").unwrap());
    }
}
