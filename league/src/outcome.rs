
use utils::{Serialize, Deserialize};
use utils::error::error;
use utils::notate::Notate;

///
/// The result of a match between two opponents A and B, always from A's perspective.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireOutcome", into = "WireOutcome")]
pub enum Outcome 
{
    AWins,
    BWins,
    Draw,

    /// A's score against B, in [0, 1].
    Score(f64)
}

impl Outcome 
{
    ///
    /// Creates a continuous outcome, rejecting scores outside [0, 1].
    ///
    pub fn score_of (score: f64) -> utils::error::Result<Outcome>
    {
        match score 
        {
            s if (0.0 ..= 1.0).contains(& s) => Ok(Outcome::Score(s)),
            _ => Err(error!("Match score {} is outside [0, 1].", score))
        }
    }

    ///
    /// Returns A's score against B.
    ///
    pub fn score (& self) -> f64 
    {
        match self 
        {
            Outcome::AWins    => 1.0,
            Outcome::BWins    => 0.0,
            Outcome::Draw     => 0.5,
            Outcome::Score(s) => * s
        }
    }

    ///
    /// Returns the same match seen from B's side.
    ///
    #[cfg(test)]
    pub fn reversed (& self) -> Outcome 
    {
        match self 
        {
            Outcome::AWins    => Outcome::BWins,
            Outcome::BWins    => Outcome::AWins,
            Outcome::Draw     => Outcome::Draw,
            Outcome::Score(s) => Outcome::Score(1.0 - s)
        }
    }
}

impl std::fmt::Display for Outcome 
{
    fn fmt (& self, f: & mut std::fmt::Formatter<'_>) -> std::fmt::Result 
    {
        match self 
        {
            Outcome::AWins    => write!(f, "A wins."),
            Outcome::BWins    => write!(f, "B wins."),
            Outcome::Draw     => write!(f, "The match is a draw."),
            Outcome::Score(s) => write!(f, "A scores {} against B.", s)
        }
    }
}

impl Notate for Outcome 
{
    fn notate (& self) -> String 
    {
        match self 
        {
            Outcome::AWins    => "A_WINS".to_string(),
            Outcome::BWins    => "B_WINS".to_string(),
            Outcome::Draw     => "DRAW".to_string(),
            Outcome::Score(s) => s.to_string()
        }
    }

    fn parse (s: & str) -> utils::error::Result<Outcome>
    {
        match s.trim().to_ascii_uppercase().as_str() 
        {
            "A_WINS" | "WIN"  => Ok(Outcome::AWins),
            "B_WINS" | "LOSS" => Ok(Outcome::BWins),
            "DRAW"            => Ok(Outcome::Draw),
            other => match other.parse::<f64>()
            {
                Ok(score) => Outcome::score_of(score),
                Err(_)    => Err(error!("Invalid notation '{}' for match outcome.", s))
            }
        }
    }
}

///
/// The shapes an outcome may take on the wire: a label or a bare score.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum WireOutcome 
{
    Score(f64),
    Label(String)
}

impl TryFrom<WireOutcome> for Outcome 
{
    type Error = String;

    fn try_from (wire: WireOutcome) -> std::result::Result<Outcome, String>
    {
        let outcome = match wire 
        {
            WireOutcome::Score(s) => Outcome::score_of(s),
            WireOutcome::Label(l) => Outcome::parse(& l)
        };
        outcome.map_err(|e| e.to_string())
    }
}

impl From<Outcome> for WireOutcome 
{
    fn from (outcome: Outcome) -> WireOutcome 
    {
        match outcome 
        {
            Outcome::Score(s) => WireOutcome::Score(s),
            labelled          => WireOutcome::Label(labelled.notate())
        }
    }
}
