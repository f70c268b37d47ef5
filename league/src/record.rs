
use std::collections::BTreeMap;

use utils::{Serialize, Deserialize, Value};

use super::rating::Rating;

///
/// The positional handle of an opponent within its registry.
///
pub type OpponentId = usize;

///
/// Auxiliary, caller-defined information about an opponent (training iteration,
/// algorithm tag, and so on). Never interpreted by the registry beyond `opponent_type`.
///
pub type Metadata = BTreeMap<String, Value>;

///
/// The metadata key naming an opponent's type.
///
pub const KIND_KEY : & str = "opponent_type";

///
/// The type of an opponent whose metadata does not name one.
///
pub const DEFAULT_KIND : & str = "default";

///
/// A registered snapshot of a trained policy.
///
/// Everything except the rating is fixed at registration; the rating changes only
/// through match results reported to the owning registry.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentRecord 
{
    pub id: OpponentId,
    pub label: Option<String>,
    pub artifact_ref: String,
    pub kind: String,
    pub metadata: Metadata,
    pub rating: Rating,
    pub created_at: u64
}

impl OpponentRecord 
{
    ///
    /// Creates a new record. The kind is read from the metadata.
    ///
    pub fn new (id: OpponentId, label: Option<String>, artifact_ref: String, metadata: Metadata, rating: Rating, created_at: u64) -> OpponentRecord 
    {
        let kind = match metadata.get(KIND_KEY)
        {
            Some(Value::String(kind)) if ! kind.is_empty() => kind.clone(),
            _ => DEFAULT_KIND.to_owned()
        };

        OpponentRecord { id, label, artifact_ref, kind, metadata, rating, created_at }
    }
}

impl std::fmt::Display for OpponentRecord 
{
    fn fmt (& self, f: & mut std::fmt::Formatter<'_>) -> std::fmt::Result 
    {
        write!(f, "#{} [{}] {} @ {}", self.id, self.kind, self.artifact_ref, self.rating)
    }
}
