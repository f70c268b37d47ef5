
use league::error::{Error, ErrorKind, Result};
use league::{Metadata, OpponentId, OpponentRecord, Outcome, Rating};

use utils::{Serialize, Deserialize, Value};

///
/// The metadata key carrying an opponent's artifact reference.
///
pub const PATH_KEY : & str = "opponent_path";

///
/// Body of `POST /add_opponent`.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddOpponentRequest 
{
    /// Advisory label chosen by the client; the registry assigns the real id.
    #[serde(default)]
    pub opponent_id: Option<Value>,

    #[serde(default)]
    pub opponent_info: Metadata
}

impl AddOpponentRequest 
{
    pub fn label (& self) -> Option<String>
    {
        match & self.opponent_id 
        {
            None | Some(Value::Null) => None,
            Some(Value::String(s))   => Some(s.clone()),
            Some(other)              => Some(other.to_string())
        }
    }

    ///
    /// Returns the artifact reference, which must be a non-empty string.
    ///
    pub fn opponent_path (& self) -> Result<String>
    {
        match self.opponent_info.get(PATH_KEY)
        {
            Some(Value::String(path)) if ! path.trim().is_empty() => Ok(path.clone()),
            Some(Value::String(_)) => Err(Error::invalid(format!("opponent_info.{} must not be empty.", PATH_KEY))),
            Some(_)                => Err(Error::invalid(format!("opponent_info.{} must be a string.", PATH_KEY))),
            None                   => Err(Error::invalid(format!("opponent_info.{} is required.", PATH_KEY)))
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddOpponentResponse 
{
    pub msg: String,
    pub opponent_id: OpponentId
}

///
/// An opponent as handed to a requester who is about to play it.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentResponse 
{
    pub opponent_id: OpponentId,
    pub opponent_path: String,
    pub opponent_type: String,
    pub label: Option<String>,
    pub rating: Rating
}

impl From<OpponentRecord> for OpponentResponse 
{
    fn from (record: OpponentRecord) -> OpponentResponse 
    {
        OpponentResponse 
        {
            opponent_id: record.id,
            opponent_path: record.artifact_ref,
            opponent_type: record.kind,
            label: record.label,
            rating: record.rating
        }
    }
}

///
/// Body of `POST /update_skill`. The result is from `opponent_id`'s side.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateSkillRequest 
{
    pub opponent_id: OpponentId,
    pub other_id: OpponentId,
    pub result: Outcome
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateSkillResponse 
{
    pub msg: String,
    pub opponent: Rating,
    pub other: Rating
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse 
{
    pub status: String,
    pub instance: String,
    pub opponents: usize
}

///
/// Body of every failed request.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse 
{
    pub kind: ErrorKind,
    pub message: String
}
