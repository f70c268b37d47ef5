
pub use serde::{Serialize, Deserialize};

///
/// Arbitrary JSON values, as carried in opaque metadata maps.
///
pub use serde_json::Value;
