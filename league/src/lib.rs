
pub mod error;
pub mod outcome;
pub mod rating;
pub mod record;
pub mod registry;
pub mod selection;

pub use error::{Error, ErrorKind};
pub use outcome::Outcome;
pub use rating::{Rating, RatingEngine};
pub use record::{Metadata, OpponentId, OpponentRecord};
pub use registry::Registry;
pub use selection::SelectionPolicy;
