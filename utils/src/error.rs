
///
/// Process-level error handling. Domain errors with a fixed set of kinds live
/// next to their domain; everything that only needs to be reported goes through here.
///
pub use anyhow::{Context, Error, Result};

///
/// Builds an ad-hoc error from a format string.
///
pub use anyhow::anyhow as error;

///
/// Returns early with an ad-hoc error.
///
pub use anyhow::bail;
