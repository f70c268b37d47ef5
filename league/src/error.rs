
use utils::{Serialize, Deserialize};

///
/// The failure classes a registry operation can report to its caller.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind 
{
    InvalidArgument,
    NotFound,
    Conflict
}

impl std::fmt::Display for ErrorKind 
{
    fn fmt (& self, f: & mut std::fmt::Formatter<'_>) -> std::fmt::Result 
    {
        let name = match self 
        {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::NotFound        => "NotFound",
            ErrorKind::Conflict        => "Conflict"
        };
        write!(f, "{}", name)
    }
}

///
/// An error raised by the opponent registry. None of these are fatal, and a
/// failed operation never leaves the registry partially mutated.
///
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error 
{
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    /// Reserved for retirement and versioning of opponents.
    #[error("{0}")]
    Conflict(String)
}

impl Error 
{
    ///
    /// Returns the class of this error.
    ///
    pub fn kind (& self) -> ErrorKind 
    {
        match self 
        {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::NotFound(_)        => ErrorKind::NotFound,
            Error::Conflict(_)        => ErrorKind::Conflict
        }
    }

    pub fn invalid (message: impl Into<String>) -> Error 
    {
        Error::InvalidArgument(message.into())
    }

    pub fn not_found (message: impl Into<String>) -> Error 
    {
        Error::NotFound(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
