
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle, with_thread, WriteMode};
use super::error::*;

///
/// Macros to write to the backing file logger.
///
pub use log::{trace as trace, debug as debug, info as info, warn as warn, error as error};

///
/// Starts the logstream, writing to a timestamped file in the given directory at the
/// given level specification. Warnings and errors are duplicated to stderr.
///
/// The returned handle must be kept alive for as long as the process logs; dropping it
/// flushes and closes the file.
///
pub fn initialize (path: & str, filename: & str, spec: & str) -> Result<LoggerHandle>
{
    let file_spec = FileSpec::default()
        .directory(path)
        .basename(filename)
        .use_timestamp(true)
        .suffix("log");

    let handle = Logger::try_with_str(spec)
        .with_context(|| format!("Invalid log specification '{}'.", spec))?
        .log_to_file(file_spec)
        .write_mode(WriteMode::BufferAndFlush)
        .duplicate_to_stderr(Duplicate::Warn)
        .format_for_files(with_thread)
        .start()
        .with_context(|| format!("Could not start logging into '{}'.", path))?;

    Ok(handle)
}
