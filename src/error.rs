use std::error;
use std::fmt;
use std::io;
use std::result;

/// A type alias for `Result<T, csvlite::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur when reading or writing CSV data.
///
/// Note that parsing itself can never fail: unexpected quote placement is
/// given a deterministic (if permissive) interpretation, and end of input is
/// a normal terminal condition. The only errors that can occur come from the
/// underlying stream.
#[derive(Debug)]
pub enum Error {
    /// An I/O error from the underlying reader or writer. These are
    /// propagated unchanged; retry and abort policy belongs to the caller.
    Io(io::Error),
    /// An invalid or truncated UTF-8 sequence was found while decoding
    /// characters from the underlying reader.
    Utf8 {
        /// The line on which decoding failed, starting at `1` and counted
        /// by occurrences of `\n`.
        line: u64,
    },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::Utf8 { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::Utf8 { line } => {
                write!(f, "CSV decode error: invalid utf-8 on line {}", line)
            }
        }
    }
}
