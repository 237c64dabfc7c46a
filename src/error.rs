//! Error and result types shared by every layer of the crate.

/// The kinds of failure the column-chunk pipeline can produce.
#[derive(Debug)]
pub enum Error {
    /// A page header, thrift record, RLE varint or bit-pack run could not be parsed,
    /// or a CRC / statistics invariant did not hold.
    OutOfSpec(String),
    /// A reader encountered an encoding it does not implement, or an encoder was asked
    /// to handle a type or configuration it does not support.
    FeatureNotSupported(String),
    /// A value is out of range for its logical type, or a parameter (bit width, length)
    /// is invalid.
    InvalidParameter(String),
    /// The operation was attempted after the writer/reader was closed or had already
    /// failed.
    Closed,
    /// Propagated from the injected I/O sink or source.
    Io(std::io::Error),
}

impl Error {
    /// Shorthand for an out-of-spec error.
    pub fn oos<A: Into<String>>(msg: A) -> Self {
        Error::OutOfSpec(msg.into())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::OutOfSpec(message) => write!(fmt, "out of spec: {}", message),
            Error::FeatureNotSupported(message) => write!(fmt, "not supported: {}", message),
            Error::InvalidParameter(message) => write!(fmt, "invalid parameter: {}", message),
            Error::Closed => write!(fmt, "operation attempted on a closed writer/reader"),
            Error::Io(e) => write!(fmt, "IO error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<std::array::TryFromSliceError> for Error {
    fn from(e: std::array::TryFromSliceError) -> Self {
        Error::OutOfSpec(e.to_string())
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(e: std::num::TryFromIntError) -> Self {
        Error::OutOfSpec(e.to_string())
    }
}

#[cfg(feature = "snappy")]
impl From<snap::Error> for Error {
    fn from(e: snap::Error) -> Self {
        Error::OutOfSpec(format!("snappy: {}", e))
    }
}

/// A specialized [`Result`] for this crate's errors.
pub type Result<T> = std::result::Result<T, Error>;

macro_rules! oos {
    ($fmt:expr) => ($crate::error::Error::OutOfSpec($fmt.to_string()));
    ($fmt:expr, $($args:expr),*) => ($crate::error::Error::OutOfSpec(format!($fmt, $($args),*)));
}
