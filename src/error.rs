use ark_std::fmt;

use ark_std::string::String;
use core::fmt::Formatter;
/// Error type for this crate
#[derive(fmt::Debug)]
pub enum Error {
    /// More elements or coefficients were requested than the degree bound `q` allows.
    CapacityExceeded {
        /// number of elements (or coefficients) requested
        requested: usize,
        /// what the commitment key supports
        capacity: usize,
    },
    /// An algebraic identity that holds by construction did not hold. This is a caller
    /// precondition violation (e.g. proving membership of an absent element) or corrupted data.
    InvariantViolation(Option<String>),
    /// A commitment key failed its consistency checks.
    ParameterCorruption(Option<String>),
    /// The argument is malformed.
    InvalidArgument(Option<String>),
    /// IO Error
    IOError,
    /// Serialization Error
    SerializationError,
}

/// result used for this crate
pub type SResult<T> = Result<T, Error>;

pub(crate) fn capacity_exceeded(requested: usize, capacity: usize) -> Error {
    Error::CapacityExceeded {
        requested,
        capacity,
    }
}

pub(crate) fn invariant_violation(msg: &str) -> Error {
    Error::InvariantViolation(Some(msg.into()))
}

pub(crate) fn parameter_corruption(msg: &str) -> Error {
    Error::ParameterCorruption(Some(msg.into()))
}

pub(crate) fn invalid_args(msg: &str) -> Error {
    Error::InvalidArgument(Some(msg.into()))
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                capacity,
            } => write!(
                f,
                "requested {} elements, but the accumulator supports only {}",
                requested, capacity
            ),
            Self::InvariantViolation(Some(s)) => write!(f, "invariant violation: {}", s),
            Self::ParameterCorruption(Some(s)) => write!(f, "parameter corruption: {}", s),
            Self::InvalidArgument(Some(s)) => write!(f, "invalid argument: {}", s),
            _ => f.write_fmt(format_args!("{:?}", self)),
        }
    }
}

impl ark_std::error::Error for Error {}

impl From<ark_std::io::Error> for Error {
    fn from(_: ark_std::io::Error) -> Self {
        Self::IOError
    }
}

impl From<ark_serialize::SerializationError> for Error {
    fn from(_: ark_serialize::SerializationError) -> Self {
        Self::SerializationError
    }
}
