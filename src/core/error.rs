// Core Layer: Rust Error Types

use crate::core::status::*;
use std::fmt;

/// Error type shared by every container and operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphBlasError {
    /// Operand dimensions do not agree
    DimensionMismatch,
    /// Index outside the container dimensions
    IndexOutOfBounds,
    /// The same coordinate was supplied more than once
    DuplicateCoordinate,
    /// Requested or required capacity cannot be provided
    CapacityExceeded,
    /// Type mismatch between operands
    DomainMismatch,
    /// Execute phase issued without a matching resize phase
    NotResized,
    /// Invalid parameter value
    InvalidValue,
    /// No semiring registered under the given name
    UnknownSemiring(String),
    /// Memory allocation failed
    OutOfMemory,
    /// Panic occurred inside a launched entry function
    Panic(String),
}

impl GraphBlasError {
    /// Convert to an integer status code
    pub fn to_status(&self) -> Status {
        match self {
            Self::DimensionMismatch => DIMENSION_MISMATCH,
            Self::IndexOutOfBounds => INDEX_OUT_OF_BOUNDS,
            Self::DuplicateCoordinate => DUPLICATE_COORDINATE,
            Self::CapacityExceeded => CAPACITY_EXCEEDED,
            Self::DomainMismatch => DOMAIN_MISMATCH,
            Self::NotResized => NOT_RESIZED,
            Self::InvalidValue => INVALID_VALUE,
            Self::UnknownSemiring(_) => UNKNOWN_SEMIRING,
            Self::OutOfMemory => OUT_OF_MEMORY,
            Self::Panic(_) => PANIC,
        }
    }

    /// Convert a status code back to an error, `None` for success
    pub fn from_status(status: Status) -> Option<Self> {
        match status {
            SUCCESS => None,
            DIMENSION_MISMATCH => Some(Self::DimensionMismatch),
            INDEX_OUT_OF_BOUNDS => Some(Self::IndexOutOfBounds),
            DUPLICATE_COORDINATE => Some(Self::DuplicateCoordinate),
            CAPACITY_EXCEEDED => Some(Self::CapacityExceeded),
            DOMAIN_MISMATCH => Some(Self::DomainMismatch),
            NOT_RESIZED => Some(Self::NotResized),
            UNKNOWN_SEMIRING => Some(Self::UnknownSemiring(String::new())),
            OUT_OF_MEMORY => Some(Self::OutOfMemory),
            PANIC => Some(Self::Panic("Unknown panic".to_string())),
            _ => Some(Self::InvalidValue),
        }
    }
}

impl fmt::Display for GraphBlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch => write!(f, "Dimension mismatch between operands"),
            Self::IndexOutOfBounds => write!(f, "Index exceeds container dimensions"),
            Self::DuplicateCoordinate => write!(f, "Duplicate coordinate in input"),
            Self::CapacityExceeded => write!(f, "Insufficient or invalid container capacity"),
            Self::DomainMismatch => write!(f, "Type mismatch between operands"),
            Self::NotResized => write!(f, "Execute phase without a matching resize phase"),
            Self::InvalidValue => write!(f, "Invalid parameter value"),
            Self::UnknownSemiring(name) => write!(f, "Unknown semiring: {}", name),
            Self::OutOfMemory => write!(f, "Memory allocation failed"),
            Self::Panic(msg) => write!(f, "Panic: {}", msg),
        }
    }
}

impl std::error::Error for GraphBlasError {}

/// Result type for sparse operations
pub type Result<T> = std::result::Result<T, GraphBlasError>;
