// Core Layer: Integer Status Codes
//
// Entry points driven through the launcher report an integer status instead of
// a Rust error. Success is 0, every error kind has its own negative code.

/// Operation status code
pub type Status = i32;

pub const SUCCESS: Status = 0;

pub const DIMENSION_MISMATCH: Status = -1;
pub const INDEX_OUT_OF_BOUNDS: Status = -2;
pub const DUPLICATE_COORDINATE: Status = -3;
pub const CAPACITY_EXCEEDED: Status = -4;
pub const DOMAIN_MISMATCH: Status = -5;
pub const NOT_RESIZED: Status = -6;
pub const INVALID_VALUE: Status = -7;
pub const UNKNOWN_SEMIRING: Status = -8;
pub const OUT_OF_MEMORY: Status = -9;

// Panic inside a launched entry function
pub const PANIC: Status = -101;

/// Helper to get a message for a status code
pub fn status_to_string(status: Status) -> &'static str {
    match status {
        SUCCESS => "SUCCESS: operation completed successfully",
        DIMENSION_MISMATCH => "DIMENSION_MISMATCH: dimension mismatch between operands",
        INDEX_OUT_OF_BOUNDS => "INDEX_OUT_OF_BOUNDS: index exceeds container dimensions",
        DUPLICATE_COORDINATE => "DUPLICATE_COORDINATE: coordinate appears more than once",
        CAPACITY_EXCEEDED => "CAPACITY_EXCEEDED: container capacity is insufficient",
        DOMAIN_MISMATCH => "DOMAIN_MISMATCH: type mismatch between operands",
        NOT_RESIZED => "NOT_RESIZED: execute phase without a matching resize phase",
        INVALID_VALUE => "INVALID_VALUE: invalid parameter value",
        UNKNOWN_SEMIRING => "UNKNOWN_SEMIRING: no semiring registered under that name",
        OUT_OF_MEMORY => "OUT_OF_MEMORY: memory allocation failed",
        PANIC => "PANIC: entry function panicked",
        _ => "Unknown status code",
    }
}
