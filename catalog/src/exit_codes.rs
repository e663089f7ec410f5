//! Stable exit codes for the catalog command line.

/// Every selected demonstration passed.
pub const OK: i32 = 0;
/// At least one demonstration failed or timed out.
pub const FAILED: i32 = 1;
/// Invalid invocation, configuration or catalog (e.g. a registration error).
pub const INVALID: i32 = 2;
