//! Process exit codes.

pub const SUCCESS: i32 = 0;

/// Any command failure, including argument errors.
pub const ERROR: i32 = 2;
