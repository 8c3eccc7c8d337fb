//! Exit code constants for the captioner CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state, save already running)
//! - 2: Template failure (no placeholders, malformed token, missing field)
//! - 3: Persistence failure (caption could not be stored)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, bad configuration, or invalid session state.
pub const USER_ERROR: i32 = 1;

/// Template failure: the template could not be tokenized or rendered.
pub const TEMPLATE_FAILURE: i32 = 2;

/// Persistence failure: the endpoint or filesystem rejected the caption.
pub const PERSISTENCE_FAILURE: i32 = 3;
