//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — pipeline scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | gap              | Gap-analysis-specific codes              |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Gap analysis (3-9)
// =============================================================================

/// Config file unreadable, malformed, or failing validation.
pub const EXIT_GAP_INVALID_CONFIG: u8 = 3;

/// Parse error in an input file (checklist, record extract, grade file).
pub const EXIT_GAP_PARSE: u8 = 4;

/// Runtime error (unreadable input, undecodable encoding, write failure).
pub const EXIT_GAP_RUNTIME: u8 = 5;
