//! CLI Exit Code Registry
//!
//! Single source of truth for `listcheck` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success                                                   |
//! | 1    | General error (unreadable or malformed CSV)               |
//! | 2    | Usage error (bad arguments, input or config file missing) |
//! | 3    | Invalid configuration (bad TOML, missing column)          |
//! | 4    | Output could not be written                               |
//!
//! Finding do-not-contact hits or duplicates is a successful run.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing input file.
pub const EXIT_USAGE: u8 = 2;

/// Config TOML failed to parse or validate, or a mapped column is absent.
pub const EXIT_CONFIG: u8 = 3;

/// Writing the output CSV or summary report failed.
pub const EXIT_IO: u8 = 4;
