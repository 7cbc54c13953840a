//! Error codes for compiler diagnostics.
//!
//! Each code is a unique identifier (e.g. `E0401`) with the first digit
//! indicating the compiler phase. Codes are stable: renumbering breaks
//! documentation links and downstream tooling.

use std::fmt;

/// Error codes for compiler diagnostics.
///
/// Format: E#### where the leading digits indicate the phase:
/// - E01xx: Lexer errors
/// - E02xx: Parser errors
/// - E03xx: Import resolution errors
/// - E04xx: Expansion errors
/// - E05xx: Emitter errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Expansion Errors (E04xx)
    /// Invocation names a mixin not visible in the current scope chain
    E0401,
    /// Resolved `@import` target missing from the import registry
    E0402,
    /// `@content` used outside any mixin invocation that supplies a body
    E0403,
    /// Argument binding failed (arity mismatch, unknown named argument,
    /// missing required argument)
    E0404,
    /// Expression evaluation failed during expansion
    E0405,
    /// Expansion met a construct it does not handle (warning)
    E0406,
}

impl ErrorCode {
    /// The code as it appears in rendered diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0401 => "E0401",
            ErrorCode::E0402 => "E0402",
            ErrorCode::E0403 => "E0403",
            ErrorCode::E0404 => "E0404",
            ErrorCode::E0405 => "E0405",
            ErrorCode::E0406 => "E0406",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
