//! Transit operator code type.

use std::fmt;

/// Error returned when parsing an invalid operator code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid operator code: {reason}")]
pub struct InvalidOperatorCode {
    reason: &'static str,
}

/// A valid 2-character transit operator code.
///
/// Operator codes scope stop-catalogue queries to one transit agency
/// (e.g. "AC" for AC Transit, "3D" for Tri Delta Transit). They are
/// always 2 uppercase ASCII letters or digits.
///
/// # Examples
///
/// ```
/// use bus_planner::domain::OperatorCode;
///
/// let ac = OperatorCode::parse("AC").unwrap();
/// assert_eq!(ac.as_str(), "AC");
///
/// // Digits are allowed
/// assert!(OperatorCode::parse("3D").is_ok());
///
/// // Lowercase is rejected
/// assert!(OperatorCode::parse("ac").is_err());
///
/// // Wrong length is rejected
/// assert!(OperatorCode::parse("A").is_err());
/// assert!(OperatorCode::parse("ACT").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorCode([u8; 2]);

impl OperatorCode {
    /// Parse an operator code from a string.
    ///
    /// The input must be exactly 2 uppercase ASCII letters (A-Z) or
    /// digits (0-9).
    pub fn parse(s: &str) -> Result<Self, InvalidOperatorCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidOperatorCode {
                reason: "must be exactly 2 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() && !b.is_ascii_digit() {
                return Err(InvalidOperatorCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        Ok(OperatorCode([bytes[0], bytes[1]]))
    }

    /// Returns the operator code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII letters and digits
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for OperatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperatorCode({})", self.as_str())
    }
}

impl fmt::Display for OperatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
