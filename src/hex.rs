// ABOUTME: Hex rendering for signatures, markers and user data headers in diagnostics

use std::fmt;

/// Uppercase hex rendering of a byte slice, without separators.
#[derive(Debug, Clone, Copy)]
pub struct HexData<'a>(pub &'a [u8]);

impl fmt::Display for HexData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}
