//! Unknown record data, preserved as opaque bytes (RFC 3597).

use serde::{Deserialize, Serialize};
use std::fmt;

/// RDATA of a type this resolver does not model.
///
/// The payload is carried untouched so the record can be reported or passed
/// through; the cache rejects it at its conversion boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unknown {
    /// The numeric record type.
    type_code: u16,
    /// The raw RDATA bytes.
    data: Vec<u8>,
}

impl Unknown {
    /// Creates an unknown RDATA value.
    pub fn new(type_code: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            type_code,
            data: data.into(),
        }
    }

    /// Returns the numeric record type.
    #[inline]
    pub const fn type_code(&self) -> u16 {
        self.type_code
    }

    /// Returns the raw RDATA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // RFC 3597 generic encoding.
        write!(f, "\\# {}", self.data.len())?;
        for b in &self.data {
            write!(f, " {b:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_display() {
        let u = Unknown::new(4242, vec![0xde, 0xad]);
        assert_eq!(u.type_code(), 4242);
        assert_eq!(u.to_string(), "\\# 2 de ad");
    }
}
