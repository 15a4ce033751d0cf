use std::fmt;

use crate::error::{Result, SecurityError, XmlError, XmlErrorKind};

/// Maximum element nesting depth (64) based on common document shapes
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Maximum input size (8MB) to prevent memory exhaustion attacks
pub const DEFAULT_MAX_SIZE: usize = 8_388_608; // 8MB

/// Configuration for builder limits and validation
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum nesting depth for elements
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl fmt::Display for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParserConfig {{ max_depth: {}, max_size: {} }}",
            self.max_depth, self.max_size
        )
    }
}

impl ParserConfig {
    pub fn validate_input_size(&self, len: usize) -> Result<()> {
        if len > self.max_size {
            return Err(XmlError::new(XmlErrorKind::Security(
                SecurityError::MaxSizeExceeded,
            )));
        }
        Ok(())
    }

    pub fn validate_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(XmlError::new(XmlErrorKind::Security(
                SecurityError::MaxDepthExceeded,
            )));
        }
        Ok(())
    }
}
