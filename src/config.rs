use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BagTagError, Result};
use crate::header::TagHeader;

/// Output buffer size used by the tag printing application.
pub const DEFAULT_CAPACITY: usize = 600;

/// Runtime configuration for the bag tag codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Size of the fixed output buffer in bytes.
    pub capacity: usize,
    /// Run the whole buffer, padding included, through the printable
    /// transform instead of only the meaningful prefix.
    pub pad_printable: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            pad_printable: false,
        }
    }
}

impl CodecConfig {
    /// Load a configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        serde_json::from_slice(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Check that a tag described by `header` fits the buffer.
    pub fn check_fits(&self, header: &TagHeader) -> Result<()> {
        let needed = header.encoded_len();
        if needed > self.capacity {
            return Err(BagTagError::Config(format!(
                "tag needs {needed} bytes but capacity is {}",
                self.capacity
            )));
        }
        Ok(())
    }
}
