//! Reading extraction from raw sensor command output.
//!
//! The sampling loop only sees the [`Extractor`] trait, so the sensor tool can
//! be swapped (free-form `sensors` text vs. `sensors -j` JSON) without touching
//! the loop itself.

use regex::Regex;
use serde_json::Value;

use crate::error::{ExporterError, Result};

/// CPU package temperature line of `sensors`, e.g. `Package id 0:  +45.0°C`.
pub const TEMPERATURE_PATTERN: &str = r"Package id 0:\s*\+([0-9.]+)°C";

/// AMD PPT power line. Not sampled; kept for the dormant power gauge.
pub const POWER_PATTERN: &str = r"PPT:\s*([0-9.]+)\s*W";

/// Pulls one textual reading out of a command's output.
pub trait Extractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<String>;
}

/// Regex with exactly one capture group; yields the first match's group.
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    re: Regex,
}

impl RegexExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| ExporterError::Pattern(e.to_string()))?;
        // captures_len counts the implicit whole-match group.
        if re.captures_len() != 2 {
            return Err(ExporterError::Pattern(format!(
                "expected exactly one capture group, found {} in {pattern:?}",
                re.captures_len() - 1
            )));
        }
        Ok(Self { re })
    }

    /// Extractor for the CPU package temperature.
    pub fn temperature() -> Result<Self> {
        Self::new(TEMPERATURE_PATTERN)
    }
}

impl Extractor for RegexExtractor {
    fn extract(&self, text: &str) -> Result<String> {
        self.re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ExporterError::NotFound(format!("pattern {:?}", self.re.as_str())))
    }
}

/// Resolves an RFC 6901 pointer in JSON output (e.g. `sensors -j`).
#[derive(Debug, Clone)]
pub struct JsonPointerExtractor {
    pointer: String,
}

impl JsonPointerExtractor {
    pub fn new(pointer: impl Into<String>) -> Result<Self> {
        let pointer = pointer.into();
        if !pointer.is_empty() && !pointer.starts_with('/') {
            return Err(ExporterError::Pattern(format!(
                "json pointer must be empty or start with '/': {pointer:?}"
            )));
        }
        Ok(Self { pointer })
    }
}

impl Extractor for JsonPointerExtractor {
    fn extract(&self, text: &str) -> Result<String> {
        let doc: Value = serde_json::from_str(text)
            .map_err(|e| ExporterError::NotFound(format!("output is not json: {e}")))?;

        match doc.pointer(&self.pointer) {
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ExporterError::NotFound(format!(
                "{:?} does not point at a scalar",
                self.pointer
            ))),
            None => Err(ExporterError::NotFound(format!("pointer {:?}", self.pointer))),
        }
    }
}

/// Parse an extracted reading as a float.
pub fn parse_reading(raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|source| ExporterError::Parse {
        input: raw.to_string(),
        source,
    })
}
