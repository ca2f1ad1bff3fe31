//! Construction-time parameters for a framer instance.

use crate::error::{Error, Result};

/// Tag key used when none is configured.
pub const DEFAULT_FRAME_TAG: &str = "packet_len";

/// Parameters fixed for the lifetime of a producer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FramerConfig {
    /// Key attached to every frame-start annotation.
    pub frame_tag_name: String,
    /// Idle zero bits sent ahead of the opening flag.
    pub tx_delay: usize,
    /// Reject payloads longer than this many bytes.
    pub max_payload_len: Option<usize>,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            frame_tag_name: DEFAULT_FRAME_TAG.to_string(),
            tx_delay: 0,
            max_payload_len: None,
        }
    }
}

impl FramerConfig {
    pub fn new(frame_tag_name: impl Into<String>) -> Self {
        Self {
            frame_tag_name: frame_tag_name.into(),
            ..Self::default()
        }
    }

    pub fn tx_delay(mut self, tx_delay: usize) -> Self {
        self.tx_delay = tx_delay;
        self
    }

    pub fn max_payload_len(mut self, max: usize) -> Self {
        self.max_payload_len = Some(max);
        self
    }

    /// Checks that the parameters describe a usable framer.
    pub fn validate(&self) -> Result<()> {
        if self.frame_tag_name.trim().is_empty() {
            return Err(Error::invalid_config("frame_tag_name must not be empty"));
        }
        Ok(())
    }

    /// Parses and validates a JSON document, filling absent fields with defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = FramerConfig::default();
        assert_eq!(c.frame_tag_name, DEFAULT_FRAME_TAG);
        assert_eq!(c.tx_delay, 0);
        assert_eq!(c.max_payload_len, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let c = FramerConfig::new("burst").tx_delay(24).max_payload_len(255);
        assert_eq!(c.frame_tag_name, "burst");
        assert_eq!(c.tx_delay, 24);
        assert_eq!(c.max_payload_len, Some(255));
    }

    #[test]
    fn test_empty_tag_rejected() {
        assert!(matches!(
            FramerConfig::new("  ").validate(),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let c = FramerConfig::from_json_str(r#"{"tx_delay": 16}"#).unwrap();
        assert_eq!(c.tx_delay, 16);
        assert_eq!(c.frame_tag_name, DEFAULT_FRAME_TAG);

        assert!(matches!(
            FramerConfig::from_json_str(r#"{"frame_tag_name": ""}"#),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            FramerConfig::from_json_str("{"),
            Err(Error::Json(_))
        ));
    }
}
