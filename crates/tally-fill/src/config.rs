//! Configuration for the gap filler

use crate::domain::errors::ConfigError;
use crate::domain::value_objects::Span;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;

/// Propagation configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillConfig {
    /// Rolling window lengths, in the order tasks are expanded
    pub spans: Vec<u32>,
    /// Drop enqueues of a task that is already waiting in the queue
    #[serde(default = "default_coalesce")]
    pub coalesce_pending: bool,
}

fn default_coalesce() -> bool {
    true
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            spans: vec![7, 30],
            coalesce_pending: true,
        }
    }
}

impl FillConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TALLY_SPANS`: comma separated span lengths (default: 7,30)
    /// - `TALLY_COALESCE`: coalesce pending duplicates (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let spans = match env::var("TALLY_SPANS") {
            Ok(raw) => parse_spans(&raw)?,
            Err(_) => defaults.spans,
        };

        let coalesce_pending = env::var("TALLY_COALESCE")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(defaults.coalesce_pending);

        Ok(Self {
            spans,
            coalesce_pending,
        })
    }

    /// Spans checked for emptiness, zero lengths and duplicates.
    pub fn validated_spans(&self) -> Result<Vec<Span>, ConfigError> {
        if self.spans.is_empty() {
            return Err(ConfigError::NoSpans);
        }

        let mut seen = HashSet::new();
        let mut spans = Vec::with_capacity(self.spans.len());
        for &len in &self.spans {
            let span = Span::new(len).ok_or(ConfigError::ZeroSpan)?;
            if !seen.insert(span) {
                return Err(ConfigError::DuplicateSpan(len));
            }
            spans.push(span);
        }
        Ok(spans)
    }
}

/// Parse `"7, 30"` style span lists.
pub fn parse_spans(raw: &str) -> Result<Vec<u32>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>().map_err(|e| ConfigError::Unparsable {
                input: raw.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
