//! Error types for the interaction core
//!
//! Runtime input never fails: degenerate geometry, unknown elements and
//! out-of-range slides degrade to no-ops. Errors only surface while building
//! widgets from configuration.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum InteractionError {
    /// A configuration field holds an unusable value
    #[error("Invalid config: {field} ({reason})")]
    InvalidConfig { field: String, reason: String },

    /// A carousel needs at least one slide to wrap around
    #[error("Carousel must have at least one slide")]
    EmptyCarousel,

    /// Visibility thresholds are area ratios
    #[error("Invalid intersection threshold: {threshold} (expected 0.0..=1.0)")]
    InvalidThreshold { threshold: f64 },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl InteractionError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } | Self::InvalidThreshold { .. } => "config",
            Self::EmptyCarousel => "carousel",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for InteractionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = InteractionError::invalid_config("reveal.threshold", "above 1");
        assert!(matches!(error, InteractionError::InvalidConfig { .. }));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(InteractionError::EmptyCarousel.category(), "carousel");
        assert_eq!(
            InteractionError::InvalidThreshold { threshold: 1.5 }.category(),
            "config"
        );
        assert_eq!(
            InteractionError::invalid_config("slider.initial_position", "not finite").category(),
            "config"
        );
    }

    #[test]
    fn test_display() {
        let error = InteractionError::invalid_config("carousel.swipe_threshold_px", "negative");
        assert_eq!(
            error.to_string(),
            "Invalid config: carousel.swipe_threshold_px (negative)"
        );
    }

    #[test]
    fn test_serialization() {
        let error = InteractionError::InvalidThreshold { threshold: 1.5 };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: InteractionError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let converted: InteractionError = err.into();
        assert_eq!(converted.category(), "serialization");
    }
}
