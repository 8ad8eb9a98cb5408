use std::fmt;

use thiserror::Error;

/// Errors that can occur while operating the recipe vault
#[derive(Error, Debug)]
pub enum VaultError {
    /// A recipe draft failed validation; nothing was persisted
    #[error("recipe validation failed: {0}")]
    Validation(ValidationErrors),

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP transport failure talking to the image-generation service
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The image-generation service answered with a non-success status
    #[error("image API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The image-generation response carried no image payload
    #[error("image API response contained no image data")]
    MissingImageData,

    /// Generated image payload could not be decoded
    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Filesystem failure while storing a generated image
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Per-field messages collected while validating a [`crate::model::RecipeDraft`].
///
/// `steps` is index-aligned with the draft's step list so a caller can surface
/// each message next to the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<String>,
    pub steps: Vec<Option<String>>,
    pub no_steps: bool,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && !self.no_steps && self.steps.iter().all(Option::is_none)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(title) = &self.title {
            parts.push(format!("title: {}", title));
        }
        if self.no_steps {
            parts.push("steps: at least one step is required".to_string());
        }
        for (index, message) in self.steps.iter().enumerate() {
            if let Some(message) = message {
                parts.push(format!("step {}: {}", index + 1, message));
            }
        }
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let errors = ValidationErrors::default();
        assert!(errors.is_empty());
        assert_eq!(errors.to_string(), "");
    }

    #[test]
    fn test_display_collects_fields() {
        let errors = ValidationErrors {
            title: Some("Title cannot be blank".to_string()),
            steps: vec![None, Some("Step cannot be blank".to_string())],
            no_steps: false,
        };
        assert!(!errors.is_empty());
        let rendered = errors.to_string();
        assert!(rendered.contains("title: Title cannot be blank"));
        assert!(rendered.contains("step 2: Step cannot be blank"));
    }
}
