//! Startup errors
//!
//! Everything that can go wrong while bootstrapping a demo. Once a session
//! is running there is nothing left to fail; render hiccups are logged and
//! recovered in the renderer.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// No global `window` (not running in a browser main thread)
    NoWindow,
    /// Required host element is absent from the page
    MissingElement { id: String },
    /// Host element exists but has the wrong type
    WrongElementType { id: String, expected: &'static str },
    /// A setting is out of its accepted range
    InvalidSetting { name: &'static str, reason: String },
    /// GPU adapter/device/surface could not be created
    Renderer(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NoWindow => write!(f, "no browser window available"),
            SetupError::MissingElement { id } => {
                write!(f, "required element #{} not found in the page", id)
            }
            SetupError::WrongElementType { id, expected } => {
                write!(f, "element #{} is not a {}", id, expected)
            }
            SetupError::InvalidSetting { name, reason } => {
                write!(f, "invalid setting `{}`: {}", name, reason)
            }
            SetupError::Renderer(msg) => write!(f, "renderer setup failed: {}", msg),
        }
    }
}

impl std::error::Error for SetupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_message_names_the_id() {
        let err = SetupError::MissingElement {
            id: "viewport".to_string(),
        };
        assert_eq!(err.to_string(), "required element #viewport not found in the page");
    }

    #[test]
    fn test_invalid_setting_message() {
        let err = SetupError::InvalidSetting {
            name: "restitution",
            reason: "1.5 is outside [0, 1]".to_string(),
        };
        assert!(err.to_string().contains("restitution"));
        assert!(err.to_string().contains("1.5"));
    }
}
