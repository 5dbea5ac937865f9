//! Error types for scene construction and configuration.

/// Errors raised while loading configuration or building a scene.
///
/// Gameplay failure (touching a bomb) is not an error; it is a state
/// transition recorded on [`crate::game::state::SceneState`].
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Configuration values are out of range or inconsistent.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Configuration file is not valid JSON for [`crate::config::SimConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SceneError>;
