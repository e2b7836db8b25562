use thiserror::Error;

#[derive(Debug, Error)]
pub enum BonsaiError {
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("invalid grid {width}x{height}: both sides must be within 8..=256")]
    InvalidGrid { width: i32, height: i32 },

    #[error("tree has no active growth tips left (max height reached)")]
    Dormant,

    #[error("no bonsai with token id {0}")]
    TreeNotFound(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, BonsaiError>;
