//! Error types

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VelcroError {
    #[error("Invalid blog name {0:?}: only A-Z, a-z, 0-9, hyphens and underscores are allowed")]
    InvalidBlogName(String),

    #[error("A folder with this name already exists: {0:?}")]
    AlreadyExists(PathBuf),

    #[error("Posts directory not found: {0:?}")]
    MissingPostsDir(PathBuf),

    #[error("Circular include detected: component {0:?} includes itself")]
    CircularInclude(String),

    #[error("Failed to read component {name:?}")]
    ComponentRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
