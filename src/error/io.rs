use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("search directory does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to resolve path '{path}': {source}")]
    ResolveError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create directory '{path}': {source}")]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to link '{link}' -> '{target}': {source}")]
    LinkError {
        link: PathBuf,
        target: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IoError {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    pub fn resolve_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResolveError {
            path: path.into(),
            source,
        }
    }

    pub fn create_dir_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDirError {
            path: path.into(),
            source,
        }
    }

    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    pub fn link_error(
        link: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::LinkError {
            link: link.into(),
            target: target.into(),
            source,
        }
    }
}
