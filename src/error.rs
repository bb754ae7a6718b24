use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("failed to read catalog {path:?}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("catalog category `{0}` holds a link that is not an object")]
    MalformedLink(String),

    #[error("catalog has no `{0}` category")]
    MissingCategory(String),

    #[error("failed to read workspace file {path:?}: {source}")]
    WorkspaceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed workspace file {path:?}: {source}")]
    WorkspaceFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("workspace file {0:?} is not a JSON object")]
    WorkspaceNotObject(PathBuf),

    #[error("workspace file {0:?} has neither `folder` nor `workspace`")]
    MissingWorkspacePath(PathBuf),

    #[error("workspace path in {0:?} is not a string")]
    WorkspacePathType(PathBuf),

    #[error("item `{0}` has no action")]
    NoAction(String),

    #[error("cannot launch an empty command")]
    EmptyCommand,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PluginError>;
