use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for scaffolding and file manipulation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The target file does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The target file exists but could not be read.
    #[error("Unable to read {}: {source}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target file could not be written. The original content is left untouched.
    #[error("Unable to write {}: {source}", .path.display())]
    FileWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bundle name was empty or not a valid identifier.
    #[error("Invalid bundle name '{0}'")]
    InvalidBundleName(String),

    /// The bundle-level import key is already present in the routing file.
    #[error("Bundle '{bundle}' is already imported (key '{key}')")]
    AlreadyImported { bundle: String, key: String },

    /// A `Bundle:Controller` shortcut could not be parsed.
    #[error("Invalid controller shortcut '{0}' (expected AcmeBlogBundle:Post)")]
    InvalidShortcut(String),

    /// An action specification could not be parsed.
    #[error("Invalid action '{0}'")]
    InvalidAction(String),

    /// A routing format name is not one of annotation, yml, xml or php.
    #[error("Unknown routing format '{0}'. Available: annotation, yml, xml, php")]
    UnknownFormat(String),

    /// A file to generate already exists.
    #[error("File '{}' already exists", .0.display())]
    FileExists(PathBuf),

    /// The bundle class is already listed in `registerBundles()`.
    #[error("Bundle '{0}' is already registered in the kernel")]
    BundleAlreadyRegistered(String),

    /// The kernel file has no recognizable `registerBundles()` array.
    #[error("No registerBundles() bundle array found in {}", .0.display())]
    KernelPatternNotFound(PathBuf),

    /// A console command name is empty or malformed.
    #[error("Invalid command name '{0}' (expected app:foo-bar)")]
    InvalidCommandName(String),

    /// Configuration could not be loaded.
    #[error("Config load error: {0}")]
    Config(String),
}

impl Error {
    /// Map a read failure on `path` to the matching error variant.
    pub(crate) fn on_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound { path }
        } else {
            Error::FileUnreadable { path, source }
        }
    }
}
