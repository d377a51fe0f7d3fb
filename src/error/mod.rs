// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              DcjsError (~24 bytes)
//!                     |
//!   +------+------+------+------+------+------+
//!   |      |      |      |      |      |      |
//!   v      v      v      v      v      v      v
//! Bail    Git    Cfg   Hook  Hist   Proc   Fs  Io/Other
//!         Box    Box    Box   Box    Box   Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git     Gix, CommandFailed, Conflict, NoUpstream
//!   Config  ParseError, MissingKey, InvalidValue
//!   Hook    InvalidWorkspace, NotARepository, WriteFailed
//!   History NotFound, Corrupt, Diverged
//!   Process ExecutableNotFound, SpawnFailed
//!   Fs      NotFound, PermissionDenied, IoError
//!
//! All variants boxed => DcjsError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DcjsError`].
pub type DcjsResult<T> = std::result::Result<T, DcjsError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum DcjsError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Hook installation error.
    #[error("hook error: {0}")]
    Hook(#[from] Box<HookError>),

    /// Reset history error.
    #[error("history error: {0}")]
    History(#[from] Box<HistoryError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`DcjsError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> DcjsError {
    DcjsError::Bailed(message.into().into_boxed_str())
}

impl DcjsError {
    /// Returns the git error if this is one.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(&**err),
            _ => None,
        }
    }

    /// Returns true if this error is a merge or patch conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self.as_git(), Some(GitError::Conflict { .. }))
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for DcjsError {
                fn from(err: $error) -> Self {
                    DcjsError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    HookError => Hook,
    HistoryError => History,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Git reported a merge or patch conflict.
    #[error("conflict while running {command}: {details}")]
    Conflict { command: String, details: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Uncommitted changes detected when clean working tree required.
    #[error("uncommitted changes in {path}")]
    UncommittedChanges { path: String },

    /// HEAD does not point at a branch.
    #[error("HEAD is detached in {path}")]
    DetachedHead { path: String },

    /// Branch has no upstream to compare against.
    #[error("branch '{branch}' has no upstream")]
    NoUpstream { branch: String },

    /// Unpushed range contains merge commits that cannot be replayed.
    #[error("unpushed commits on '{branch}' include {count} merge commit(s)")]
    MergeCommits { branch: String, count: usize },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Hook Errors ---

/// Git hook installation errors.
#[derive(Debug, Error)]
pub enum HookError {
    /// Workspace root was empty or blank.
    #[error("invalid workspace root path")]
    InvalidWorkspace,

    /// Workspace root is not inside a git repository.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// Writing a hook file failed.
    #[error("failed to write hook '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- History Errors ---

/// Reset history errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No history entry at the given index.
    #[error("no reset recorded at index {index} ({len} available)")]
    NotFound { index: usize, len: usize },

    /// History file could not be parsed.
    #[error("history file '{path}' is corrupt: {message}")]
    Corrupt { path: String, message: String },

    /// Branch moved since the rewrite was recorded.
    #[error("HEAD is {actual}, expected {expected}; the branch changed since the reset")]
    Diverged { expected: String, actual: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an I/O error on `path`.
    pub fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let display = path.display().to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(display),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(display),
            _ => Self::IoError {
                path: display,
                source,
            },
        }
    }
}
