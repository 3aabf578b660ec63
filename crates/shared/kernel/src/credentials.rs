//! API key storage.
//!
//! Keys come from the environment first, then from a dotfile in the user's home
//! directory. Blank values count as absent.

use directories::UserDirs;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[urlc_derive::urlc_error]
pub enum CredentialError {
    #[error("Invalid API key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Credential error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// The services that need a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyKind {
    Serper,
    Groq,
}

impl ApiKeyKind {
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Serper => "SERPER_API_KEY",
            Self::Groq => "GROQ_API_KEY",
        }
    }

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Serper => ".url-collector",
            Self::Groq => ".groq-api-key",
        }
    }
}

/// Reads and writes key files under a home directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    home: PathBuf,
}

impl CredentialStore {
    /// Store rooted at the current user's home directory.
    pub fn from_home_dir() -> Result<Self, CredentialError> {
        let home = UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| CredentialError::from("home directory not found"))?;
        Ok(Self::with_home(home))
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    #[must_use]
    pub fn path(&self, kind: ApiKeyKind) -> PathBuf {
        self.home.join(kind.file_name())
    }

    /// Resolves a key from the process environment, then the key file.
    pub fn resolve(&self, kind: ApiKeyKind) -> Result<Option<String>, CredentialError> {
        self.resolve_with(kind, std::env::var(kind.env_var()).ok())
    }

    /// Resolves a key from `env_value`, then the key file.
    pub fn resolve_with(
        &self,
        kind: ApiKeyKind,
        env_value: Option<String>,
    ) -> Result<Option<String>, CredentialError> {
        if let Some(key) = non_blank(env_value) {
            debug!(var = kind.env_var(), "API key taken from environment");
            return Ok(Some(key));
        }
        self.load_file(kind)
    }

    /// Reads the trimmed key file; a missing or blank file is `None`.
    pub fn load_file(&self, kind: ApiKeyKind) -> Result<Option<String>, CredentialError> {
        let path = self.path(kind);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(non_blank(Some(raw))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CredentialError::Io {
                source,
                context: Some(format!("reading {}", path.display()).into()),
            }),
        }
    }

    /// Writes the key file, readable by the owner only on Unix.
    pub fn save(&self, kind: ApiKeyKind, key: &str) -> Result<PathBuf, CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::InvalidKey {
                message: "key must not be blank".into(),
                context: Some(kind.env_var().into()),
            });
        }

        let path = self.path(kind);
        write_private(&path, key).context(format!("writing {}", path.display()))?;
        info!(path = %path.display(), "API key saved");
        Ok(path)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;

    // `mode` only applies on creation.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}
