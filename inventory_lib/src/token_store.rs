//! Credential provider that keeps the session's tokens in a JSON file, so a
//! login survives between CLI invocations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use inventory_api::{AuthTokens, CredentialProvider, MemoryCredentials};

use crate::error::InventoryError;

pub struct FileCredentials {
    path: PathBuf,
    tokens: MemoryCredentials,
}

impl FileCredentials {
    /// Loads tokens from `path`. A missing file is an empty (signed-out) store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let path = path.as_ref().to_path_buf();
        let tokens = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => MemoryCredentials::new(),
            Ok(contents) => {
                let stored: AuthTokens = serde_json::from_str(&contents)?;
                MemoryCredentials::with_tokens(stored)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemoryCredentials::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, tokens })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), InventoryError> {
        let Some(token) = self.tokens.access_token() else {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        };
        if let Some(parent) = self.path.parent() {
            create_private_dir(parent)?;
        }
        let stored = AuthTokens {
            token,
            refresh_token: self.tokens.refresh_token(),
        };
        let mut file = open_private(&self.path)?;
        file.write_all(serde_json::to_string_pretty(&stored)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

/// Truncates or creates `path` readable by the owner only.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten a file left by an older run.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl CredentialProvider for FileCredentials {
    fn access_token(&self) -> Option<String> {
        self.tokens.access_token()
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.refresh_token()
    }

    fn store(&self, tokens: &AuthTokens) {
        self.tokens.store(tokens);
        if let Err(e) = self.persist() {
            tracing::warn!("Failed to save tokens to {}: {}", self.path.display(), e);
        }
    }

    fn clear(&self) {
        self.tokens.clear();
        if let Err(e) = self.persist() {
            tracing::warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}
