use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Credential;

/// File-backed credential store. Every mutation is a single
/// load-mutate-persist transaction over the whole collection; the rewrite is
/// truncate-in-place, so a crash mid-write can leave a corrupt file.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default backing file under the platform data directory, parent created
    /// on demand.
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no platform data directory",
                ))
            })?
            .join("passkeep");

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }

        Ok(data_dir.join("passwords.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the whole collection. A missing backing file is an empty store,
    /// not an error.
    pub fn load_all(&self) -> Result<Vec<Credential>> {
        match fs::read(&self.path) {
            Ok(content) => {
                serde_json::from_slice(&content).map_err(|source| Error::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn append(&self, credential: Credential) -> Result<()> {
        let mut credentials = self.load_all()?;
        credentials.push(credential);
        self.persist(&credentials)?;
        debug!(len = credentials.len(), "appended credential");
        Ok(())
    }

    pub fn replace_at(&self, index: usize, credential: Credential) -> Result<()> {
        let mut credentials = self.load_all()?;
        let len = credentials.len();
        let slot = credentials
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *slot = credential;
        self.persist(&credentials)?;
        debug!(index, "replaced credential");
        Ok(())
    }

    pub fn delete_at(&self, index: usize) -> Result<()> {
        let mut credentials = self.load_all()?;
        if index >= credentials.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: credentials.len(),
            });
        }
        credentials.remove(index);
        self.persist(&credentials)?;
        debug!(index, len = credentials.len(), "deleted credential");
        Ok(())
    }

    /// Import: discards the current collection and persists `credentials`
    /// verbatim.
    pub fn replace_all(&self, credentials: &[Credential]) -> Result<()> {
        self.persist(credentials)?;
        debug!(len = credentials.len(), "replaced collection");
        Ok(())
    }

    /// Export: writes the current collection, in the same array-of-objects
    /// shape, to a caller-chosen destination.
    pub fn dump_all(&self, dest: impl AsRef<Path>) -> Result<Vec<Credential>> {
        let credentials = self.load_all()?;
        let content = serde_json::to_vec(&credentials).map_err(std::io::Error::from)?;
        fs::write(dest, content)?;
        Ok(credentials)
    }

    pub fn search(&self, query: &str) -> Result<Vec<(usize, Credential)>> {
        let credentials = self.load_all()?;
        Ok(credentials
            .into_iter()
            .enumerate()
            .filter(|(_, c)| c.matches(query))
            .collect())
    }

    fn persist(&self, credentials: &[Credential]) -> Result<()> {
        let content = serde_json::to_vec(credentials).map_err(std::io::Error::from)?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        // Plaintext at rest; keep the file owner-only.
        #[cfg(unix)]
        {
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            file.set_permissions(perms)?;
        }

        file.write_all(&content)?;
        Ok(())
    }
}
