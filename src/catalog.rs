use crate::err::HostError;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// What the server is willing to hand out. Chosen once at startup,
/// read-only for the rest of the process.
pub enum Catalog {
    FixedFiles(ServableSet),
    HostedFolder { root: PathBuf },
}

impl Catalog {
    /// Loads every file fully into memory. Slot 0 is the first file given
    /// and doubles as the root default.
    pub async fn fixed_files(paths: &[PathBuf]) -> Result<Self, HostError> {
        Ok(Catalog::FixedFiles(ServableSet::load(paths).await?))
    }

    /// Canonicalizes the hosted root so later containment checks have a
    /// stable prefix to compare against.
    pub async fn hosted_folder(path: &Path) -> Result<Self, HostError> {
        let root = tokio::fs::canonicalize(path)
            .await
            .map_err(|_| HostError::FolderMissing(path.to_owned()))?;
        if !tokio::fs::metadata(&root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            return Err(HostError::FolderMissing(path.to_owned()));
        }
        Ok(Catalog::HostedFolder { root })
    }
}

/// Ordered (name, content) pairs for fixed-file mode, addressed by slot index.
pub struct ServableSet {
    entries: Vec<(String, Bytes)>,
}

impl ServableSet {
    async fn load(paths: &[PathBuf]) -> Result<Self, HostError> {
        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let content = tokio::fs::read(path)
                .await
                .map_err(|_| HostError::FileMissing(path.clone()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            entries.push((name, Bytes::from(content)));
        }
        Ok(Self { entries })
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<(&str, &Bytes)> {
        self.entries
            .get(index)
            .map(|(name, content)| (name.as_str(), content))
    }
}
