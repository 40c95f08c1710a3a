//! Directory of generated forms

use crate::Result;
use std::path::{Component, Path, PathBuf};

/// Directory that generated PDFs are written to and served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Use `root` as the output directory, creating it if needed
    pub fn create<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name of the form generated for a chat message
    pub fn file_name_for(message_id: &str) -> String {
        format!("ot_{message_id}.pdf")
    }

    /// Full path of the form generated for a chat message
    pub fn path_for(&self, message_id: &str) -> PathBuf {
        self.root.join(Self::file_name_for(message_id))
    }

    /// Resolve a requested file name to an existing file in this directory
    ///
    /// Only a single plain path component is accepted; anything that could
    /// climb out of the directory resolves to `None`.
    pub fn open(&self, filename: &str) -> Option<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == filename => {}
            _ => return None,
        }
        if filename.contains(['/', '\\']) {
            return None;
        }

        let path = self.root.join(filename);
        path.is_file().then_some(path)
    }
}
