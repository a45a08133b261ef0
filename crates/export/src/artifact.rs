//! Export artifacts

use crate::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Path, PathBuf};
use store::FileFormat;

/// Base name shared by every exported file
pub const ARTIFACT_STEM: &str = "markdown-preview";

/// A finished export, ready to be saved or handed to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub format: FileFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(format: FileFormat, bytes: Vec<u8>) -> Self {
        Self {
            format,
            file_name: format!("{}.{}", ARTIFACT_STEM, format.extension()),
            bytes,
        }
    }

    pub fn media_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact under its file name in `dir`, creating the directory.
    ///
    /// The bytes go to a sibling `.part` file first, so a failed write never
    /// leaves a truncated artifact under the final name.
    pub async fn save_into(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        let partial = dir.join(format!("{}.part", self.file_name));
        if let Err(err) = tokio::fs::write(&partial, &self.bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(err.into());
        }
        tokio::fs::rename(&partial, &path).await?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Saved artifact");
        Ok(path)
    }

    /// The artifact as a `data:` URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type(), STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_names() {
        assert_eq!(Artifact::new(FileFormat::Png, vec![]).file_name, "markdown-preview.png");
        assert_eq!(Artifact::new(FileFormat::Pdf, vec![]).file_name, "markdown-preview.pdf");
        assert_eq!(Artifact::new(FileFormat::Docx, vec![]).file_name, "markdown-preview.docx");
    }

    #[test]
    fn test_data_url() {
        let artifact = Artifact::new(FileFormat::Png, b"abc".to_vec());
        assert_eq!(artifact.to_data_url(), "data:image/png;base64,YWJj");
    }

    #[tokio::test]
    async fn test_save_into_creates_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");
        let artifact = Artifact::new(FileFormat::Pdf, b"%PDF-1.4".to_vec());

        let path = artifact.save_into(&target).await.unwrap();
        assert_eq!(path, target.join("markdown-preview.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
        assert!(!target.join("markdown-preview.pdf.part").exists());
    }

    #[tokio::test]
    async fn test_save_into_replaces_previous_artifact() {
        let dir = TempDir::new().unwrap();
        Artifact::new(FileFormat::Png, vec![1; 64]).save_into(dir.path()).await.unwrap();
        let path = Artifact::new(FileFormat::Png, vec![2; 4]).save_into(dir.path()).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![2; 4]);
        let names: Vec<_> = std::fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names, vec!["markdown-preview.png"]);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_no_artifact() {
        let dir = TempDir::new().unwrap();
        // A directory squatting on the temp name makes the write fail
        std::fs::create_dir(dir.path().join("markdown-preview.docx.part")).unwrap();

        let result = Artifact::new(FileFormat::Docx, b"PK".to_vec()).save_into(dir.path()).await;
        assert!(result.is_err());
        assert!(!dir.path().join("markdown-preview.docx").exists());
    }
}
