use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::domain::errors::{OutlineError, OutlineResult};
use crate::domain::models::OutlineDocument;
use crate::services::renderers::ReportFormat;

/// Writes the rendered report artifacts next to the scanned sources
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineWriter;

impl OutlineWriter {
    pub const fn new() -> Self {
        Self
    }

    /// Render every [`ReportFormat`] and write it into `dir` under its fixed
    /// file name, overwriting earlier reports. Returns the written paths in
    /// JSON, Markdown, text order.
    pub async fn write_all(
        &self,
        document: &OutlineDocument,
        dir: &Path,
    ) -> OutlineResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(ReportFormat::ALL.len());

        for format in ReportFormat::ALL {
            written.push(self.write_one(document, dir, format).await?);
        }

        info!(dir = %dir.display(), count = written.len(), "outline reports written");
        Ok(written)
    }

    pub async fn write_one(
        &self,
        document: &OutlineDocument,
        dir: &Path,
        format: ReportFormat,
    ) -> OutlineResult<PathBuf> {
        let path = dir.join(format.file_name());
        let contents = format.render(document)?;

        fs::write(&path, contents)
            .await
            .map_err(|source| OutlineError::OutputWrite {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::models::OUTLINE_TITLE;

    fn empty_document(root: &Path) -> OutlineDocument {
        OutlineDocument {
            title: OUTLINE_TITLE.to_string(),
            generated_at: Utc::now(),
            root_directory: root.to_path_buf(),
            total_files: 0,
            total_symbols: 0,
            files: vec![],
        }
    }

    #[tokio::test]
    async fn test_writes_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let document = empty_document(dir.path());

        let written = OutlineWriter::new()
            .write_all(&document, dir.path())
            .await
            .unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["driver_outline.json", "driver_outline.md", "driver_outline.txt"]
        );

        let json = std::fs::read_to_string(&written[0]).unwrap();
        let parsed: OutlineDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, document);

        let markdown = std::fs::read_to_string(&written[1]).unwrap();
        assert!(markdown.starts_with("# C/C++ File Outline"));
    }

    #[tokio::test]
    async fn test_missing_directory_is_output_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let document = empty_document(dir.path());

        let err = OutlineWriter::new()
            .write_all(&document, &missing)
            .await
            .unwrap_err();

        match err {
            OutlineError::OutputWrite { path, .. } => {
                assert_eq!(path, missing.join("driver_outline.json"));
            }
            other => panic!("expected OutputWrite, got {other:?}"),
        }
    }
}
