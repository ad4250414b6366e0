//! Writes receipts to disk as plain text.
//!
//! Stands in for the image exporter: the receipt keeps its `.jpg` file
//! stem but is saved with a `.txt` extension next to it.

use std::path::PathBuf;

use async_trait::async_trait;
use receipt_core::{ExportError, ExportRequest, ReceiptExporter};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TextFileExporter {
    out_dir: PathBuf,
}

impl TextFileExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Where a receipt named `file_name` ends up.
    pub fn output_path(
        &self,
        file_name: &str,
    ) -> PathBuf {
        self.out_dir.join(file_name).with_extension("txt")
    }
}

#[async_trait]
impl ReceiptExporter for TextFileExporter {
    async fn export(
        &self,
        request: &ExportRequest<'_>,
    ) -> Result<(), ExportError> {
        let path = self.output_path(request.file_name);
        debug!(
            path = %path.display(),
            format = request.settings.format.mime_type(),
            "writing receipt"
        );

        tokio::fs::create_dir_all(&self.out_dir).await?;
        tokio::fs::write(&path, request.receipt.to_string()).await?;
        Ok(())
    }
}
