//! Hand-off of a finished receipt to an image exporter.
//!
//! Rasterizing is someone else's job; this module fixes the encoding
//! parameters, defines the [`ReceiptExporter`] seam and guarantees that at
//! most one export runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::receipt::ReceiptView;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rasterization failed: {0}")]
    Rasterize(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Encoding parameters passed to the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExportSettings {
    pub format: ImageFormat,
    /// Encoder quality in `0.0..=1.0`.
    pub quality: f32,
    /// Device pixel ratio used when rasterizing.
    pub scale: f32,
    pub background: &'static str,
}

/// JPEG at maximum quality, 3x scale, on white.
pub const RECEIPT_EXPORT_SETTINGS: ExportSettings = ExportSettings {
    format: ImageFormat::Jpeg,
    quality: 1.0,
    scale: 3.0,
    background: "#ffffff",
};

/// Everything an exporter needs to produce one receipt file.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub receipt: &'a ReceiptView,
    pub file_name: &'a str,
    pub settings: ExportSettings,
}

/// Image-export collaborator.
#[async_trait]
pub trait ReceiptExporter: Send + Sync {
    async fn export(
        &self,
        request: &ExportRequest<'_>,
    ) -> Result<(), ExportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported { file_name: String },
    /// Another export was still running; this request did nothing.
    AlreadyInFlight,
    /// No invoice has been submitted yet.
    NothingToExport,
}

/// Tracks whether an export is currently running.
#[derive(Debug, Default)]
pub struct ExportGate {
    in_flight: AtomicBool,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Marks an export as started. Returns `None` if one is already running.
    /// The flag is cleared when the returned guard is dropped.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { gate: self })
    }
}

/// Held for the duration of one export.
#[derive(Debug)]
pub struct InFlight<'a> {
    gate: &'a ExportGate,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn settings_are_max_quality_jpeg_on_white() {
        assert_eq!(RECEIPT_EXPORT_SETTINGS.format.mime_type(), "image/jpeg");
        assert_eq!(RECEIPT_EXPORT_SETTINGS.quality, 1.0);
        assert_eq!(RECEIPT_EXPORT_SETTINGS.scale, 3.0);
        assert_eq!(RECEIPT_EXPORT_SETTINGS.background, "#ffffff");
    }

    #[test]
    fn second_begin_fails_while_guard_is_held() {
        let gate = ExportGate::new();

        let guard = gate.try_begin();
        assert!(guard.is_some());
        assert!(gate.is_in_flight());
        assert!(gate.try_begin().is_none());

        drop(guard);
        assert!(!gate.is_in_flight());
        assert!(gate.try_begin().is_some());
    }
}
