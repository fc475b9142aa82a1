//! Common types used across the client

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier (products, movements)
pub type EntityId = i64;

/// Milliseconds since the Unix epoch, as stored in the browser caches
pub type TimestampMillis = i64;

/// Formats the client can hand to an exporter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
        }
    }
}
