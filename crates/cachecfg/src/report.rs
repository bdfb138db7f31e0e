//! Validation report rendering

use anyhow::Result;
use cachecfg_core::{CodedError, ErrorCode, UsageStats};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;

/// Output format of the report printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Outcome of validating one input
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<UsageStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    pub cause: String,
}

impl From<&CodedError> for ErrorReport {
    fn from(err: &CodedError) -> Self {
        Self {
            code: err.code(),
            message: err.message().to_string(),
            cause: err.cause().to_string(),
        }
    }
}

impl Report {
    pub fn new(
        source: impl Into<String>,
        result: &Result<(), CodedError>,
        stats: Option<UsageStats>,
    ) -> Self {
        Self {
            source: source.into(),
            valid: result.is_ok(),
            error: result.as_ref().err().map(ErrorReport::from),
            stats,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        match &self.error {
            None => {
                let _ = write!(out, "{}: ok", self.source);
            }
            Some(err) => {
                let _ = write!(out, "{}: error {}: {}", self.source, err.code, err.message);
            }
        }

        if let Some(stats) = &self.stats {
            let _ = write!(out, "\nusage statistics ({} total):", stats.total());
            for (code, count) in stats.iter() {
                let _ = write!(out, "\n  code {:>3}: {}", code, count);
            }
        }
        out
    }
}
