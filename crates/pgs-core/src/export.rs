// ── Record export ──
//
// Serializes a list of uniform records to JSON or CSV. `Export::write_to`
// is the download: it writes `{filename}.{ext}` into a directory.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::CoreError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

/// A rendered export, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// File name including extension.
    pub filename: String,
    pub mime: &'static str,
    pub content: String,
}

impl Export {
    pub fn new<T: Serialize>(
        records: &[T],
        basename: &str,
        format: ExportFormat,
    ) -> Result<Self, CoreError> {
        let content = match format {
            ExportFormat::Json => to_json(records)?,
            ExportFormat::Csv => to_csv(records)?,
        };
        Ok(Self {
            filename: format!("{basename}.{}", format.extension()),
            mime: format.mime(),
            content,
        })
    }

    /// Write the export into `dir`, returning the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, CoreError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.content).map_err(|source| CoreError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "export written");
        Ok(path)
    }
}

/// Pretty-printed JSON array.
pub fn to_json<T: Serialize>(records: &[T]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(records).map_err(|e| CoreError::Export {
        message: e.to_string(),
    })
}

/// CSV with a header row taken from the first record's keys. Every value
/// is double-quoted; null or missing values are empty.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String, CoreError> {
    let rows = records
        .iter()
        .map(|r| match serde_json::to_value(r) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(CoreError::Export {
                message: format!("expected an object per record, got {other}"),
            }),
            Err(e) => Err(CoreError::Export {
                message: e.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut out = headers.join(",");
    for row in &rows {
        out.push('\n');
        for (i, header) in headers.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let cell = match row.get(*header) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            let _ = write!(out, "\"{}\"", cell.replace('"', "\"\""));
        }
    }
    Ok(out)
}
