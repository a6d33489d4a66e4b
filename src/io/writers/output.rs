//! Writing finished documents to disk.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::Result;
use crate::types::{InvoiceRecord, Totals};

/// Write `bytes` to `path` through a temporary file in the same directory so
/// that a failed run never leaves a truncated document behind. An existing
/// file at `path` is replaced.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Sidecar<'a> {
    #[serde(flatten)]
    record: &'a InvoiceRecord,
    totals: Totals,
    document: &'a str,
}

/// Write `<invoice>.json` next to the PDF: the merged record plus computed totals.
pub fn write_sidecar(pdf_path: &Path, record: &InvoiceRecord) -> Result<PathBuf> {
    let sidecar_path = pdf_path.with_extension("json");
    let document = pdf_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let sidecar = Sidecar {
        record,
        totals: record.totals()?,
        document,
    };
    let json_string = serde_json::to_string_pretty(&sidecar)?;
    write_atomic(&sidecar_path, json_string.as_bytes())?;
    info!("Created invoice sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}
