//! High-level, ergonomic library API: load an invoice record from a profile
//! directory, render it to an in-memory PDF or to a file, or run the whole
//! load-render-write pipeline in one call. Prefer these entrypoints over the
//! low-level `core` and `io` modules when embedding the generator.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::params::GeneratorConfig;
use crate::error::Result;
use crate::io::loader::{ProfileStore, load_invoice};
use crate::io::writers::output::{write_atomic, write_sidecar};
use crate::io::writers::pdf::{RenderedPdf, render_pdf};
use crate::types::{InvoiceRecord, Totals};

pub const PDF_EXTENSION: &str = "pdf";

/// Outcome of [`generate_invoice`].
#[derive(Debug, Clone)]
pub struct GeneratedInvoice {
    pub record: InvoiceRecord,
    pub totals: Totals,
    pub path: PathBuf,
    pub sidecar: Option<PathBuf>,
    pub pages: usize,
}

/// Load and merge the profiles for `identifier` over the period `start..=end`
/// (`yyyy-mm-dd` strings). Dates are validated before any file is read.
pub fn load_invoice_record(
    config: &GeneratorConfig,
    identifier: &str,
    start: &str,
    end: &str,
) -> Result<InvoiceRecord> {
    let store = ProfileStore::new(&config.data_dir);
    load_invoice(&store, identifier, start, end, &config.defaults)
}

/// Render to PDF bytes without touching the filesystem (the logo aside).
pub fn render_invoice_to_buffer(record: &InvoiceRecord) -> Result<RenderedPdf> {
    render_pdf(record)
}

/// Render and write the PDF to `output`, replacing any existing file.
pub fn render_invoice_to_path(record: &InvoiceRecord, output: &Path) -> Result<usize> {
    let rendered = render_pdf(record)?;
    write_atomic(output, &rendered.bytes)?;
    Ok(rendered.pages)
}

/// `<output_dir>/<invoice-number>.pdf`
pub fn output_path(config: &GeneratorConfig, record: &InvoiceRecord) -> PathBuf {
    config.output_dir.join(record.file_name(PDF_EXTENSION))
}

/// Full pipeline: load profiles, render, write the PDF (and the optional sidecar).
///
/// When the sidecar cannot be written the freshly written PDF is removed again,
/// so a failed run leaves neither file behind.
pub fn generate_invoice(
    config: &GeneratorConfig,
    identifier: &str,
    start: &str,
    end: &str,
) -> Result<GeneratedInvoice> {
    let record = load_invoice_record(config, identifier, start, end)?;
    let totals = record.totals()?;
    let path = output_path(config, &record);
    let pages = render_invoice_to_path(&record, &path)?;
    info!("Wrote {:?}", path);

    let sidecar = if config.write_sidecar {
        match write_sidecar(&path, &record) {
            Ok(sidecar) => Some(sidecar),
            Err(e) => {
                warn!("Sidecar for {:?} failed, removing the PDF: {}", path, e);
                if let Err(rm) = fs::remove_file(&path) {
                    warn!("Could not remove {:?}: {}", path, rm);
                }
                return Err(e);
            }
        }
    } else {
        None
    };

    Ok(GeneratedInvoice {
        totals,
        record,
        path,
        sidecar,
        pages,
    })
}
