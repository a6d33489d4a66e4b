use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Directory under the user's home that receives generated invoices.
pub const OUTPUT_SUBDIR: &str = "Downloads";

/// Values applied when a client profile leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDefaults {
    pub currency: String,
    /// Fraction in `[0, 1]`
    pub tax_rate: Decimal,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            tax_rate: Decimal::ZERO,
        }
    }
}

/// Where profiles are read from and where documents are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Holds `company-info.yaml` and `clients/<slug>.yaml`
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub defaults: InvoiceDefaults,
    /// Also write `<invoice>.json` next to the PDF
    pub write_sidecar: bool,
}

impl GeneratorConfig {
    /// Config rooted at `data_dir`, writing to `$HOME/Downloads`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::with_dirs(data_dir, default_output_dir()?))
    }

    /// Config with an explicit output directory; never consults `$HOME`.
    pub fn with_dirs(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
            defaults: InvoiceDefaults::default(),
            write_sidecar: false,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_sidecar(mut self, enabled: bool) -> Self {
        self.write_sidecar = enabled;
        self
    }
}

pub fn default_output_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(OUTPUT_SUBDIR))
        .ok_or_else(|| Error::invalid("HOME", "<unset>"))
}
