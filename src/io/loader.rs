//! YAML profile store and invoice assembly.
//!
//! Layout of the data directory:
//!
//! ```text
//! <data_dir>/company-info.yaml
//! <data_dir>/clients/<slug>.yaml
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::core::params::InvoiceDefaults;
use crate::core::slug::{invoice_number, slugify};
use crate::error::{Error, Result};
use crate::types::{ClientProfile, InvoiceRecord, PartyInfo, Period};

pub const COMPANY_FILE: &str = "company-info.yaml";
pub const CLIENTS_DIR: &str = "clients";

/// Read-only view over a directory of profile files.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn company_path(&self) -> PathBuf {
        self.root.join(COMPANY_FILE)
    }

    /// `clients/<slug>.yaml`, where the slug is derived from `identifier`.
    pub fn client_path(&self, identifier: &str) -> PathBuf {
        self.root
            .join(CLIENTS_DIR)
            .join(format!("{}.yaml", slugify(identifier)))
    }

    /// Issuer profile, with a relative logo path resolved against the store root.
    pub fn company(&self) -> Result<PartyInfo> {
        let mut company: PartyInfo = read_yaml(&self.company_path())?;
        company.logo = company.logo.map(|logo| self.resolve(logo));
        Ok(company)
    }

    pub fn client(&self, identifier: &str) -> Result<ClientProfile> {
        let mut client: ClientProfile = read_yaml(&self.client_path(identifier))?;
        client.party.logo = client.party.logo.map(|logo| self.resolve(logo));
        Ok(client)
    }

    fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() || is_remote(&path) {
            path
        } else {
            self.root.join(path)
        }
    }
}

pub(crate) fn is_remote(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|s| s.starts_with("http://") || s.starts_with("https://"))
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading profile: {:?}", path);
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;
    serde_yaml::from_str(&text).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse a `yyyy-mm-dd` command-line date.
pub fn parse_date(arg: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| Error::invalid(arg, value))
}

/// Validate both dates, then load the two profiles and merge them into an
/// [`InvoiceRecord`]. No file is touched when a date is invalid.
pub fn load_invoice(
    store: &ProfileStore,
    identifier: &str,
    start: &str,
    end: &str,
    defaults: &InvoiceDefaults,
) -> Result<InvoiceRecord> {
    if slugify(identifier).is_empty() {
        return Err(Error::invalid("client", identifier));
    }
    let period = Period::new(parse_date("start", start)?, parse_date("end", end)?)?;

    let company = store.company()?;
    let client = store.client(identifier)?;

    let record = InvoiceRecord {
        invoice_number: invoice_number(&client.party.name, period.start),
        period,
        from: company,
        to: client.party,
        items: client.items,
        currency: client
            .currency
            .unwrap_or_else(|| defaults.currency.clone()),
        tax_rate: client.tax_rate.unwrap_or(defaults.tax_rate),
    };
    // amounts that do not fit a Decimal are rejected here, before any rendering
    record.totals()?;
    info!("Loaded invoice {}", record);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    const COMPANY: &str = "name: Studio Nine\naddress: 9 Loft Lane\nemail: hi@studio.test\nlogo: assets/logo.png\n";

    fn store_with(client_file: &str, client_yaml: &str) -> (TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CLIENTS_DIR)).unwrap();
        fs::write(dir.path().join(COMPANY_FILE), COMPANY).unwrap();
        fs::write(dir.path().join(CLIENTS_DIR).join(client_file), client_yaml).unwrap();
        let store = ProfileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn client_path_uses_slug_of_identifier() {
        let store = ProfileStore::new("/data");
        assert_eq!(
            store.client_path("Acme Corp"),
            PathBuf::from("/data/clients/acme_corp.yaml")
        );
        assert_eq!(
            store.client_path("acme_corp"),
            PathBuf::from("/data/clients/acme_corp.yaml")
        );
    }

    #[test]
    fn load_merges_profiles_and_applies_defaults() {
        let (_dir, store) = store_with(
            "acme_corp.yaml",
            "name: Acme Corp\naddress: 1 Main St\nitems:\n  - description: Build\n    qty: 2\n    price: 100\n",
        );
        let record = load_invoice(
            &store,
            "Acme Corp",
            "2025-03-01",
            "2025-03-31",
            &InvoiceDefaults::default(),
        )
        .unwrap();

        assert_eq!(record.invoice_number, "acme_corp_2025-03");
        assert_eq!(record.currency, "USD");
        assert_eq!(record.tax_rate, Decimal::ZERO);
        assert_eq!(record.from.name, "Studio Nine");
        assert_eq!(record.to.name, "Acme Corp");
        assert_eq!(record.items.len(), 1);
        assert_eq!(
            record.from.logo,
            Some(store.root().join("assets/logo.png"))
        );
    }

    #[test]
    fn profile_values_override_defaults() {
        let (_dir, store) = store_with(
            "globex.yaml",
            "name: Globex\naddress: 2 Side St\ncurrency: EUR\ntaxRate: 0.21\n",
        );
        let record = load_invoice(
            &store,
            "globex",
            "2025-01-15",
            "2025-02-14",
            &InvoiceDefaults::default(),
        )
        .unwrap();
        assert_eq!(record.currency, "EUR");
        assert_eq!(record.tax_rate, dec!(0.21));
        assert_eq!(record.invoice_number, "globex_2025-01");
    }

    #[test]
    fn missing_client_is_not_found() {
        let (_dir, store) = store_with("acme_corp.yaml", "name: Acme\naddress: x\n");
        let err = load_invoice(
            &store,
            "initech",
            "2025-03-01",
            "2025-03-31",
            &InvoiceDefaults::default(),
        )
        .unwrap_err();
        match err {
            Error::NotFound { path } => assert!(path.ends_with("clients/initech.yaml")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let (_dir, store) = store_with("acme.yaml", "name: [unterminated\n");
        let err = load_invoice(
            &store,
            "acme",
            "2025-03-01",
            "2025-03-31",
            &InvoiceDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn missing_required_field_is_parse_error() {
        let (_dir, store) = store_with("acme.yaml", "name: Acme\n");
        let err = load_invoice(
            &store,
            "acme",
            "2025-03-01",
            "2025-03-31",
            &InvoiceDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn oversized_amounts_fail_at_load_time() {
        let (_dir, store) = store_with(
            "acme.yaml",
            "name: Acme\naddress: x\nitems:\n  - description: Galaxy\n    qty: 1000000000000000\n    price: 1000000000000000\n",
        );
        let err = load_invoice(
            &store,
            "acme",
            "2025-03-01",
            "2025-03-31",
            &InvoiceDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }), "got {err:?}");
    }

    #[test]
    fn invalid_date_fails_before_reading_files() {
        // The store points at a directory that does not exist, so any read would be NotFound.
        let store = ProfileStore::new("/nonexistent/invoicegen-data");
        let err = load_invoice(
            &store,
            "acme",
            "not-a-date",
            "2025-03-31",
            &InvoiceDefaults::default(),
        )
        .unwrap_err();
        assert!(err.is_usage(), "got {err:?}");

        let err = load_invoice(
            &store,
            "acme",
            "2025-02-30",
            "2025-03-31",
            &InvoiceDefaults::default(),
        )
        .unwrap_err();
        assert!(err.is_usage(), "got {err:?}");
    }

    #[test]
    fn reversed_period_is_invalid_argument() {
        let store = ProfileStore::new("/nonexistent/invoicegen-data");
        let err = load_invoice(
            &store,
            "acme",
            "2025-03-31",
            "2025-03-01",
            &InvoiceDefaults::default(),
        )
        .unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn remote_logo_is_left_untouched() {
        let store = ProfileStore::new("/data");
        let url = PathBuf::from("https://example.com/logo.png");
        assert_eq!(store.resolve(url.clone()), url);
    }
}
