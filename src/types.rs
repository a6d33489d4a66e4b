//! Shared types used across the invoice generator.
//! Includes the parties (`PartyInfo`), billable lines (`LineItem`), the
//! billing `Period`, the per-client YAML shape (`ClientProfile`), and the
//! merged `InvoiceRecord` handed to the renderer.
use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::totals;
use crate::error::{Error, Result};

/// Issuer or billed party as stored in a profile file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyInfo {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    /// Path to a raster image; relative paths are resolved against the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub qty: Decimal,
    pub price: Decimal,
}

impl LineItem {
    /// `qty × price`, or `Overflow` when the product leaves the `Decimal` range.
    pub fn amount(&self) -> Result<Decimal> {
        self.qty.checked_mul(self.price).ok_or_else(|| {
            Error::overflow(format!("{} x {} for {:?}", self.qty, self.price, self.description))
        })
    }
}

/// Inclusive billing range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::invalid("period", format!("{start} is after {end}")));
        }
        Ok(Self { start, end })
    }

    /// `YYYY-MM` of the period start, used as the invoice number suffix.
    pub fn month_slug(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }
}

/// One `clients/<slug>.yaml` file: the client's party details plus what to bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    #[serde(flatten)]
    pub party: PartyInfo,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
}

/// Subtotal, tax and grand total of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Fully merged invoice, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub invoice_number: String,
    pub period: Period,
    pub from: PartyInfo,
    pub to: PartyInfo,
    pub items: Vec<LineItem>,
    pub currency: String,
    pub tax_rate: Decimal,
}

impl InvoiceRecord {
    pub fn totals(&self) -> Result<Totals> {
        totals::compute(&self.items, self.tax_rate)
    }

    pub fn has_tax(&self) -> bool {
        totals::shows_tax_row(self.tax_rate)
    }

    /// Output file name for a given extension, e.g. `acme_corp_2025-03.pdf`.
    pub fn file_name(&self, ext: &str) -> String {
        format!("{}.{}", self.invoice_number, ext)
    }
}

impl std::fmt::Display for InvoiceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} -> {}, {} item(s), {})",
            self.invoice_number,
            self.period.start,
            self.period.end,
            self.items.len(),
            self.currency
        )
    }
}
