#![doc = r#"
invoicegen — turn YAML company and client profiles into a PDF invoice.

This crate reads an issuer profile and a per-client profile from a data
directory, merges them with a billing period into an [`InvoiceRecord`],
computes totals with exact decimal arithmetic, lays the document out as an
explicit node tree, and paints it to an A4 PDF. It powers the `invoicegen`
CLI and can be embedded in your own Rust applications.

Data directory
--------------
```text
data/
├── company-info.yaml        # issuer: name, address, email?, taxId?, logo?
└── clients/
    └── acme_corp.yaml       # client: name, address, ..., items, currency?, taxRate?
```

Client files are looked up by the slug of the identifier, so `"Acme Corp"`
and `acme_corp` both resolve to `clients/acme_corp.yaml`.

Quick start: generate into the default output directory
-------------------------------------------------------
```rust,no_run
use invoicegen::{GeneratorConfig, generate_invoice};

fn main() -> invoicegen::Result<()> {
    let config = GeneratorConfig::new("data")?;
    let generated = generate_invoice(&config, "Acme Corp", "2025-03-01", "2025-03-31")?;
    println!("Invoice saved in {}", generated.path.display());
    Ok(())
}
```

Render in memory
----------------
```rust,no_run
use std::path::PathBuf;
use invoicegen::{GeneratorConfig, load_invoice_record, render_invoice_to_buffer};

fn main() -> invoicegen::Result<()> {
    let config = GeneratorConfig::new("data")?.with_output_dir(PathBuf::from("/tmp/out"));
    let record = load_invoice_record(&config, "acme_corp", "2025-03-01", "2025-03-31")?;
    let pdf = render_invoice_to_buffer(&record)?;
    println!("{} bytes over {} page(s), total {}", pdf.bytes.len(), pdf.pages, record.totals()?.total);
    Ok(())
}
```

Error handling
--------------
All public functions return `invoicegen::Result<T>`; match on `invoicegen::Error`
to tell bad input apart from missing or malformed profiles.

```rust,no_run
use invoicegen::{Error, GeneratorConfig, generate_invoice};

fn main() {
    let config = GeneratorConfig::new("data").expect("home directory");
    match generate_invoice(&config, "initech", "2025-03-01", "2025-03-31") {
        Ok(done) => println!("{}", done.path.display()),
        Err(Error::InvalidArgument { arg, value }) => eprintln!("bad {arg}: {value}"),
        Err(Error::NotFound { path }) => eprintln!("no profile at {}", path.display()),
        Err(Error::Parse { path, message }) => eprintln!("{}: {message}", path.display()),
        Err(other) => eprintln!("{other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`types`] — the data model (`PartyInfo`, `LineItem`, `InvoiceRecord`, ...).
- [`core`] — slugs, totals, money/date formatting, configuration, layout tree.
- [`io`] — YAML profile loading and PDF/sidecar writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{GeneratorConfig, InvoiceDefaults};
pub use error::{Error, Result};
pub use types::{ClientProfile, InvoiceRecord, LineItem, PartyInfo, Period, Totals};

// Helpers
pub use crate::core::format::{format_date, format_money};
pub use crate::core::slug::{invoice_number, slugify};
pub use io::loader::ProfileStore;
pub use io::writers::pdf::RenderedPdf;

// High-level API re-exports
pub use api::{
    GeneratedInvoice, generate_invoice, load_invoice_record, output_path,
    render_invoice_to_buffer, render_invoice_to_path,
};
