use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use invoicegen::io::loader::parse_date;
use invoicegen::{GeneratorConfig, format_money, generate_invoice};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Both dates are checked here so that a typo never reaches the filesystem.
fn validate_period(args: &CliArgs) -> Result<(), AppError> {
    for (arg, value) in [("start", &args.start), ("end", &args.end)] {
        parse_date(arg, value).map_err(|_| AppError::InvalidDate {
            arg,
            value: value.clone(),
        })?;
    }
    Ok(())
}

fn build_config(args: &CliArgs) -> Result<GeneratorConfig, AppError> {
    let config = match &args.output_dir {
        Some(output_dir) => GeneratorConfig::with_dirs(&args.data_dir, output_dir),
        None => GeneratorConfig::new(&args.data_dir)?,
    };
    Ok(config.with_sidecar(args.sidecar))
}

/// Run one invocation and return the path of the written PDF.
pub fn run(args: CliArgs) -> Result<PathBuf, AppError> {
    if args.log {
        init_logging();
    }

    validate_period(&args)?;
    let config = build_config(&args)?;

    info!("Data directory: {:?}", config.data_dir);
    info!("Output directory: {:?}", config.output_dir);

    let generated = generate_invoice(&config, &args.client, &args.start, &args.end)?;

    let currency = generated.record.currency.as_str();
    info!(
        "Invoice {}: subtotal={} tax={} total={} pages={}",
        generated.record.invoice_number,
        format_money(generated.totals.subtotal, currency),
        format_money(generated.totals.tax, currency),
        format_money(generated.totals.total, currency),
        generated.pages
    );
    if let Some(sidecar) = &generated.sidecar {
        info!("Sidecar: {:?}", sidecar);
    }

    Ok(generated.path)
}
