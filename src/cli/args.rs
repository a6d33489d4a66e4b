use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "invoicegen",
    version,
    about = "Generate a PDF invoice from YAML company and client profiles"
)]
pub struct CliArgs {
    /// Client identifier; its slug selects clients/<slug>.yaml
    pub client: String,

    /// First day of the billing period (yyyy-mm-dd)
    pub start: String,

    /// Last day of the billing period (yyyy-mm-dd)
    pub end: String,

    /// Directory holding company-info.yaml and clients/
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Output directory (defaults to $HOME/Downloads)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also write a JSON sidecar with the invoice record and totals
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
