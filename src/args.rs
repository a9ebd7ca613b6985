use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "web-summary-viewer")]
#[command(about = "Browse and search scraped web-page summaries")]
#[command(version)]
pub struct Args {
    /// CSV file to open (defaults to scraped_summary.csv)
    pub source: Option<PathBuf>,

    /// JSON config file with viewer settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
