use crate::client::DEFAULT_API_URL;
use clap::Parser;

#[derive(Parser)]
#[command(name = "fish-catalog")]
#[command(about = "A terminal catalog of fish species from the FishBase API")]
#[command(version = "0.1")]
pub(crate) struct Args {
    /// Base URL of the species API
    #[arg(short, long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// HTTP timeout in seconds
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// Route to open on start ("/" or "/create")
    #[arg(short, long, default_value = "/")]
    pub route: String,

    /// Write logs to this file instead of stderr
    #[arg(short, long)]
    pub log_file: Option<String>,

    /// Enable verbose logging (only takes effect with --log-file)
    #[arg(short, long)]
    pub verbose: bool,
}
