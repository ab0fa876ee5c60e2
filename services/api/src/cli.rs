use crate::reports::{run_analysis_report, run_facets_report, run_filter_report};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rental_market::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Rental Market",
    about = "Filter rental listings and report market price statistics",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the selectable filter values present in a listing export
    Facets(DatasetArgs),
    /// Print grouped price statistics for the filtered listings
    Analyze(AnalyzeArgs),
    /// Print one page of the filtered listings
    Filter(FilterArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Listing export (CSV or JSON) to serve as the default snapshot
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DatasetArgs {
    /// Listing export (CSV or JSON)
    #[arg(long = "csv", value_name = "PATH")]
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterFlags {
    /// Property type to include (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub(crate) types: Vec<String>,
    /// State to include (repeatable)
    #[arg(long = "state")]
    pub(crate) states: Vec<String>,
    /// City to include; requires at least one --state (repeatable)
    #[arg(long = "city")]
    pub(crate) cities: Vec<String>,
    /// Furnishing label to include, e.g. "Not mentioned" (repeatable)
    #[arg(long = "furnishing")]
    pub(crate) furnishings: Vec<String>,
    /// Bedroom count to include (repeatable)
    #[arg(long = "beds")]
    pub(crate) beds: Vec<u32>,
    /// Amenity every listing must offer (repeatable)
    #[arg(long = "amenity")]
    pub(crate) amenities: Vec<String>,
    /// Lower monthly rent bound (defaults to the cheapest listing)
    #[arg(long)]
    pub(crate) min_price: Option<f64>,
    /// Upper monthly rent bound (defaults to the most expensive listing)
    #[arg(long)]
    pub(crate) max_price: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    #[command(flatten)]
    pub(crate) filters: FilterFlags,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct FilterArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    #[command(flatten)]
    pub(crate) filters: FilterFlags,
    /// Page to print (1-based)
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Listings per page
    #[arg(long, default_value_t = 12)]
    pub(crate) per_page: usize,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Facets(args) => run_facets_report(args),
        Command::Analyze(args) => run_analysis_report(args),
        Command::Filter(args) => run_filter_report(args),
    }
}
