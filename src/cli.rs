use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::api::{self, Components, ScrapeParams};
use crate::log::ScrapeLogger;
use crate::types::{ApiResponse, StayQuery};

const DEFAULT_SITEMAP_INDEX: &str = "https://www.traveloka.com/en-en/sitemap/index.xml.gz";

#[derive(Parser)]
#[command(name = "ratelink", version, about = "Hotel room/rate retrieval (JSON output)")]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Directory for the per-run log file
    #[arg(long, default_value = "logging", global = true)]
    log_dir: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Full pipeline: sitemap lookup, deep link, page fetch, extraction, rates.json
    Scrape(ScrapeArgs),
    /// Print the deep link for a known hotel URL and stay parameters
    Link(LinkArgs),
    /// Extract offers from a saved HTML file
    Extract(ExtractArgs),
}

#[derive(Args)]
struct StayArgs {
    /// Check-in date, DD-MM-YYYY
    #[arg(long)]
    check_in: String,
    /// Check-out date, DD-MM-YYYY (must be after check-in)
    #[arg(long)]
    check_out: String,
    /// Number of adults
    #[arg(long, default_value = "2")]
    adults: String,
    /// Number of rooms
    #[arg(long, default_value = "1")]
    rooms: String,
}

impl StayArgs {
    fn into_stay(self) -> StayQuery {
        StayQuery {
            check_in: self.check_in,
            check_out: self.check_out,
            adults: self.adults,
            rooms: self.rooms,
        }
    }
}

#[derive(Args)]
struct ScrapeArgs {
    #[command(flatten)]
    stay: StayArgs,
    /// Sitemap index to locate the hotel detail page from
    #[arg(long, default_value = DEFAULT_SITEMAP_INDEX)]
    sitemap: String,
    /// Output file, overwritten on each run
    #[arg(long, default_value = "rates.json")]
    out: PathBuf,
}

#[derive(Args)]
struct LinkArgs {
    /// Hotel detail URL to decompose
    url: String,
    #[command(flatten)]
    stay: StayArgs,
}

#[derive(Args)]
struct ExtractArgs {
    /// Saved HTML file of a rendered detail page
    html: PathBuf,
    /// The deep link that produced the page (guest-count source)
    #[arg(long)]
    page_url: String,
    /// Output file, overwritten on each run
    #[arg(long, default_value = "rates.json")]
    out: PathBuf,
}

pub fn run() {
    let cli = Cli::parse();
    let logger = match ScrapeLogger::new(&cli.log_dir) {
        Ok(l) => l,
        Err(e) => {
            print_json(ApiResponse::<()>::err(format!("cannot open log dir: {e}")));
            return;
        }
    };

    match cli.cmd {
        Command::Scrape(args) => {
            let components = Components::default();
            let params = ScrapeParams {
                sitemap_index: args.sitemap,
                stay: args.stay.into_stay(),
                out_path: args.out,
            };
            finish(api::scrape_hotel(&logger, &components, &params));
        }
        Command::Link(args) => {
            finish(api::build_link(&args.url, &args.stay.into_stay()));
        }
        Command::Extract(args) => {
            finish(api::extract_file(&logger, &args.html, &args.page_url, &args.out));
        }
    }
}

fn finish<T: serde::Serialize>(res: crate::error::Result<T>) {
    match res {
        Ok(v) => print_json(ApiResponse::ok(v)),
        Err(e) => print_json(ApiResponse::<()>::err(e.to_string())),
    }
}
fn print_json<T: serde::Serialize>(val: T) {
    // pretty JSON output
    println!("{}", serde_json::to_string_pretty(&val).unwrap());
}
