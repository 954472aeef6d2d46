use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::debug;

use manga_dl::error::MangaDlError;
use manga_dl::fetcher::HttpClient;
use manga_dl::pipeline::{self, Options};
use manga_dl::rulebook::Rulebook;

#[derive(Parser)]
#[command(name = "manga-dl")]
#[command(about = "Download manga chapters from supported websites into comic book archives")]
#[command(version)]
#[command(after_help = "Report bugs to https://github.com/JellyPie/manga-dl/issues")]
struct Cli {
    /// Chapter page URL on a supported website
    url: Option<String>,

    /// Additional site rules (TOML), shadowing built-in entries
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Extra attempts per image on server errors or transport failures
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Directory to place the archive in
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let url = match cli.url {
        Some(url) => url,
        None => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    let mut rulebook = Rulebook::builtin();
    if let Some(path) = &cli.rules {
        rulebook.merge_file(path)?;
    }

    let client = HttpClient::new();
    let options = Options {
        retries: cli.retries,
        output_dir: cli.output,
    };

    match pipeline::run(&url, &rulebook, &client, &options).await {
        Ok(summary) => {
            debug!(
                "downloaded {} pages of {:?} into {:?}",
                summary.pages, summary.manga_name, summary.archive_path
            );
            Ok(())
        }
        Err(MangaDlError::UnsupportedWebsite(_)) => {
            eprintln!("Error: Unsupported website");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("manga_dl={}", level))
        .with_target(false)
        .init();
}
