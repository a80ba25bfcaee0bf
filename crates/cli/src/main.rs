use clap::{Args, Parser, Subcommand};
use http_adapter::HttpPlaylistFetcher;
use log::{debug, error};
use m3u_file_adapter::{M3uFileRepository, M3uFileWriter, RawFileStore};
use playlist_core::application::{DownloadServiceImpl, FilterServiceImpl};
use playlist_core::domain::{
    DownloadConfig, DEFAULT_ENDPOINT, DEFAULT_PLAYLIST_FILE, DEFAULT_TIMEOUT_SECS,
};
use playlist_core::error::PlaylistError;
use playlist_core::ports::{PlaylistFetcher, PlaylistRepository, PlaylistWriter, RawPlaylistStore, Result};
use playlist_core::utils::generate_output_filename;
use std::path::PathBuf;
use std::time::Duration;

/// CLI tool to download an IPTV playlist and filter its channels by keyword
#[derive(Parser, Debug)]
#[command(name = "iptv-filter")]
#[command(about = "Downloads an M3U playlist from the IPTV server and filters its entries by channel name")]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the M3U file from the IPTV server
    Download(DownloadArgs),
    /// Filter M3U file entries based on keywords
    Filter(FilterArgs),
}

#[derive(Args, Debug)]
struct DownloadArgs {
    /// Where the downloaded playlist is written
    #[arg(short = 'o', long = "output-file", default_value = DEFAULT_PLAYLIST_FILE)]
    output_file: PathBuf,

    /// Account name on the IPTV server
    #[arg(long, env = "USER", hide_env_values = true)]
    username: Option<String>,

    /// Account password on the IPTV server
    #[arg(long, env = "PWD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Give up on the download after this many seconds
    #[arg(long = "timeout-secs", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl DownloadArgs {
    fn to_config(&self) -> DownloadConfig {
        DownloadConfig {
            endpoint: self.endpoint.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Keywords that must all appear in the channel name (case-insensitive)
    #[arg(required = true, value_name = "TOKENS")]
    tokens: Vec<String>,

    /// Playlist to filter
    #[arg(short = 'i', long = "input-file", default_value = DEFAULT_PLAYLIST_FILE)]
    input_file: PathBuf,

    /// Where the filtered playlist is written, derived from the tokens by default
    #[arg(short = 'o', long = "output-file")]
    output_file: Option<PathBuf>,
}

impl FilterArgs {
    fn resolved_output_file(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(generate_output_filename(&self.tokens)))
    }
}

fn hit_summary(hits: usize) -> String {
    format!("{} hit{} found.", hits, if hits == 1 { "" } else { "s" })
}

/// Logs the full error and returns the line shown on stderr
fn failure_message(e: &PlaylistError) -> String {
    error!("{:?}", e);
    format!("Error: {}", e)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn run_download(args: &DownloadArgs) -> Result<()> {
    let config = args.to_config();
    debug!("Download settings: {:?}", config);

    // Instantiate concrete implementations of secondary adapters
    let fetcher: Box<dyn PlaylistFetcher> = Box::new(HttpPlaylistFetcher::new(config));
    let store: Box<dyn RawPlaylistStore> = Box::new(RawFileStore::new(&args.output_file));

    let service = DownloadServiceImpl::new(fetcher, store);
    service.execute_download()?;

    println!("M3U file downloaded and saved to {}", args.output_file.display());
    Ok(())
}

fn run_filter(args: &FilterArgs) -> Result<()> {
    let output_file = args.resolved_output_file();

    let repository: Box<dyn PlaylistRepository> = Box::new(M3uFileRepository::new(&args.input_file));
    let writer: Box<dyn PlaylistWriter> = Box::new(M3uFileWriter::new(&output_file));

    let service = FilterServiceImpl::new(repository, writer);
    let report = service.execute_filter(&args.tokens)?;

    if report.hits == 0 {
        println!("No hits found. No file was saved.");
        return Ok(());
    }

    println!("{}", hit_summary(report.hits));
    println!("Filtered M3U file saved to {}", output_file.display());
    Ok(())
}

fn main() {
    // Credentials may live in a local .env file; variables already set win
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Download(args) => run_download(args),
        Command::Filter(args) => run_filter(args),
    };

    if let Err(e) = result {
        eprintln!("{}", failure_message(&e));
        std::process::exit(1);
    }
}
