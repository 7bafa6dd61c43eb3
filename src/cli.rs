// Command-line layer: argument parsing and the single linear flow
// (credentials -> input -> upload -> print). Everything here returns
// `anyhow::Result`; the typed errors from the library are kept as the
// root cause so callers can downcast them.

use crate::api::{
    PasteOptions, PasteryClient, UploadRequest, DEFAULT_DURATION_MINUTES, DEFAULT_ENDPOINT,
    DEFAULT_TIMEOUT,
};
use crate::config;
use crate::input::InputSource;
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// BakeIt is a command line utility for Pastery (https://www.pastery.net),
/// the best pastebin in the world.
#[derive(Parser, Debug, Clone)]
#[command(name = "bakeit", author, version, long_about = None)]
pub struct Cli {
    /// File to upload. Reads standard input when omitted or `-`.
    pub file: Option<PathBuf>,

    /// The title of the paste
    #[arg(long)]
    pub title: Option<String>,

    /// The language highlighter to use
    #[arg(long = "lang")]
    pub lang: Option<String>,

    /// The duration (in minutes) the paste should live for
    #[arg(long, default_value_t = DEFAULT_DURATION_MINUTES, allow_negative_numbers = true)]
    pub duration: i64,

    /// How many times the paste can be viewed before it expires (0 = unlimited)
    #[arg(long = "max-views", default_value_t = 0, allow_negative_numbers = true)]
    pub max_views: i64,

    /// Automatically open a browser window when done (currently has no effect)
    #[arg(long = "open-browser")]
    pub open_browser: bool,

    /// Config file holding the api_key [default: ~/.config/bakeit.cfg]
    #[arg(long, env = "BAKEIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Paste API endpoint
    #[arg(long, env = "BAKEIT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl Cli {
    pub fn paste_options(&self) -> PasteOptions {
        PasteOptions {
            title: self.title.clone(),
            language: self.lang.clone(),
            duration_minutes: self.duration,
            max_views: self.max_views,
        }
    }

    pub fn input_source(&self) -> InputSource {
        InputSource::from_arg(self.file.clone())
    }
}

/// Initializes tracing on stderr so stdout only carries the paste URL.
pub fn init_tracing() {
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Run against the process' real stdin and stdout.
pub fn run(cli: &Cli) -> Result<String> {
    run_with(cli, std::io::stdin().lock(), std::io::stdout().lock())
}

/// Upload once and print `Paste URL: <url>` to `out`. Returns the URL.
///
/// Credentials are resolved before the input is read, and both happen
/// before any network activity.
pub fn run_with<R: Read, W: Write>(cli: &Cli, stdin: R, mut out: W) -> Result<String> {
    let cfg_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let api_key = config::read_api_key(&cfg_path)?;
    info!(path = %cfg_path.display(), "found api_key");

    let source = cli.input_source();
    let content = source.read_with(stdin)?;
    debug!(source = %source, bytes = content.len(), "read input");

    if cli.open_browser {
        debug!("--open-browser is accepted but not acted on");
    }

    let client = PasteryClient::new(&cli.endpoint, Duration::from_secs(cli.timeout))?;
    let req = UploadRequest::new(content, cli.paste_options(), api_key);

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Uploading...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let res = client.upload(&req);
    spinner.finish_and_clear();
    let resp = res?;
    info!(url = %resp.url, "paste created");

    writeln!(out, "Paste URL: {}", resp.url).context("writing paste URL")?;
    Ok(resp.url)
}
