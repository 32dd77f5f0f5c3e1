//! word-freq — print the most frequent non-stop words of a text file.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use word_freq::{FrequencyConfig, ReportFormat, WordFrequencyApp};

#[derive(Debug, Parser)]
#[command(name = "word-freq", version, about)]
struct Cli {
    /// Text file to analyze
    path: PathBuf,

    /// Comma-separated stop-word list [default: stopwords.txt]
    #[arg(long, value_name = "PATH")]
    stop_words: Option<PathBuf>,

    /// Number of entries to print [default: 25]
    #[arg(long, short = 'n', value_name = "N")]
    top: Option<usize>,

    /// Output format: text or json [default: text]
    #[arg(long, value_name = "FORMAT")]
    format: Option<ReportFormat>,

    /// JSON config file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve_config(&self) -> Result<FrequencyConfig> {
        let mut config = match &self.config {
            Some(path) => FrequencyConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => FrequencyConfig::default(),
        };
        if let Some(path) = &self.stop_words {
            config = config.with_stop_words_path(path);
        }
        if let Some(top) = self.top {
            config = config.with_top_n(top);
        }
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "word_freq=warn",
        1 => "word_freq=debug",
        _ => "word_freq=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.resolve_config()?;
    let mut app = WordFrequencyApp::builder()
        .config(config)
        .build()
        .context("invalid configuration")?;
    app.run(&cli.path)
        .with_context(|| format!("counting words in {}", cli.path.display()))?;
    Ok(())
}
