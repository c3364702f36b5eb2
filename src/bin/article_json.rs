//! Download one article, run the pipeline and print it as JSON.
//!
//! ```text
//! article_json https://example.com/2024/01/15/storm.html
//! article_json ./saved/page.html --no-nlp
//! ```

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use rs_newspaper::network::timeout_from_secs;
use rs_newspaper::{Article, ArticleOptions, Config, ExtractionState};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "article_json")]
#[command(about = "Extract a news article and print it as JSON")]
struct Args {
    /// Article URL or path to a saved HTML file
    input: String,

    /// Debug-level logging
    #[arg(long)]
    verbose: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "7")]
    timeout: f64,

    /// CSS selector of a "read more" link to follow
    #[arg(long)]
    read_more: Option<String>,

    /// Skip keywords and summary
    #[arg(long)]
    no_nlp: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let Some(url) = input_url(&args.input) else {
        eprintln!("cannot read input `{}`", args.input);
        return ExitCode::FAILURE;
    };

    let mut config = Config {
        verbose: args.verbose,
        ..Config::default()
    };
    config.request.timeout = timeout_from_secs(args.timeout);

    let options = ArticleOptions {
        read_more_link: args.read_more.unwrap_or_default(),
        ..ArticleOptions::default()
    };
    let mut article = match Article::with_options(&url, options, config) {
        Ok(article) => article,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    article.download();
    if article.state() == ExtractionState::FailedFetch {
        eprintln!("{}", article.download_failure().unwrap_or("download failed"));
        return ExitCode::FAILURE;
    }

    let pipeline = if args.no_nlp {
        article.parse()
    } else {
        article.parse().and_then(|()| article.nlp())
    };
    if let Err(err) = pipeline {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match serde_json::to_string_pretty(&article.to_output()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("cannot serialize article: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// URLs pass through; existing paths become `file://` URLs.
fn input_url(input: &str) -> Option<String> {
    if Url::parse(input).is_ok() {
        return Some(input.to_string());
    }
    let path = std::fs::canonicalize(Path::new(input)).ok()?;
    Url::from_file_path(path).ok().map(String::from)
}
