mod echo;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use futures::StreamExt;
use owo_colors::OwoColorize;
use sydsvenskan_core::{
    JsonConfig, SiteConfig, Sydsvenskan, Termination, TextConfig, article_to_text, articles_to_json, teaser_to_json,
    teaser_to_text,
};
use tracing_subscriber::EnvFilter;
use url::Url;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Read the Sydsvenskan news day listing and search the site
#[derive(Parser, Debug)]
#[command(name = "sydsvenskan")]
#[command(version)]
#[command(about = "Read the Sydsvenskan news day listing and search the site", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT", global = true)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS", global = true)]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA", global = true)]
    user_agent: Option<String>,

    /// Site root; the listing and search endpoints are derived from it
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<Url>,

    /// Enable progress output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every article on the news day listing
    Newsday {
        /// Pretty print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Search the site and print hits as they arrive
    Search {
        /// Search query
        #[arg(value_name = "QUERY")]
        query: String,

        /// Stop after this many hits
        #[arg(short = 'n', long, value_name = "NUM")]
        limit: Option<usize>,

        /// Append the preamble to each hit (text only)
        #[arg(long)]
        preamble: bool,

        /// Mark paywalled hits with [+] (text only)
        #[arg(long)]
        premium: bool,
    },
    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sydsvenskan_core={0},sydsvenskan={0}", level)));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn site_config(args: &Args) -> anyhow::Result<SiteConfig> {
    let mut builder = SiteConfig::builder().timeout(args.timeout);

    if let Some(url) = &args.base_url {
        builder = builder.base_url(url.as_str());
    }
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder.build().context("Invalid site configuration")
}

async fn run_newsday(client: &Sydsvenskan, args: &Args, pretty: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let started = Instant::now();

    if args.verbose {
        echo::print_step(
            1,
            2,
            &format!("Fetching {}", client.config().newsday_url.as_str().bright_white().underline()),
        );
    }

    let feed = client.fetch_newsday_feed().await.context("Failed to fetch news day listing")?;

    if args.verbose {
        eprintln!("  {} {}", "Articles:".dimmed(), feed.len().to_string().bright_white());
        echo::print_timing("Fetch", started.elapsed());
        eprintln!();
        echo::print_step(2, 2, "Writing output");
    }

    match args.format {
        OutputFormat::Json => {
            let json = articles_to_json(&feed, &JsonConfig { pretty }).context("Failed to serialize listing")?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Text => {
            let config = TextConfig::default();
            for article in &feed {
                writeln!(out, "{}", article_to_text(article, &config))?;
            }
        }
    }

    if args.verbose && feed.is_empty() {
        echo::print_warning("The listing had no articles");
    }

    Ok(())
}

async fn run_search(
    client: &Sydsvenskan, args: &Args, query: &str, limit: Option<usize>, text: &TextConfig, out: &mut dyn Write,
) -> anyhow::Result<()> {
    let started = Instant::now();

    if args.verbose {
        echo::print_step(1, 1, &format!("Searching for {}", query.bright_white()));
    }

    let mut stream = client.search(query);
    let mut count = 0;
    let mut failure = None;

    loop {
        if limit.is_some_and(|n| count >= n) {
            stream.cancel();
            break;
        }

        let Some(item) = stream.next().await else { break };
        match item {
            Ok(teaser) => {
                let line = match args.format {
                    OutputFormat::Json => teaser_to_json(&teaser).context("Failed to serialize hit")?,
                    OutputFormat::Text => teaser_to_text(&teaser, text),
                };
                writeln!(out, "{}", line)?;
                out.flush()?;
                count += 1;
            }
            Err(e) => failure = Some(e),
        }
    }

    tracing::debug!(query, count, termination = ?stream.termination(), "Search finished");

    if args.verbose {
        eprintln!();
        echo::print_termination(stream.termination(), count);
        echo::print_timing("Search", started.elapsed());
    }

    match (failure, stream.termination()) {
        (Some(e), _) => Err(anyhow::Error::new(e).context(format!("Search for '{}' stopped early", query))),
        (None, Some(Termination::Interrupted)) => anyhow::bail!("Search for '{}' was interrupted", query),
        _ => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Command::Completions { shell } = args.command {
        clap_complete::generate(shell, &mut Args::command(), "sydsvenskan", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let client = Sydsvenskan::with_config(site_config(&args)?);

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match &args.command {
        Command::Newsday { pretty } => run_newsday(&client, &args, *pretty, &mut out).await?,
        Command::Search { query, limit, preamble, premium } => {
            let text = TextConfig { include_preamble: *preamble, mark_premium: *premium, ..Default::default() };
            run_search(&client, &args, query, *limit, &text, &mut out).await?
        }
        Command::Completions { .. } => {}
    }

    out.flush()?;

    if let Some(path) = &args.output {
        echo::print_success(&format!("Output written to {}", path.display().bright_white()));
    }

    Ok(())
}
