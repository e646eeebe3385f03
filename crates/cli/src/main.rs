mod echo;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use pith_core::{
    Article, ExtractConfig, Extractor, FetchConfig, JsonConfig, LeashParams, MarkdownConfig, RenderConfig, fetch_file,
    fetch_stdin, fetch_url,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::echo::{
    format_size, print_banner, print_extraction_details, print_field, print_info, print_step, print_success,
    print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Text,
    Markdown,
    Json,
    Density,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "density" => Ok(Self::Density),
            _ => Err(format!("Invalid format: {}. Valid options: html, text, markdown, json, density", s)),
        }
    }
}

/// Extract the main content of a web page with a text-density graph
#[derive(Parser, Debug)]
#[command(name = "pith")]
#[command(version)]
#[command(about = "Extract the main content of web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (html, text, markdown, json, density)
    #[arg(short, long, default_value = "html", value_name = "FORMAT")]
    format: OutputFormat,

    /// Include TOML frontmatter (Markdown only)
    #[arg(long)]
    frontmatter: bool,

    /// Text length at which the leash starts growing
    #[arg(long, default_value = "0", value_name = "BYTES")]
    min_length: f64,

    /// Text length at which the leash reaches its maximum
    #[arg(long, default_value = "400", value_name = "BYTES")]
    max_length: f64,

    /// Smallest leash, in blocks
    #[arg(long, default_value = "0", value_name = "BLOCKS")]
    min_leash: f64,

    /// Largest leash, in blocks
    #[arg(long, default_value = "40", value_name = "BLOCKS")]
    max_leash: f64,

    /// Indentation width of HTML output, in spaces
    #[arg(long, default_value = "4", value_name = "N")]
    indent: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Print progress and debug logs to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Generate a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

enum Input {
    Stdin,
    Url(String),
    File(PathBuf),
}

impl Input {
    fn classify(input: &str) -> Self {
        if input == "-" {
            Self::Stdin
        } else if input.starts_with("http://") || input.starts_with("https://") {
            Self::Url(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "pith_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

async fn read_input(input: &Input, args: &Args) -> anyhow::Result<String> {
    let html = match input {
        Input::Stdin => {
            if args.verbose {
                print_step(1, 3, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")?
        }
        Input::Url(url) => {
            if args.verbose {
                print_step(1, 3, &format!("Fetching from {}", url.bright_white().underline()));
            }
            let mut config = FetchConfig { timeout: args.timeout, ..FetchConfig::default() };
            if let Some(user_agent) = &args.user_agent {
                config.user_agent = user_agent.clone();
            }
            fetch_url(url, &config).await.context("Failed to fetch URL")?
        }
        Input::File(path) => {
            if args.verbose {
                print_step(1, 3, &format!("Reading from file {}", path.display().bright_white()));
            }
            fetch_file(path).with_context(|| format!("Failed to read file: {}", path.display()))?
        }
    };

    if args.verbose {
        print_field("Size", &format_size(html.len()));
        eprintln!();
    }
    Ok(html)
}

fn render(article: &Article, args: &Args) -> anyhow::Result<String> {
    debug!(format = ?args.format, "rendering output");
    let output = match args.format {
        OutputFormat::Html => article.html().context("Failed to render HTML")?,
        OutputFormat::Text => article.text(),
        OutputFormat::Markdown => article
            .markdown(&MarkdownConfig { include_frontmatter: args.frontmatter })
            .context("Failed to convert to Markdown")?,
        OutputFormat::Json => article.to_json(&JsonConfig::default()).context("Failed to serialize JSON")?,
        OutputFormat::Density => article.density(),
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "pith", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);
    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let raw_input = args.input.as_deref().context("No input given")?;
    let input = Input::classify(raw_input);
    let html = read_input(&input, &args).await?;

    let leash = LeashParams::new(args.min_length, args.max_length, args.min_leash, args.max_leash)
        .context("Invalid leash parameters")?;
    let config = ExtractConfig::builder()
        .leash(leash)
        .render(RenderConfig::default().with_indent(args.indent))
        .build();
    let extractor = Extractor::with_config(config);

    if args.verbose {
        print_step(2, 3, "Extracting main content");
    }

    let article = match &input {
        Input::Url(url) => extractor.extract_with_url(&html, url),
        _ => extractor.extract(&html),
    }
    .context("Failed to extract content")?;

    if args.verbose {
        if let Some(title) = &article.meta().title {
            print_field("Title", title);
        }
        print_extraction_details(&article);
    }

    let mut output = render(&article, &args)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    if args.verbose {
        print_step(3, 3, "Writing output");
        print_field("Format", &format!("{:?}", args.format));
        if args.frontmatter && args.format != OutputFormat::Markdown {
            print_warning("--frontmatter only applies to Markdown output");
        }
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", output),
    }

    Ok(())
}
