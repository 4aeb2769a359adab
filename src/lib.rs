pub mod config;
pub mod connectors;
pub mod indexer;
pub mod model;
pub mod search;
pub mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::SearchConfig;
use connectors::markdown::MarkdownSource;
use connectors::{ContentSource, ScanContext};
use indexer::IndexOptions;
use model::edges::{simplify_edges, sort_newest_first};
use model::types::NormalizedListItem;
use search::{SearchClient, to_node_array};
use ui::data::SearchView;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "blog-search",
    version,
    about = "Build search index statements for blog content and query the search service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the SQL insert artifact for every content file
    Index {
        /// Markdown content root
        #[arg(long, env = config::CONTENT_DIR_ENV, default_value = config::DEFAULT_CONTENT_DIR)]
        content_dir: PathBuf,

        /// Artifact to write (replaced on every run)
        #[arg(long, short, env = config::OUTPUT_ENV, default_value = config::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Query the search service
    Search {
        /// Search term (may be empty)
        #[arg(default_value = "")]
        query: String,

        /// Search endpoint base URL
        #[arg(long, env = config::SEARCH_URL_ENV)]
        search_url: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long, env = config::SEARCH_TIMEOUT_ENV)]
        timeout_secs: Option<u64>,

        /// Print listing items as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List local content newest first, as JSON
    List {
        /// Markdown content root
        #[arg(long, env = config::CONTENT_DIR_ENV, default_value = config::DEFAULT_CONTENT_DIR)]
        content_dir: PathBuf,

        /// Emit `{id, title, published_at, slug}` edges only
        #[arg(long)]
        simplified: bool,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Index {
            content_dir,
            output,
            json,
        } => run_index(content_dir, output, json),
        Commands::Search {
            query,
            search_url,
            timeout_secs,
            json,
        } => run_search(&query, search_url, timeout_secs, json).await,
        Commands::List {
            content_dir,
            simplified,
        } => run_list(content_dir, simplified),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "blog-search", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

fn run_index(content_dir: PathBuf, output: PathBuf, json: bool) -> Result<()> {
    let report = indexer::run_index(&IndexOptions {
        content_dir,
        output,
    })?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Wrote {} insert statements to {}",
            report.statements,
            report.output.display()
        );
    }
    Ok(())
}

async fn run_search(
    query: &str,
    search_url: Option<String>,
    timeout_secs: Option<u64>,
    json: bool,
) -> Result<()> {
    let config = SearchConfig::new(search_url, timeout_secs)?;
    let client = SearchClient::new(&config)?;

    let mut view = SearchView::new();
    view.begin(query);
    if !json {
        for line in view.render() {
            eprintln!("{line}");
        }
    }

    let items = to_node_array(&client.search(query).await);
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    view.complete(items);
    for line in view.render() {
        println!("{line}");
    }
    Ok(())
}

fn run_list(content_dir: PathBuf, simplified: bool) -> Result<()> {
    let records = MarkdownSource::new()
        .scan(&ScanContext::new(content_dir.clone()))
        .with_context(|| format!("loading content from {}", content_dir.display()))?;

    let mut items: Vec<NormalizedListItem> = records
        .iter()
        .map(|r| NormalizedListItem::from_record(&r.record, r.relative_id.clone()))
        .collect();
    sort_newest_first(&mut items);

    let out = if simplified {
        serde_json::to_string_pretty(&simplify_edges(&items))?
    } else {
        serde_json::to_string_pretty(&items)?
    };
    println!("{out}");
    Ok(())
}
