//! Image Search CLI and MCP Server
//!
//! Searches Pixabay or Unsplash for photos by keyword and renders the
//! results as cards, in the terminal, as an HTML page, or over MCP.
//!
//! # Configuration
//! Set `PIXABAY_API_KEY` / `UNSPLASH_ACCESS_KEY` env vars or configure in
//! `~/.image-search/config.toml`

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rmcp::{transport::stdio, ServiceExt};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use image_search::{
    logging, providers, Config, DisplayState, HtmlRenderer, ImageSearchMcpServer, ProviderKind,
    SearchController, TerminalRenderer,
};

#[derive(Parser)]
#[command(name = "image-search")]
#[command(about = "Search Pixabay or Unsplash for photos and render them as cards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Provider to use (overrides config and IMAGE_SEARCH_PROVIDER)
    #[arg(long, global = true)]
    provider: Option<ProviderKind>,

    /// Log at info level even for interactive commands
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search
    Search {
        /// Keyword to search for
        query: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write the HTML page to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Prompt for keywords; every line is a search
    Interactive,
    /// Run as an MCP server on stdio
    Serve,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let quiet = !cli.verbose && !matches!(cli.command, Commands::Serve);
    logging::init_tracing(quiet)?;

    let mut config = Config::load()?;
    if let Some(provider) = cli.provider {
        config.search.provider = provider;
    }

    match cli.command {
        Commands::Search {
            query,
            format,
            output,
        } => run_search(&config, &query, format, output).await,
        Commands::Interactive => {
            run_interactive(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve => {
            run_server(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_search(
    config: &Config,
    query: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let provider = providers::from_config(config)?;

    let outcome = match format {
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            let color = stdout.is_terminal();
            let renderer = Arc::new(TerminalRenderer::new(stdout, color));
            let controller = SearchController::new(provider, renderer);
            controller.submit_search(query).await
        }
        OutputFormat::Html => {
            let view = Arc::new(HtmlRenderer::new());
            let controller = SearchController::new(provider, view.clone());
            let outcome = controller.submit_search(query).await;

            let page = view.document(&format!("Images for \"{}\"", query.trim()));
            match output {
                Some(path) => {
                    std::fs::write(&path, page)?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => print!("{}", page),
            }
            outcome
        }
    };

    Ok(match outcome {
        DisplayState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn run_interactive(config: &Config) -> Result<()> {
    use std::io::{self, BufRead, Write};

    let provider = providers::from_config(config)?;
    println!("Interactive mode. Type 'quit' to exit.");
    println!("Provider: {}", provider.name());

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let controller = SearchController::new(provider, Arc::new(TerminalRenderer::new(stdout, color)));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let trimmed = input.trim();
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        controller.submit_search(&input).await;
        println!();
    }

    Ok(())
}

async fn run_server(config: &Config) -> Result<()> {
    tracing::info!("Starting Image Search MCP Server");
    tracing::info!("Provider: {}", config.search.provider.as_str());

    let server = ImageSearchMcpServer::new(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
