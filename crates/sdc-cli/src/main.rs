mod session;
mod terminal;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sdc_core::{AppConfig, QueryContext};
use sdc_search::{PresenterState, SequentialAggregator, SuggestionPresenter};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::session::SessionCommand;
use crate::terminal::{plain_row, PrintNavigator, TerminalView};

#[derive(Debug, Parser)]
#[command(name = "sdc")]
#[command(about = "Search suggestions from the full-text API and the geocoder")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one suggestion cycle and print the list
    Suggest {
        /// Search term
        term: String,
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Type terms line by line and pick suggestions (:focus N, :select N, :blur, :quit)
    Interactive {
        /// Width of the simulated input box, in columns
        #[arg(long, default_value_t = 72)]
        width: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = sdc_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Suggest { term, json }) => run_suggest(&config, &term, json).await,
        Some(Commands::Interactive { width }) => run_interactive(&config, width).await,
        None => {
            println!("sdc: pass a subcommand (suggest, interactive); see --help");
            Ok(())
        }
    }
}

async fn run_suggest(config: &AppConfig, term: &str, json: bool) -> anyhow::Result<()> {
    if term.chars().count() < config.min_query_len {
        eprintln!(
            "search terms need at least {} characters",
            config.min_query_len
        );
        return Ok(());
    }

    let aggregator = SequentialAggregator::from_config(config)?;
    let list = aggregator.aggregate(&QueryContext::new(term, 1)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for (index, item) in list.iter().enumerate() {
            println!("{index:>2}. {}", plain_row(item));
        }
    }
    Ok(())
}

async fn run_interactive(config: &AppConfig, width: usize) -> anyhow::Result<()> {
    let aggregator = Arc::new(SequentialAggregator::from_config(config)?);
    let view = TerminalView::new(width);
    let navigator = PrintNavigator::new(config.site_base_url.clone());
    let (presenter, mut outcomes) =
        SuggestionPresenter::new(aggregator, view, navigator, config.min_query_len);
    let mut presenter = presenter.with_item_template(plain_row);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match session::parse_command(&line) {
                    Ok(SessionCommand::Input(term)) => {
                        presenter.on_input(&term);
                    }
                    Ok(SessionCommand::Focus(index)) => {
                        if !presenter.on_focus_change(index) {
                            eprintln!("no row {index}");
                        }
                    }
                    Ok(SessionCommand::Select(index)) => {
                        if presenter.on_select(index).is_none() {
                            eprintln!("no row {index}");
                        }
                    }
                    Ok(SessionCommand::Blur) => presenter.on_blur(),
                    Ok(SessionCommand::Quit) => break,
                    Err(message) => eprintln!("{message}"),
                }
            }
            Some(outcome) = outcomes.recv() => {
                presenter.on_cycle_complete(outcome);
            }
        }

        if presenter.state() == PresenterState::Navigating {
            break;
        }
    }

    Ok(())
}
