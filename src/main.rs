use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use emotion_lens::{
    logging, AnalysisClient, ClientConfig, Outcome, Panel, Session, TerminalTarget,
};

#[derive(Parser, Debug)]
#[command(name = "emotion-lens", version, about = "Sentiment and emotion analysis client")]
struct Cli {
    /// Analysis backend base URL.
    #[arg(long, env = "ANALYSIS_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds. Waits indefinitely when unset.
    #[arg(long, env = "ANALYSIS_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Disable ANSI colors. Any non-empty `NO_COLOR` other than `0`/`false` counts.
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a piece of text.
    Text {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Analyze an image file or a sample image URL.
    Image {
        #[arg(required_unless_present = "sample", conflicts_with = "sample")]
        path: Option<PathBuf>,
        #[arg(long)]
        sample: Option<String>,
    },
    /// Ask the backend to train its model.
    Train,
    /// Ask the backend to evaluate its model.
    Evaluate,
    /// Interactive shell.
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = cli.timeout.filter(|s| *s > 0) {
        config = config.with_timeout(Some(Duration::from_secs(secs)));
    }
    info!(base_url = %config.base_url, "using analysis backend");

    let client = AnalysisClient::new(&config).context("failed to build analysis client")?;
    let session = Session::new(client, TerminalTarget::new(!cli.no_color));

    let outcome = match cli.command {
        Command::Text { words } => {
            let outcome = session.analyze_text(&words.join(" ")).await;
            print_panel(&session, Panel::Text);
            outcome
        }
        Command::Image { path, sample } => {
            match (path, sample) {
                (_, Some(url)) => session
                    .select_sample(&url)
                    .await
                    .context("failed to load sample image")?,
                (Some(path), None) => session
                    .select_image_path(&path)
                    .context("failed to load image")?,
                (None, None) => anyhow::bail!("an image path or --sample URL is required"),
            }
            let outcome = session.analyze_image().await;
            print_panel(&session, Panel::Image);
            outcome
        }
        Command::Train => {
            let outcome = session.train().await;
            print_panel(&session, Panel::Model);
            outcome
        }
        Command::Evaluate => {
            let outcome = session.evaluate().await;
            print_panel(&session, Panel::Model);
            outcome
        }
        Command::Shell => {
            run_shell(&session).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_panel(session: &Session<TerminalTarget>, panel: Panel) {
    let frame = session.with_target(|t| t.render(panel));
    if !frame.is_empty() {
        println!("{}", frame.trim_end());
    }
}

const SHELL_HELP: &str = "\
Commands:
  text <words...>   analyze text
  select <path>     select an image file
  sample <url>      select a sample image by URL
  image             analyze the selected image
  train             train the backend model
  evaluate          evaluate the backend model
  help              show this help
  quit              leave the shell";

async fn run_shell(session: &Session<TerminalTarget>) -> Result<()> {
    println!("{}", SHELL_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", SHELL_HELP),
            "text" => {
                report(session.analyze_text(rest).await);
                print_panel(session, Panel::Text);
            }
            "select" => match session.select_image_path(rest) {
                Ok(()) => print_panel(session, Panel::Image),
                Err(e) => eprintln!("{}", e),
            },
            "sample" => match session.select_sample(rest).await {
                Ok(()) => print_panel(session, Panel::Image),
                Err(e) => eprintln!("{}", e),
            },
            "image" => {
                report(session.analyze_image().await);
                print_panel(session, Panel::Image);
            }
            "train" => {
                report(session.train().await);
                print_panel(session, Panel::Model);
            }
            "evaluate" => {
                report(session.evaluate().await);
                print_panel(session, Panel::Model);
            }
            other => warn!(command = other, "unknown command, try `help`"),
        }
    }

    Ok(())
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Skipped(reason) => println!("Nothing to do: {}", reason),
        Outcome::Busy => println!("Still waiting for the previous request"),
        _ => {}
    }
}
