//! aivr-play - Terminal client for the AI vs Real quiz
//!
//! Plays against a running aivr-server using either delivery mode:
//! - `manifest` (default): fetch image-manifest.json once, select locally
//! - `api`: ask /api/next-image every round
//!
//! Type `h` (human) or `a` (ai) and Enter to guess, `q` to quit.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aivr_common::Label;
use aivr_game::remote::parse_base_url;
use aivr_game::{
    ApiSource, FeedbackStyle, GameSession, ImageSource, ManifestSource, RoundController, RoundView,
};

/// How images reach the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Manifest,
    Api,
}

/// Command-line arguments for aivr-play
#[derive(Parser, Debug)]
#[command(name = "aivr-play")]
#[command(about = "Terminal client for the AI vs Real quiz")]
#[command(version)]
struct Args {
    /// Base URL of the quiz server
    #[arg(short, long, default_value = "http://127.0.0.1:3000", env = "AIVR_SERVER")]
    server: String,

    /// Image delivery mode
    #[arg(short, long, value_enum, default_value = "manifest", env = "AIVR_MODE")]
    mode: Mode,

    /// Seed for local selection (manifest mode only)
    #[arg(long)]
    seed: Option<u64>,
}

fn render(view: &RoundView) -> String {
    let mut out = String::new();

    match (&view.image_url, view.phase) {
        (_, "loading") => out.push_str("Loading next image...\n"),
        (Some(url), _) => out.push_str(&format!("Image: {}\n", url)),
        _ => {}
    }

    if let Some(feedback) = &view.feedback {
        let marker = match feedback.style {
            FeedbackStyle::Correct => "+",
            FeedbackStyle::Incorrect => "-",
        };
        out.push_str(&format!("[{}] {}\n", marker, feedback.text));
    }

    out.push_str(&view.score);
    out.push('\n');

    if view.controls_enabled {
        out.push_str("Human or AI? [h/a, q to quit] ");
    }
    out
}

fn parse_guess(line: &str) -> Option<Label> {
    match line.trim().to_ascii_lowercase().as_str() {
        "h" => Some(Label::Human),
        "a" => Some(Label::Ai),
        other => other.parse().ok(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the game text on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aivr_game=warn,aivr_play=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let base = parse_base_url(&args.server).context("Invalid --server URL")?;
    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let source: Box<dyn ImageSource> = match args.mode {
        Mode::Manifest => {
            let source = ManifestSource::new(client, base);
            match args.seed {
                Some(seed) => Box::new(source.with_seed(seed)),
                None => Box::new(source),
            }
        }
        Mode::Api => Box::new(ApiSource::new(client, base)),
    };
    info!("Using {}", source.describe());

    let session = GameSession::spawn(RoundController::new(source));
    let mut views = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", render(&views.borrow_and_update()));

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                print!("{}", render(&view));
            }
            line = lines.next_line() => {
                let line = match line.context("Failed to read stdin")? {
                    Some(line) => line,
                    None => break,
                };
                if line.trim().eq_ignore_ascii_case("q") {
                    break;
                }
                match parse_guess(&line) {
                    Some(label) => {
                        session.guess(label).await;
                    }
                    None => println!("Type h, a or q"),
                }
            }
        }
        std::io::stdout().flush().ok();
    }

    let final_score = session.current().score;
    session.shutdown().await;
    println!("\nFinal {}", final_score);
    Ok(())
}
