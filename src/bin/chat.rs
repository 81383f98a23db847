//! Terminal chat client for the SEC Bot API.
//!
//! Run with: `cargo run --bin sec-bot -- --url http://127.0.0.1:8000/`
//! Point `--url` at a `/mock` path to exercise the interface without the
//! hosted agent.

use std::io::Write as _;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use sec_bot::chat::{LinkScanner, Message};
use sec_bot::client::{ChatSession, SessionOptions, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

/// CLI arguments for the chat client.
#[derive(Parser, Debug)]
#[command(name = "sec-bot", about = "Ask financial research questions from the terminal")]
struct Args {
    /// Page URL of the backend; a path ending in `/mock` selects mock mode.
    #[arg(long, env = "SEC_BOT_URL", default_value = "http://127.0.0.1:8000/")]
    url: String,

    /// Ask a single question and exit.
    #[arg(short, long)]
    question: Option<String>,

    /// Artificial delay of mock answers, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    mock_delay_ms: u64,

    /// Timeout for each ask request, in seconds (HTTP client default when unset).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Do not ship client log lines to the backend.
    #[arg(long, default_value_t = false)]
    no_diagnostics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let options = SessionOptions {
        mock_delay: Duration::from_millis(args.mock_delay_ms),
        request_timeout: args.timeout_secs.map(Duration::from_secs),
        diagnostics: !args.no_diagnostics,
    };
    let mut session = ChatSession::connect(&args.url, &options)
        .with_context(|| format!("cannot open chat session for {}", args.url))?;
    let scanner = LinkScanner::new().context("link pattern failed to compile")?;

    if let Some(question) = args.question {
        session.submit(&question).await;
        if let Some(answer) = session.transcript().last() {
            print_bot(&scanner, answer);
        }
        return Ok(());
    }

    println!("Welcome to SEC Bot! Ask me your financial research questions.");
    if session.mode().is_mock() {
        println!("(mock mode: answers are canned, nothing is sent to the backend)");
    }
    println!("Type 'exit' or 'quit' to end.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if matches!(line.trim().to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        if session.submit(&line).await == SubmitOutcome::Ignored {
            continue;
        }
        if let Some(answer) = session.transcript().last() {
            print_bot(&scanner, answer);
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_bot(scanner: &LinkScanner, message: &Message) {
    println!("Bot: {}", scanner.render_terminal(&message.content));
}
