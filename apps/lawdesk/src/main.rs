use std::io::Write as _;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings,
    transcript::{render_record, render_transcript},
    ClientSettings, DocumentPresenter, HttpQueryTransport, QuerySubmissionController,
    SubmitOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lawdesk", about = "Ask questions about the laws and read cited answers")]
struct Args {
    /// Base URL of the answering service; overrides lawdesk.toml and env.
    #[arg(long, global = true)]
    endpoint_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask one question and print the answer with its sources.
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Interactive transcript. `:history` reprints it, `:quit` leaves.
    Repl,
    /// Print the embed markup for the corpus document.
    Embed {
        #[arg(long)]
        src: Option<String>,
        #[arg(long, default_value = "Laws of the Seven Kingdoms PDF")]
        title: String,
        #[arg(long)]
        height: Option<String>,
    },
}

fn build_transport(settings: &ClientSettings) -> Result<HttpQueryTransport> {
    HttpQueryTransport::with_timeout(&settings.endpoint_url, settings.request_timeout())
        .with_context(|| format!("failed to set up transport for {}", settings.endpoint_url))
}

async fn ask(settings: &ClientSettings, question: String) -> Result<()> {
    let transport = build_transport(settings)?;
    let mut controller = QuerySubmissionController::new();
    controller.set_query_text(question);

    match controller.submit(&transport).await {
        SubmitOutcome::Rejected => bail!("query text must not be empty"),
        SubmitOutcome::Failed(notice) => bail!("{notice}"),
        SubmitOutcome::Succeeded => {
            if let Some(record) = controller.latest_record() {
                let mut out = String::new();
                render_record(&mut out, 1, record);
                print!("{out}");
            }
            Ok(())
        }
    }
}

async fn repl(settings: &ClientSettings) -> Result<()> {
    let transport = build_transport(settings)?;
    let mut controller = QuerySubmissionController::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Legal Query Assistant ({})", settings.endpoint_url);
    print!("{}", render_transcript(controller.history()));
    loop {
        print!("> ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        match line.trim() {
            ":quit" | ":q" => {
                debug!("leaving repl");
                break;
            }
            ":history" => {
                print!("{}", render_transcript(controller.history()));
                continue;
            }
            _ => {}
        }

        controller.set_query_text(line);
        if !controller.can_submit() {
            continue;
        }
        println!("Searching...");
        match controller.submit(&transport).await {
            SubmitOutcome::Succeeded => {
                if let Some(record) = controller.latest_record() {
                    let mut out = String::new();
                    render_record(&mut out, 1, record);
                    print!("{out}");
                }
            }
            SubmitOutcome::Failed(notice) => eprintln!("{notice}"),
            SubmitOutcome::Rejected => {}
        }
    }

    controller.teardown();
    info!(answered = controller.history().len(), "repl session closed");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(endpoint_url) = args.endpoint_url {
        settings.endpoint_url = endpoint_url;
    }

    debug!(
        endpoint = %settings.endpoint_url,
        document = %settings.document_path,
        "settings loaded"
    );

    match args.command {
        Command::Ask { question } => ask(&settings, question.join(" ")).await,
        Command::Repl => repl(&settings).await,
        Command::Embed { src, title, height } => {
            let src = src.unwrap_or_else(|| settings.document_path.clone());
            let presenter = DocumentPresenter::new(src, title).with_height(height);
            print!("{}", presenter.render_html());
            Ok(())
        }
    }
}
