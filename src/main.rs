use anyhow::Result;
use clap::{Parser, Subcommand};

use newsynth::aggregator::fetch_all_news;
use newsynth::config::Config;
use newsynth::logging::configure_logging;
use newsynth::summary::summarize;
use newsynth::web;

#[derive(Parser)]
#[command(
    name = "newsynth",
    about = "News aggregation with lexical sentiment tagging"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API with the scheduled refresh loop
    Serve,
    /// Run one aggregation cycle and print it as JSON
    Fetch {
        /// Restrict output to one topic
        #[arg(long)]
        topic: Option<String>,
        /// Print the sentiment summary instead of the article list
        #[arg(long)]
        summary: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Serve => web::serve(config).await,
        Command::Fetch {
            topic,
            summary,
            pretty,
        } => {
            let batch = fetch_all_news(&config).await;
            let output = if summary {
                let counts = summarize(&batch.articles, topic.as_deref());
                to_json(&counts, pretty)?
            } else {
                match topic.as_deref() {
                    Some(topic) => {
                        let key = topic.trim().to_lowercase();
                        let filtered: Vec<_> = batch
                            .articles
                            .iter()
                            .filter(|a| a.topic == key)
                            .collect();
                        to_json(&filtered, pretty)?
                    }
                    None => to_json(&batch, pretty)?,
                }
            };
            println!("{}", output);
            Ok(())
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
