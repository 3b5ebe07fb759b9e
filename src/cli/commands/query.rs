//! Query command - one-shot fan-out rendered as three terminal panels.

use crate::aggregator::Aggregator;
use crate::cli::Output;
use crate::config::Settings;
use crate::markup::{parse_blocks, Block};
use crate::sources::{SourceFailure, SourceResult, VideoHit, WebHit};
use console::style;

/// Run a query against all sources and print each panel.
pub async fn run_query(query: &str, settings: Settings) -> anyhow::Result<()> {
    let aggregator = Aggregator::new(&settings);

    let spinner = Output::spinner("Querying all sources...");
    let result = aggregator.search(query).await?;
    spinner.finish_and_clear();

    print_llm_panel(&result.llm);
    print_video_panel(&result.video);
    print_web_panel(&result.websearch);

    Ok(())
}

fn print_llm_panel(outcome: &SourceResult<String>) {
    Output::panel("LLM");
    match outcome {
        Ok(answer) => render_answer(answer),
        Err(failure) => print_failure(failure),
    }
}

fn print_video_panel(outcome: &SourceResult<Vec<VideoHit>>) {
    Output::panel("Videos");
    match outcome {
        Ok(hits) if hits.is_empty() => Output::info("No videos found"),
        Ok(hits) => {
            for hit in hits {
                let url = format!("https://youtube.com/watch?v={}", hit.video_id);
                Output::hit(&hit.title, &hit.channel, &url);
            }
        }
        Err(failure) => print_failure(failure),
    }
}

fn print_web_panel(outcome: &SourceResult<Vec<WebHit>>) {
    Output::panel("Web");
    match outcome {
        Ok(hits) if hits.is_empty() => Output::info("No results found"),
        Ok(hits) => {
            for hit in hits {
                Output::hit(&hit.title, &hit.snippet, &hit.link);
            }
        }
        Err(failure) => print_failure(failure),
    }
}

/// Render the LLM answer through the lightweight markup classifier.
fn render_answer(answer: &str) {
    for block in parse_blocks(answer) {
        match block {
            Block::Heading { level: 1, text } => {
                println!("\n{}", style(text).bold().underlined())
            }
            Block::Heading { text, .. } => println!("\n{}", style(text).bold()),
            Block::ListItem(text) => println!("  {} {}", style("*").cyan(), text),
            Block::Paragraph(text) => println!("{}", text),
        }
    }
}

fn print_failure(failure: &SourceFailure) {
    Output::error(&failure.message);
}
