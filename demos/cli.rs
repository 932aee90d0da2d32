use clap::Parser;
use std::io::{BufRead, BufReader};
use tracing_subscriber::EnvFilter;

/// Evaluate spoken arithmetic, one utterance per line.
#[derive(Debug, Parser)]
struct Args {
    /// Skip the spoken-word normalizer and feed input straight to the
    /// calculator.
    #[arg(long)]
    raw: bool,
    /// Utterances to evaluate. Reads from stdin when none are given.
    utterances: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let run = |utterance: &str| {
        let text = if args.raw {
            utterance.to_string()
        } else {
            spoken_calc::spoken::normalize(utterance)
        };
        println!("{}", spoken_calc::calculate(&text));
    };

    if !args.utterances.is_empty() {
        for utterance in &args.utterances {
            run(utterance);
        }
        return Ok(());
    }

    let stdin = std::io::stdin();

    for line in BufReader::new(stdin.lock()).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        run(&line);
    }

    Ok(())
}
