use clap::Parser;
use plotter_tools::{
    Document, LogSink, LowerOptions, MalformedPolicy, entities_to_text, lower_document,
};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "plotter-tools", about = "Lower an SVG drawing to plotter polylines")]
struct Cli {
    /// Input SVG path
    input: PathBuf,

    /// Output path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum chord deviation from the curve
    #[arg(long, default_value = "0.2")]
    tolerance: f64,

    /// Page height in millimeters (read from the document if omitted)
    #[arg(long)]
    height: Option<f64>,

    /// Report malformed elements as warnings instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Drop elements with hidden or collapsed visibility
    #[arg(long)]
    prune_hidden: bool,
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let content = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading input file '{}': {}", cli.input.display(), e);
            process::exit(2);
        }
    };

    let mut options = LowerOptions::default()
        .with_tolerance(cli.tolerance)
        .with_prune_hidden(cli.prune_hidden);
    if let Some(height) = cli.height {
        options = options.with_page_height(height);
    }
    if cli.skip_malformed {
        options = options.with_policy(MalformedPolicy::SkipSubtree);
    }

    let entities = match Document::parse(&content)
        .and_then(|doc| lower_document(&doc, &options, &mut LogSink))
    {
        Ok(entities) => entities,
        Err(e) => {
            eprintln!("Error lowering '{}': {}", cli.input.display(), e);
            process::exit(3);
        }
    };

    let text = entities_to_text(&entities);

    match &cli.output {
        Some(path) => match fs::write(path, &text) {
            Ok(_) => {
                eprintln!(
                    "Lowered '{}' to '{}' ({} entities)",
                    cli.input.display(),
                    path.display(),
                    entities.len()
                );
            }
            Err(e) => {
                eprintln!("Error writing output file '{}': {}", path.display(), e);
                process::exit(4);
            }
        },
        None => print!("{}", text),
    }
}
