use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use zxml::{
    error::Result,
    formatter::{FormatConfig, XmlFormatter},
    utils::{read_file, write_file},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input XML file path
    #[arg(short, long)]
    file: String,

    /// Indent child elements onto new lines
    #[arg(short, long)]
    multiline: bool,

    /// Error on namespaces without a prefix binding instead of rendering
    /// bare local names
    #[arg(short, long)]
    strict: bool,

    /// Output file path
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    // Initialize the default subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false) // Don't show target
        .without_time() // Don't show timestamps
        .init(); // Initialize the subscriber

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Read and parse the input document
    info!("Reading file: {}", args.file);
    let content = read_file(&args.file)?;
    let document = zxml::parse(&content)?;

    // Regenerate XML text with the requested formatting
    let config = FormatConfig {
        multiline: args.multiline,
        strict: args.strict,
    };
    let formatted = XmlFormatter::format(&document, &config)?;

    // Write to file or print to stdout
    if let Some(output_path) = args.output {
        write_file(&output_path, &formatted)?;
    } else {
        println!("{}", formatted);
    }

    Ok(())
}
