use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use brine_struct::layout_to_json;
use brine_struct_compiler::error::StructGenError;
use brine_struct_compiler::{load_schema_file, write_header, GenOptions};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bstruct")]
#[command(about = "Generate a C++ struct header and its computed size from a TOML schema", long_about = None)]
struct Cli {
    /// Output header file (prints to stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also print the computed member layout as JSON on stderr
    #[arg(long)]
    layout: bool,

    /// Input `.toml` schema file
    input: PathBuf,
}

fn main() {
    // stdout may carry the generated header, keep diagnostics on stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), StructGenError> {
    let schema = load_schema_file(&cli.input)?;
    let options = GenOptions::new(cli.input.display().to_string());
    debug!(input = %cli.input.display(), guard_token = %options.guard_token, "generating header");

    let total_size = match &cli.output {
        Some(out_path) => {
            let file = File::create(out_path).map_err(|source| StructGenError::OutputOpen {
                path: out_path.display().to_string(),
                source,
            })?;
            let size = write_header(&schema, &options, BufWriter::new(file))?;
            info!(output = %out_path.display(), size, "header written");
            size
        }
        None => write_header(&schema, &options, io::stdout().lock())?,
    };
    debug!(struct_name = %schema.name, total_size, "done");

    if cli.layout {
        eprintln!("{}", layout_to_json(&schema)?);
    }
    Ok(())
}
