//! `psl-complete` - Print the completion list for a position in a schema file.
//!
//! Output is the JSON form of a `textDocument/completion` response on stdout,
//! or `null` when nothing can be completed. Logs go to stderr.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use psl_lsp::{completion_response, load_schema, ProjectConfig};

#[derive(Debug, Parser)]
#[command(
    name = "psl-complete",
    version,
    about = "Print schema completions for a file position as JSON"
)]
struct Args {
    /// Schema file to complete in.
    #[arg(value_name = "FILE")]
    file: PathBuf,
    /// Zero-based line of the cursor.
    #[arg(long)]
    line: u32,
    /// Zero-based character of the cursor within the line.
    #[arg(long)]
    character: u32,
    /// Project root holding `psl.toml` (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Character that triggered the request, if any.
    #[arg(long, value_name = "CHAR")]
    trigger: Option<char>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("failed to read the current directory")?,
    };
    let config = ProjectConfig::load(&root);
    let loaded = load_schema(&config, &args.file)?;
    info!(
        "Completing {} at {}:{}",
        loaded.uri, args.line, args.character
    );

    let trigger = args.trigger.map(String::from);
    let response = completion_response(
        &loaded.schema,
        &loaded.uri,
        lsp_types::Position::new(args.line, args.character),
        trigger.as_deref(),
    );
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
