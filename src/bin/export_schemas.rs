//! Writes JSON Schemas for the engine's input and output documents.
//!
//! ```text
//! export_schemas --out-dir schemas
//! ```

use anyhow::Context;
use clap::Parser;
use policy_quote_engine::application::error::ErrorResponse;
use policy_quote_engine::application::services::{ComparisonResult, SavingsAnalysis};
use policy_quote_engine::domain::entities::RawQuote;
use schemars::schema::RootSchema;
use schemars::schema_for;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "export_schemas", version, about = "Export JSON Schemas")]
struct Cli {
    #[arg(long, default_value = "schemas", help = "Directory to write schema files into")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let schemas: [(&str, RootSchema); 4] = [
        ("raw_quote", schema_for!(RawQuote)),
        ("comparison_result", schema_for!(ComparisonResult)),
        ("savings_analysis", schema_for!(SavingsAnalysis)),
        ("error_response", schema_for!(ErrorResponse)),
    ];

    for (name, schema) in &schemas {
        let path = write_schema(&cli.out_dir, name, schema)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn write_schema(dir: &Path, name: &str, schema: &RootSchema) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!("{name}.schema.json"));
    let body = serde_json::to_string_pretty(schema)?;
    std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
