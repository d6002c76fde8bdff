//! Compares a batch of insurance quotes from a JSON document.
//!
//! ```text
//! compare_quotes quotes.json --format matrix --current-premium 1500
//! cat quotes.json | compare_quotes --providers providers.toml
//! ```
//!
//! The input is either an array of raw quotes or an object
//! `{ "quotes": [...], "client_profile": {...} }`. Failures print an
//! `ErrorResponse` JSON document on stdout and exit with status 1.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use policy_quote_engine::application::error::{ApplicationError, ErrorResponse};
use policy_quote_engine::application::services::{
    ClientProfile, ComparisonReportBuilder, MatrixOptions, PremiumRanking, RankingStrategy,
    SavingsAnalysis, ValueScoreRanking, render_matrix,
};
use policy_quote_engine::domain::entities::{ProviderDirectory, RawQuote};
use policy_quote_engine::domain::errors::DomainError;
use policy_quote_engine::domain::services::QuoteNormalizer;
use policy_quote_engine::domain::value_objects::Premium;
use policy_quote_engine::infrastructure::{Settings, init_tracing};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "compare_quotes", version, about = "Compare insurance quotes")]
struct Cli {
    #[arg(help = "Quote document; reads stdin when omitted or '-'")]
    input: Option<PathBuf>,
    #[arg(long, help = "Settings file (defaults to config/default.toml)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Provider directory file (.toml or .json)")]
    providers: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    #[arg(long, value_enum, default_value_t = Ranking::Value)]
    rank_by: Ranking,
    #[arg(long, help = "Current annual premium for a savings analysis")]
    current_premium: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Matrix,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Ranking {
    Value,
    Premium,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let response = match error.downcast_ref::<ApplicationError>() {
                Some(app_error) => ErrorResponse::from(app_error),
                None => ErrorResponse {
                    kind: "IO".to_string(),
                    message: format!("{error:#}"),
                },
            };
            match serde_json::to_string_pretty(&response) {
                Ok(body) => println!("{body}"),
                Err(_) => eprintln!("{}: {}", response.kind, response.message),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    // a subscriber may already be installed by an embedding process
    let _ = init_tracing(&settings.logging);

    let directory = match &cli.providers {
        Some(path) => load_directory(path)?,
        None => settings.to_provider_directory()?,
    };
    debug!(providers = directory.len(), "provider directory loaded");

    let strategy: Arc<dyn RankingStrategy> = match cli.rank_by {
        Ranking::Value => Arc::new(ValueScoreRanking::new()),
        Ranking::Premium => Arc::new(PremiumRanking::new()),
    };
    let builder = ComparisonReportBuilder::new(
        QuoteNormalizer::new(Arc::new(directory)),
        strategy,
        settings.comparison_config(),
    );

    let document = read_document(cli.input.as_deref())?;
    let (quotes, client_profile) = parse_request(&document)?;
    let result = builder.build(&quotes, client_profile)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Matrix => print!("{}", render_matrix(&result, &MatrixOptions::default())),
    }

    if let Some(current) = cli.current_premium {
        let current = Premium::from_f64(current).ok_or_else(|| {
            ApplicationError::validation("current premium must be a non-negative number")
        })?;
        let best_value = result
            .quotes
            .iter()
            .map(|ranked| &ranked.quote)
            .find(|quote| quote.source_index() == result.recommendations.best_value.source_index)
            .ok_or(ApplicationError::Domain(DomainError::EmptyQuoteSet))?;
        let analysis = SavingsAnalysis::calculate(current, best_value)?;
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
            OutputFormat::Matrix => println!("\n{analysis}"),
        }
    }

    Ok(())
}

fn read_document(path: Option<&Path>) -> anyhow::Result<Value> {
    let mut text = String::new();
    match path {
        Some(path) if path != Path::new("-") => {
            text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
        }
        _ => {
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
        }
    }
    serde_json::from_str(&text)
        .map_err(|e| ApplicationError::validation(format!("input is not valid JSON: {e}")).into())
}

fn parse_request(document: &Value) -> Result<(Vec<RawQuote>, Option<ClientProfile>), ApplicationError> {
    match document {
        Value::Object(envelope) => {
            let quotes = envelope
                .get("quotes")
                .ok_or_else(|| ApplicationError::validation("missing 'quotes' field"))?;
            let client_profile = match envelope.get("client_profile") {
                None | Some(Value::Null) => None,
                Some(Value::Object(profile)) => Some(profile.clone()),
                Some(_) => {
                    return Err(ApplicationError::validation(
                        "'client_profile' must be an object",
                    ));
                }
            };
            Ok((RawQuote::batch_from_value(quotes)?, client_profile))
        }
        other => Ok((RawQuote::batch_from_value(other)?, None)),
    }
}

fn load_directory(path: &Path) -> anyhow::Result<ProviderDirectory> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let directory = if is_json {
        ProviderDirectory::from_json_str(&text)
    } else {
        ProviderDirectory::from_toml_str(&text)
    };
    Ok(directory.map_err(ApplicationError::from)?)
}
