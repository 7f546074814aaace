//! Charsheet Engine - command-line entry point.
//!
//! ```text
//! charsheet-engine recalc <character-id>...
//! charsheet-engine recalc-all
//! charsheet-engine check-schema <game-system-id>
//! ```

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charsheet_domain::{CharacterId, GameSystemId};
use charsheet_engine::infrastructure::config::{load_dotenv, EngineConfig};
use charsheet_engine::use_cases::stats::BatchRecalculation;
use charsheet_engine::App;

const USAGE: &str = "Usage: charsheet-engine <command>

Commands:
  recalc <character-id>...        Recalculate and persist computed stats
  recalc-all                      Recalculate every stored character
  check-schema <game-system-id>   Report formulas that would fail to parse";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env();

    let mut args = std::env::args().skip(1);
    let command = args.next();
    let rest: Vec<String> = args.collect();

    match command.as_deref() {
        Some("recalc") => recalc(&config, &rest).await,
        Some("recalc-all") => recalc_all(&config).await,
        Some("check-schema") => check_schema(&config, &rest).await,
        Some("help" | "--help" | "-h") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(cmd) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
        None => anyhow::bail!(USAGE),
    }
}

async fn recalc(config: &EngineConfig, args: &[String]) -> anyhow::Result<()> {
    if args.is_empty() {
        anyhow::bail!("recalc needs at least one character id\n\n{USAGE}");
    }
    let ids = args
        .iter()
        .map(|arg| {
            arg.parse::<CharacterId>()
                .with_context(|| format!("invalid character id '{arg}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let app = App::connect(config)
        .await
        .context("opening character store")?;

    let batch = app.use_cases.recalculate.execute_many(&ids).await;
    report(batch)
}

async fn recalc_all(config: &EngineConfig) -> anyhow::Result<()> {
    let app = App::connect(config)
        .await
        .context("opening character store")?;

    let batch = app
        .use_cases
        .recalculate
        .execute_all()
        .await
        .context("listing characters")?;
    report(batch)
}

/// Print each recalculated sheet, then fail if any character could not be recalculated.
fn report(batch: BatchRecalculation) -> anyhow::Result<()> {
    let BatchRecalculation {
        updated,
        formula_failures,
        errors,
    } = batch;

    for result in &updated {
        println!(
            "{}\t{}",
            result.sheet.id,
            serde_json::to_string(&result.sheet.stats)?
        );
        for failure in &result.failures {
            eprintln!(
                "  skipped {}: {} ({})",
                failure.stat, failure.error, failure.formula
            );
        }
    }

    eprintln!(
        "recalculated {} character(s), {} formula failure(s), {} error(s)",
        updated.len(),
        formula_failures,
        errors.len()
    );
    for (id, error) in &errors {
        eprintln!("  {id}: {error}");
    }

    if !errors.is_empty() {
        anyhow::bail!("{} character(s) could not be recalculated", errors.len());
    }
    Ok(())
}

async fn check_schema(config: &EngineConfig, args: &[String]) -> anyhow::Result<()> {
    let [arg] = args else {
        anyhow::bail!("check-schema takes exactly one game system id\n\n{USAGE}");
    };
    let system_id = arg
        .parse::<GameSystemId>()
        .with_context(|| format!("invalid game system id '{arg}'"))?;

    let app = App::connect(config)
        .await
        .context("opening character store")?;

    let report = app
        .use_cases
        .management
        .game_system
        .validate_schema(system_id)
        .await
        .with_context(|| format!("checking schema of game system {system_id}"))?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_valid() {
        anyhow::bail!("{} formula(s) would fail", report.invalid.len());
    }
    Ok(())
}
