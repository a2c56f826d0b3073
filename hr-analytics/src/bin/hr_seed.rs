//! hr-seed - synthetic data generator for hr-analytics
//!
//! Creates departments, employees, attendance, performance reviews and
//! salary history in the service database.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use hr_common::config::{CliOverrides, ServiceConfig};
use hr_common::db::init_database;
use hr_analytics::seed::{self, SeedOptions};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for hr-seed
#[derive(Parser, Debug)]
#[command(name = "hr-seed")]
#[command(about = "Generate synthetic HR data")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Number of employees to generate
    #[arg(long, default_value_t = 5)]
    employees: usize,

    /// Number of departments to generate (at most 7)
    #[arg(long, default_value_t = 3)]
    departments: usize,

    /// Number of days of attendance history
    #[arg(long, default_value_t = 30)]
    attendance_days: i64,

    /// Clear existing data before generation
    #[arg(long)]
    clear: bool,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hr_seed=info,hr_analytics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ServiceConfig::resolve(&CliOverrides {
        config_file: args.config.clone(),
        database_path: args.database.clone(),
        ..Default::default()
    })
    .context("Failed to resolve configuration")?;
    let database_path = config.database_path;
    info!("Database path: {}", database_path.display());

    let pool = init_database(&database_path)
        .await
        .context("Failed to open database")?;

    let options = SeedOptions {
        employees: args.employees,
        departments: args.departments,
        attendance_days: args.attendance_days,
        clear: args.clear,
        seed: args.seed,
    };

    let summary = seed::generate(&pool, &options, Utc::now().date_naive())
        .await
        .context("Data generation failed")?;

    info!(
        "Generated {} departments, {} employees, {} attendance rows, {} reviews, {} salary rows",
        summary.departments, summary.employees, summary.attendance, summary.reviews, summary.salaries
    );

    pool.close().await;
    Ok(())
}
