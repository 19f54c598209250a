use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tokio::sync::RwLock;
use volunteer_rota::{
    app_state::AppState,
    domain::VolunteerId,
    get_postgres_pool, run_migrations,
    services::{
        data_stores::{PostgresShiftStore, PostgresVolunteerStore},
        shifts::recalculate_all,
    },
    utils::{constants::DATABASE_URL, tracing::init_tracing},
};

/// Maintenance tasks for the volunteer rota database.
#[derive(Parser)]
#[command(name = "volunteer-rota", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Rebuild reliability score, total hours and streak from shift history.
    Recalculate {
        /// Volunteer to recalculate. Repeatable; all volunteers if omitted.
        #[arg(long = "volunteer", value_name = "ID")]
        volunteers: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let cli = Cli::parse();

    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;
    run_migrations(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    match cli.command {
        Command::Migrate => tracing::info!("Migrations applied"),
        Command::Recalculate { volunteers } => {
            let volunteer_ids = volunteers
                .into_iter()
                .map(VolunteerId::parse)
                .collect::<Result<Vec<_>, _>>()?;

            let app_state = AppState::new(
                Arc::new(RwLock::new(PostgresShiftStore::new(pg_pool.clone()))),
                Arc::new(RwLock::new(PostgresVolunteerStore::new(pg_pool))),
            );

            let summary = recalculate_all(&app_state, &volunteer_ids).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
