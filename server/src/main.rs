mod config;
mod http;
mod views;

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{
    DatabaseSettings, DbPool, EmployeeSource, RestEmployeeSource, SqlEmployeeSource, connect,
    seed_demo_employees,
};
use platform_obs::{ObsConfig, init_tracing};
use tracing::info;

use crate::{
    config::{AppConfig, DataSourceConfig},
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "directory-server", version, about = "Employee directory dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Manage the development `employees` table.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert demo employees into an empty `employees` table.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::from_env())?;
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed => run_seed().await,
    }
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env();
    connect(&settings).await.map_err(Into::into)
}

async fn build_source(config: &DataSourceConfig) -> Result<Arc<dyn EmployeeSource>> {
    let source: Arc<dyn EmployeeSource> = match config {
        DataSourceConfig::Postgres => Arc::new(SqlEmployeeSource::new(setup_pool().await?)),
        DataSourceConfig::Rest(settings) => Arc::new(RestEmployeeSource::new(settings.clone())),
    };
    Ok(source)
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let source = build_source(&config.data_source).await?;
    info!(source = source.kind(), "employee source ready");
    let state = AppState::new(config, source);
    http::serve(cmd.into(), state).await
}

async fn run_seed() -> Result<()> {
    let pool = setup_pool().await?;
    let inserted = seed_demo_employees(&pool).await?;
    info!(inserted, "seed finished");
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}
