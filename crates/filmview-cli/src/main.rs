mod config;
mod error;
mod logging;
mod output;
mod snapshot;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use filmview_core::{top_rented_films_view, validate_schema, Error as CoreError};
use filmview_introspect::{Adapter, IntrospectOptions, MySqlAdapter};
use filmview_materialize::{create_view, read_back, RunSpec};
use sqlx::{Connection, MySqlConnection};

use config::Config;
use error::{CliError, CliResult};
use logging::init_logging;
use output::{write_created, write_rows};
use snapshot::write_snapshot;

#[derive(Parser, Debug)]
#[command(
    name = "filmview",
    version,
    about = "Materialize the most-rented films of a Sakila database as a view"
)]
struct Cli {
    /// TOML config file (defaults to ./filmview.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// MySQL connection string, overriding the config file.
    #[arg(
        long,
        global = true,
        env = "FILMVIEW_DATABASE_URL",
        hide_env_values = true,
        value_name = "CONNECTION_STRING"
    )]
    conn: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or replace the view and print its rows (default).
    Run(RunArgs),
    /// Print the view DDL without connecting.
    Sql(ViewArgs),
    /// Dump the reflected schema as JSON.
    Introspect(IntrospectArgs),
}

#[derive(Args, Debug, Default)]
struct ViewArgs {
    /// View name.
    #[arg(long)]
    view: Option<String>,
    /// Number of films kept in the view.
    #[arg(long)]
    limit: Option<u64>,
}

impl ViewArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(view) = &self.view {
            config.view.name = view.clone();
        }
        if let Some(limit) = self.limit {
            config.view.limit = limit;
        }
    }
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    #[command(flatten)]
    view: ViewArgs,
    /// Print rows as JSON lines.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct IntrospectArgs {
    /// Write schema.json here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(conn) = cli.conn {
        config.database.url = Some(conn);
    }

    let command = cli.command.unwrap_or(Command::Run(RunArgs::default()));
    match &command {
        Command::Run(args) => args.view.apply(&mut config),
        Command::Sql(args) => args.apply(&mut config),
        Command::Introspect(_) => {}
    }
    config.validate()?;
    init_logging(&config.logging)?;

    match command {
        Command::Run(args) => run_view(&config, args.json).await,
        Command::Sql(_) => print_sql(&config),
        Command::Introspect(args) => run_introspect(&config, args).await,
    }
}

fn run_spec(config: &Config) -> RunSpec {
    RunSpec {
        view_name: config.view.name.clone(),
        limit: config.view.limit,
        connect_timeout: config.database.connect_timeout(),
    }
}

async fn run_view(config: &Config, json: bool) -> CliResult<()> {
    let options = config.database.connect_options()?;
    let spec = run_spec(config);

    tracing::info!(
        event = "run_started",
        connection = %config.database.redacted(),
        view = %spec.view_name,
        limit = spec.limit
    );
    let timer = Instant::now();

    let created = create_view(&options, &spec).await?;
    write_created(&mut io::stdout().lock(), &created.name)?;

    let rows = read_back(&options, &spec).await?;
    write_rows(&mut io::stdout().lock(), &rows, json)?;

    let duration_ms = timer.elapsed().as_millis() as u64;
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}

fn print_sql(config: &Config) -> CliResult<()> {
    let view = top_rented_films_view(&config.view.name, config.view.limit)?;
    println!("{}", view.to_sql()?);
    Ok(())
}

async fn run_introspect(config: &Config, args: IntrospectArgs) -> CliResult<()> {
    let options = config.database.connect_options()?;
    tracing::info!(event = "introspection_started", connection = %config.database.redacted());

    let connect = MySqlConnection::connect_with(&options);
    let conn = match config.database.connect_timeout() {
        Some(limit) => tokio::time::timeout(limit, connect).await.map_err(|_| {
            CoreError::Db(format!("connection timed out after {}s", limit.as_secs()))
        })??,
        None => connect.await?,
    };

    let mut adapter = MySqlAdapter::new(conn);
    let engine = adapter.engine();
    let schema = adapter.introspect(&IntrospectOptions::default()).await;
    adapter.into_inner().close().await?;
    let schema = schema?;
    validate_schema(&schema)?;

    tracing::info!(
        event = "introspection_finished",
        engine = engine,
        tables = schema.tables.len()
    );

    match args.out {
        Some(path) => {
            write_snapshot(&path, &schema)?;
            tracing::info!(event = "schema_written", path = %path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&schema)?),
    }

    Ok(())
}
