//! Station Registry operator console
//!
//! Headless front end for the station registry. Without credentials the
//! console runs in guest (read-only) mode; `--user`/`--password` opens an
//! administrator session that may create, edit and delete stations.
//!
//! ```sh
//! # Browse as guest
//! station-registry list --text downtown --status charging
//! station-registry stats --json
//!
//! # Administer
//! station-registry --user admin --password secret add "Main St" --location Downtown
//! station-registry --user admin --password secret set-status 4 charging
//!
//! # Validate config without touching the database
//! station-registry --check
//! ```

mod batch;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sea_orm_migration::sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use station_registry::infrastructure::database::migrator::Migrator;
use station_registry::shared::validations::validate_station_id;
use station_registry::telemetry::init_tracing;
use station_registry::{
    default_config_path, init_database, AppConfig, AuthService, DomainError, InMemoryStorage,
    RepositoryProvider, SeaOrmRepositoryProvider, Session, SessionRequest, Station,
    StationRegistryService, StationSnapshot, StationStatus,
};

use batch::delete_stations;
use output::Printer;

/// Station Registry: manage EV charging stations from the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "station-registry",
    version,
    about = "Charging station registry console",
    long_about = "Create, edit, search and inspect EV charging stations.\n\n\
                  Default config: ~/.config/station-registry/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STATION_REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Use a throwaway in-memory store instead of the database.
    #[arg(long)]
    memory: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Administrator username. Without it the session is read-only.
    #[arg(short, long)]
    user: Option<String>,

    /// Administrator password.
    #[arg(long, env = "STATION_REGISTRY_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stations, optionally narrowed by text and status.
    List {
        /// Case-insensitive text matched against name or location.
        #[arg(long)]
        text: Option<String>,
        /// Only stations with this status.
        #[arg(long, value_parser = parse_status)]
        status: Option<StationStatus>,
    },
    /// Search stations by name or location.
    Search { text: String },
    /// Show one station.
    Show { id: i64 },
    /// Station counts per status.
    Stats,
    /// List the accepted status values.
    Statuses,
    /// Create a station.
    Add {
        name: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, value_parser = parse_status, default_value = "available")]
        status: StationStatus,
    },
    /// Edit a station. Unspecified fields keep their current value.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_location")]
        location: Option<String>,
        /// Remove the location.
        #[arg(long)]
        clear_location: bool,
        #[arg(long, value_parser = parse_status)]
        status: Option<StationStatus>,
    },
    /// Change only the status of a station.
    SetStatus {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: StationStatus,
    },
    /// Permanently delete one or more stations.
    Delete {
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<i64>,
    },
}

impl Command {
    /// Name of the registry operation this command performs, when it mutates.
    fn mutating_operation(&self) -> Option<&'static str> {
        match self {
            Self::Add { .. } => Some("create"),
            Self::Update { .. } => Some("update"),
            Self::SetStatus { .. } => Some("update_status"),
            Self::Delete { .. } => Some("delete"),
            _ => None,
        }
    }
}

/// Strict status parsing for operator input; unknown values are rejected
/// instead of silently becoming "Out of service".
fn parse_status(raw: &str) -> Result<StationStatus, String> {
    StationStatus::try_parse(raw)
        .or_else(|| StationStatus::try_parse(&raw.replace(['-', ' '], "_")))
        .ok_or_else(|| {
            format!(
                "unknown status '{}', expected one of: {}",
                raw,
                StationStatus::all_display_labels().join(", ")
            )
        })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let (mut config, config_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);

    match config_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("{}", e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        if config.admin.uses_default_password() {
            println!("   Warning     : [admin] password is the default, change it");
        }
        return ExitCode::SUCCESS;
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), DomainError> {
    // ── Store ──────────────────────────────────────────────────
    let mut pool: Option<DatabaseConnection> = None;
    let repos: Arc<dyn RepositoryProvider> = if cli.memory {
        info!("Using in-memory store");
        Arc::new(InMemoryStorage::new())
    } else {
        let db_config = config.database_config();
        let db = init_database(&db_config)
            .await
            .map_err(|e| DomainError::storage("connect", e))?;

        if !cli.no_migrate {
            Migrator::up(&db, None)
                .await
                .map_err(|e| DomainError::storage("migrate", e))?;
        }

        pool = Some(db.clone());
        Arc::new(SeaOrmRepositoryProvider::new(db))
    };

    let auth = AuthService::new(repos.clone());
    let registry = StationRegistryService::new(repos);

    if let Err(e) = auth
        .ensure_admin_account(&config.admin.username, &config.admin.password)
        .await
    {
        warn!("Could not create default administrator: {}", e);
    }

    // ── Session ────────────────────────────────────────────────
    let request = match cli.user {
        Some(username) => SessionRequest::Credentials {
            username,
            password: cli.password.unwrap_or_default(),
        },
        None => SessionRequest::Guest,
    };
    let session = auth.open_session(request).await?;

    let printer = Printer::new(cli.json);
    let result = match cli.command {
        Some(command) => execute(command, &session, &registry, &printer).await,
        None => {
            printer.session(&session);
            Ok(())
        }
    };
    session.end();

    // ── Release the connection pool ────────────────────────────
    if let Some(db) = pool {
        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        }
    }

    result
}

async fn execute(
    command: Command,
    session: &Session,
    registry: &StationRegistryService,
    printer: &Printer,
) -> Result<(), DomainError> {
    // The registry itself accepts calls from any mode; the console is the gate.
    if let Some(operation) = command.mutating_operation() {
        session.ensure_can_mutate(operation)?;
    }

    match command {
        Command::List { text, status } => {
            let mut snapshot = StationSnapshot::default();
            snapshot.reload_all(registry).await;
            let shown = snapshot.filter(text.as_deref().unwrap_or(""), status);
            printer.stations(&shown, snapshot.len());
        }
        Command::Search { text } => {
            let stations = registry.search(&text).await;
            printer.stations(&stations, stations.len());
        }
        Command::Show { id } => match registry.find_by_id(id).await? {
            Some(station) => printer.station(&station),
            None => {
                return Err(DomainError::NotFound {
                    entity: "Station",
                    field: "id",
                    value: id.to_string(),
                })
            }
        },
        Command::Stats => printer.statistics(&registry.statistics().await),
        Command::Statuses => printer.statuses(),
        Command::Add {
            name,
            location,
            status,
        } => {
            let created = registry.create(Station::new(name, location, status)).await?;
            printer.station(&created);
        }
        Command::Update {
            id,
            name,
            location,
            clear_location,
            status,
        } => {
            validate_station_id("update", id)?;
            let Some(mut station) = registry.find_by_id(id).await? else {
                return Err(DomainError::NotFound {
                    entity: "Station",
                    field: "id",
                    value: id.to_string(),
                });
            };
            if let Some(name) = name {
                station.name = name;
            }
            if clear_location {
                station.location = None;
            } else if location.is_some() {
                station.location = location;
            }
            if let Some(status) = status {
                station.status = status;
            }
            let updated = registry.update(station).await?;
            printer.outcome("update", id, updated);
        }
        Command::SetStatus { id, status } => {
            let updated = registry.update_status(id, status).await?;
            printer.outcome("update_status", id, updated);
        }
        Command::Delete { ids } => {
            let summary = delete_stations(registry, &ids).await;
            printer.deletions(&summary);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_argument_accepts_tokens_and_labels() {
        assert_eq!(parse_status("charging"), Ok(StationStatus::Charging));
        assert_eq!(parse_status("OUT_OF_SERVICE"), Ok(StationStatus::OutOfService));
        assert_eq!(parse_status("out-of-service"), Ok(StationStatus::OutOfService));
        assert_eq!(parse_status("Out of service"), Ok(StationStatus::OutOfService));
        assert!(parse_status("broken").is_err());
    }

    #[test]
    fn only_writes_are_gated() {
        let cli = Cli::parse_from(["station-registry", "delete", "3"]);
        assert_eq!(cli.command.unwrap().mutating_operation(), Some("delete"));

        let cli = Cli::parse_from(["station-registry", "list", "--status", "charging"]);
        assert_eq!(cli.command.unwrap().mutating_operation(), None);
    }

    async fn admin_console() -> (StationRegistryService, Session) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStorage::new());
        let auth = AuthService::new(repos.clone());
        auth.ensure_admin_account("admin", "s3cret!").await.unwrap();
        let session = auth
            .open_session(SessionRequest::Credentials {
                username: "admin".into(),
                password: "s3cret!".into(),
            })
            .await
            .unwrap();
        (StationRegistryService::new(repos), session)
    }

    #[test]
    fn delete_takes_several_ids() {
        let cli = Cli::parse_from(["station-registry", "delete", "3", "7", "-1"]);
        match cli.command {
            Some(Command::Delete { ids }) => assert_eq!(ids, vec![3, 7, -1]),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["station-registry", "delete"]).is_err());
    }

    #[tokio::test]
    async fn update_with_non_positive_id_is_invalid_input() {
        let (registry, admin) = admin_console().await;
        let printer = Printer::new(true);

        for id in [0, -2] {
            let err = execute(
                Command::Update {
                    id,
                    name: Some("Renamed".into()),
                    location: None,
                    clear_location: false,
                    status: None,
                },
                &admin,
                &registry,
                &printer,
            )
            .await
            .unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput { operation: "update", .. }));
        }

        let err = execute(
            Command::Update {
                id: 41,
                name: None,
                location: None,
                clear_location: false,
                status: None,
            },
            &admin,
            &registry,
            &printer,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn admin_delete_reports_and_continues() {
        let (registry, admin) = admin_console().await;
        let printer = Printer::new(true);
        let station = registry
            .create(Station::new("Main St", None, StationStatus::Available))
            .await
            .unwrap();

        execute(
            Command::Delete {
                ids: vec![0, 99, station.id],
            },
            &admin,
            &registry,
            &printer,
        )
        .await
        .unwrap();
        assert!(registry.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn guest_session_cannot_reach_mutations() {
        let registry = StationRegistryService::new(Arc::new(InMemoryStorage::new()));
        let printer = Printer::new(true);
        let guest = Session::guest();

        let err = execute(
            Command::Add {
                name: "Main St".into(),
                location: None,
                status: StationStatus::Available,
            },
            &guest,
            &registry,
            &printer,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { operation: "create" }));
        assert!(registry.find_all().await.is_empty());
    }
}
