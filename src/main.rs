use std::{io, process::ExitCode, sync::Arc};

use colored::{Color, Colorize};
use config::{Config, ConfigError};
use log::{error, info};
use spotiskill_catalog::{Catalog, DatabaseError, SqliteDatabase};
use thiserror::Error;
use tokio::runtime::{self, Runtime};

mod config;
mod logging;

struct Spotiskill {
    config: Config,
    catalog: Arc<Catalog>,
    runtime: Runtime,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not initialize database: {0}")]
    Database(#[from] DatabaseError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Spotiskill {
    fn new() -> Result<Self, AppError> {
        let config = Config::from_env()?;

        info!("Building async runtime...");
        let runtime = runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("spotiskill-async")
            .build()?;

        info!("Connecting to database...");
        let database = runtime.block_on(async {
            let database = SqliteDatabase::connect(&config.database_url).await?;
            database.migrate().await?;

            if config.seed {
                database.seed().await?;
            }

            Ok::<_, DatabaseError>(database)
        })?;

        Ok(Self {
            catalog: Arc::new(Catalog::new(database)),
            config,
            runtime,
        })
    }

    fn run(&self) -> Result<(), AppError> {
        let server_config = self.config.server();
        let catalog = self.catalog.clone();

        self.runtime
            .block_on(spotiskill_server::run_server(server_config, catalog))?;

        Ok(())
    }
}

impl AppError {
    fn hint(&self) -> String {
        match self {
            AppError::Config(_) => "Check the SPOTISKILL_* environment variables, then try again.".to_string(),
            AppError::Database(_) => "This is a database error. Make sure SPOTISKILL_DATABASE_URL points to a writable SQLite file, then try again.".to_string(),
            AppError::Io(_) => "Make sure the port is not already in use, or pick another with SPOTISKILL_SERVER_PORT.".to_string(),
        }
    }
}

fn report(error: &AppError) {
    error!(
        "{} Read the error below to troubleshoot the issue.",
        "Spotiskill failed!".bold().color(Color::Red)
    );
    error!("{}", error);
    error!(
        "{}",
        format!("Hint: {}", error.hint()).dimmed().italic()
    );
}

/// Reports a failed startup or serve, and picks the process exit status
fn finish(result: Result<(), AppError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            report(&error);
            1
        }
    }
}

fn main() -> ExitCode {
    logging::init_logger();

    let result = Spotiskill::new().and_then(|spotiskill| {
        info!("Initialized successfully.");
        spotiskill.run()
    });

    ExitCode::from(finish(result))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_failures_exit_with_nonzero_status() {
        let invalid_port = ConfigError::InvalidPort {
            name: "SPOTISKILL_SERVER_PORT",
            value: "eighty".to_string(),
        };
        let address_in_use = io::Error::new(io::ErrorKind::AddrInUse, "address in use");

        assert_eq!(finish(Ok(())), 0);
        assert_eq!(finish(Err(invalid_port.into())), 1);
        assert_eq!(finish(Err(address_in_use.into())), 1);
    }
}
