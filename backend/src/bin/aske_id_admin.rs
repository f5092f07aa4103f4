//! Registry administration: provision registrants and apply migrations.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;

use aske_id::domain::ports::RegistrantRepository;
use aske_id::outbound::persistence::{
    DbPool, DieselRegistrantRepository, PoolConfig, run_pending_migrations,
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::runtime::Builder;

/// `aske-id-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "aske-id-admin",
    about = "Administer the ASKE-ID registry database",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Create a registrant and print its API key.
    AddRegistrant {
        /// Display name shown in resolved records.
        #[arg(long, value_name = "name")]
        name: String,
    },
    /// Apply pending schema migrations.
    Migrate,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url, env::var("DATABASE_URL").ok())?;

    match args.command {
        Command::Migrate => {
            let applied = run_pending_migrations(&database_url)
                .await
                .wrap_err("apply migrations")?;
            println!("applied={}", applied.len());
            for version in applied {
                println!("version={version}");
            }
        }
        Command::AddRegistrant { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(eyre!("--name must not be empty"));
            }
            let pool = DbPool::new(PoolConfig::new(&database_url).with_min_idle(None))
                .await
                .wrap_err("create database pool")?;
            let registrant = DieselRegistrantRepository::new(pool)
                .create(name)
                .await
                .wrap_err("create registrant")?;
            println!("registrant_id={}", registrant.id());
            println!("registrant={}", registrant.name());
            println!("api_key={}", registrant.api_key().expose());
        }
    }
    Ok(())
}

fn resolve_database_url(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(eyre!("--database-url must not be empty when provided"));
        }
        return Ok(value);
    }
    match from_env {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(eyre!("DATABASE_URL must not be empty")),
        None => Err(eyre!("database URL missing: set --database-url or DATABASE_URL")),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use clap::Parser;
    use rstest::rstest;

    use super::{CliArgs, Command, resolve_database_url};

    #[rstest]
    fn explicit_url_wins_over_environment() {
        let url = resolve_database_url(
            Some("postgres://cli/aske".to_owned()),
            Some("postgres://env/aske".to_owned()),
        )
        .expect("url resolves");
        assert_eq!(url, "postgres://cli/aske");
    }

    #[rstest]
    fn environment_url_is_used_as_fallback() {
        let url = resolve_database_url(None, Some("postgres://env/aske".to_owned()))
            .expect("url resolves");
        assert_eq!(url, "postgres://env/aske");
    }

    #[rstest]
    #[case(Some(" ".to_owned()), None, "--database-url must not be empty")]
    #[case(None, Some(String::new()), "DATABASE_URL must not be empty")]
    #[case(None, None, "database URL missing")]
    fn blank_or_missing_urls_are_rejected(
        #[case] explicit: Option<String>,
        #[case] from_env: Option<String>,
        #[case] expected: &str,
    ) {
        let error = resolve_database_url(explicit, from_env).expect_err("url rejected");
        assert!(error.to_string().contains(expected));
    }

    #[rstest]
    fn add_registrant_subcommand_parses() {
        let args = CliArgs::try_parse_from([
            "aske-id-admin",
            "add-registrant",
            "--name",
            "xDD",
            "--database-url",
            "postgres://cli/aske",
        ])
        .expect("arguments parse");

        assert_eq!(args.database_url.as_deref(), Some("postgres://cli/aske"));
        assert!(matches!(args.command, Command::AddRegistrant { ref name } if name == "xDD"));
    }
}
