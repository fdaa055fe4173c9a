//! Load the default course catalogue and demo accounts into PostgreSQL.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use clap::Parser;
use course_enrollment::domain::{CatalogueSeed, CatalogueSeeder};
use course_enrollment::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselStudentRepository, PoolConfig, run_migrations,
};
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const DATABASE_URL_VARS: [&str; 2] = ["ENROLLMENT_DATABASE_URL", "DATABASE_URL"];

/// `seed-catalogue` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-catalogue",
    about = "Upsert the default course catalogue and demo accounts",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `ENROLLMENT_DATABASE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Skip applying pending migrations before seeding.
    #[arg(long = "skip-migrations")]
    skip_migrations: bool,
}

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url, |name| env::var(name).ok())?;

    if !args.skip_migrations {
        run_migrations(&database_url)
            .await
            .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
    }

    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(2))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let seeder = CatalogueSeeder::new(
        Arc::new(DieselCourseRepository::new(pool.clone())),
        Arc::new(DieselStudentRepository::new(pool)),
        Arc::new(DefaultClock),
    );

    let report = seeder
        .seed_catalogue(&CatalogueSeed::default())
        .await
        .map_err(|error| io::Error::other(format!("seed catalogue: {error}")))?;

    println!("courses_created={}", report.courses_created);
    println!("courses_updated={}", report.courses_updated);
    println!("accounts_created={}", report.accounts_created);
    Ok(())
}

fn resolve_database_url(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    DATABASE_URL_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "database URL missing: set --database-url, ENROLLMENT_DATABASE_URL or DATABASE_URL",
            )
        })
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use rstest::rstest;

    use super::{CliArgs, resolve_database_url};
    use clap::Parser;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[rstest]
    fn explicit_url_wins() {
        let url = resolve_database_url(Some("postgres://cli/db".into()), |_| {
            Some("postgres://env/db".into())
        })
        .expect("explicit url");
        assert_eq!(url, "postgres://cli/db");
    }

    #[rstest]
    fn blank_explicit_url_is_rejected() {
        let error = resolve_database_url(Some("  ".into()), no_env).expect_err("blank url");
        assert!(error.to_string().contains("must not be empty"));
    }

    #[rstest]
    #[case(Some("postgres://scoped/db"), Some("postgres://generic/db"), "postgres://scoped/db")]
    #[case(Some(" "), Some("postgres://generic/db"), "postgres://generic/db")]
    #[case(None, Some("postgres://generic/db"), "postgres://generic/db")]
    fn environment_fallbacks_in_order(
        #[case] scoped: Option<&str>,
        #[case] generic: Option<&str>,
        #[case] expected: &str,
    ) {
        let url = resolve_database_url(None, |name| match name {
            "ENROLLMENT_DATABASE_URL" => scoped.map(str::to_owned),
            "DATABASE_URL" => generic.map(str::to_owned),
            _ => None,
        })
        .expect("url from environment");
        assert_eq!(url, expected);
    }

    #[rstest]
    fn missing_url_is_reported() {
        let error = resolve_database_url(None, no_env).expect_err("missing url");
        assert!(error.to_string().contains("database URL missing"));
    }

    #[rstest]
    fn skip_migrations_flag_parses() {
        let args = CliArgs::try_parse_from(["seed-catalogue", "--skip-migrations"])
            .expect("args parse");
        assert!(args.skip_migrations);
        assert!(args.database_url.is_none());
    }
}
