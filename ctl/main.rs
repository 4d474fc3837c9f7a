#![forbid(unsafe_code)]

//! `redecom-ctl`: operator companion for `redecom-admin`.
//!
//! Works directly on the configured database, so it can create the first
//! console account before anyone is able to sign in.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};

use redecom_admin::auth::{IdentityProvider, LocalIdentityProvider};
use redecom_admin::config::GlobalConfig;
use redecom_admin::models::area::Area;
use redecom_admin::persistence::db;
use redecom_admin::store::{RecordStore, SqliteStore};
use redecom_admin::{AppError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "redecom-ctl",
    about = "Operator CLI for the Redecom console",
    version,
    long_about = None
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a sign-in account.
    CreateAccount {
        /// Sign-in email.
        #[arg(long)]
        email: String,
        /// Initial password.
        #[arg(long)]
        password: String,
        /// Explicit account id; generated when omitted.
        #[arg(long)]
        uid: Option<String>,
    },

    /// Block sign-in for an account.
    DisableAccount {
        /// Sign-in email.
        #[arg(long)]
        email: String,
    },

    /// Allow sign-in for a previously disabled account.
    EnableAccount {
        /// Sign-in email.
        #[arg(long)]
        email: String,
    },

    /// Create or reactivate the configured seed areas.
    InitAreas,
}

fn main() {
    let args = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: failed to build runtime: {err}");
            std::process::exit(1);
        }
    };

    match runtime.block_on(run(args)) {
        Ok(data) => println!(
            "{}",
            serde_json::to_string_pretty(&data).unwrap_or_default()
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

async fn run(args: Cli) -> Result<serde_json::Value> {
    let config = GlobalConfig::load_from_path(&args.config)?;
    let db = Arc::new(db::connect(&config.db_path).await?);
    let identity = LocalIdentityProvider::new(Arc::clone(&db));

    let data = match args.command {
        Command::CreateAccount {
            email,
            password,
            uid,
        } => {
            let uid = uid.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let created = identity.create_account(&uid, &email, &password).await?;
            if config.ensure_authorized(&created.email).is_err() {
                eprintln!(
                    "Warning: {} is not in allowed_emails and cannot sign in to the console",
                    created.email
                );
            }
            serde_json::json!({ "uid": created.uid, "email": created.email })
        }
        Command::DisableAccount { email } => {
            identity.set_disabled(&email, true).await?;
            serde_json::json!({ "email": email, "disabled": true })
        }
        Command::EnableAccount { email } => {
            identity.set_disabled(&email, false).await?;
            serde_json::json!({ "email": email, "disabled": false })
        }
        Command::InitAreas => {
            let store = SqliteStore::new(Arc::clone(&db));
            let now = Utc::now();
            for seed in &config.seed_areas {
                store
                    .put_area(&Area::from_seed(seed, now))
                    .await
                    .map_err(|err| AppError::Db(format!("area {}: {err}", seed.name)))?;
            }
            serde_json::json!({ "written": config.seed_areas.len() })
        }
    };

    db.close().await;
    Ok(data)
}
