//! `heroes` command: manage pentathlon heroes from the terminal.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use ortho_config::OrthoConfig;
use pentathlon_client::domain::{HeroAttributes, HeroId};
use pentathlon_client::{ClientSettings, HeroDraft, HeroesClient, build_heroes_client};
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `heroes` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "heroes",
    about = "List, create, update and delete pentathlon heroes",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List every hero.
    List,
    /// Create a hero.
    Create(HeroArgs),
    /// Replace the editable fields of a hero.
    Update {
        /// Hero identifier.
        id: HeroId,
        #[command(flatten)]
        hero: HeroArgs,
    },
    /// Delete a hero.
    Delete {
        /// Hero identifier.
        id: HeroId,
    },
    /// Inspect or replace the cached API key.
    #[command(subcommand)]
    Key(KeyCommand),
}

#[derive(Debug, Clone, Subcommand)]
enum KeyCommand {
    /// Report whether a key is cached, by fingerprint only.
    Show,
    /// Provision a new key and cache it.
    Rotate,
}

/// Editable hero fields.
#[derive(Debug, Clone, Args)]
struct HeroArgs {
    /// Display name.
    #[arg(long)]
    name: String,
    /// Image reference.
    #[arg(long)]
    picture: String,
    #[arg(long)]
    agility: f64,
    #[arg(long)]
    strength: f64,
    #[arg(long)]
    weight: f64,
    #[arg(long)]
    endurance: f64,
    #[arg(long)]
    charisma: f64,
}

impl From<HeroArgs> for HeroDraft {
    fn from(args: HeroArgs) -> Self {
        Self {
            name: args.name,
            picture: args.picture,
            attributes: HeroAttributes {
                agility: args.agility,
                strength: args.strength,
                weight: args.weight,
                endurance: args.endurance,
                charisma: args.charisma,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct KeyStatus {
    stored: bool,
    fingerprint: Option<String>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> io::Result<()> {
    let settings = ClientSettings::load_from_iter([OsString::from("heroes")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let client = build_heroes_client(&settings)
        .map_err(|error| io::Error::other(format!("build client: {error}")))?;
    run(&client, args.command).await
}

async fn run(client: &HeroesClient, command: Command) -> io::Result<()> {
    match command {
        Command::List => emit(&client.list_heroes().await.map_err(io::Error::other)?),
        Command::Create(hero) => emit(
            &client
                .create_hero(HeroDraft::from(hero))
                .await
                .map_err(io::Error::other)?,
        ),
        Command::Update { id, hero } => emit(
            &client
                .update_hero(&id, HeroDraft::from(hero))
                .await
                .map_err(io::Error::other)?,
        ),
        Command::Delete { id } => emit(
            &client
                .delete_hero(&id)
                .await
                .map_err(io::Error::other)?,
        ),
        Command::Key(KeyCommand::Show) => {
            let stored = client
                .credentials()
                .stored_key()
                .map_err(io::Error::other)?;
            emit(&KeyStatus {
                stored: stored.is_some(),
                fingerprint: stored.as_ref().map(pentathlon_client::ApiKey::fingerprint),
            })
        }
        Command::Key(KeyCommand::Rotate) => {
            let key = client
                .credentials()
                .replace_key()
                .await
                .map_err(io::Error::other)?;
            emit(&KeyStatus {
                stored: true,
                fingerprint: Some(key.fingerprint()),
            })
        }
    }
}

fn emit<T: Serialize>(value: &T) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")
}
