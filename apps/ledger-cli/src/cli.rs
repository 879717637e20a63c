//! Command-line surface and the small parsers behind `games record`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use gostop_backend::config::db::{DbKind, RuntimeEnv};
use gostop_backend::{EventType, RoleName};

#[derive(Parser, Debug)]
#[command(name = "gostop-ledger", version, about = "Gostop score ledger")]
pub struct Cli {
    #[arg(long, value_enum, global = true, default_value = "prod")]
    pub env: EnvArg,

    #[arg(long, value_enum, global = true, default_value = "sqlite-file")]
    pub db: DbArg,

    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum EnvArg {
    Prod,
    Test,
}

impl From<EnvArg> for RuntimeEnv {
    fn from(value: EnvArg) -> Self {
        match value {
            EnvArg::Prod => RuntimeEnv::Prod,
            EnvArg::Test => RuntimeEnv::Test,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DbArg {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl From<DbArg> for DbKind {
    fn from(value: DbArg) -> Self {
        match value {
            DbArg::Postgres => DbKind::Postgres,
            DbArg::SqliteFile => DbKind::SqliteFile,
            DbArg::SqliteMemory => DbKind::SqliteMemory,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage players.
    #[command(subcommand)]
    Players(PlayersCommand),
    /// Record, inspect and delete games.
    #[command(subcommand)]
    Games(GamesCommand),
    /// Zero every balance and replay all games oldest first.
    Recompute,
    /// Dealer win rate and games played per player.
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum PlayersCommand {
    List,
    Add { name: String, username: String },
    /// Only players with a zero balance and no recorded games can be removed.
    Remove { username: String },
}

#[derive(Subcommand, Debug)]
pub enum GamesCommand {
    List,
    Show { id: i64 },
    Record(RecordArgs),
    /// Reverses the game's deltas before deleting it.
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Username of the winner.
    #[arg(long)]
    pub winner: String,

    /// `<username>=<ROLE>`, once per seated player.
    #[arg(long = "role", value_parser = parse_role, required = true)]
    pub roles: Vec<RoleArg>,

    /// `<username>:<TYPE>:<points>`, in the order they happened.
    #[arg(long = "event", value_parser = parse_event)]
    pub events: Vec<EventArg>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleArg {
    pub username: String,
    pub role: RoleName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventArg {
    pub username: String,
    pub event_type: EventType,
    pub points: i64,
}

pub fn parse_role(raw: &str) -> Result<RoleArg, String> {
    let (username, role) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <username>=<ROLE>, got '{raw}'"))?;
    let username = username.trim();
    let role = role.trim();
    if username.is_empty() || role.is_empty() {
        return Err(format!("expected <username>=<ROLE>, got '{raw}'"));
    }
    Ok(RoleArg {
        username: username.to_string(),
        role: RoleName::parse(role),
    })
}

pub fn parse_event(raw: &str) -> Result<EventArg, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(username), Some(kind), Some(points)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected <username>:<TYPE>:<points>, got '{raw}'"));
    };

    let username = username.trim();
    if username.is_empty() {
        return Err(format!("missing username in '{raw}'"));
    }
    let event_type: EventType = kind.parse().map_err(|e| format!("{e}"))?;
    let points: i64 = points
        .trim()
        .parse()
        .map_err(|_| format!("points must be an integer, got '{}'", points.trim()))?;

    Ok(EventArg {
        username: username.to_string(),
        event_type,
        points,
    })
}
