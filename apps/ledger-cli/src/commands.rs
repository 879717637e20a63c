//! Subcommand execution. Every command returns the text to print.

use gostop_backend::config::db::{DbKind, RuntimeEnv};
use gostop_backend::repos::games::GameLayout;
use gostop_backend::services::games::{self as games_service, NewEvent, NewGame, NewGamePlayer};
use gostop_backend::services::{players as players_service, settlement, stats};
use gostop_backend::{bootstrap_db, AppError, ErrorCode};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use time::macros::format_description;
use tracing::info;

use crate::cli::{Command, GamesCommand, PlayersCommand, RecordArgs};
use crate::table::Table;

/// Everything a command needs; built once per invocation.
pub struct LedgerSession {
    db: DatabaseConnection,
}

impl LedgerSession {
    pub async fn open(runtime: RuntimeEnv, kind: DbKind) -> Result<Self, AppError> {
        let db = bootstrap_db(runtime, kind).await?;
        info!(?runtime, %kind, "ledger session opened");
        Ok(Self { db })
    }

    pub async fn run(&self, command: Command) -> Result<String, AppError> {
        match command {
            Command::Players(cmd) => self.players(cmd).await,
            Command::Games(cmd) => self.games(cmd).await,
            Command::Recompute => {
                let txn = self.db.begin().await?;
                let summary = settlement::recompute_all(&txn).await?;
                txn.commit().await?;
                Ok(format!(
                    "Recomputed {} games; {} balances reset.\n",
                    summary.games, summary.players_reset
                ))
            }
            Command::Stats => self.stats().await,
        }
    }

    async fn players(&self, command: PlayersCommand) -> Result<String, AppError> {
        match command {
            PlayersCommand::List => {
                let players = players_service::list_players(&self.db).await?;
                let mut table = Table::new(["ID", "NAME", "USERNAME", "BALANCE"])
                    .numeric(0)
                    .numeric(3);
                for p in players {
                    table.row([p.id.to_string(), p.name, p.username, p.balance.to_string()]);
                }
                Ok(table.render())
            }
            PlayersCommand::Add { name, username } => {
                let txn = self.db.begin().await?;
                let player = players_service::create_player(&txn, &name, &username).await?;
                txn.commit().await?;
                Ok(format!(
                    "Added player {} ({}) with id {}.\n",
                    player.name, player.username, player.id
                ))
            }
            PlayersCommand::Remove { username } => {
                let txn = self.db.begin().await?;
                let player = players_service::find_player_by_username(&txn, &username).await?;
                players_service::delete_player(&txn, player.id).await?;
                txn.commit().await?;
                Ok(format!("Removed player {}.\n", player.username))
            }
        }
    }

    async fn games(&self, command: GamesCommand) -> Result<String, AppError> {
        match command {
            GamesCommand::List => {
                let games = games_service::list_games(&self.db).await?;
                let mut table = Table::new(["ID", "PLAYED", "WINNER", "PLAYERS"]).numeric(0);
                for g in &games {
                    let seats: Vec<String> = g
                        .players
                        .iter()
                        .map(|p| format!("{} {:+}", p.player_name, p.point_delta))
                        .collect();
                    table.row([
                        g.game_id.to_string(),
                        played_at(g),
                        g.winner_name.clone().unwrap_or_else(|| "-".into()),
                        seats.join(", "),
                    ]);
                }
                Ok(table.render())
            }
            GamesCommand::Show { id } => {
                let layout = games_service::game_layout(&self.db, id).await?;
                Ok(render_layout(&layout))
            }
            GamesCommand::Record(args) => {
                let txn = self.db.begin().await?;
                let game = resolve_game(&txn, args).await?;
                let layout = games_service::record_game(&txn, game).await?;
                txn.commit().await?;
                Ok(render_layout(&layout))
            }
            GamesCommand::Delete { id } => {
                let txn = self.db.begin().await?;
                games_service::delete_game(&txn, id).await?;
                txn.commit().await?;
                Ok(format!("Deleted game {id}.\n"))
            }
        }
    }

    async fn stats(&self) -> Result<String, AppError> {
        let summary = stats::stats_summary(&self.db).await?;
        let total = stats::num_games(&self.db).await?;

        let dealer = summary
            .dealer_win_percentage
            .map_or_else(|| "n/a".to_string(), |pct| format!("{pct:.2}%"));
        let mut out = format!("Games recorded: {total}\nDealer win rate: {dealer}\n\n");

        let mut table = Table::new(["PLAYER", "PLAYED", "WON"]).numeric(1).numeric(2);
        for p in summary.players {
            table.row([p.name, p.games_played.to_string(), p.games_won.to_string()]);
        }
        out.push_str(&table.render());
        Ok(out)
    }
}

/// Map usernames on the command line to player ids.
async fn resolve_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    args: RecordArgs,
) -> Result<NewGame, AppError> {
    let winner = players_service::find_player_by_username(conn, &args.winner).await?;

    let mut players: Vec<NewGamePlayer> = Vec::with_capacity(args.roles.len());
    for role in args.roles {
        let player = players_service::find_player_by_username(conn, &role.username).await?;
        players.push(NewGamePlayer {
            player_id: player.id,
            role: role.role,
            events: Vec::new(),
        });
    }

    for event in args.events {
        let player = players_service::find_player_by_username(conn, &event.username).await?;
        let seat = players
            .iter_mut()
            .find(|p| p.player_id == player.id)
            .ok_or_else(|| {
                AppError::bad_request(
                    ErrorCode::ValidationError,
                    format!("'{}' has an event but no role in this game", event.username),
                )
            })?;
        seat.events.push(NewEvent {
            event_type: event.event_type,
            points: event.points,
        });
    }

    Ok(NewGame {
        winner_id: winner.id,
        players,
    })
}

fn played_at(layout: &GameLayout) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]");
    layout
        .created_at
        .format(fmt)
        .unwrap_or_else(|_| layout.created_at.to_string())
}

fn render_layout(layout: &GameLayout) -> String {
    let winner = layout.winner_name.as_deref().unwrap_or("-");
    let mut out = format!(
        "Game {} played {}, won by {}\n\n",
        layout.game_id,
        played_at(layout),
        winner
    );
    let mut table = Table::new(["PLAYER", "ROLE", "DELTA"]).numeric(2);
    for p in &layout.players {
        table.row([
            p.player_name.clone(),
            p.role.clone(),
            format!("{:+}", p.point_delta),
        ]);
    }
    out.push_str(&table.render());
    out
}
