//! Point-delta settlement for a single finished game.
//!
//! `settle` is pure: it takes the game's roles and scoring events and returns
//! every role's new `point_delta` together with the owning player's new
//! balance. Stages run in a fixed order (sell, first-round lock, win and loss
//! multipliers) and each stage only moves points between roles, so the deltas
//! of a game always sum to zero. The stored balance is read only when folding.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::errors::domain::{DomainError, ValidationKind};

/// Fixed payment every non-seller owes a first-round-lock holder, per lock.
pub const FIRST_ROUND_LOCK_POINTS: i64 = 5;

/// Most players a single game can seat.
pub const MAX_PLAYERS_PER_GAME: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Win,
    Sell,
    LossMultiplier,
    FirstRoundLock,
    /// Recorded for history only; never moves points.
    Points,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Win,
        EventType::Sell,
        EventType::LossMultiplier,
        EventType::FirstRoundLock,
        EventType::Points,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EventType::Win => "WIN",
            EventType::Sell => "SELL",
            EventType::LossMultiplier => "LOSS_MULTIPLIER",
            EventType::FirstRoundLock => "FIRST_ROUND_LOCK",
            EventType::Points => "POINTS",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::EventType,
                    format!("Unknown event type '{wanted}'"),
                )
            })
    }
}

/// Role a player held in one game. Anything other than the two named roles is
/// a plain participant and keeps its original label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleName {
    Dealer,
    Seller,
    Participant(String),
}

impl RoleName {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("DEALER") {
            RoleName::Dealer
        } else if trimmed.eq_ignore_ascii_case("SELLER") {
            RoleName::Seller
        } else {
            RoleName::Participant(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoleName::Dealer => "DEALER",
            RoleName::Seller => "SELLER",
            RoleName::Participant(name) => name,
        }
    }

    pub fn is_seller(&self) -> bool {
        matches!(self, RoleName::Seller)
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInput {
    pub role_id: i64,
    pub player_id: i64,
    pub role_name: RoleName,
    pub current_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    pub player_id: i64,
    pub event_type: EventType,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSettlement {
    pub role_id: i64,
    pub player_id: i64,
    pub new_point_delta: i64,
    pub new_balance: i64,
}

/// Input to [`reverse`]: one settled role of the game being removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversalInput {
    pub player_id: i64,
    pub point_delta: i64,
    pub current_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerReversal {
    pub player_id: i64,
    pub new_balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettlementError {
    #[error("arithmetic overflow during {stage} settlement")]
    Overflow { stage: &'static str },
    #[error("point deltas sum to {sum}, expected 0")]
    ZeroSumViolated { sum: i64 },
}

/// Settle one game.
///
/// On error nothing is returned, so callers never persist a partial result.
pub fn settle(
    roles: &[RoleInput],
    events: &[EventInput],
) -> Result<Vec<RoleSettlement>, SettlementError> {
    let index = first_role_by_player(roles);
    let mut deltas = vec![0i64; roles.len()];

    settle_sell(roles, events, &index, &mut deltas)?;
    settle_first_round_locks(roles, events, &index, &mut deltas)?;
    settle_win(roles, events, &index, &mut deltas)?;

    let sum = checked_sum(&deltas, "zero-sum check")?;
    if sum != 0 {
        return Err(SettlementError::ZeroSumViolated { sum });
    }

    roles
        .iter()
        .zip(deltas)
        .map(|(role, delta)| {
            let new_balance = role
                .current_balance
                .checked_add(delta)
                .ok_or(SettlementError::Overflow { stage: "balance" })?;
            Ok(RoleSettlement {
                role_id: role.role_id,
                player_id: role.player_id,
                new_point_delta: delta,
                new_balance,
            })
        })
        .collect()
}

/// Undo a settled game: every player gets back what the game moved.
///
/// Output keeps the order in which players first appear in `entries`.
pub fn reverse(entries: &[ReversalInput]) -> Result<Vec<PlayerReversal>, SettlementError> {
    let overflow = SettlementError::Overflow { stage: "reversal" };
    let mut out: Vec<PlayerReversal> = Vec::with_capacity(entries.len());
    let mut seen: HashMap<i64, usize> = HashMap::new();

    for entry in entries {
        match seen.get(&entry.player_id) {
            Some(&i) => {
                out[i].new_balance = out[i]
                    .new_balance
                    .checked_sub(entry.point_delta)
                    .ok_or(overflow)?;
            }
            None => {
                seen.insert(entry.player_id, out.len());
                out.push(PlayerReversal {
                    player_id: entry.player_id,
                    new_balance: entry
                        .current_balance
                        .checked_sub(entry.point_delta)
                        .ok_or(overflow)?,
                });
            }
        }
    }

    Ok(out)
}

/// player_id -> index of the first role held by that player.
fn first_role_by_player(roles: &[RoleInput]) -> HashMap<i64, usize> {
    let mut index = HashMap::with_capacity(roles.len());
    for (i, role) in roles.iter().enumerate() {
        index.entry(role.player_id).or_insert(i);
    }
    index
}

fn first_event(events: &[EventInput], kind: EventType) -> Option<&EventInput> {
    events.iter().find(|e| e.event_type == kind)
}

fn checked_sum(values: &[i64], stage: &'static str) -> Result<i64, SettlementError> {
    values
        .iter()
        .try_fold(0i64, |acc, v| acc.checked_add(*v))
        .ok_or(SettlementError::Overflow { stage })
}

fn settle_sell(
    roles: &[RoleInput],
    events: &[EventInput],
    index: &HashMap<i64, usize>,
    deltas: &mut [i64],
) -> Result<(), SettlementError> {
    let overflow = SettlementError::Overflow { stage: "sell" };
    let Some(sell) = first_event(events, EventType::Sell) else {
        return Ok(());
    };
    let Some(&seller) = index.get(&sell.player_id) else {
        return Ok(());
    };

    let mut collected = 0i64;
    for (i, role) in roles.iter().enumerate() {
        if matches!(role.role_name, RoleName::Dealer | RoleName::Seller) {
            continue;
        }
        deltas[i] = deltas[i].checked_sub(sell.points).ok_or(overflow)?;
        collected = collected.checked_add(sell.points).ok_or(overflow)?;
    }
    deltas[seller] = deltas[seller].checked_add(collected).ok_or(overflow)?;
    Ok(())
}

fn settle_first_round_locks(
    roles: &[RoleInput],
    events: &[EventInput],
    index: &HashMap<i64, usize>,
    deltas: &mut [i64],
) -> Result<(), SettlementError> {
    let overflow = SettlementError::Overflow {
        stage: "first-round lock",
    };

    for lock in events
        .iter()
        .filter(|e| e.event_type == EventType::FirstRoundLock)
    {
        let Some(&holder) = index.get(&lock.player_id) else {
            continue;
        };

        let mut collected = 0i64;
        for (i, role) in roles.iter().enumerate() {
            if role.role_name.is_seller() || role.player_id == lock.player_id {
                continue;
            }
            deltas[i] = deltas[i]
                .checked_sub(FIRST_ROUND_LOCK_POINTS)
                .ok_or(overflow)?;
            collected = collected
                .checked_add(FIRST_ROUND_LOCK_POINTS)
                .ok_or(overflow)?;
        }
        deltas[holder] = deltas[holder].checked_add(collected).ok_or(overflow)?;
    }
    Ok(())
}

fn settle_win(
    roles: &[RoleInput],
    events: &[EventInput],
    index: &HashMap<i64, usize>,
    deltas: &mut [i64],
) -> Result<(), SettlementError> {
    let overflow = SettlementError::Overflow { stage: "win" };
    let Some(win) = first_event(events, EventType::Win) else {
        return Ok(());
    };
    let Some(&winner) = index.get(&win.player_id) else {
        return Ok(());
    };

    let sell_addition = first_event(events, EventType::Sell).map_or(0, |e| e.points);
    let stake = win.points.checked_add(sell_addition).ok_or(overflow)?;

    let mut tally = 0i64;
    for loss in events
        .iter()
        .filter(|e| e.event_type == EventType::LossMultiplier)
    {
        let Some(&loser) = index.get(&loss.player_id) else {
            continue;
        };
        if roles[loser].role_name.is_seller() {
            continue;
        }
        let owed = stake.checked_mul(loss.points).ok_or(overflow)?;
        deltas[loser] = deltas[loser].checked_sub(owed).ok_or(overflow)?;
        tally = tally.checked_add(owed).ok_or(overflow)?;
    }
    deltas[winner] = deltas[winner].checked_add(tally).ok_or(overflow)?;
    Ok(())
}
