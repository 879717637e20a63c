//! Error codes for the Gostop ledger API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the string that appears
//! in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Refresh cookie missing or unusable
    UnauthorizedMissingRefresh,
    /// Wrong shared password
    InvalidCredentials,

    // Request validation
    /// Path id is not a positive integer
    InvalidPlayerId,
    InvalidGameId,
    /// Unknown scoring event type
    InvalidEventType,
    /// Empty or malformed name / username
    InvalidPlayerName,
    /// More than four players, or none
    InvalidPlayerCount,
    /// Same player listed twice in one game
    DuplicatePlayer,
    /// Declared winner is not among the game's players
    UnknownWinner,
    /// WIN event owned by someone other than the declared winner, or repeated
    WinnerMismatch,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource not found
    PlayerNotFound,
    GameNotFound,
    NotFound,

    // Business conflicts
    /// Username already in use
    UsernameTaken,
    /// Player still owes or is owed points
    UnpaidBalance,
    /// Player still appears in recorded games
    PlayerHasGames,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Settlement engine
    /// Deltas of a game did not sum to zero
    SettlementInvariant,
    /// Checked arithmetic overflowed during settlement
    SettlementOverflow,

    // System errors
    DbError,
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UnauthorizedMissingRefresh => "UNAUTHORIZED_MISSING_REFRESH",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::InvalidPlayerId => "INVALID_PLAYER_ID",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidEventType => "INVALID_EVENT_TYPE",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::DuplicatePlayer => "DUPLICATE_PLAYER",
            Self::UnknownWinner => "UNKNOWN_WINNER",
            Self::WinnerMismatch => "WINNER_MISMATCH",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::UnpaidBalance => "UNPAID_BALANCE",
            Self::PlayerHasGames => "PLAYER_HAS_GAMES",
            Self::Conflict => "CONFLICT",

            Self::SettlementInvariant => "SETTLEMENT_INVARIANT",
            Self::SettlementOverflow => "SETTLEMENT_OVERFLOW",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
