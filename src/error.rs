//! Error type for malformed positions and unparsable input

use thiserror::Error;

use super::types::Seat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EuchreError {
    #[error("invalid card '{0}' (expected suit letter then rank, e.g. HJ or S9)")]
    InvalidCard(String),

    #[error("invalid suit '{0}'")]
    InvalidSuit(String),

    #[error("invalid seat '{0}' (expected 0-3)")]
    InvalidSeat(String),

    #[error("inconsistent setup: {0}")]
    InvalidSetup(String),

    #[error("inconsistent state: {0}")]
    InvalidState(String),

    #[error("seat 0 cannot act: seat {0} is to play")]
    NotOurTurn(Seat),

    #[error("no consistent deal found after {0} attempts")]
    Infeasible(usize),
}

pub type Result<T> = std::result::Result<T, EuchreError>;
