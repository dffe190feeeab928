//! Local-first ticket seat exchange.
//!
//! Fans post the seat they hold and the seat they want for one of the show
//! dates. A posting is paired automatically with an open posting that holds
//! exactly what it wants and wants exactly what it holds.

pub mod domain;
pub use domain::{
    Config, Draft, DraftError, MatchOutcome, RequestId, Seat, ShowDate, TicketRequest,
};

/// Persistence of the record set and the board that owns it.
pub mod storage;
pub use storage::{Board, JsonFileStore, MemoryStore, RecordStore};
