//! Domain models for the seat exchange.
//!
//! This module contains the postings themselves, the show dates they refer
//! to, the matching engine that pairs them and the configuration.

mod config;
pub use config::{CONFIG_DIR, Config};

/// The matching engine.
pub mod matching;
pub use matching::MatchOutcome;

/// Postings, drafts and seats.
pub mod request;
pub use request::{Draft, DraftError, Field, RequestId, Seat, TicketRequest};

mod show_date;
pub use show_date::{ParseShowDateError, ShowDate};
