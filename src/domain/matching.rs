//! The matching engine.
//!
//! A new posting matches an existing one when each side holds exactly the
//! seat the other wants, on the same show date. Matching is a pure
//! transformation of the record sequence: nothing is persisted here.
//!
//! # Comparison rules
//!
//! - Areas are compared after trimming whitespace and lowercasing, since fans
//!   write area codes inconsistently (`特A`, ` 特a `). A byte order mark left
//!   over from pasting counts as whitespace.
//! - Rows are compared after trimming whitespace only. They are never
//!   case-folded, and `5` is not the same row as `05`.
//!
//! # Tie-break
//!
//! The existing sequence is scanned in the order given and the *first*
//! qualifying posting wins. Sequences are kept most-recent-first, so when
//! several postings qualify the newest of them is chosen.

use crate::domain::{Draft, Seat, TicketRequest};

/// The result of submitting a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The posting was paired with an existing one.
    Matched {
        /// The counterpart as it was before the match was recorded.
        counterpart: TicketRequest,
    },
    /// No reciprocal posting exists yet; the new posting joins the pool.
    Unmatched,
}

impl MatchOutcome {
    /// Whether a counterpart was found.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// The counterpart, if one was found.
    #[must_use]
    pub const fn matched_request(&self) -> Option<&TicketRequest> {
        match self {
            Self::Matched { counterpart } => Some(counterpart),
            Self::Unmatched => None,
        }
    }
}

fn trim(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Canonical form of an area for comparison.
#[must_use]
pub fn normalize_area(area: &str) -> String {
    trim(area).to_lowercase()
}

/// Canonical form of a row for comparison. Case is preserved.
#[must_use]
pub fn normalize_row(row: &str) -> &str {
    trim(row)
}

/// Whether two seat descriptions refer to the same seat.
#[must_use]
pub fn same_seat(a: &Seat, b: &Seat) -> bool {
    normalize_area(&a.area) == normalize_area(&b.area)
        && normalize_row(&a.row) == normalize_row(&b.row)
}

/// Whether `candidate` can be paired with `incoming`.
///
/// The candidate must still be open, be for the same date, hold the seat
/// `incoming` wants and want the seat `incoming` holds.
#[must_use]
pub fn reciprocates(candidate: &TicketRequest, incoming: &TicketRequest) -> bool {
    !candidate.is_matched()
        && candidate.date == incoming.date
        && same_seat(&candidate.have, &incoming.want)
        && same_seat(&candidate.want, &incoming.have)
}

/// Submits a draft against the existing postings.
///
/// A new posting is created from `draft` with a fresh id and the current
/// time, then handed to [`match_request`].
#[must_use]
pub fn submit(existing: Vec<TicketRequest>, draft: Draft) -> (Vec<TicketRequest>, MatchOutcome) {
    match_request(existing, TicketRequest::new(draft))
}

/// Pairs an already-built posting with the first reciprocal posting in
/// `existing`.
///
/// The returned sequence always has `request` prepended. If a counterpart was
/// found, both the new posting and the counterpart (at its original position)
/// are marked as matched with each other. Otherwise the existing postings are
/// returned unchanged.
#[must_use]
pub fn match_request(
    mut existing: Vec<TicketRequest>,
    request: TicketRequest,
) -> (Vec<TicketRequest>, MatchOutcome) {
    let Some(index) = existing
        .iter()
        .position(|candidate| reciprocates(candidate, &request))
    else {
        tracing::debug!("No counterpart for {}", request.id);
        existing.insert(0, request);
        return (existing, MatchOutcome::Unmatched);
    };

    let counterpart = existing[index].clone();
    tracing::debug!(
        "Matched {} with {} (position {index})",
        request.id,
        counterpart.id
    );

    existing[index] = counterpart.clone().matched_to(request.id.clone());
    existing.insert(0, request.matched_to(counterpart.id.clone()));

    (existing, MatchOutcome::Matched { counterpart })
}
