//! The persisted layout of a posting.
//!
//! Records are stored as flat camelCase JSON objects, with `createdAt` in
//! milliseconds since the epoch and the match state spread over `isMatched`
//! and `matchedWithId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{RequestId, Seat, ShowDate, TicketRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRequest {
    id: RequestId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    date: ShowDate,
    have_area: String,
    have_row: String,
    want_area: String,
    want_row: String,
    contact: String,
    is_matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    matched_with_id: Option<RequestId>,
}

/// `isMatched` and `matchedWithId` disagree.
#[derive(Debug, thiserror::Error)]
#[error("record {0} has inconsistent isMatched and matchedWithId")]
pub struct InconsistentMatchError(RequestId);

impl TryFrom<StoredRequest> for TicketRequest {
    type Error = InconsistentMatchError;

    fn try_from(stored: StoredRequest) -> Result<Self, Self::Error> {
        if stored.is_matched != stored.matched_with_id.is_some() {
            return Err(InconsistentMatchError(stored.id));
        }

        Ok(Self {
            id: stored.id,
            created: stored.created_at,
            date: stored.date,
            have: Seat::new(stored.have_area, stored.have_row),
            want: Seat::new(stored.want_area, stored.want_row),
            contact: stored.contact,
            matched_with: stored.matched_with_id,
        })
    }
}

impl From<TicketRequest> for StoredRequest {
    fn from(request: TicketRequest) -> Self {
        Self {
            id: request.id,
            created_at: request.created,
            date: request.date,
            have_area: request.have.area,
            have_row: request.have.row,
            want_area: request.want.area,
            want_row: request.want.row,
            contact: request.contact,
            is_matched: request.matched_with.is_some(),
            matched_with_id: request.matched_with,
        }
    }
}
