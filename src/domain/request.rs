use std::fmt;

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{domain::ShowDate, storage::record::StoredRequest};

/// Opaque, unique identifier of a posting.
///
/// Assigned once at creation and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generates a fresh identifier from a random (v4) UUID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A seat, described the way fans write it on a ticket.
///
/// Both parts are free text. Areas are usually short codes such as `特A`;
/// rows are usually numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seat {
    /// The seating area.
    pub area: String,
    /// The row within the area.
    pub row: String,
}

impl Seat {
    /// Creates a seat from its area and row.
    pub fn new(area: impl Into<String>, row: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            row: row.into(),
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} row {}", self.area, self.row)
    }
}

/// A field of a [`Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Area of the held seat.
    HaveArea,
    /// Row of the held seat.
    HaveRow,
    /// Area of the wanted seat.
    WantArea,
    /// Row of the wanted seat.
    WantRow,
    /// Contact handle.
    Contact,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HaveArea => "have area",
            Self::HaveRow => "have row",
            Self::WantArea => "want area",
            Self::WantRow => "want row",
            Self::Contact => "contact",
        })
    }
}

/// A draft could not be built from the submitted fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// A required field was empty or only whitespace.
    #[error("{0} must not be empty")]
    Empty(Field),
}

/// The validated fields of a posting that has not been submitted yet.
///
/// Every text field is known to contain something other than whitespace, so
/// the matching engine never has to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    date: ShowDate,
    have_area: NonEmptyString,
    have_row: NonEmptyString,
    want_area: NonEmptyString,
    want_row: NonEmptyString,
    contact: NonEmptyString,
}

impl Draft {
    /// Validates the fields of a new posting.
    ///
    /// Values are kept exactly as given; whitespace and case are only
    /// normalized when postings are compared.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::Empty`] naming the first field (in form order)
    /// that is empty or contains only whitespace.
    pub fn new(
        date: ShowDate,
        have: Seat,
        want: Seat,
        contact: impl Into<String>,
    ) -> Result<Self, DraftError> {
        Ok(Self {
            date,
            have_area: required(Field::HaveArea, have.area)?,
            have_row: required(Field::HaveRow, have.row)?,
            want_area: required(Field::WantArea, want.area)?,
            want_row: required(Field::WantRow, want.row)?,
            contact: required(Field::Contact, contact.into())?,
        })
    }

    /// The show date the posting is for.
    #[must_use]
    pub const fn date(&self) -> ShowDate {
        self.date
    }
}

fn required(field: Field, value: String) -> Result<NonEmptyString, DraftError> {
    if value.trim().is_empty() {
        return Err(DraftError::Empty(field));
    }
    NonEmptyString::new(value).map_err(|_| DraftError::Empty(field))
}

/// One posting: a seat someone holds and the seat they would swap it for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRequest", into = "StoredRequest")]
pub struct TicketRequest {
    pub(crate) id: RequestId,
    pub(crate) created: DateTime<Utc>,
    pub(crate) date: ShowDate,
    pub(crate) have: Seat,
    pub(crate) want: Seat,
    pub(crate) contact: String,
    /// The counterpart, once matched. Never cleared afterwards.
    pub(crate) matched_with: Option<RequestId>,
}

impl TicketRequest {
    /// Creates an unmatched posting from a draft, with a fresh id and the
    /// current time.
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        Self::with_id(draft, RequestId::generate(), Utc::now())
    }

    /// Creates an unmatched posting with an explicit id and creation time.
    #[must_use]
    pub fn with_id(draft: Draft, id: RequestId, created: DateTime<Utc>) -> Self {
        Self {
            id,
            created,
            date: draft.date,
            have: Seat::new(draft.have_area.as_str(), draft.have_row.as_str()),
            want: Seat::new(draft.want_area.as_str(), draft.want_row.as_str()),
            contact: draft.contact.as_str().to_string(),
            matched_with: None,
        }
    }

    /// The unique identifier of this posting.
    #[must_use]
    pub const fn id(&self) -> &RequestId {
        &self.id
    }

    /// When the posting was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// The show date the tickets are for.
    #[must_use]
    pub const fn date(&self) -> ShowDate {
        self.date
    }

    /// The seat the poster holds.
    #[must_use]
    pub const fn have(&self) -> &Seat {
        &self.have
    }

    /// The seat the poster wants.
    #[must_use]
    pub const fn want(&self) -> &Seat {
        &self.want
    }

    /// The poster's contact handle.
    ///
    /// Front ends should only reveal this to the counterpart after a match.
    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Whether this posting has been paired.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.matched_with.is_some()
    }

    /// The id of the posting this one was paired with, if any.
    #[must_use]
    pub const fn matched_with(&self) -> Option<&RequestId> {
        self.matched_with.as_ref()
    }

    /// Returns a copy of this posting marked as matched with `counterpart`.
    #[must_use]
    pub(crate) fn matched_to(self, counterpart: RequestId) -> Self {
        Self {
            matched_with: Some(counterpart),
            ..self
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::TimeZone;
    use test_case::test_case;

    use super::*;

    /// Builds an unmatched posting with a fixed id, for tests elsewhere in the
    /// crate.
    pub(crate) fn posting(
        id: &str,
        date: ShowDate,
        have: (&str, &str),
        want: (&str, &str),
    ) -> TicketRequest {
        let draft = Draft::new(
            date,
            Seat::new(have.0, have.1),
            Seat::new(want.0, want.1),
            format!("@{id}"),
        )
        .unwrap();
        TicketRequest::with_id(
            draft,
            RequestId::from(id),
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        )
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| RequestId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn new_posting_is_unmatched() {
        let draft = Draft::new(
            ShowDate::Mar07,
            Seat::new("特B", "10"),
            Seat::new("特A", "5"),
            "@fan",
        )
        .unwrap();
        let request = TicketRequest::new(draft);

        assert!(!request.is_matched());
        assert_eq!(request.matched_with(), None);
        assert_eq!(request.have(), &Seat::new("特B", "10"));
        assert_eq!(request.want(), &Seat::new("特A", "5"));
        assert_eq!(request.contact(), "@fan");
    }

    #[test]
    fn draft_keeps_values_verbatim() {
        let draft = Draft::new(
            ShowDate::Mar08,
            Seat::new(" 特a ", " 5"),
            Seat::new("B", "7 "),
            " @fan ",
        )
        .unwrap();
        let request = TicketRequest::new(draft);

        assert_eq!(request.have().area, " 特a ");
        assert_eq!(request.have().row, " 5");
        assert_eq!(request.contact(), " @fan ");
    }

    #[test_case(("", "1"), ("B", "2"), "@c", Field::HaveArea; "empty have area")]
    #[test_case(("A", "  "), ("B", "2"), "@c", Field::HaveRow; "blank have row")]
    #[test_case(("A", "1"), ("\t", "2"), "@c", Field::WantArea; "blank want area")]
    #[test_case(("A", "1"), ("B", ""), "@c", Field::WantRow; "empty want row")]
    #[test_case(("A", "1"), ("B", "2"), " ", Field::Contact; "blank contact")]
    #[test_case(("", ""), ("", ""), "", Field::HaveArea; "first empty field is reported")]
    fn draft_rejects_empty_fields(
        have: (&str, &str),
        want: (&str, &str),
        contact: &str,
        field: Field,
    ) {
        let error = Draft::new(
            ShowDate::Mar07,
            Seat::new(have.0, have.1),
            Seat::new(want.0, want.1),
            contact,
        )
        .unwrap_err();
        assert_eq!(error, DraftError::Empty(field));
    }

    #[test]
    fn matched_to_links_counterpart() {
        let request = posting("a", ShowDate::Mar07, ("A", "1"), ("B", "2"));
        let matched = request.clone().matched_to(RequestId::from("b"));

        assert!(matched.is_matched());
        assert_eq!(matched.matched_with(), Some(&RequestId::from("b")));
        assert_eq!(matched.id(), request.id());
        assert_eq!(matched.have(), request.have());
    }
}
