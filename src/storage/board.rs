//! The exchange board.
//!
//! The [`Board`] owns the canonical, most-recent-first sequence of postings
//! and the store it is persisted to. Every change goes through it: the
//! sequence is handed to the matching engine by value, replaced by what comes
//! back, and saved.

use std::path::Path;

use crate::{
    domain::{CONFIG_DIR, Config, Draft, MatchOutcome, RequestId, TicketRequest, matching},
    storage::store::{JsonFileStore, RecordStore},
};

/// The record set of one exchange, together with its store.
#[derive(Debug)]
pub struct Board<S> {
    store: S,
    requests: Vec<TicketRequest>,
}

impl Board<JsonFileStore> {
    /// Opens the board kept under `root`, using the storage key from its
    /// configuration.
    #[must_use]
    pub fn at(root: &Path) -> Self {
        let config = Config::load_or_default(root);
        Self::open(JsonFileStore::new(
            &root.join(CONFIG_DIR),
            config.storage_key(),
        ))
    }
}

impl<S: RecordStore> Board<S> {
    /// Opens a board, loading whatever the store holds.
    pub fn open(store: S) -> Self {
        let requests = store.load();
        tracing::debug!("Loaded {} records", requests.len());
        Self { store, requests }
    }

    /// All postings, most recent first.
    #[must_use]
    pub fn requests(&self) -> &[TicketRequest] {
        &self.requests
    }

    /// Postings still waiting for a counterpart.
    pub fn open_requests(&self) -> impl Iterator<Item = &TicketRequest> {
        self.requests.iter().filter(|r| !r.is_matched())
    }

    /// Postings that have been paired.
    pub fn matched_requests(&self) -> impl Iterator<Item = &TicketRequest> {
        self.requests.iter().filter(|r| r.is_matched())
    }

    /// Finds a posting by its exact id.
    #[must_use]
    pub fn find(&self, id: &RequestId) -> Option<&TicketRequest> {
        self.requests.iter().find(|r| r.id() == id)
    }

    /// Finds the posting whose id is `query` or starts with it.
    ///
    /// # Errors
    ///
    /// Returns an error if no posting matches, or if `query` is a prefix of
    /// more than one id and none of them equals it.
    pub fn resolve(&self, query: &str) -> Result<&TicketRequest, LookupError> {
        if let Some(exact) = self.requests.iter().find(|r| r.id().as_str() == query) {
            return Ok(exact);
        }

        let mut candidates = self
            .requests
            .iter()
            .filter(|r| !query.is_empty() && r.id().as_str().starts_with(query));

        match (candidates.next(), candidates.next()) {
            (Some(found), None) => Ok(found),
            (Some(_), Some(_)) => Err(LookupError::Ambiguous(query.to_string())),
            (None, _) => Err(LookupError::NotFound(query.to_string())),
        }
    }

    /// The posting `request` was paired with, if it is still on the board.
    #[must_use]
    pub fn counterpart_of(&self, request: &TicketRequest) -> Option<&TicketRequest> {
        request.matched_with().and_then(|id| self.find(id))
    }

    /// Posts a new request and pairs it with a reciprocal one if possible.
    ///
    /// The new posting goes to the front of the board. The updated board is
    /// saved before returning.
    pub fn submit(&mut self, draft: Draft) -> MatchOutcome {
        let existing = std::mem::take(&mut self.requests);
        let (updated, outcome) = matching::submit(existing, draft);
        self.requests = updated;

        match &outcome {
            MatchOutcome::Matched { counterpart } => {
                tracing::info!(
                    "Posted {} and matched it with {}",
                    self.requests[0].id(),
                    counterpart.id()
                );
            }
            MatchOutcome::Unmatched => {
                tracing::info!("Posted {} to the pool", self.requests[0].id());
            }
        }

        self.store.save(&self.requests);
        outcome
    }

    /// Removes one posting, returning it.
    ///
    /// Every other posting is left exactly as it was, including any match
    /// link pointing at the removed one.
    pub fn delete(&mut self, id: &RequestId) -> Option<TicketRequest> {
        let index = self.requests.iter().position(|r| r.id() == id)?;
        let removed = self.requests.remove(index);
        self.store.save(&self.requests);
        tracing::info!("Deleted {id}");
        Some(removed)
    }

    /// Removes every posting and clears the store.
    pub fn clear(&mut self) {
        let count = self.requests.len();
        self.requests.clear();
        self.store.clear();
        tracing::info!("Cleared {count} records");
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

/// A posting could not be identified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No posting has this id or id prefix.
    #[error("no posting with id '{0}'")]
    NotFound(String),
    /// More than one posting starts with this prefix.
    #[error("'{0}' matches more than one posting; use more characters")]
    Ambiguous(String),
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        domain::{Seat, ShowDate, request::tests::posting},
        storage::store::MemoryStore,
    };

    fn draft(date: ShowDate, have: (&str, &str), want: (&str, &str)) -> Draft {
        Draft::new(
            date,
            Seat::new(have.0, have.1),
            Seat::new(want.0, want.1),
            "@me",
        )
        .unwrap()
    }

    fn board_with(requests: &[TicketRequest]) -> Board<MemoryStore> {
        let mut store = MemoryStore::new();
        store.save(requests);
        Board::open(store)
    }

    #[test]
    fn submit_persists_and_matches() {
        let mut board = board_with(&[posting("old", ShowDate::Mar07, ("特B", "10"), ("特A", "5"))]);

        let outcome = board.submit(draft(ShowDate::Mar07, ("特A", "5"), ("特B", "10")));

        assert!(outcome.is_success());
        assert_eq!(board.requests().len(), 2);
        assert_eq!(board.open_requests().count(), 0);
        assert_eq!(board.matched_requests().count(), 2);

        let reopened = Board::open(board.store().clone());
        assert_eq!(reopened.requests(), board.requests());
    }

    #[test]
    fn counterpart_of_follows_link() {
        let mut board = board_with(&[posting("old", ShowDate::Mar07, ("A", "1"), ("B", "2"))]);
        board.submit(draft(ShowDate::Mar07, ("B", "2"), ("A", "1")));

        let new = &board.requests()[0];
        let counterpart = board.counterpart_of(new).unwrap();
        assert_eq!(counterpart.id().as_str(), "old");
        assert_eq!(board.counterpart_of(counterpart).unwrap().id(), new.id());
    }

    #[test]
    fn unmatched_submission_joins_pool() {
        let mut board = board_with(&[posting("old", ShowDate::Mar07, ("特B", "10"), ("特A", "5"))]);

        let outcome = board.submit(draft(ShowDate::Mar08, ("特A", "5"), ("特B", "10")));

        assert_eq!(outcome, MatchOutcome::Unmatched);
        assert_eq!(board.open_requests().count(), 2);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let a = posting("a", ShowDate::Mar07, ("A", "1"), ("B", "2")).matched_to(RequestId::from("b"));
        let b = posting("b", ShowDate::Mar07, ("B", "2"), ("A", "1")).matched_to(RequestId::from("a"));
        let c = posting("c", ShowDate::Mar08, ("C", "3"), ("D", "4"));
        let mut board = board_with(&[a.clone(), b.clone(), c.clone()]);

        let removed = board.delete(&RequestId::from("a")).unwrap();

        assert_eq!(removed, a);
        assert_eq!(board.requests(), [b.clone(), c.clone()]);
        // the surviving counterpart keeps its link
        assert_eq!(board.requests()[0].matched_with(), Some(&RequestId::from("a")));
        assert!(board.counterpart_of(&board.requests()[0]).is_none());

        assert_eq!(Board::open(board.store().clone()).requests(), [b, c]);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut board = board_with(&[posting("a", ShowDate::Mar07, ("A", "1"), ("B", "2"))]);

        assert!(board.delete(&RequestId::from("zzz")).is_none());
        assert_eq!(board.requests().len(), 1);
    }

    #[test]
    fn clear_empties_board_and_store() {
        let mut board = board_with(&[posting("a", ShowDate::Mar07, ("A", "1"), ("B", "2"))]);

        board.clear();

        assert!(board.requests().is_empty());
        assert!(Board::open(board.store().clone()).requests().is_empty());
    }

    #[test]
    fn resolve_by_prefix() {
        let board = board_with(&[
            posting("abc123", ShowDate::Mar07, ("A", "1"), ("B", "2")),
            posting("abd456", ShowDate::Mar07, ("A", "1"), ("B", "2")),
            posting("ab", ShowDate::Mar07, ("A", "1"), ("B", "2")),
        ]);

        assert_eq!(board.resolve("abc").unwrap().id().as_str(), "abc123");
        assert_eq!(board.resolve("ab").unwrap().id().as_str(), "ab");
        assert_eq!(
            board.resolve("a").unwrap_err(),
            LookupError::Ambiguous("a".to_string())
        );
        assert_eq!(
            board.resolve("x").unwrap_err(),
            LookupError::NotFound("x".to_string())
        );
        assert!(board.resolve("").is_err());
    }

    #[test]
    fn bad_record_does_not_wipe_the_board() {
        let good = [
            posting("a", ShowDate::Mar07, ("A", "1"), ("B", "2")),
            posting("b", ShowDate::Mar08, ("C", "3"), ("D", "4")),
        ];
        let mut blob = serde_json::to_value(&good).unwrap();
        let mut flagged = blob[0].clone();
        flagged["id"] = "flagged".into();
        flagged["isMatched"] = true.into();
        blob.as_array_mut().unwrap().push(flagged);

        let mut board = Board::open(MemoryStore::with_blob(blob.to_string()));
        assert_eq!(board.requests(), good);

        board.submit(draft(ShowDate::Mar07, ("X", "9"), ("Y", "9")));

        let reopened = Board::open(board.store().clone());
        assert_eq!(reopened.requests().len(), 3);
        assert_eq!(&reopened.requests()[1..], good);
    }

    #[test]
    fn at_uses_configured_storage_key() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join(CONFIG_DIR)).unwrap();
        std::fs::write(
            Config::path(root),
            "_version = \"1\"\nstorage_key = \"custom\"\n",
        )
        .unwrap();

        let mut board = Board::at(root);
        board.submit(draft(ShowDate::Mar07, ("A", "1"), ("B", "2")));

        assert!(root.join(CONFIG_DIR).join("custom.json").exists());
        assert_eq!(Board::at(root).requests().len(), 1);
    }

    #[test]
    fn at_recovers_from_corrupt_records() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join(CONFIG_DIR)).unwrap();
        std::fs::write(
            root.join(CONFIG_DIR).join("day6_exchange_db_v2.json"),
            "{ definitely not",
        )
        .unwrap();

        let mut board = Board::at(root);
        assert!(board.requests().is_empty());

        board.submit(draft(ShowDate::Mar07, ("A", "1"), ("B", "2")));
        assert_eq!(Board::at(root).requests().len(), 1);
    }
}
