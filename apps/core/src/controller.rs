use crate::aggregator::{Aggregate, SectionKind};
use crate::contract::{SearchResults, SearchTicket};
use crate::history::HistoryStore;
use crate::kv_store::KeyValueStore;
use crate::logging;
use crate::model::Candidate;
use crate::navigation::{OverlayHost, Route};
use crate::presenter::{self, SectionView};
use crate::selection::SelectionCursor;
use crate::snippet::SnippetOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Other(String),
}

impl Key {
    /// Parses DOM-style key names (`"ArrowDown"`, `"Enter"`, ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "Enter" => Self::Enter,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Owns all state of one search interaction and reacts to its events.
///
/// Searches are not run here: `on_input` hands back a [`SearchTicket`] and the
/// caller feeds the outcome to `on_response`. Only the latest ticket is ever
/// applied, so a slow response to an older query cannot replace newer results.
pub struct SearchController<S, H> {
    history: HistoryStore<S>,
    host: H,
    snippet_options: SnippetOptions,
    query: String,
    results: SearchResults,
    recent: Vec<Candidate>,
    aggregate: Aggregate,
    cursor: SelectionCursor,
    issued_seq: u64,
    closed: bool,
}

impl<S: KeyValueStore, H: OverlayHost> SearchController<S, H> {
    pub fn new(history: HistoryStore<S>, host: H) -> Self {
        let recent = history.load();
        let aggregate = Aggregate::from_history(&recent);
        let mut cursor = SelectionCursor::new();
        cursor.reseed(aggregate.active_list());

        Self {
            history,
            host,
            snippet_options: SnippetOptions::default(),
            query: String::new(),
            results: SearchResults::default(),
            recent,
            aggregate,
            cursor,
            issued_seq: 0,
            closed: false,
        }
    }

    pub fn with_snippet_options(mut self, options: SnippetOptions) -> Self {
        self.snippet_options = options;
        self
    }

    pub fn on_input(&mut self, text: &str) -> Option<SearchTicket> {
        if self.closed {
            return None;
        }

        self.query = text.to_string();
        // Bumped for blank input too, so a response still in flight is dropped.
        self.issued_seq += 1;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.results = SearchResults::default();
            self.rebuild();
            return None;
        }

        Some(SearchTicket {
            seq: self.issued_seq,
            query: trimmed.to_string(),
        })
    }

    /// Applies `results` if `ticket` is the latest one issued. Returns whether
    /// the results were applied.
    pub fn on_response(&mut self, ticket: &SearchTicket, results: SearchResults) -> bool {
        if self.closed {
            return false;
        }
        if ticket.seq != self.issued_seq {
            logging::info(
                "search.stale_response",
                &[
                    ("seq", &ticket.seq),
                    ("latest_seq", &self.issued_seq),
                    ("query", &ticket.query),
                ],
            );
            return false;
        }

        self.results = results;
        self.rebuild();
        true
    }

    pub fn on_key(&mut self, key: &Key) {
        if self.closed {
            return;
        }

        match key {
            Key::ArrowDown => self.cursor.advance(self.aggregate.active_list()),
            Key::ArrowUp => self.cursor.retreat(self.aggregate.active_list()),
            Key::Enter => {
                if let Some(selected) = self.cursor.selected().cloned() {
                    self.commit(selected);
                }
            }
            Key::Other(_) => {}
        }
    }

    /// Pointer selection: commits `item` whatever the cursor points at.
    pub fn on_select_item(&mut self, item: &Candidate) {
        if self.closed {
            return;
        }
        self.commit(item.clone());
    }

    pub fn dismiss(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.host.close();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn active_list(&self) -> &[Candidate] {
        self.aggregate.active_list()
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, &[Candidate])> + '_ {
        self.aggregate.sections()
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.cursor.selected()
    }

    pub fn history_entries(&self) -> &[Candidate] {
        &self.recent
    }

    pub fn rows(&self) -> Vec<SectionView> {
        presenter::present(&self.aggregate, &self.cursor, self.snippet_options)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn history_store(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn rebuild(&mut self) {
        self.aggregate = Aggregate::build(&self.query, &self.results, &self.recent);
        self.cursor.reseed(self.aggregate.active_list());
    }

    fn commit(&mut self, item: Candidate) {
        self.history.record(&item);
        self.recent = self.history.load();

        let route = Route::for_candidate(&item);
        logging::info(
            "search.commit",
            &[("route", &route), ("history_len", &self.recent.len())],
        );
        self.host.navigate(&route);

        self.closed = true;
        self.host.close();
    }
}
