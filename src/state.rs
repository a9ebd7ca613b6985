use crate::data::filter::filtered_indices;
use crate::data::loader::{LoadError, Source};
use crate::data::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Load sequencing
// ---------------------------------------------------------------------------

/// Sequence number handed out for every load request.
///
/// Only the most recently issued ticket may replace the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The dataset was replaced; carries the new row count.
    Applied { rows: usize },
    /// The load failed; the previous dataset is still shown.
    Failed,
    /// A newer load was requested meanwhile; the result was dropped.
    Stale,
}

/// Coarse session phase, derived from the dataset and query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing loaded yet.
    Empty,
    /// A dataset is shown unfiltered.
    Loaded,
    /// A dataset is shown narrowed by a non-empty query.
    Filtered,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset, the query and the visible indices only change together:
/// every mutator recomputes `visible_indices` before returning.
#[derive(Debug, Default)]
pub struct AppState {
    /// Loaded dataset (None until the first successful load).
    dataset: Option<Dataset>,

    /// Current search text, as typed.
    query: String,

    /// Indices of records matching the current query (cached).
    visible_indices: Vec<usize>,

    /// Source of the dataset currently shown.
    pub source: Option<Source>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the latest load request is still in flight.
    pub loading: bool,

    /// Clear the query whenever a new dataset arrives.
    pub reset_query_on_reload: bool,

    latest_ticket: u64,
    revision: u64,
}

impl AppState {
    pub fn new(reset_query_on_reload: bool) -> Self {
        Self {
            reset_query_on_reload,
            ..Default::default()
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    /// Records matching the current query, in dataset order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible_indices
            .iter()
            .filter_map(|&i| self.dataset.as_ref().and_then(|ds| ds.get(i)))
    }

    /// Bumped whenever the dataset or the query changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn phase(&self) -> Phase {
        match (&self.dataset, self.query.is_empty()) {
            (None, _) => Phase::Empty,
            (Some(_), true) => Phase::Loaded,
            (Some(_), false) => Phase::Filtered,
        }
    }

    /// Register a new load request. Any result for an older ticket is
    /// ignored from now on.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.loading = true;
        LoadTicket(self.latest_ticket)
    }

    /// Apply the result of a load started with [`begin_load`](Self::begin_load).
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        source: Source,
        result: Result<Dataset, LoadError>,
    ) -> LoadOutcome {
        if ticket.0 != self.latest_ticket {
            log::debug!(
                "Dropping stale load #{} of {source} (latest is #{})",
                ticket.0,
                self.latest_ticket
            );
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {source} with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                let rows = dataset.len();
                self.set_dataset(dataset);
                self.source = Some(source);
                LoadOutcome::Applied { rows }
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e}");
                self.status_message = Some(format!("Error: {e}"));
                LoadOutcome::Failed
            }
        }
    }

    /// Ingest a newly loaded dataset, keeping the current query unless
    /// `reset_query_on_reload` is set.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        if self.reset_query_on_reload {
            self.query.clear();
        }
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Replace the search text and recompute the visible rows.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    /// Recompute `visible_indices` from scratch.
    fn refilter(&mut self) {
        self.visible_indices = match &self.dataset {
            Some(ds) => filtered_indices(ds, &self.query),
            None => Vec::new(),
        };
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> Dataset {
        Dataset::from_records(vec![
            Record::new("a.com").with_title("Cats").with_ai_summary("About felines"),
            Record::new("b.com").with_title("Dogs").with_meta_description("Canine info"),
        ])
    }

    fn birds() -> Dataset {
        Dataset::from_records(vec![
            Record::new("c.com").with_title("Parrots"),
            Record::new("d.com").with_title("Bobcats"),
        ])
    }

    fn io_error() -> LoadError {
        LoadError::Io {
            origin: "gone.csv".into(),
            err: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
    }

    fn src(name: &str) -> Source {
        Source::path(name)
    }

    fn visible_urls(state: &AppState) -> Vec<&str> {
        state.visible_records().map(|r| r.url.as_str()).collect()
    }

    #[test]
    fn starts_empty() {
        let state = AppState::default();
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.visible_indices().is_empty());
        assert!(state.dataset().is_none());
    }

    #[test]
    fn query_moves_between_loaded_and_filtered() {
        let mut state = AppState::default();
        state.set_dataset(pets());
        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(visible_urls(&state), vec!["a.com", "b.com"]);

        state.set_query("CAT");
        assert_eq!(state.phase(), Phase::Filtered);
        assert_eq!(visible_urls(&state), vec!["a.com"]);

        state.set_query("fish");
        assert!(visible_urls(&state).is_empty());

        state.clear_query();
        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(visible_urls(&state), vec!["a.com", "b.com"]);
    }

    #[test]
    fn query_typed_before_load_applies_once_data_arrives() {
        let mut state = AppState::default();
        state.set_query("dog");
        assert_eq!(state.phase(), Phase::Empty);
        let t = state.begin_load();
        state.complete_load(t, src("pets.csv"), Ok(pets()));
        assert_eq!(visible_urls(&state), vec!["b.com"]);
    }

    #[test]
    fn reload_keeps_query_and_refilters_new_data() {
        let mut state = AppState::default();
        state.set_dataset(pets());
        state.set_query("cat");

        let t = state.begin_load();
        let outcome = state.complete_load(t, src("birds.csv"), Ok(birds()));
        assert_eq!(outcome, LoadOutcome::Applied { rows: 2 });
        assert_eq!(state.query(), "cat");
        assert_eq!(visible_urls(&state), vec!["d.com"]);
        assert_eq!(state.source, Some(src("birds.csv")));
    }

    #[test]
    fn reload_can_reset_query() {
        let mut state = AppState::new(true);
        state.set_dataset(pets());
        state.set_query("cat");
        state.set_dataset(birds());
        assert_eq!(state.query(), "");
        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(visible_urls(&state), vec!["c.com", "d.com"]);
    }

    #[test]
    fn failed_reload_keeps_previous_dataset() {
        let mut state = AppState::default();
        let t = state.begin_load();
        state.complete_load(t, src("pets.csv"), Ok(pets()));
        state.set_query("dog");

        let t = state.begin_load();
        let outcome = state.complete_load(t, src("gone.csv"), Err(io_error()));
        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(!state.loading);
        assert_eq!(state.phase(), Phase::Filtered);
        assert_eq!(state.dataset(), Some(&pets()));
        assert_eq!(visible_urls(&state), vec!["b.com"]);
        assert_eq!(state.source, Some(src("pets.csv")));
        assert!(state.status_message.as_deref().unwrap().contains("gone.csv"));
    }

    #[test]
    fn failed_first_load_stays_empty() {
        let mut state = AppState::default();
        let t = state.begin_load();
        state.complete_load(t, src("gone.csv"), Err(io_error()));
        assert_eq!(state.phase(), Phase::Empty);
    }

    #[test]
    fn stale_result_never_overwrites_newer_request() {
        let mut state = AppState::default();
        let slow = state.begin_load();
        let fast = state.begin_load();
        assert!(fast > slow);

        assert_eq!(
            state.complete_load(fast, src("birds.csv"), Ok(birds())),
            LoadOutcome::Applied { rows: 2 }
        );
        assert_eq!(
            state.complete_load(slow, src("pets.csv"), Ok(pets())),
            LoadOutcome::Stale
        );
        assert_eq!(state.dataset(), Some(&birds()));
    }

    #[test]
    fn stale_result_arriving_first_is_also_dropped() {
        let mut state = AppState::default();
        let slow = state.begin_load();
        let fast = state.begin_load();

        assert_eq!(
            state.complete_load(slow, src("pets.csv"), Ok(pets())),
            LoadOutcome::Stale
        );
        assert!(state.loading);
        assert_eq!(state.phase(), Phase::Empty);

        state.complete_load(fast, src("birds.csv"), Ok(birds()));
        assert!(!state.loading);
        assert_eq!(state.dataset(), Some(&birds()));
    }

    #[test]
    fn stale_failure_does_not_touch_status() {
        let mut state = AppState::default();
        let old = state.begin_load();
        let new = state.begin_load();
        state.complete_load(new, src("pets.csv"), Ok(pets()));
        state.complete_load(old, src("gone.csv"), Err(io_error()));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn revision_advances_on_every_change() {
        let mut state = AppState::default();
        let r0 = state.revision();
        state.set_dataset(pets());
        let r1 = state.revision();
        state.set_query("c");
        let r2 = state.revision();
        assert!(r0 < r1 && r1 < r2);
    }
}
