//! Load scraped web-page summaries from CSV and narrow them with a live
//! keyword search.
//!
//! The desktop front end lives in the `web-summary-viewer` binary; this
//! library holds everything that does not draw pixels.

pub mod config;
pub mod data;
pub mod state;
pub mod worker;

pub use data::filter::{filter, filter_to_dataset, filtered_indices};
pub use data::loader::{load, LoadError, Source};
pub use data::model::{Dataset, Record};
pub use state::{AppState, LoadOutcome, LoadTicket, Phase};
