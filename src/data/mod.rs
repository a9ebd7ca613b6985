//! Records, CSV loading and keyword search.
//!
//! `loader` turns the scraper's CSV into a [`model::Dataset`] or a
//! [`loader::LoadError`]; nothing partial escapes a failed load. `filter`
//! maps a dataset and a query to the indices of matching records, always in
//! file order. Neither keeps state between calls.

pub mod filter;
pub mod loader;
pub mod model;
