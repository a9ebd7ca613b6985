use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names written by the upstream scraper
// ---------------------------------------------------------------------------

pub const URL_COLUMN: &str = "url";
pub const TITLE_COLUMN: &str = "title";
pub const META_DESCRIPTION_COLUMN: &str = "meta_description";
pub const AI_SUMMARY_COLUMN: &str = "ai_summary";

/// The four columns the viewer understands, in display order.
pub const KNOWN_COLUMNS: [&str; 4] = [
    URL_COLUMN,
    TITLE_COLUMN,
    META_DESCRIPTION_COLUMN,
    AI_SUMMARY_COLUMN,
];

// ---------------------------------------------------------------------------
// Record – one row of the scraped summary file
// ---------------------------------------------------------------------------

/// Metadata for a single scraped web page.
///
/// Text fields are optional: a missing column, a short row or an empty cell
/// all end up as `None`, which never matches a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Page address; shown as a hyperlink, not searched.
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub ai_summary: Option<String>,
}

impl Record {
    pub fn new(url: impl Into<String>) -> Self {
        Record {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    pub fn with_meta_description(mut self, meta: impl Into<String>) -> Self {
        self.meta_description = non_empty(meta.into());
        self
    }

    pub fn with_ai_summary(mut self, summary: impl Into<String>) -> Self {
        self.ai_summary = non_empty(summary.into());
        self
    }

    /// The human-readable fields that participate in keyword search.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [&self.title, &self.meta_description, &self.ai_summary]
            .into_iter()
            .filter_map(|f| f.as_deref())
    }
}

/// Map an empty cell to an absent value.
pub(crate) fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// All records of one load, in file row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// All records (rows).
    pub records: Vec<Record>,
    /// Header of the source file, as read.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset whose header is exactly the known columns.
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset {
            records,
            column_names: KNOWN_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_treat_empty_text_as_absent() {
        let r = Record::new("a.com")
            .with_title("Cats")
            .with_meta_description("")
            .with_ai_summary("About felines");
        assert_eq!(r.title.as_deref(), Some("Cats"));
        assert_eq!(r.meta_description, None);
        assert_eq!(r.ai_summary.as_deref(), Some("About felines"));
    }

    #[test]
    fn searchable_fields_skip_url_and_absent_values() {
        let r = Record::new("cats.com").with_ai_summary("summary");
        let fields: Vec<&str> = r.searchable_fields().collect();
        assert_eq!(fields, vec!["summary"]);
    }

    #[test]
    fn from_records_uses_known_header() {
        let ds = Dataset::from_records(vec![Record::new("a.com")]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.column_names, KNOWN_COLUMNS);
        assert!(!ds.is_empty());
        assert!(Dataset::default().is_empty());
    }
}
