use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Keyword filter: case-insensitive substring match over the text fields
// ---------------------------------------------------------------------------

/// Lower-case a raw query once so it can be reused for every record.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// Whether `record` passes an already-normalized query.
///
/// * An empty query matches everything.
/// * Otherwise the record matches when its title, meta description or AI
///   summary contains the query, ignoring case. The URL is not searched.
/// * Absent fields never match.
pub fn matches(record: &Record, normalized_query: &str) -> bool {
    if normalized_query.is_empty() {
        return true;
    }
    record
        .searchable_fields()
        .any(|field| field.to_lowercase().contains(normalized_query))
}

/// Return indices of records that match `query`, in dataset order.
///
/// Always scans the whole dataset; no state is carried between calls.
pub fn filtered_indices(dataset: &Dataset, query: &str) -> Vec<usize> {
    let needle = normalize_query(query);
    dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Borrow the records that match `query`, in dataset order.
pub fn filter<'a>(dataset: &'a Dataset, query: &str) -> Vec<&'a Record> {
    filtered_indices(dataset, query)
        .into_iter()
        .map(|i| &dataset.records[i])
        .collect()
}

/// Copy the matching records into a new dataset with the same header.
pub fn filter_to_dataset(dataset: &Dataset, query: &str) -> Dataset {
    Dataset {
        records: filter(dataset, query).into_iter().cloned().collect(),
        column_names: dataset.column_names.clone(),
    }
}
