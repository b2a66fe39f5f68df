//! Filter → sort → limit selection over a collection snapshot.
//!
//! # Algorithm
//!
//! 1. Drop records whose title is absent or empty.
//! 2. Keep records whose `title + author + description` contains the query
//!    as a contiguous, case-sensitive substring. The empty query keeps all.
//! 3. Stable sort by `last_modified` descending; undated records go last.
//! 4. Truncate to `max_results`.

use std::cmp::Reverse;

use crate::models::DocumentRecord;

/// Whether a record may appear in any result set.
pub fn is_eligible(record: &DocumentRecord) -> bool {
    record.title.as_deref().is_some_and(|t| !t.is_empty())
}

/// The text a query is matched against: title, author and description
/// concatenated without a separator.
pub fn searchable_text(record: &DocumentRecord) -> String {
    let mut text = String::with_capacity(
        record.title_str().len() + record.author.len() + record.description.len(),
    );
    text.push_str(record.title_str());
    text.push_str(&record.author);
    text.push_str(&record.description);
    text
}

/// Select the records to display for `query`, most recent first.
///
/// Pure: the result depends only on the arguments, and records with equal
/// `last_modified` keep their relative snapshot order.
pub fn select<'a>(
    snapshot: &'a [DocumentRecord],
    query: &str,
    max_results: usize,
) -> Vec<&'a DocumentRecord> {
    let mut matched: Vec<&DocumentRecord> = snapshot
        .iter()
        .filter(|r| is_eligible(r))
        .filter(|r| searchable_text(r).contains(query))
        .collect();

    // `slice::sort_by_key` is stable; `None < Some(_)` puts undated records last.
    matched.sort_by_key(|r| Reverse(r.last_modified));
    matched.truncate(max_results);
    matched
}
