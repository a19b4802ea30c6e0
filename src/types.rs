use serde::Serialize;
use serde_json::Value;

use crate::queue::ScanMatch;
use crate::search::TraceMatch;

/// Results of one search, in the shape produced by the searcher that ran.
#[derive(Debug, Clone)]
pub enum Matches<'a> {
    Traced(Vec<TraceMatch<'a>>),
    Scanned(Vec<ScanMatch<'a>>),
}

impl Matches<'_> {
    pub fn len(&self) -> usize {
        match self {
            Matches::Traced(found) => found.len(),
            Matches::Scanned(found) => found.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializes one page of records, detaching them from the tree.
    pub fn to_response(&self, offset: usize, limit: Option<usize>) -> serde_json::Result<SearchResponse> {
        let total_count = self.len();
        let take = limit.unwrap_or(usize::MAX);
        let results = match self {
            Matches::Traced(found) => page(found, offset, take)?,
            Matches::Scanned(found) => page(found, offset, take)?,
        };
        let has_more = limit.is_some_and(|limit| offset.saturating_add(limit) < total_count);
        Ok(SearchResponse {
            results,
            total_count,
            has_more,
        })
    }
}

fn page<T: Serialize>(found: &[T], offset: usize, take: usize) -> serde_json::Result<Vec<Value>> {
    found
        .iter()
        .skip(offset)
        .take(take)
        .map(serde_json::to_value)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Value>,
    pub total_count: usize,
    pub has_more: bool,
}
