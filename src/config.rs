//! Serializable search requests.
//!
//! A request bundles the criteria, the traversal strategy and the page of
//! results to return, so a search can be described in JSON:
//!
//! ```json
//! {"search_key": "travel", "strategy": "breadth_first", "find_first": true}
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::matching::Query;
use crate::node::Node;
use crate::queue::queue_search;
use crate::search::search;
use crate::types::{Matches, SearchResponse};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Recursive tracer with breadcrumbs.
    #[default]
    DepthFirst,
    /// Queue-based scanner with a true first-match exit.
    BreadthFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub search_key: Option<String>,
    /// `null` in JSON means no value criterion.
    pub search_value: Option<Node>,
    pub find_first: bool,
    pub strategy: Strategy,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn query(&self) -> Query<'_> {
        Query {
            key: self.search_key.as_deref(),
            value: self.search_value.as_ref(),
            find_first: self.find_first,
        }
    }

    /// Runs the request against `tree`.
    pub fn run<'a>(&self, tree: Option<&'a Node>) -> Matches<'a> {
        let query = self.query();
        match self.strategy {
            Strategy::DepthFirst => Matches::Traced(search(&query, tree)),
            Strategy::BreadthFirst => Matches::Scanned(queue_search(&query, tree)),
        }
    }

    /// Runs the request and serializes the requested page of results.
    pub fn respond(&self, tree: Option<&Node>) -> Result<SearchResponse> {
        let matches = self.run(tree);
        debug!(
            strategy = ?self.strategy,
            key = self.search_key.as_deref().unwrap_or("*"),
            total = matches.len(),
            "search request answered"
        );
        Ok(matches.to_response(self.offset, self.limit)?)
    }
}
