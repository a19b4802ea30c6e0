use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::SearchRequest;
use crate::error::{Error, Result};
use crate::file::load_tree;
use crate::node::Node;
use crate::types::SearchResponse;

/// Holds the currently loaded tree and answers search requests against it.
///
/// Each search works on its own snapshot of the tree, so loading a new
/// document never disturbs searches that are already running.
pub struct TreeStore {
    doc: RwLock<Option<Arc<Node>>>,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self {
            doc: RwLock::new(None),
        }
    }
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, tree: Node) {
        *self.doc.write() = Some(Arc::new(tree));
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let tree = load_tree(path.as_ref())?;
        self.load(tree);
        info!(path = %path.as_ref().display(), "document loaded");
        Ok(())
    }

    pub fn clear(&self) {
        *self.doc.write() = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.doc.read().is_some()
    }

    /// Snapshot of the loaded tree.
    pub fn document(&self) -> Result<Arc<Node>> {
        self.doc.read().clone().ok_or(Error::NoDocument)
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        // Snapshot taken so the read guard is released before traversal
        let root = self.document()?;
        request.respond(Some(root.as_ref()))
    }

    /// Answers independent requests in parallel; responses keep request order.
    pub fn search_many(&self, requests: &[SearchRequest]) -> Result<Vec<SearchResponse>> {
        let root = self.document()?;
        let responses = requests
            .par_iter()
            .map(|request| request.respond(Some(root.as_ref())))
            .collect::<Result<Vec<_>>>()?;
        debug!(requests = requests.len(), "batch search finished");
        Ok(responses)
    }
}
