//! Depth-first tracer.
//!
//! Walks the tree recursively and records, for every matching field, the
//! container it was found in, the label of the nearest root or labelled
//! parameter above it, and a breadcrumb of the named containers passed on
//! the way down (`" -> machine  -> Y 2"`).
//!
//! With `find_first` set, once anything has been found the tracer stops
//! descending into further fields, but the fields of containers it is
//! already inside are still compared. A single call can therefore return
//! several sibling matches.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::matching::{Query, StructuralEquals, ValuePolicy};
use crate::node::{Node, CLASSNAME, CONFIG_TYPE, NAME, PARENT_NAME};
use crate::tree::preview;

/// One located field, borrowed from the searched tree.
#[derive(Debug, Clone, Serialize)]
pub struct TraceMatch<'a> {
    pub parent_name: Option<Cow<'a, str>>,
    pub parent: &'a Node,
    pub search_key: Cow<'a, str>,
    pub value: &'a Node,
    pub trace: String,
}

impl fmt::Display for TraceMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {} = {}", self.trace.trim_end(), self.search_key, preview(self.value, Some(80)))?;
        if let Some(parent_name) = &self.parent_name {
            write!(f, " [{parent_name}]")?;
        }
        Ok(())
    }
}

/// Depth-first search comparing composite values structurally.
///
/// An absent tree yields no matches.
pub fn search<'a>(query: &Query<'_>, tree: Option<&'a Node>) -> Vec<TraceMatch<'a>> {
    search_with(query, tree, &StructuralEquals)
}

/// Depth-first search with a caller-chosen value comparison.
pub fn search_with<'a, P: ValuePolicy + ?Sized>(
    query: &Query<'_>,
    tree: Option<&'a Node>,
    policy: &P,
) -> Vec<TraceMatch<'a>> {
    let mut tracer = Tracer {
        query: *query,
        policy,
        found: Vec::new(),
    };
    if let Some(node) = tree {
        tracer.visit(node, None, None, "");
    }
    debug!(
        matches = tracer.found.len(),
        find_first = query.find_first,
        "depth-first search finished"
    );
    tracer.found
}

struct Tracer<'q, 'a, P: ?Sized> {
    query: Query<'q>,
    policy: &'q P,
    found: Vec<TraceMatch<'a>>,
}

impl<'a, P: ValuePolicy + ?Sized> Tracer<'_, 'a, P> {
    fn visit(&mut self, node: &'a Node, parent_name: Option<Cow<'a, str>>, idx: Option<usize>, trace: &str) {
        let named = node.has_field(CLASSNAME);
        let mut parent_name = parent_name;
        if named {
            // only a label that is actually present replaces the inherited one
            if let Some(label) = node.label(PARENT_NAME) {
                parent_name = Some(label);
            }
        }
        if let Some(config_type) = node.label(CONFIG_TYPE) {
            parent_name = Some(config_type);
        }
        let trace = match segment_name(node) {
            Some(name) => match idx {
                Some(idx) => format!("{trace} -> {name} {}", idx + 1),
                None => format!("{trace} -> {name} "),
            },
            None => trace.to_owned(),
        };

        for (key, value) in node.fields() {
            if self.query.matches_key(&key) && self.query.matches_value(value, self.policy) {
                self.found.push(TraceMatch {
                    parent_name: parent_name.clone(),
                    parent: node,
                    search_key: key,
                    value,
                    trace: trace.clone(),
                });
                continue;
            }

            // Evaluated once per field: the elements of an array are all
            // visited even if an earlier element produces a match.
            if self.query.find_first && !self.found.is_empty() {
                continue;
            }
            match value {
                Node::Array(items) => {
                    for (idx, item) in items.iter().enumerate() {
                        if item.is_composite() {
                            self.visit(item, parent_name.clone(), Some(idx), &trace);
                        }
                    }
                }
                Node::Scalar(_) => {}
                nested => self.visit(nested, parent_name.clone(), None, &trace),
            }
        }
    }
}

/// Breadcrumb label of any object carrying a `classname`, roots included.
fn segment_name(node: &Node) -> Option<Cow<'_, str>> {
    if !node.has_field(CLASSNAME) {
        return None;
    }
    // a missing or null name leaves an empty segment rather than a placeholder
    Some(node.label(NAME).unwrap_or_default())
}
