//! Breadth-first scanner.
//!
//! Visits containers level by level from a FIFO queue. No breadcrumb is
//! kept; a match record instead carries the whole container it was found
//! in. `find_first` stops the scan at the first match.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::matching::{Query, StrictEquals, ValuePolicy};
use crate::node::{Node, VALUE};
use crate::tree::{preview, value_type};

pub const SEARCH_KEY: &str = "search_key";

/// A match together with the container holding it.
///
/// Serializes as the container's own fields with `search_key` and `value`
/// overriding any fields of the same name.
#[derive(Debug, Clone)]
pub struct ScanMatch<'a> {
    pub container: &'a Node,
    pub search_key: Cow<'a, str>,
    pub value: &'a Node,
}

impl<'a> ScanMatch<'a> {
    /// Container fields carried over unchanged into the record.
    pub fn own_fields(&self) -> impl Iterator<Item = (Cow<'a, str>, &'a Node)> + 'a {
        self.container
            .fields()
            .filter(|(key, _)| !matches!(&**key, SEARCH_KEY | VALUE))
    }
}

impl Serialize for ScanMatch<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let mut key_written = false;
        let mut value_written = false;
        for (key, node) in self.container.fields() {
            match &*key {
                SEARCH_KEY => {
                    map.serialize_entry(SEARCH_KEY, &self.search_key)?;
                    key_written = true;
                }
                VALUE => {
                    map.serialize_entry(VALUE, self.value)?;
                    value_written = true;
                }
                _ => map.serialize_entry(&key, node)?,
            }
        }
        if !key_written {
            map.serialize_entry(SEARCH_KEY, &self.search_key)?;
        }
        if !value_written {
            map.serialize_entry(VALUE, self.value)?;
        }
        map.end()
    }
}

impl fmt::Display for ScanMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} in {} {}",
            self.search_key,
            preview(self.value, Some(80)),
            value_type(self.container),
            preview(self.container, Some(40))
        )
    }
}

/// Breadth-first search comparing composite values by identity.
///
/// An absent tree yields no matches.
pub fn queue_search<'a>(query: &Query<'_>, tree: Option<&'a Node>) -> Vec<ScanMatch<'a>> {
    queue_search_with(query, tree, &StrictEquals)
}

/// Breadth-first search with a caller-chosen value comparison.
pub fn queue_search_with<'a, P: ValuePolicy + ?Sized>(
    query: &Query<'_>,
    tree: Option<&'a Node>,
    policy: &P,
) -> Vec<ScanMatch<'a>> {
    let mut found = Vec::new();
    let mut queue: VecDeque<&'a Node> = tree.into_iter().collect();
    let mut visited = 0usize;

    while let Some(current) = queue.pop_front() {
        visited += 1;
        for (key, value) in current.fields() {
            if query.matches_key(&key) && query.matches_value(value, policy) {
                found.push(ScanMatch {
                    container: current,
                    search_key: key,
                    value,
                });
                if query.find_first {
                    debug!(visited, "breadth-first search stopped at first match");
                    return found;
                }
            }
            if value.is_composite() {
                queue.push_back(value);
            }
        }
    }

    debug!(matches = found.len(), visited, "breadth-first search finished");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_overrides_value_in_place() {
        let tree = Node::from(json!({
            "classname": "Parameter", "name": "feed", "description": "", "value": 12
        }));
        let found = queue_search(&Query::for_key("name"), Some(&tree));
        assert_eq!(found.len(), 1);

        let record = serde_json::to_string(&found[0]).unwrap();
        assert_eq!(
            record,
            r#"{"classname":"Parameter","name":"feed","description":"","value":"feed","search_key":"name"}"#
        );
        let own: Vec<_> = found[0].own_fields().map(|(key, _)| key.into_owned()).collect();
        assert_eq!(own, ["classname", "name", "description"]);
    }

    #[test]
    fn test_display() {
        let tree = Node::from(json!({"a": {"b": true}}));
        let found = queue_search(&Query::for_key("b"), Some(&tree));
        assert_eq!(found[0].to_string(), "b = true in object {…} 1 keys");
    }
}
