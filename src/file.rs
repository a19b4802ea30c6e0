use std::{fs::File, io::BufReader, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::node::Node;
use crate::tree::{child_count, value_type};

/// Reads a JSON document from disk and classifies it into a [`Node`] tree.
pub fn load_tree(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = file.metadata().ok();
    let total_bytes = metadata.map(|m| m.len()).unwrap_or(0);

    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let tree = Node::from(value);
    debug!(
        path = %path.display(),
        total_bytes,
        kind = value_type(&tree),
        children = child_count(&tree),
        "loaded configuration tree"
    );
    Ok(tree)
}

/// Parses a JSON document held in memory.
pub fn parse_tree(text: &str) -> Result<Node> {
    let value: Value = serde_json::from_str(text)?;
    Ok(Node::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_rejects_invalid_json() {
        assert!(matches!(parse_tree("{\"a\": "), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_tree_missing_file() {
        let err = load_tree("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.to_string().starts_with("Failed to read /definitely/not/here.json"));
    }
}
