use crate::node::{Node, Scalar};

pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…", &s[..cut]),
    }
}

/// Kind label used in previews and log lines.
pub fn value_type(node: &Node) -> &'static str {
    match node {
        Node::Root(_) => "root",
        Node::Configuration(_) => "configuration",
        Node::Parameter(_) => "parameter",
        Node::Map(_) => "object",
        Node::Array(_) => "array",
        Node::Scalar(Scalar::String(_)) => "string",
        Node::Scalar(Scalar::Number(_)) => "number",
        Node::Scalar(Scalar::Bool(_)) => "boolean",
        Node::Scalar(Scalar::Null) => "null",
    }
}

pub fn child_count(node: &Node) -> usize {
    match node {
        Node::Array(items) => items.len(),
        _ => node.field_map().map_or(0, |fields| fields.len()),
    }
}

pub fn preview(node: &Node, truncate_limit: Option<usize>) -> String {
    let count = child_count(node);
    match node {
        Node::Root(root) => format!("<{}> {{…}} {} keys", root.config_type(), count),
        Node::Configuration(config) => {
            format!("{} '{}' {{…}} {} keys", config.classname(), config.name().unwrap_or_default(), count)
        }
        Node::Parameter(param) => {
            format!("{} '{}' {{…}} {} keys", param.classname(), param.name().unwrap_or_default(), count)
        }
        Node::Map(_) if count == 0 => format!("{{}} {} keys", count),
        Node::Map(_) => format!("{{…}} {} keys", count),
        Node::Array(_) if count == 0 => format!("[] {} items", count),
        Node::Array(_) => format!("[…] {} items", count),
        Node::Scalar(Scalar::String(s)) => match truncate_limit {
            Some(limit) => truncate(s, limit),
            None => s.to_string(),
        },
        Node::Scalar(scalar) => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("ééééé", 2), "éé…");
    }

    #[test]
    fn test_preview_labels() {
        let config = Node::from(json!({"classname": "Axis", "name": "X", "travel": 100}));
        assert_eq!(value_type(&config), "configuration");
        assert_eq!(preview(&config, None), "Axis 'X' {…} 3 keys");

        let root = Node::from(json!({"config_type": "Machine", "value": {}}));
        assert_eq!(preview(&root, None), "<Machine> {…} 2 keys");

        assert_eq!(preview(&Node::from(json!({})), None), "{} 0 keys");
        assert_eq!(preview(&Node::from(json!([1, 2])), None), "[…] 2 items");
        assert_eq!(preview(&Node::from(json!(2)), None), "2");
        assert_eq!(preview(&Node::from(json!(2.5)), None), "2.5");
        assert_eq!(preview(&Node::from("a long string"), Some(6)), "a long…");
        assert_eq!(value_type(&Node::null()), "null");
    }
}
