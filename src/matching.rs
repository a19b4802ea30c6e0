//! Search criteria and value comparison policies.
//!
//! The depth-first tracer compares composites structurally while the
//! breadth-first scanner compares them by identity. Both rules are exposed
//! as [`ValuePolicy`] implementations so either searcher can be run with
//! the other rule through its `*_with` entry point.

use crate::node::{Node, Scalar};

/// What to look for. An absent key or value accepts anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<'q> {
    pub key: Option<&'q str>,
    pub value: Option<&'q Node>,
    pub find_first: bool,
}

impl<'q> Query<'q> {
    /// Matches every field.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn for_key(key: &'q str) -> Self {
        Self::any().with_key(key)
    }

    pub fn for_value(value: &'q Node) -> Self {
        Self::any().with_value(value)
    }

    pub fn with_key(mut self, key: &'q str) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_value(mut self, value: &'q Node) -> Self {
        self.value = Some(value);
        self
    }

    pub fn first(mut self) -> Self {
        self.find_first = true;
        self
    }

    pub fn matches_key(&self, key: &str) -> bool {
        self.key.map_or(true, |wanted| wanted == key)
    }

    pub fn matches_value<P: ValuePolicy + ?Sized>(&self, candidate: &Node, policy: &P) -> bool {
        self.value
            .map_or(true, |wanted| policy.value_matches(candidate, wanted))
    }
}

/// Decides whether a field value satisfies the wanted value.
pub trait ValuePolicy {
    fn value_matches(&self, candidate: &Node, wanted: &Node) -> bool;
}

/// Deep equality between composites, membership for arrays, strict otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralEquals;

impl ValuePolicy for StructuralEquals {
    fn value_matches(&self, candidate: &Node, wanted: &Node) -> bool {
        if candidate.is_composite() && wanted.is_composite() {
            deep_equals(candidate, wanted)
        } else if let Node::Array(items) = candidate {
            items.iter().any(|item| same_value_zero(item, wanted))
        } else {
            strict_equals(candidate, wanted)
        }
    }
}

/// Identity for composites, value equality for scalars, strict membership for arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictEquals;

impl ValuePolicy for StrictEquals {
    fn value_matches(&self, candidate: &Node, wanted: &Node) -> bool {
        if strict_equals(candidate, wanted) {
            return true;
        }
        match candidate {
            Node::Array(items) => items.iter().any(|item| strict_equals(item, wanted)),
            _ => false,
        }
    }
}

/// `===`: scalars by value (`NaN` never equal), composites by reference.
pub fn strict_equals(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Scalar(x), Node::Scalar(y)) => x == y,
        _ => std::ptr::eq(a, b),
    }
}

/// Like [`strict_equals`] but `NaN` equals itself.
pub fn same_value_zero(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Scalar(x), Node::Scalar(y)) => scalar_same_value_zero(x, y),
        _ => std::ptr::eq(a, b),
    }
}

/// Structural equality. Object fields compare regardless of order and of
/// the container kind; arrays compare element-wise.
pub fn deep_equals(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Scalar(x), Node::Scalar(y)) => scalar_same_value_zero(x, y),
        (Node::Array(xs), Node::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equals(x, y))
        }
        _ => match (a.field_map(), b.field_map()) {
            (Some(xs), Some(ys)) => {
                xs.len() == ys.len()
                    && xs
                        .iter()
                        .all(|(key, x)| ys.get(key).is_some_and(|y| deep_equals(x, y)))
            }
            _ => false,
        },
    }
}

fn scalar_same_value_zero(x: &Scalar, y: &Scalar) -> bool {
    match (x, y) {
        (Scalar::Number(m), Scalar::Number(n)) => m == n || (m.is_nan() && n.is_nan()),
        _ => x == y,
    }
}
