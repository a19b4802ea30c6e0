//! Configuration tree data model.
//!
//! A tree is made of typed containers (roots, configurations, parameters),
//! plain maps, arrays and scalar leaves. The kind of every container is
//! decided once, when the node is built, so searchers can match on the tag
//! instead of probing for marker fields.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::tree::preview;

pub const CONFIG_TYPE: &str = "config_type";
pub const CLASSNAME: &str = "classname";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const PARENT_NAME: &str = "parent_name";
pub const VALUE: &str = "value";

const PARAMETER_CLASSNAME: &str = "Parameter";
const PARAMETER_KEYS: [&str; 5] = [CLASSNAME, NAME, DESCRIPTION, PARENT_NAME, VALUE];

/// Ordered field map of a container node.
pub type Fields = IndexMap<String, Node>;

/// Leaf values.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) if is_integral(*n) => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

// Largest magnitude where every integer is exactly representable in an f64.
fn is_integral(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() <= 9_007_199_254_740_991.0
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

/// Top-level wrapper: `{config_type, value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RootObject {
    fields: Fields,
}

impl RootObject {
    pub fn new(config_type: impl Into<String>, value: impl Into<Node>) -> Self {
        let mut fields = Fields::new();
        fields.insert(CONFIG_TYPE.to_owned(), Node::from(config_type.into()));
        fields.insert(VALUE.to_owned(), value.into());
        Self { fields }
    }

    /// The root's type label. Non-string types are rendered as text.
    pub fn config_type(&self) -> Cow<'_, str> {
        label_field(&self.fields, CONFIG_TYPE).unwrap_or_default()
    }

    pub fn value(&self) -> Option<&Node> {
        self.fields.get(VALUE)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

/// A named container with an open-ended set of child fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    fields: Fields,
}

impl Configuration {
    pub fn new(
        classname: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            fields: header(classname.into(), name.into(), description.into()),
        }
    }

    /// Builder form of [`Configuration::insert`].
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a field, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn classname(&self) -> &str {
        text_field(&self.fields, CLASSNAME).unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        text_field(&self.fields, NAME)
    }

    pub fn description(&self) -> Option<&str> {
        text_field(&self.fields, DESCRIPTION)
    }

    /// Caller-defined fields, i.e. everything except the header.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.fields
            .iter()
            .filter(|(key, _)| ![CLASSNAME, NAME, DESCRIPTION].contains(&key.as_str()))
            .map(|(key, node)| (key.as_str(), node))
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

/// A named, described wrapper around a single `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    fields: Fields,
}

impl Parameter {
    pub fn new(
        classname: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<Node>,
    ) -> Self {
        let mut fields = header(classname.into(), name.into(), description.into());
        fields.insert(VALUE.to_owned(), value.into());
        Self { fields }
    }

    /// Attaches the label searchers report as `parent_name` below this parameter.
    pub fn with_parent_name(mut self, parent_name: impl Into<String>) -> Self {
        self.fields
            .insert(PARENT_NAME.to_owned(), Node::from(parent_name.into()));
        self
    }

    pub fn classname(&self) -> &str {
        text_field(&self.fields, CLASSNAME).unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        text_field(&self.fields, NAME)
    }

    pub fn description(&self) -> Option<&str> {
        text_field(&self.fields, DESCRIPTION)
    }

    pub fn parent_name(&self) -> Option<&str> {
        text_field(&self.fields, PARENT_NAME)
    }

    pub fn value(&self) -> Option<&Node> {
        self.fields.get(VALUE)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

fn header(classname: String, name: String, description: String) -> Fields {
    let mut fields = Fields::new();
    fields.insert(CLASSNAME.to_owned(), Node::from(classname));
    fields.insert(NAME.to_owned(), Node::from(name));
    fields.insert(DESCRIPTION.to_owned(), Node::from(description));
    fields
}

fn text_field<'a>(fields: &'a Fields, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Node::as_str)
}

/// Text form of a field: strings as-is, other values through `Display`.
/// Missing and `null` fields have no label.
fn label_field<'a>(fields: &'a Fields, key: &str) -> Option<Cow<'a, str>> {
    match fields.get(key)? {
        Node::Scalar(Scalar::Null) => None,
        Node::Scalar(Scalar::String(text)) => Some(Cow::Borrowed(text)),
        other => Some(Cow::Owned(other.to_string())),
    }
}

fn looks_like_parameter(classname: &str, fields: &Fields) -> bool {
    fields.contains_key(VALUE)
        && (classname == PARAMETER_CLASSNAME
            || fields.keys().all(|key| PARAMETER_KEYS.contains(&key.as_str())))
}

/// Any element of a searchable tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Root(RootObject),
    Configuration(Configuration),
    Parameter(Parameter),
    /// Plain object without `config_type` or `classname`.
    Map(Fields),
    Array(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// Everything except scalar leaves.
    pub fn is_composite(&self) -> bool {
        !matches!(self, Node::Scalar(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(scalar) => scalar.as_str(),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Field map of object-like nodes.
    pub fn field_map(&self) -> Option<&Fields> {
        match self {
            Node::Root(RootObject { fields })
            | Node::Configuration(Configuration { fields })
            | Node::Parameter(Parameter { fields })
            | Node::Map(fields) => Some(fields),
            Node::Array(_) | Node::Scalar(_) => None,
        }
    }

    /// Looks up a field by key; array elements are addressed by decimal index.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => self.field_map()?.get(key),
        }
    }

    /// Own fields in order. Arrays yield their indices as keys.
    pub fn fields(&self) -> FieldIter<'_> {
        match self {
            Node::Array(items) => FieldIter::Array(items.iter().enumerate()),
            Node::Scalar(_) => FieldIter::Leaf,
            _ => match self.field_map() {
                Some(fields) => FieldIter::Map(fields.iter()),
                None => FieldIter::Leaf,
            },
        }
    }

    /// Text form of an object field, see [`RootObject::config_type`].
    pub fn label(&self, key: &str) -> Option<Cow<'_, str>> {
        label_field(self.field_map()?, key)
    }

    /// Whether this is an object carrying the given key, whatever its value.
    pub fn has_field(&self, key: &str) -> bool {
        self.field_map().is_some_and(|fields| fields.contains_key(key))
    }
}

/// Iterator over `(key, child)` pairs of a node.
#[derive(Debug, Clone)]
pub enum FieldIter<'a> {
    Map(indexmap::map::Iter<'a, String, Node>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, Node>>),
    Leaf,
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = (Cow<'a, str>, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            FieldIter::Map(iter) => iter.next().map(|(key, node)| (Cow::Borrowed(key.as_str()), node)),
            FieldIter::Array(iter) => iter.next().map(|(idx, node)| (Cow::Owned(idx.to_string()), node)),
            FieldIter::Leaf => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            _ => f.write_str(&preview(self, None)),
        }
    }
}

impl From<Fields> for Node {
    fn from(fields: Fields) -> Self {
        // Any non-null `config_type` marks a root; `classname` must be a string.
        if label_field(&fields, CONFIG_TYPE).is_some() {
            return Node::Root(RootObject { fields });
        }
        let parameter = text_field(&fields, CLASSNAME)
            .map(|classname| looks_like_parameter(classname, &fields));
        match parameter {
            Some(true) => Node::Parameter(Parameter { fields }),
            Some(false) => Node::Configuration(Configuration { fields }),
            None => Node::Map(fields),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::null(),
            Value::Bool(b) => Node::from(b),
            Value::Number(n) => Node::Scalar(Scalar::Number(n.as_f64().unwrap_or(f64::NAN))),
            Value::String(s) => Node::from(s),
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| (key, Node::from(value)))
                .collect::<Fields>()
                .into(),
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Scalar(Scalar::Number(n))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Scalar(Scalar::Number(n as f64))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::String(s.to_owned()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::String(s))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

impl From<RootObject> for Node {
    fn from(root: RootObject) -> Self {
        Node::Root(root)
    }
}

impl From<Configuration> for Node {
    fn from(config: Configuration) -> Self {
        Node::Configuration(config)
    }
}

impl From<Parameter> for Node {
    fn from(param: Parameter) -> Self {
        Node::Parameter(param)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::Array(items) => serializer.collect_seq(items),
            _ => serializer.collect_map(self.field_map().into_iter().flatten()),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}
