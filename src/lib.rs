//! Key/value search over configuration trees.
//!
//! A configuration tree is a JSON-like document made of typed containers:
//! a root (`config_type` + `value`), configurations (`classname`, `name`,
//! `description` plus arbitrary child fields) and parameters wrapping a
//! single `value`. Two searchers answer "where does this key occur" and
//! "where does this key hold this value":
//!
//! - [`search`] walks depth-first and reports a breadcrumb trace for every
//!   match;
//! - [`queue_search`] walks breadth-first and can stop at the first match.
//!
//! ```
//! use conftree_search::{parse_tree, search, Query};
//!
//! let tree = parse_tree(r#"{
//!     "classname": "Configuration", "name": "root", "a": 1,
//!     "b": {"classname": "Configuration", "name": "child", "a": 2}
//! }"#).unwrap();
//!
//! let found = search(&Query::for_key("a"), Some(&tree));
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[1].trace, " -> root  -> child ");
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod matching;
pub mod node;
pub mod queue;
pub mod search;
pub mod state;
pub mod tree;
pub mod types;

pub use config::{SearchRequest, Strategy};
pub use error::{Error, Result};
pub use file::{load_tree, parse_tree};
pub use matching::{Query, StrictEquals, StructuralEquals, ValuePolicy};
pub use node::{Configuration, Fields, Node, Parameter, RootObject, Scalar};
pub use queue::{queue_search, queue_search_with, ScanMatch};
pub use search::{search, search_with, TraceMatch};
pub use state::TreeStore;
pub use types::{Matches, SearchResponse};
