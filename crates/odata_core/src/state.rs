//! The query state record consumed by the grammar.

use crate::{Bindings, Clause, Order, Value};
use serde::{Deserialize, Serialize};

/// Navigation-reference addressing for `$ref` requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Navigation property being addressed.
    pub property: String,
    /// Key of the related entity, for collection-valued navigation.
    pub id: Option<Value>,
}

/// Accumulated state of one query, owned by a single builder.
///
/// Pure data: the builder mutates it through fluent methods and the grammar
/// reads it during compilation. Sub-queries (`Nested`/`Sub` clauses) each own
/// an independent `QueryState`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    /// Target entity set; required before compilation.
    pub entity_set: Option<String>,
    /// Primary-key filter rendered as a parenthesized key segment.
    pub entity_key: Option<Value>,
    /// `$select` list; empty means all properties.
    pub properties: Vec<String>,
    /// `$expand` list of navigation properties.
    pub expands: Vec<String>,
    /// Predicate clauses feeding `$filter`.
    pub wheres: Vec<Clause>,
    /// Structured `$orderby` entries.
    pub orders: Vec<Order>,
    /// Raw `$orderby` fragment; wins over structured orders when set.
    pub order_raw: Option<String>,
    /// `$skip` offset.
    pub skip: Option<u64>,
    /// `$top` page size.
    pub take: Option<u64>,
    /// Count-only request shape (`/$count` path suffix).
    pub count: bool,
    /// Count-inclusive request flag (`$count=true`).
    pub total_count: bool,
    /// Navigation-reference addressing, when the query targets `$ref`.
    pub reference: Option<Reference>,
    /// Positional record of literals embedded in clauses.
    pub bindings: Bindings,
}

impl QueryState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty state bound to the given entity set. Used when a
    /// nested sub-query inherits the parent's entity set.
    pub fn for_entity_set(entity_set: Option<String>) -> Self {
        Self {
            entity_set,
            ..Self::default()
        }
    }
}
