//! Ordered bookkeeping of literal values embedded in clauses.

use crate::Value;
use odata_error::InvalidBindingCategory;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed set of clause categories a binding may belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BindingCategory {
    /// Values bound while building the `$select` list.
    Select,
    /// Values bound while building `$filter` clauses.
    Where,
    /// Values bound while building the `$orderby` list.
    Order,
}

impl FromStr for BindingCategory {
    type Err = InvalidBindingCategory;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "select" => Ok(Self::Select),
            "where" => Ok(Self::Where),
            "order" => Ok(Self::Order),
            _ => Err(InvalidBindingCategory::new(name)),
        }
    }
}

/// Per-category ordered collection of bound literal values.
///
/// Bindings mirror the literals embedded in compiled clauses, in clause
/// order. They are not substituted into the output (the grammar inlines
/// literals directly); they exist for positional audit visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    select: Vec<Value>,
    r#where: Vec<Value>,
    order: Vec<Value>,
}

impl Bindings {
    /// Create an empty binding store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value to a category.
    pub fn add(&mut self, category: BindingCategory, value: Value) {
        self.slot_mut(category).push(value);
    }

    /// Merge a sequence of values into a category, preserving order.
    pub fn extend(&mut self, category: BindingCategory, values: impl IntoIterator<Item = Value>) {
        self.slot_mut(category).extend(values);
    }

    /// Values bound in one category, in insertion order.
    pub fn get(&self, category: BindingCategory) -> &[Value] {
        match category {
            BindingCategory::Select => &self.select,
            BindingCategory::Where => &self.r#where,
            BindingCategory::Order => &self.order,
        }
    }

    /// All bound values flattened in query order: select, where, order.
    pub fn flatten(&self) -> Vec<Value> {
        self.select
            .iter()
            .chain(self.r#where.iter())
            .chain(self.order.iter())
            .cloned()
            .collect()
    }

    fn slot_mut(&mut self, category: BindingCategory) -> &mut Vec<Value> {
        match category {
            BindingCategory::Select => &mut self.select,
            BindingCategory::Where => &mut self.r#where,
            BindingCategory::Order => &mut self.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parsing_matches_fixed_set() {
        assert_eq!(
            "where".parse::<BindingCategory>().unwrap(),
            BindingCategory::Where
        );
        assert_eq!(
            "select".parse::<BindingCategory>().unwrap(),
            BindingCategory::Select
        );
        assert_eq!(
            "order".parse::<BindingCategory>().unwrap(),
            BindingCategory::Order
        );
        assert!("having".parse::<BindingCategory>().is_err());
    }

    #[test]
    fn flatten_preserves_query_order() {
        let mut bindings = Bindings::new();
        bindings.add(BindingCategory::Where, Value::from(1));
        bindings.add(BindingCategory::Order, Value::from("c"));
        bindings.add(BindingCategory::Select, Value::from("a"));
        bindings.add(BindingCategory::Where, Value::from(2));

        assert_eq!(
            bindings.flatten(),
            vec![
                Value::from("a"),
                Value::from(1),
                Value::from(2),
                Value::from("c"),
            ]
        );
    }

    #[test]
    fn extend_merges_in_order() {
        let mut bindings = Bindings::new();
        bindings.extend(
            BindingCategory::Where,
            vec![Value::from(1), Value::from(2)],
        );
        assert_eq!(
            bindings.get(BindingCategory::Where),
            &[Value::from(1), Value::from(2)]
        );
    }
}
