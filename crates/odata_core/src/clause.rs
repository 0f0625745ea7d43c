//! The clause model feeding the `$filter` compiler.

use crate::{Operator, QueryState, Value};
use serde::{Deserialize, Serialize};

/// Connective joining a clause to the clause before it.
///
/// The first clause in a sequence carries a boolean too, but the grammar
/// skips it when rendering.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Boolean {
    /// Conjunction (default).
    #[default]
    And,
    /// Disjunction.
    Or,
}

/// One predicate unit contributing to `$filter`.
///
/// Tagged union, one record shape per variant; the grammar dispatches on the
/// tag. `Nested` and `Sub` own their sub-query state outright, so a
/// sub-builder is never visible outside the clause that absorbed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// Simple comparison: `column op literal`.
    Basic {
        /// Property being compared.
        column: String,
        /// Comparison operator.
        operator: Operator,
        /// Right-hand literal.
        value: Value,
        /// Connective to the preceding clause.
        boolean: Boolean,
    },
    /// Grammar-declared function predicate: `fn(column,literal)`.
    Function {
        /// Property passed to the function.
        column: String,
        /// Function operator (`contains`, `startswith`, `endswith`).
        function: Operator,
        /// Function argument literal.
        value: Value,
        /// Connective to the preceding clause.
        boolean: Boolean,
    },
    /// Existence test: `column eq null`.
    Null {
        /// Property tested for null.
        column: String,
        /// Connective to the preceding clause.
        boolean: Boolean,
    },
    /// Negated existence test: `column ne null`.
    NotNull {
        /// Property tested for non-null.
        column: String,
        /// Connective to the preceding clause.
        boolean: Boolean,
    },
    /// Parenthesized sub-expression sharing the parent's entity set.
    Nested {
        /// State of the absorbed sub-builder.
        state: Box<QueryState>,
        /// Connective to the preceding clause.
        boolean: Boolean,
    },
    /// Predicate whose right-hand side is itself a compiled sub-query.
    Sub {
        /// Property being compared.
        column: String,
        /// Comparison operator.
        operator: Operator,
        /// State of the absorbed sub-query builder.
        state: Box<QueryState>,
        /// Connective to the preceding clause.
        boolean: Boolean,
    },
}

impl Clause {
    /// The connective joining this clause to its predecessor.
    pub const fn boolean(&self) -> Boolean {
        match self {
            Self::Basic { boolean, .. }
            | Self::Function { boolean, .. }
            | Self::Null { boolean, .. }
            | Self::NotNull { boolean, .. }
            | Self::Nested { boolean, .. }
            | Self::Sub { boolean, .. } => *boolean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_render_lowercase() {
        assert_eq!(Boolean::And.to_string(), "and");
        assert_eq!(Boolean::Or.to_string(), "or");
    }

    #[test]
    fn boolean_accessor_covers_all_variants() {
        let basic = Clause::Basic {
            column: "a".to_string(),
            operator: Operator::Eq,
            value: Value::from(1),
            boolean: Boolean::Or,
        };
        assert_eq!(basic.boolean(), Boolean::Or);

        let null = Clause::Null {
            column: "a".to_string(),
            boolean: Boolean::And,
        };
        assert_eq!(null.boolean(), Boolean::And);
    }
}
