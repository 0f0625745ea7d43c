//! Compilation of query state into an OData URL query string.

use crate::{Clause, Operator, QueryState};

/// A protocol dialect that compiles query state into a URL fragment.
///
/// The builder depends on this trait rather than a concrete grammar, so a
/// different OData version can be substituted without touching builder
/// logic. Implementations must be deterministic: identical state compiles to
/// an identical string.
pub trait Grammar: Send + Sync {
    /// Compile the full request path and query options for a read.
    ///
    /// Assumes builder-validated input: the entity set is present and every
    /// operator was classified at construction time.
    fn compile(&self, state: &QueryState) -> String;

    /// The grammar-declared predicate functions, used by the builder to
    /// split function clauses from basic comparisons.
    fn functions(&self) -> &[Operator];

    /// Wire token for an operator in this dialect.
    fn operator_token(&self, operator: Operator) -> &'static str;
}

/// OData v4 URL-conventions grammar.
///
/// Option assembly order is fixed (`$select`, `$filter`, `$expand`,
/// `$orderby`, `$skip`, `$top`, `$count`) so output is reproducible for
/// identical state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ODataV4Grammar;

const V4_FUNCTIONS: [Operator; 3] = [
    Operator::Contains,
    Operator::StartsWith,
    Operator::EndsWith,
];

impl ODataV4Grammar {
    /// Create the v4 grammar.
    pub fn new() -> Self {
        Self
    }

    /// Resource path: entity set, key segment, `$ref` addressing, and the
    /// `/$count` suffix for count-only requests.
    fn compile_path(&self, state: &QueryState) -> String {
        let mut path = state.entity_set.clone().unwrap_or_default();

        if let Some(key) = &state.entity_key {
            path.push('(');
            path.push_str(&key.to_literal());
            path.push(')');
        }

        if let Some(reference) = &state.reference {
            path.push('/');
            path.push_str(&reference.property);
            if let Some(id) = &reference.id {
                path.push('(');
                path.push_str(&id.to_literal());
                path.push(')');
            }
            path.push_str("/$ref");
        }

        if state.count {
            path.push_str("/$count");
        }

        path
    }

    /// Join the clause sequence left to right, skipping the boolean keyword
    /// for the first fragment.
    fn compile_wheres(&self, clauses: &[Clause]) -> String {
        let mut filter = String::new();
        for clause in clauses {
            if !filter.is_empty() {
                filter.push(' ');
                filter.push_str(&clause.boolean().to_string());
                filter.push(' ');
            }
            filter.push_str(&self.compile_clause(clause));
        }
        filter
    }

    fn compile_clause(&self, clause: &Clause) -> String {
        match clause {
            Clause::Basic {
                column,
                operator,
                value,
                ..
            } => format!(
                "{} {} {}",
                column,
                self.operator_token(*operator),
                value.to_literal()
            ),
            Clause::Function {
                column,
                function,
                value,
                ..
            } => format!(
                "{}({},{})",
                self.operator_token(*function),
                column,
                value.to_literal()
            ),
            Clause::Null { column, .. } => format!("{column} eq null"),
            Clause::NotNull { column, .. } => format!("{column} ne null"),
            // The builder never emits an empty nested clause, so the
            // parentheses always hold at least one fragment.
            Clause::Nested { state, .. } => format!("({})", self.compile_wheres(&state.wheres)),
            Clause::Sub {
                column,
                operator,
                state,
                ..
            } => format!(
                "{} {} ({})",
                column,
                self.operator_token(*operator),
                self.compile(state)
            ),
        }
    }

    fn compile_orders(&self, state: &QueryState) -> Option<String> {
        if let Some(raw) = &state.order_raw {
            return Some(raw.clone());
        }
        if state.orders.is_empty() {
            return None;
        }
        let rendered = state
            .orders
            .iter()
            .map(|order| format!("{} {}", order.column, order.direction))
            .collect::<Vec<_>>()
            .join(",");
        Some(rendered)
    }
}

impl Grammar for ODataV4Grammar {
    fn compile(&self, state: &QueryState) -> String {
        let mut uri = self.compile_path(state);
        let mut options = Vec::new();

        if !state.properties.is_empty() {
            options.push(format!("$select={}", state.properties.join(",")));
        }
        if !state.wheres.is_empty() {
            options.push(format!("$filter={}", self.compile_wheres(&state.wheres)));
        }
        if !state.expands.is_empty() {
            options.push(format!("$expand={}", state.expands.join(",")));
        }
        if let Some(orderby) = self.compile_orders(state) {
            options.push(format!("$orderby={orderby}"));
        }
        if let Some(skip) = state.skip {
            options.push(format!("$skip={skip}"));
        }
        if let Some(take) = state.take {
            options.push(format!("$top={take}"));
        }
        if state.total_count {
            options.push("$count=true".to_string());
        }

        if !options.is_empty() {
            uri.push('?');
            uri.push_str(&options.join("&"));
        }

        uri
    }

    fn functions(&self) -> &[Operator] {
        &V4_FUNCTIONS
    }

    fn operator_token(&self, operator: Operator) -> &'static str {
        match operator {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Contains => "contains",
            Operator::StartsWith => "startswith",
            Operator::EndsWith => "endswith",
        }
    }
}
