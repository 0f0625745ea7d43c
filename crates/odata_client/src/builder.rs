//! Fluent query builder.

use crate::{ODataClient, ODataRequest, ODataResponse, Verb};
use odata_core::{
    BindingCategory, Bindings, Boolean, Clause, Grammar, ODataV4Grammar, Operator, Order,
    OrderDirection, QueryState, Reference, Value,
};
use odata_error::{
    EmptyCountResponse, InvalidOperatorValue, MissingEntitySet, MissingRequestTarget, ODataResult,
    ResponseParseError,
};
use std::sync::Arc;
use tracing::instrument;

/// Accumulates one query through chained calls and compiles it through the
/// grammar.
///
/// Mutators take and return the builder by value, so a query reads as one
/// chain; fallible mutators return `ODataResult<Self>` and abort the chain
/// at the offending call. A builder is consumed by exactly one terminal
/// operation. Sub-builders created for nested and sub-query clauses are
/// detached (no client) and fully absorbed by their owning clause.
pub struct Builder {
    client: Option<ODataClient>,
    grammar: Arc<dyn Grammar>,
    state: QueryState,
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Create a detached builder with the default OData v4 grammar.
    ///
    /// Detached builders compile (`to_request`) but cannot execute; terminal
    /// operations fail with `MissingRequestTarget`.
    pub fn new() -> Self {
        Self::detached(Arc::new(ODataV4Grammar::new()), QueryState::new())
    }

    pub(crate) fn attached(client: ODataClient) -> Self {
        let grammar = client.grammar();
        Self {
            client: Some(client),
            grammar,
            state: QueryState::new(),
        }
    }

    fn detached(grammar: Arc<dyn Grammar>, state: QueryState) -> Self {
        Self {
            client: None,
            grammar,
            state,
        }
    }

    /// Fresh builder sharing this one's client and grammar, with empty
    /// state. Used to build independent queries without cross-contaminating
    /// the parent.
    pub fn new_query(&self) -> Self {
        Self {
            client: self.client.clone(),
            grammar: Arc::clone(&self.grammar),
            state: QueryState::new(),
        }
    }

    /// Read-only view of the accumulated state.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Read-only view of the recorded bindings.
    pub fn bindings(&self) -> &Bindings {
        &self.state.bindings
    }

    // ---- structural mutators ----

    /// Set the target entity set.
    pub fn from(mut self, entity_set: impl Into<String>) -> Self {
        self.state.entity_set = Some(entity_set.into());
        self
    }

    /// Address a single entity by primary key.
    pub fn where_key(mut self, key: impl Into<Value>) -> Self {
        self.state.entity_key = Some(key.into());
        self
    }

    /// Replace the `$select` list.
    pub fn select<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Append to the `$select` list.
    pub fn add_select<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state
            .properties
            .extend(properties.into_iter().map(Into::into));
        self
    }

    /// Set the `$expand` list of navigation properties.
    pub fn expand<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.expands = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `$skip` offset. Bounds are the service's concern.
    pub fn skip(mut self, n: u64) -> Self {
        self.state.skip = Some(n);
        self
    }

    /// Set the `$top` page size.
    pub fn take(mut self, n: u64) -> Self {
        self.state.take = Some(n);
        self
    }

    /// Request an inline total count (`$count=true`).
    pub fn with_count(mut self) -> Self {
        self.state.total_count = true;
        self
    }

    /// Address a navigation reference (`/$ref`) instead of the entity.
    pub fn reference(mut self, property: impl Into<String>) -> Self {
        self.state.reference = Some(Reference {
            property: property.into(),
            id: None,
        });
        self
    }

    /// Address one member of a collection-valued navigation reference.
    pub fn reference_id(mut self, property: impl Into<String>, id: impl Into<Value>) -> Self {
        self.state.reference = Some(Reference {
            property: property.into(),
            id: Some(id.into()),
        });
        self
    }

    // ---- ordering ----

    /// Append an ascending `$orderby` entry.
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.state.orders.push(Order::asc(column));
        self
    }

    /// Append a descending `$orderby` entry.
    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.state.orders.push(Order::desc(column));
        self
    }

    /// Append `$orderby` entries from column/direction pairs, preserving
    /// input order.
    pub fn order<I, S>(mut self, orders: I) -> Self
    where
        I: IntoIterator<Item = (S, OrderDirection)>,
        S: Into<String>,
    {
        self.state
            .orders
            .extend(orders.into_iter().map(|(c, d)| Order::new(c, d)));
        self
    }

    /// Replace structured ordering with a raw `$orderby` fragment.
    ///
    /// Column-level escape hatch; never combined with structured orders.
    pub fn order_by_raw(mut self, raw: impl Into<String>) -> Self {
        self.state.order_raw = Some(raw.into());
        self
    }

    // ---- filters ----

    /// Add an equality clause (the operator-shortcut form of the full
    /// `where_op`). A null value becomes an existence test.
    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.apply_where(column.into(), Operator::Eq, value.into(), Boolean::And)
    }

    /// Add an equality clause joined with `or`.
    pub fn or_where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.apply_where(column.into(), Operator::Eq, value.into(), Boolean::Or)
    }

    /// Add a comparison or function clause with an explicit operator token.
    ///
    /// Accepts the comparison spellings (`=`, `!=`, `<>`, `<`, `<=`, `>`,
    /// `>=`) and the grammar's function names. Fails with
    /// `IllegalOperatorCombination` for unknown tokens and with
    /// `InvalidOperatorValue` when a null value meets a non-equality
    /// operator.
    pub fn where_op(
        self,
        column: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> ODataResult<Self> {
        self.checked_where(column.into(), operator, value.into(), Boolean::And)
    }

    /// `where_op` joined with `or`.
    pub fn or_where_op(
        self,
        column: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> ODataResult<Self> {
        self.checked_where(column.into(), operator, value.into(), Boolean::Or)
    }

    /// Add a null existence test.
    pub fn where_null(mut self, column: impl Into<String>) -> Self {
        self.state.wheres.push(Clause::Null {
            column: column.into(),
            boolean: Boolean::And,
        });
        self
    }

    /// Add a null existence test joined with `or`.
    pub fn or_where_null(mut self, column: impl Into<String>) -> Self {
        self.state.wheres.push(Clause::Null {
            column: column.into(),
            boolean: Boolean::Or,
        });
        self
    }

    /// Add a not-null existence test.
    pub fn where_not_null(mut self, column: impl Into<String>) -> Self {
        self.state.wheres.push(Clause::NotNull {
            column: column.into(),
            boolean: Boolean::And,
        });
        self
    }

    /// Add a not-null existence test joined with `or`.
    pub fn or_where_not_null(mut self, column: impl Into<String>) -> Self {
        self.state.wheres.push(Clause::NotNull {
            column: column.into(),
            boolean: Boolean::Or,
        });
        self
    }

    /// Add a parenthesized group built on an isolated sub-builder sharing
    /// this query's entity set. If the callback adds no clauses the group is
    /// elided entirely.
    pub fn where_nested<F>(self, nested: F) -> ODataResult<Self>
    where
        F: FnOnce(Builder) -> ODataResult<Builder>,
    {
        self.nested_group(nested, Boolean::And)
    }

    /// `where_nested` joined with `or`.
    pub fn or_where_nested<F>(self, nested: F) -> ODataResult<Self>
    where
        F: FnOnce(Builder) -> ODataResult<Builder>,
    {
        self.nested_group(nested, Boolean::Or)
    }

    /// Add a clause whose right-hand side is a full sub-query. The callback
    /// receives a fresh detached builder and must set its own entity set;
    /// a sub-query left without one fails with `MissingEntitySet`.
    pub fn where_sub<F>(
        self,
        column: impl Into<String>,
        operator: &str,
        sub: F,
    ) -> ODataResult<Self>
    where
        F: FnOnce(Builder) -> ODataResult<Builder>,
    {
        self.sub_query(column.into(), operator, sub, Boolean::And)
    }

    /// `where_sub` joined with `or`.
    pub fn or_where_sub<F>(
        self,
        column: impl Into<String>,
        operator: &str,
        sub: F,
    ) -> ODataResult<Self>
    where
        F: FnOnce(Builder) -> ODataResult<Builder>,
    {
        self.sub_query(column.into(), operator, sub, Boolean::Or)
    }

    /// Expand column/value pairs into one nested group of equality clauses.
    pub fn where_all<I, S, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        self.group_of_pairs(pairs, Boolean::And)
    }

    /// Expand column/value pairs into one nested group of equality clauses
    /// joined with `or`, attached with `or`.
    pub fn or_where_all<I, S, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        self.group_of_pairs(pairs, Boolean::Or)
    }

    /// Apply `then` when `condition` holds; otherwise leave the builder
    /// unchanged. Keeps conditional construction inside the chain.
    pub fn when<F>(self, condition: bool, then: F) -> ODataResult<Self>
    where
        F: FnOnce(Builder) -> ODataResult<Builder>,
    {
        if condition { then(self) } else { Ok(self) }
    }

    /// Apply `then` when `condition` holds, `otherwise` when it does not.
    pub fn when_else<F, G>(self, condition: bool, then: F, otherwise: G) -> ODataResult<Self>
    where
        F: FnOnce(Builder) -> ODataResult<Builder>,
        G: FnOnce(Builder) -> ODataResult<Builder>,
    {
        if condition { then(self) } else { otherwise(self) }
    }

    // ---- compilation ----

    /// Compile the accumulated state into the request URL.
    ///
    /// Pure and repeatable: no side effects, identical output for unchanged
    /// state. Fails with `MissingEntitySet` when no entity set was supplied.
    pub fn to_request(&self) -> ODataResult<String> {
        if self
            .state
            .entity_set
            .as_deref()
            .is_none_or(|set| set.is_empty())
        {
            return Err(MissingEntitySet::new().into());
        }
        Ok(self.grammar.compile(&self.state))
    }

    // ---- terminal operations ----

    /// Execute the query and return the entity list.
    pub async fn get(self) -> ODataResult<Vec<serde_json::Value>> {
        let response = self.execute(Verb::Get, None).await?;
        response.entities()
    }

    /// Execute with a page size of one and return the sole entity, if any.
    pub async fn first(self) -> ODataResult<Option<serde_json::Value>> {
        Ok(self.take(1).get().await?.into_iter().next())
    }

    /// Extract one property from the first entity.
    pub async fn value(self, property: &str) -> ODataResult<Option<serde_json::Value>> {
        Ok(self
            .first()
            .await?
            .and_then(|entity| entity.get(property).cloned()))
    }

    /// Execute a count-only request (`/$count` path shape) and parse the
    /// numeric body. An empty body fails with `EmptyCountResponse`.
    pub async fn count(mut self) -> ODataResult<u64> {
        self.state.count = true;
        let response = self.execute(Verb::Get, None).await?;
        let digits: String = response
            .body_str()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return Err(EmptyCountResponse::new().into());
        }
        digits
            .parse::<u64>()
            .map_err(|e| ResponseParseError::new(format!("invalid count body: {e}")).into())
    }

    /// Create an entity in the target entity set.
    pub async fn post(self, body: serde_json::Value) -> ODataResult<ODataResponse> {
        self.execute(Verb::Post, Some(body)).await
    }

    /// Update the addressed entity.
    pub async fn patch(self, body: serde_json::Value) -> ODataResult<ODataResponse> {
        self.execute(Verb::Patch, Some(body)).await
    }

    /// Delete the addressed entity. A 204 response is success.
    pub async fn delete(self) -> ODataResult<()> {
        self.execute(Verb::Delete, None).await?;
        Ok(())
    }

    /// Create an entity and return its identifier.
    pub async fn insert_get_id(
        self,
        body: serde_json::Value,
    ) -> ODataResult<Option<serde_json::Value>> {
        self.post(body).await?.created_id()
    }

    // ---- internals ----

    #[instrument(skip(self, body), fields(entity_set = ?self.state.entity_set, verb = %verb))]
    async fn execute(
        self,
        verb: Verb,
        body: Option<serde_json::Value>,
    ) -> ODataResult<ODataResponse> {
        let client = self
            .client
            .clone()
            .ok_or_else(MissingRequestTarget::new)?;
        let url = self.to_request()?;
        let request = ODataRequest::new(verb, url, body);
        client.send(&request).await
    }

    fn checked_where(
        self,
        column: String,
        operator: &str,
        value: Value,
        boolean: Boolean,
    ) -> ODataResult<Self> {
        let op: Operator = operator.parse()?;
        if value.is_null() && !op.accepts_null() {
            return Err(InvalidOperatorValue::new(operator).into());
        }
        Ok(self.apply_where(column, op, value, boolean))
    }

    /// Push one validated clause. Null values with Eq/Ne rewrite to
    /// existence tests; bound literals mirror into the where bindings in
    /// clause order, raw expressions excepted.
    fn apply_where(mut self, column: String, operator: Operator, value: Value, boolean: Boolean) -> Self {
        if value.is_null() {
            let clause = if operator == Operator::Ne {
                Clause::NotNull { column, boolean }
            } else {
                Clause::Null { column, boolean }
            };
            self.state.wheres.push(clause);
            return self;
        }

        if !value.is_raw() {
            self.state
                .bindings
                .add(BindingCategory::Where, value.clone());
        }

        let clause = if self.grammar.functions().contains(&operator) {
            Clause::Function {
                column,
                function: operator,
                value,
                boolean,
            }
        } else {
            Clause::Basic {
                column,
                operator,
                value,
                boolean,
            }
        };
        self.state.wheres.push(clause);
        self
    }

    /// Build the right-hand sub-query on a fresh detached builder and push
    /// the comparison clause. The sub-query must target its own entity set;
    /// compilation never emits a partial fragment.
    fn sub_query<F>(
        mut self,
        column: String,
        operator: &str,
        sub: F,
        boolean: Boolean,
    ) -> ODataResult<Self>
    where
        F: FnOnce(Builder) -> ODataResult<Builder>,
    {
        let op: Operator = operator.parse()?;
        let built = sub(Self::detached(Arc::clone(&self.grammar), QueryState::new()))?;
        if built
            .state
            .entity_set
            .as_deref()
            .is_none_or(|set| set.is_empty())
        {
            return Err(MissingEntitySet::new().into());
        }
        self.state.wheres.push(Clause::Sub {
            column,
            operator: op,
            state: Box::new(built.state),
            boolean,
        });
        Ok(self)
    }

    fn nested_group<F>(mut self, nested: F, boolean: Boolean) -> ODataResult<Self>
    where
        F: FnOnce(Builder) -> ODataResult<Builder>,
    {
        let sub = Self::detached(
            Arc::clone(&self.grammar),
            QueryState::for_entity_set(self.state.entity_set.clone()),
        );
        let built = nested(sub)?;
        self = self.absorb_nested(built.state, boolean);
        Ok(self)
    }

    fn group_of_pairs<I, S, V>(mut self, pairs: I, boolean: Boolean) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        let mut sub = Self::detached(
            Arc::clone(&self.grammar),
            QueryState::for_entity_set(self.state.entity_set.clone()),
        );
        for (column, value) in pairs {
            sub = sub.apply_where(column.into(), Operator::Eq, value.into(), boolean);
        }
        self = self.absorb_nested(sub.state, boolean);
        self
    }

    /// Fold a sub-builder's state in as one nested clause, merging its where
    /// bindings into the parent so positional order is preserved. An empty
    /// group is elided: no clause, no parentheses.
    fn absorb_nested(mut self, state: QueryState, boolean: Boolean) -> Self {
        if state.wheres.is_empty() {
            return self;
        }
        let merged = state.bindings.get(BindingCategory::Where).to_vec();
        self.state.bindings.extend(BindingCategory::Where, merged);
        self.state.wheres.push(Clause::Nested {
            state: Box::new(state),
            boolean,
        });
        self
    }
}
