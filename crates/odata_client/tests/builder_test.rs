use odata_client::{
    BindingCategory, Builder, Grammar, ODataClient, ODataErrorKind, ODataV4Grammar, Operator,
    OrderDirection, QueryState, Value,
};

fn people() -> Builder {
    Builder::new().from("People")
}

/// Grammar declaring no predicate functions, so every operator is classified
/// as an infix comparison.
struct ComparisonOnlyGrammar;

impl Grammar for ComparisonOnlyGrammar {
    fn compile(&self, state: &QueryState) -> String {
        ODataV4Grammar::new().compile(state)
    }

    fn functions(&self) -> &[Operator] {
        &[]
    }

    fn operator_token(&self, operator: Operator) -> &'static str {
        ODataV4Grammar::new().operator_token(operator)
    }
}

#[test]
fn no_wheres_omits_filter_entirely() {
    let url = people().to_request().unwrap();
    assert_eq!(url, "People");
    assert!(!url.contains("$filter"));
}

#[test]
fn missing_entity_set_fails_compilation() {
    let err = Builder::new().where_eq("a", 1).to_request().unwrap_err();
    assert!(matches!(err.kind(), ODataErrorKind::MissingEntitySet(_)));

    let err = Builder::new().from("").to_request().unwrap_err();
    assert!(matches!(err.kind(), ODataErrorKind::MissingEntitySet(_)));
}

#[test]
fn operator_shortcut_equivalence() {
    let shortcut = people().where_eq("a", 1).to_request().unwrap();
    let explicit = people()
        .where_op("a", "=", 1)
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(shortcut, explicit);
    assert_eq!(shortcut, "People?$filter=a eq 1");
}

#[test]
fn boolean_joins_are_positional() {
    let url = people()
        .where_eq("a", 1)
        .or_where_eq("b", 2)
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=a eq 1 or b eq 2");

    let url = people()
        .where_eq("a", 1)
        .where_eq("b", 2)
        .or_where_eq("c", 3)
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=a eq 1 and b eq 2 or c eq 3");
}

#[test]
fn comparison_operators_compile_to_odata_tokens() {
    let url = people()
        .where_op("Age", ">", 21)
        .unwrap()
        .where_op("Age", "<=", 65)
        .unwrap()
        .where_op("Status", "<>", "retired")
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(
        url,
        "People?$filter=Age gt 21 and Age le 65 and Status ne 'retired'"
    );
}

#[test]
fn function_operators_compile_to_calls() {
    let url = people()
        .where_op("FirstName", "contains", "uss")
        .unwrap()
        .or_where_op("LastName", "startswith", "Wh")
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(
        url,
        "People?$filter=contains(FirstName,'uss') or startswith(LastName,'Wh')"
    );
}

#[test]
fn unknown_operator_token_is_rejected() {
    let err = people().where_op("a", "like", "x").unwrap_err();
    assert!(matches!(
        err.kind(),
        ODataErrorKind::IllegalOperatorCombination(_)
    ));
}

#[test]
fn nested_group_parenthesizes() {
    let url = people()
        .where_nested(|q| Ok(q.where_eq("a", 1).where_eq("b", 2)))
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=(a eq 1 and b eq 2)");
}

#[test]
fn empty_nested_group_is_elided() {
    let url = people()
        .where_eq("a", 1)
        .where_nested(Ok)
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=a eq 1");
    assert!(!url.contains('('));

    // An empty group with no sibling clauses leaves no $filter at all.
    let url = people().where_nested(Ok).unwrap().to_request().unwrap();
    assert_eq!(url, "People");
}

#[test]
fn nested_group_after_a_clause_joins_with_its_boolean() {
    let url = people()
        .where_eq("c", 3)
        .or_where_nested(|q| Ok(q.where_eq("a", 1).or_where_eq("b", 2)))
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=c eq 3 or (a eq 1 or b eq 2)");
}

#[test]
fn sub_query_clause_embeds_compiled_query() {
    let url = people()
        .where_sub("Budget", ">=", |q| Ok(q.from("Orders").select(["Total"])))
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=Budget ge (Orders?$select=Total)");
}

#[test]
fn sub_query_clause_joins_with_or() {
    let url = people()
        .where_eq("a", 1)
        .or_where_sub("Budget", ">=", |q| Ok(q.from("Orders").select(["Total"])))
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(
        url,
        "People?$filter=a eq 1 or Budget ge (Orders?$select=Total)"
    );
}

#[test]
fn sub_query_without_entity_set_is_rejected() {
    let err = people()
        .where_sub("Budget", ">=", |q| Ok(q.select(["Total"])))
        .unwrap_err();
    assert!(matches!(err.kind(), ODataErrorKind::MissingEntitySet(_)));

    let err = people()
        .or_where_sub("Budget", ">=", |q| Ok(q.from("")))
        .unwrap_err();
    assert!(matches!(err.kind(), ODataErrorKind::MissingEntitySet(_)));
}

#[test]
fn substituted_grammar_controls_function_classification() {
    let client = ODataClient::builder()
        .base_url("https://example.test/odata")
        .grammar(ComparisonOnlyGrammar)
        .build()
        .unwrap();

    let url = client
        .from("People")
        .where_op("FirstName", "contains", "s")
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=FirstName contains 's'");

    // The default grammar declares the string predicates as functions.
    let url = people()
        .where_op("FirstName", "contains", "s")
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=contains(FirstName,'s')");
}

#[test]
fn where_all_expands_to_one_nested_group() {
    let url = people()
        .where_all([("a", 1), ("b", 2)])
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=(a eq 1 and b eq 2)");

    let url = people()
        .where_eq("c", 3)
        .or_where_all([("a", 1), ("b", 2)])
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=c eq 3 or (a eq 1 or b eq 2)");
}

#[test]
fn select_replaces_and_add_select_appends() {
    let url = people().select(["a", "b"]).to_request().unwrap();
    assert_eq!(url, "People?$select=a,b");

    // Replace law: a second select discards the first list.
    let url = people()
        .select(["a", "b"])
        .select(["c"])
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$select=c");

    // Append law: add_select extends the existing list.
    let url = people()
        .select(["a", "b"])
        .add_select(["c"])
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$select=a,b,c");
}

#[test]
fn ordering_defaults_ascending_and_preserves_input_order() {
    let url = people().order_by("a").to_request().unwrap();
    assert_eq!(url, "People?$orderby=a asc");

    let url = people().order_by_desc("a").to_request().unwrap();
    assert_eq!(url, "People?$orderby=a desc");

    let url = people()
        .order([("a", OrderDirection::Desc), ("b", OrderDirection::Asc)])
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$orderby=a desc,b asc");
}

#[test]
fn raw_order_bypasses_structured_orders() {
    let url = people()
        .order_by("a")
        .order_by_raw("length(LastName) desc")
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$orderby=length(LastName) desc");
}

#[test]
fn paging_options_are_independent_of_call_order() {
    let a = people().skip(10).take(5).to_request().unwrap();
    let b = people().take(5).skip(10).to_request().unwrap();
    assert_eq!(a, b);
    assert_eq!(a, "People?$skip=10&$top=5");
}

#[test]
fn null_value_compiles_to_existence_test() {
    let url = people().where_eq("a", Value::Null).to_request().unwrap();
    assert_eq!(url, "People?$filter=a eq null");

    let url = people()
        .where_op("a", "<>", Value::Null)
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=a ne null");

    let url = people()
        .where_null("a")
        .or_where_not_null("b")
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=a eq null or b ne null");
}

#[test]
fn null_with_ordering_operator_is_rejected() {
    let err = people().where_op("a", "<", Value::Null).unwrap_err();
    assert!(matches!(
        err.kind(),
        ODataErrorKind::InvalidOperatorValue(_)
    ));

    let err = people().where_op("a", ">=", Value::Null).unwrap_err();
    assert!(matches!(
        err.kind(),
        ODataErrorKind::InvalidOperatorValue(_)
    ));
}

#[test]
fn equivalent_chains_compile_identically() {
    let direct = people()
        .where_eq("a", 1)
        .or_where_eq("b", 2)
        .to_request()
        .unwrap();
    let via_op = people()
        .where_op("a", "=", 1)
        .unwrap()
        .or_where_op("b", "=", 2)
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(direct, via_op);
}

#[test]
fn to_request_is_idempotent() {
    let builder = people().where_eq("a", 1).take(3);
    assert_eq!(builder.to_request().unwrap(), builder.to_request().unwrap());
}

#[test]
fn bindings_mirror_clause_order_and_skip_raw() {
    let builder = people()
        .where_eq("a", 1)
        .where_eq("b", "two")
        .where_op("c", ">", Value::raw("year(BirthDate)"))
        .unwrap()
        .where_eq("d", 4);
    assert_eq!(
        builder.bindings().get(BindingCategory::Where),
        &[Value::from(1), Value::from("two"), Value::from(4)]
    );
}

#[test]
fn nested_bindings_merge_into_parent_in_order() {
    let builder = people()
        .where_eq("a", 1)
        .where_nested(|q| Ok(q.where_eq("b", 2).where_eq("c", 3)))
        .unwrap()
        .where_eq("d", 4);
    assert_eq!(
        builder.bindings().get(BindingCategory::Where),
        &[
            Value::from(1),
            Value::from(2),
            Value::from(3),
            Value::from(4)
        ]
    );
}

#[test]
fn key_addressing_and_expansion() {
    let url = people()
        .where_key("russellwhyte")
        .expand(["Trips", "Friends"])
        .to_request()
        .unwrap();
    assert_eq!(url, "People('russellwhyte')?$expand=Trips,Friends");
}

#[test]
fn reference_addressing() {
    let url = people()
        .where_key("russellwhyte")
        .reference("Photo")
        .to_request()
        .unwrap();
    assert_eq!(url, "People('russellwhyte')/Photo/$ref");

    let url = people()
        .where_key("russellwhyte")
        .reference_id("Friends", "scottketchum")
        .to_request()
        .unwrap();
    assert_eq!(url, "People('russellwhyte')/Friends('scottketchum')/$ref");
}

#[test]
fn inline_count_flag() {
    let url = people().with_count().take(2).to_request().unwrap();
    assert_eq!(url, "People?$top=2&$count=true");
}

#[test]
fn conditional_construction() {
    let apply = true;
    let url = people()
        .when(apply, |q| Ok(q.where_eq("a", 1)))
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=a eq 1");

    let url = people()
        .when(!apply, |q| Ok(q.where_eq("a", 1)))
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People");

    let url = people()
        .when_else(
            !apply,
            |q| Ok(q.where_eq("a", 1)),
            |q| Ok(q.where_eq("b", 2)),
        )
        .unwrap()
        .to_request()
        .unwrap();
    assert_eq!(url, "People?$filter=b eq 2");
}

#[test]
fn new_query_does_not_share_state() {
    let parent = people().where_eq("a", 1);
    let fresh = parent.new_query();
    assert!(fresh.state().wheres.is_empty());
    assert!(fresh.state().entity_set.is_none());
    // Parent is untouched.
    assert_eq!(parent.state().wheres.len(), 1);
}

#[tokio::test]
async fn terminal_without_client_fails_with_missing_target() {
    let err = people().where_eq("a", 1).get().await.unwrap_err();
    assert!(matches!(
        err.kind(),
        ODataErrorKind::MissingRequestTarget(_)
    ));
}
