//! Reflection query tests
//!
//! The generated `decorations` function seen from running code: plain
//! vector data, queryable with the ordinary collection natives.

use garland_foundation::Value;
use garland_runtime::Session;

fn chain_session() -> Session {
    let mut session = Session::new();
    session
        .load_source(
            "(module util)\n\
             (defdecorators [tag 1])\n\
             (defdecorator tag [label body ctx] `(cons ~label ~body))",
        )
        .unwrap();
    session
        .load_source(
            "(module shop)\n\
             (use-decorators util)\n\
             (decorate (tag \"x\"))\n\
             (decorate (tag \"y\"))\n\
             (defn chain [] [])",
        )
        .unwrap();
    session
}

// =============================================================================
// Query Function
// =============================================================================

#[test]
fn query_returns_the_table_as_plain_data() {
    let mut session = chain_session();

    assert_eq!(
        session.eval("(count (shop/decorations))").unwrap(),
        Value::Int(1)
    );
    // Record key: [name params-text].
    assert_eq!(
        session.eval("(first (first (shop/decorations)))").unwrap(),
        Value::from(vec!["chain", "[]"])
    );
    // Two entries, in annotation order; argument text keeps its quotes.
    assert_eq!(
        session
            .eval("(count (nth (first (shop/decorations)) 1))")
            .unwrap(),
        Value::Int(2)
    );
    assert_eq!(
        session
            .eval("(first (nth (first (shop/decorations)) 1))")
            .unwrap(),
        Value::from(vec![
            Value::from("util"),
            Value::from("tag"),
            Value::from(vec!["\"x\""]),
        ])
    );
}

#[test]
fn defining_module_gets_no_query_without_annotations() {
    let session = chain_session();
    // util declares decorators but decorates nothing of its own.
    assert!(!session.has_function("util", "decorations", 0));
    assert!(session.has_function("shop", "decorations", 0));
}

#[test]
fn session_table_agrees_with_the_query_function() {
    let mut session = chain_session();

    {
        let table = session.decorations("shop").unwrap();
        let entries = table.lookup("chain", "[]")[0];
        assert_eq!(entries[0].module, "util");
        assert_eq!(entries[0].decorator, "tag");
        assert_eq!(entries[0].args, vec!["\"x\""]);
        assert_eq!(entries[1].args, vec!["\"y\""]);
    }

    // The in-language view shows the same decorator name.
    assert_eq!(
        session
            .eval("(nth (first (nth (first (shop/decorations)) 1)) 1)")
            .unwrap(),
        Value::from("tag")
    );
}
