//! Evaluation tests
//!
//! Covers dispatch, closures, quoting, and cross-module access for loaded
//! modules, driven through a session.

use garland_foundation::{ErrorKind, Value};
use garland_runtime::Session;

fn loaded(source: &str) -> Session {
    let mut session = Session::new();
    session.load_source(source).unwrap();
    session
}

// =============================================================================
// Clause Dispatch
// =============================================================================

#[test]
fn clauses_dispatch_on_literals_and_guards() {
    let mut session = loaded(
        "(module sign)\n\
         (defn classify [0] \"zero\")\n\
         (defn classify [n] :when (> n 0) \"pos\")\n\
         (defn classify [n] \"neg\")",
    );

    let classify = |session: &mut Session, n: i64| {
        session.call("sign", "classify", &[Value::Int(n)]).unwrap()
    };
    assert_eq!(classify(&mut session, 0), Value::from("zero"));
    assert_eq!(classify(&mut session, 5), Value::from("pos"));
    assert_eq!(classify(&mut session, -5), Value::from("neg"));
}

#[test]
fn keyword_and_string_literals_are_patterns() {
    let mut session = loaded(
        "(module paint)\n\
         (defn hue [:red] \"warm\")\n\
         (defn hue [\"blue\"] \"cool\")\n\
         (defn hue [_] \"other\")",
    );

    assert_eq!(
        session.call("paint", "hue", &[Value::keyword("red")]).unwrap(),
        Value::from("warm")
    );
    // Qualified calls work from scratch-module input too.
    assert_eq!(session.eval("(paint/hue \"blue\")").unwrap(), Value::from("cool"));
    assert_eq!(session.eval("(paint/hue 9)").unwrap(), Value::from("other"));
}

#[test]
fn vector_patterns_bind_nested_elements() {
    let mut session = loaded(
        "(module geo)\n\
         (defn flatten3 [[a [b c]] d] [a b c d])",
    );

    let nested = Value::from(vec![
        Value::Int(1),
        Value::from(vec![Value::Int(2), Value::Int(3)]),
    ]);
    let result = session
        .call("geo", "flatten3", &[nested, Value::Int(4)])
        .unwrap();
    assert_eq!(result, Value::from(vec![1i64, 2, 3, 4]));

    // A shape mismatch falls through every clause.
    let err = session
        .call("geo", "flatten3", &[Value::Int(1), Value::Int(4)])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoMatchingClause { .. }));
}

#[test]
fn mutual_recursion_resolves_forward_references() {
    let mut session = loaded(
        "(module par)\n\
         (defn even-n? [n] (if (= n 0) true (odd-n? (- n 1))))\n\
         (defn odd-n? [n] (if (= n 0) false (even-n? (- n 1))))",
    );

    assert_eq!(
        session.call("par", "even-n?", &[Value::Int(10)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        session.call("par", "odd-n?", &[Value::Int(7)]).unwrap(),
        Value::Bool(true)
    );
}

// =============================================================================
// Functions as Values
// =============================================================================

#[test]
fn returned_closures_stay_callable() {
    let mut session = loaded(
        "(module calc)\n\
         (defn adder [n] (fn [m] (+ m n)))\n\
         (defn add5 [] (adder 5))\n\
         (defn use-it [] ((add5) 37))",
    );

    assert_eq!(session.call("calc", "use-it", &[]).unwrap(), Value::Int(42));
}

#[test]
fn higher_order_functions_take_natives_and_closures() {
    let mut session = loaded(
        "(module hof)\n\
         (defn apply2 [f a b] (f a b))\n\
         (defn run-native [] (apply2 + 1 2))\n\
         (defn run-closure [] (apply2 (fn [a b] (* a b)) 3 4))",
    );

    assert_eq!(session.call("hof", "run-native", &[]).unwrap(), Value::Int(3));
    assert_eq!(session.call("hof", "run-closure", &[]).unwrap(), Value::Int(12));
}

// =============================================================================
// Quoting
// =============================================================================

#[test]
fn quoted_forms_are_plain_data() {
    let mut session = Session::new();

    // Lists and vectors quote to the same vector shape.
    assert_eq!(
        session.eval("(= '(1 [2]) [1 [2]])").unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        session.eval("(= (first '(+ 1)) '+)").unwrap(),
        Value::Bool(true)
    );
    // Nested quoting reifies as a [quote inner] pair.
    assert_eq!(session.eval("(count ''x)").unwrap(), Value::Int(2));
    assert_eq!(session.eval("(first ''x)").unwrap(), Value::symbol("quote"));
}

// =============================================================================
// Modules
// =============================================================================

#[test]
fn qualified_names_reach_defs_and_functions() {
    let mut session = loaded(
        "(module util)\n\
         (def rate 3)\n\
         (defn rated [n] (* n rate))",
    );
    session
        .load_source(
            "(module shop)\n\
             (defn total [n] (util/rated n))\n\
             (defn peek [] util/rate)",
        )
        .unwrap();

    assert_eq!(
        session.call("shop", "total", &[Value::Int(5)]).unwrap(),
        Value::Int(15)
    );
    assert_eq!(session.call("shop", "peek", &[]).unwrap(), Value::Int(3));
}

#[test]
fn stray_top_level_forms_run_at_load() {
    // A benign expression evaluates and is discarded.
    loaded(
        "(module tally)\n\
         (def base [1 2])\n\
         (count base)\n\
         (defn f [] base)",
    );

    // A failing one fails the whole load.
    let mut session = Session::new();
    let err = session.load_source("(module boom)\n(/ 1 0)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DivisionByZero));
}

#[test]
fn and_short_circuits_before_type_errors() {
    let mut session = loaded(
        "(module guard)\n\
         (defn clamp [n] (if (and (int? n) (> n 0)) n 0))",
    );

    assert_eq!(session.call("guard", "clamp", &[Value::Int(5)]).unwrap(), Value::Int(5));
    assert_eq!(session.call("guard", "clamp", &[Value::Int(-2)]).unwrap(), Value::Int(0));
    // The comparison never sees the string.
    assert_eq!(
        session.call("guard", "clamp", &[Value::from("x")]).unwrap(),
        Value::Int(0)
    );
}
