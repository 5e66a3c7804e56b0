//! Printer integration tests
//!
//! Tests that printed source is canonical, stable, and re-parseable.

use garland_language::parse;
use garland_language::pretty::{pretty_print, pretty_print_all};

fn canonical(source: &str) -> String {
    pretty_print_all(&parse(source).unwrap())
}

// =============================================================================
// Canonical Form
// =============================================================================

#[test]
fn printing_normalizes_whitespace() {
    assert_eq!(
        canonical("(defn  f [x]\n    (+ x  1))"),
        "(defn f [x] (+ x 1))"
    );
}

#[test]
fn printing_is_a_fixed_point() {
    let source = "(module shop)\n\
                  (use-decorators util)\n\
                  (defdecorators [tag 1])\n\
                  (defdecorator tag [label body ctx] `(cons ~label ~body))\n\
                  (decorate (tag \"x\"))\n\
                  (defn- pay [id n] :when (> n 0) (charge id n))";
    let once = canonical(source);
    let twice = canonical(&once);
    assert_eq!(once, twice);
}

#[test]
fn forms_join_with_single_newlines() {
    assert_eq!(canonical("(a)\n\n\n(b)\n(c)"), "(a)\n(b)\n(c)");
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn whole_floats_keep_a_decimal_point() {
    assert_eq!(canonical("2.0"), "2.0");
    assert_eq!(canonical("2.5"), "2.5");
}

#[test]
fn strings_escape_specials() {
    let ast = garland_language::Ast::string("a\"b\\c\nd");
    assert_eq!(pretty_print(&ast), "\"a\\\"b\\\\c\\nd\"");
}

#[test]
fn escaped_strings_reparse_to_the_same_value() {
    let ast = garland_language::Ast::string("tab\there");
    let reparsed = garland_language::parse_one(&pretty_print(&ast)).unwrap();
    assert_eq!(reparsed.as_string(), Some("tab\there"));
}

#[test]
fn keywords_and_constants_print_bare() {
    assert_eq!(canonical(":when"), ":when");
    assert_eq!(canonical("nil"), "nil");
    assert_eq!(canonical("true false"), "true\nfalse");
}

#[test]
fn symbols_with_punctuation_survive() {
    assert_eq!(canonical("-> empty? v#"), "->\nempty?\nv#");
    assert_eq!(canonical("util/tag"), "util/tag");
}

// =============================================================================
// Collections and Reader Macros
// =============================================================================

#[test]
fn maps_print_in_entry_order() {
    assert_eq!(canonical("{:b 2 :a 1}"), "{:b 2 :a 1}");
}

#[test]
fn reader_macros_print_compactly() {
    assert_eq!(canonical("'x"), "'x");
    assert_eq!(canonical("`(a ~b ~@c)"), "`(a ~b ~@c)");
    assert_eq!(canonical("''x"), "''x");
}

#[test]
fn nested_collections_roundtrip() {
    let source = "[[1 2] {:k [3]} (f {:a 1})]";
    assert_eq!(canonical(source), source);
}
