//! Chain application tests
//!
//! Tests how annotations, regions, and bare heads rewrap definitions,
//! asserted against the pretty-printed output.

use garland_expand::{DecoratorRegistry, ExpandOptions, ExpandedModule, expand_module};
use garland_language::{Ast, NameGenerator};
use garland_language::pretty::pretty_print_all;

const UTIL: &str = "(module util)\n\
                    (defdecorators [tag 1])\n\
                    (defdecorator tag [label body ctx] `(cons ~label ~body))";

/// Registry holding util's `tag` decorator, as a consumer module sees it.
fn tag_registry() -> DecoratorRegistry {
    let expanded = expand_module(UTIL, &DecoratorRegistry::new(), ExpandOptions::default())
        .expect("util expands");
    let mut registry = DecoratorRegistry::new();
    registry.absorb(expanded.defined).expect("absorb util");
    registry
}

fn expand(registry: &DecoratorRegistry, source: &str) -> ExpandedModule {
    expand_module(source, registry, ExpandOptions::default()).expect("module expands")
}

fn printed(registry: &DecoratorRegistry, source: &str) -> String {
    pretty_print_all(&expand(registry, source).forms)
}

// =============================================================================
// Wrapping
// =============================================================================

#[test]
fn single_annotation_wraps_the_body() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"x\"))\n\
         (defn greet [] [])",
    );
    assert!(out.contains("(defn greet [] (cons \"x\" []))"), "got:\n{out}");
}

#[test]
fn stacked_annotations_nest_earliest_outermost() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"x\"))\n\
         (decorate (tag \"y\"))\n\
         (defn chain [] [])",
    );
    // x was written first, so it wraps y's wrap of the body.
    assert!(
        out.contains("(defn chain [] (cons \"x\" (cons \"y\" [])))"),
        "got:\n{out}"
    );
}

#[test]
fn one_decorate_form_equals_two() {
    let registry = tag_registry();
    let stacked = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"x\"))\n\
         (decorate (tag \"y\"))\n\
         (defn chain [] [])",
    );
    let combined = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"x\") (tag \"y\"))\n\
         (defn chain [] [])",
    );
    assert_eq!(stacked, combined);
}

#[test]
fn multi_form_bodies_wrap_as_do() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"x\"))\n\
         (defn run [] (step-one) (step-two))",
    );
    assert!(
        out.contains("(defn run [] (cons \"x\" (do (step-one) (step-two))))"),
        "got:\n{out}"
    );
}

#[test]
fn guard_and_privacy_stay_in_place() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"x\"))\n\
         (defn- pay [n] :when (> n 0) n)",
    );
    assert!(
        out.contains("(defn- pay [n] :when (> n 0) (cons \"x\" n))"),
        "got:\n{out}"
    );
}

#[test]
fn annotations_skip_non_function_forms() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"x\"))\n\
         (def rate 2)\n\
         (defn f [] [])",
    );
    assert!(out.contains("(def rate 2)"));
    assert!(out.contains("(defn f [] (cons \"x\" []))"), "got:\n{out}");
}

#[test]
fn undecorated_definitions_emit_verbatim() {
    let registry = tag_registry();
    let expanded = expand(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (defn plain [n] (* n 2))",
    );
    assert!(expanded.decorations.is_empty());
    let out = pretty_print_all(&expanded.forms);
    assert!(out.contains("(defn plain [n] (* n 2))"));
    assert!(!out.contains("decorations"));
}

// =============================================================================
// Regions
// =============================================================================

#[test]
fn region_decorates_every_definition_inside() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate-all [(tag \"r\")]\n\
           (defn a [] [])\n\
           (defn b [] []))\n\
         (defn c [] [])",
    );
    assert!(out.contains("(defn a [] (cons \"r\" []))"), "got:\n{out}");
    assert!(out.contains("(defn b [] (cons \"r\" []))"), "got:\n{out}");
    // Definitions after the region close are untouched.
    assert!(out.contains("(defn c [] [])"), "got:\n{out}");
    // The region form itself leaves no trace.
    assert!(!out.contains("decorate-all"));
}

#[test]
fn region_chain_wraps_outside_clause_annotations() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate-all [(tag \"r\")]\n\
           (decorate (tag \"c\"))\n\
           (defn f [] []))",
    );
    assert!(
        out.contains("(defn f [] (cons \"r\" (cons \"c\" [])))"),
        "got:\n{out}"
    );
}

#[test]
fn nested_empty_region_suspends_decoration() {
    let registry = tag_registry();
    let expanded = expand(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate-all [(tag \"r\")]\n\
           (defn a [] [])\n\
           (decorate-all []\n\
             (defn inner [] []))\n\
           (defn b [] []))",
    );
    let out = pretty_print_all(&expanded.forms);
    assert!(out.contains("(defn a [] (cons \"r\" []))"), "got:\n{out}");
    assert!(out.contains("(defn inner [] [])"), "got:\n{out}");
    assert!(out.contains("(defn b [] (cons \"r\" []))"), "got:\n{out}");

    // Suspended definitions get no reflection record either.
    assert_eq!(expanded.decorations.len(), 2);
    assert!(expanded.decorations.lookup("inner", "[]").is_empty());
}

// =============================================================================
// Bare Heads
// =============================================================================

#[test]
fn bare_head_chain_applies_to_every_clause() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"h\"))\n\
         (defn size [n])\n\
         (defn size [0] [])\n\
         (defn size [n] [])",
    );
    assert!(out.contains("(defn size [0] (cons \"h\" []))"), "got:\n{out}");
    assert!(out.contains("(defn size [n] (cons \"h\" []))"), "got:\n{out}");
    // The bodyless head itself is consumed, leaving exactly two clauses.
    assert_eq!(out.matches("(defn size").count(), 2);
}

#[test]
fn head_chain_only_covers_its_arity() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"h\"))\n\
         (defn size [n])\n\
         (defn size [a b] [])",
    );
    // Different arity, different signature: the two-parameter clause is
    // not covered by the head.
    assert!(out.contains("(defn size [a b] [])"), "got:\n{out}");
}

// =============================================================================
// Output Shape
// =============================================================================

#[test]
fn declaration_forms_pass_through_in_order() {
    let expanded = expand(
        &DecoratorRegistry::new(),
        "(module util)\n\
         (defdecorators [tag 1])\n\
         (defdecorator tag [label body ctx] `(cons ~label ~body))\n\
         (decorate (tag \"x\"))\n\
         (defn probe [] [])",
    );
    let heads: Vec<_> = expanded
        .forms
        .iter()
        .filter_map(Ast::head_symbol)
        .collect();
    assert_eq!(
        heads,
        vec!["module", "defdecorators", "defdecorator", "defn", "defn"]
    );
}

#[test]
fn query_fn_is_appended_last() {
    let registry = tag_registry();
    let out = printed(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag \"x\"))\n\
         (defn greet [] [])",
    );
    let last_line = out.lines().last().unwrap();
    assert_eq!(
        last_line,
        r#"(defn decorations [] '[[["greet" "[]"] [["util" "tag" ["\"x\""]]]]])"#
    );
}

#[test]
fn template_fresh_names_are_generated_and_consistent() {
    let hygiene = "(module hygiene)\n\
                   (defdecorators [memo 0])\n\
                   (defdecorator memo [body ctx] `(let [v# ~body] v#))";
    let expanded_util = expand_module(hygiene, &DecoratorRegistry::new(), ExpandOptions::default())
        .expect("hygiene expands");
    let mut registry = DecoratorRegistry::new();
    registry.absorb(expanded_util.defined).expect("absorb hygiene");

    let expanded = expand(
        &registry,
        "(module shop)\n\
         (use-decorators hygiene)\n\
         (decorate (memo))\n\
         (defn f [] 1)",
    );

    // forms: module, use-decorators, defn, decorations.
    let defn = expanded.forms[2].as_list().unwrap();
    let let_form = defn[3].as_list().unwrap();
    assert_eq!(let_form[0].as_symbol(), Some("let"));

    let bound = let_form[1].as_vector().unwrap()[0].as_symbol().unwrap();
    let used = let_form[2].as_symbol().unwrap();
    assert_eq!(bound, used);
    assert!(NameGenerator::is_generated(bound));
}
