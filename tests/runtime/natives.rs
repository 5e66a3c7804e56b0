//! Native function tests
//!
//! Exercises the built-in functions through evaluated source rather than
//! direct calls, so argument evaluation and lookup are covered too.

use garland_foundation::{Error, ErrorKind, Value};
use garland_runtime::Session;

fn eval(source: &str) -> Value {
    Session::new().eval(source).unwrap()
}

fn eval_err(source: &str) -> Error {
    Session::new().eval(source).unwrap_err()
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn addition_has_identity_and_promotes() {
    assert_eq!(eval("(+)"), Value::Int(0));
    assert_eq!(eval("(+ 5)"), Value::Int(5));
    assert_eq!(eval("(+ 1 2 3)"), Value::Int(6));
    assert_eq!(eval("(+ 1 2.5)"), Value::Float(3.5));
}

#[test]
fn subtraction_negates_with_one_argument() {
    assert_eq!(eval("(- 7)"), Value::Int(-7));
    assert_eq!(eval("(- 2.5)"), Value::Float(-2.5));
    assert_eq!(eval("(- 10 1 2)"), Value::Int(7));
}

#[test]
fn multiplication_has_identity() {
    assert_eq!(eval("(*)"), Value::Int(1));
    assert_eq!(eval("(* 2 3 4)"), Value::Int(24));
}

#[test]
fn integer_division_stays_integral() {
    assert_eq!(eval("(/ 7 2)"), Value::Int(3));
    assert_eq!(eval("(/ 12 3 2)"), Value::Int(2));
    assert_eq!(eval("(/ 7 2.0)"), Value::Float(3.5));
}

#[test]
fn division_and_mod_by_integer_zero_fail() {
    assert!(matches!(
        eval_err("(/ 1 0)").kind,
        ErrorKind::DivisionByZero
    ));
    assert!(matches!(
        eval_err("(mod 5 0)").kind,
        ErrorKind::DivisionByZero
    ));
    assert!(matches!(
        eval_err("(/ 1)").kind,
        ErrorKind::ArityMismatch { .. }
    ));
}

#[test]
fn mod_follows_the_dividend_sign() {
    assert_eq!(eval("(mod 9 4)"), Value::Int(1));
    assert_eq!(eval("(mod -7 3)"), Value::Int(-1));
}

#[test]
fn plus_concatenates_strings_only_with_strings() {
    assert_eq!(eval("(+ \"pre\" \"-\" \"post\")"), Value::from("pre-post"));
    assert!(matches!(
        eval_err("(+ \"a\" 1)").kind,
        ErrorKind::TypeMismatch { .. }
    ));
}

// =============================================================================
// Comparison and Equality
// =============================================================================

#[test]
fn comparisons_accept_strings_and_mixed_numbers() {
    assert_eq!(eval("(< \"apple\" \"banana\")"), Value::Bool(true));
    assert_eq!(eval("(< 1 1.5 2)"), Value::Bool(true));
    assert_eq!(eval("(>= 3 3 1)"), Value::Bool(true));
    assert_eq!(eval("(> 1 2)"), Value::Bool(false));
}

#[test]
fn equality_is_structural_but_type_strict() {
    assert_eq!(eval("(= [1 [2 3]] [1 [2 3]])"), Value::Bool(true));
    assert_eq!(eval("(= {:a 1 :b 2} {:b 2 :a 1})"), Value::Bool(true));
    assert_eq!(eval("(= 1 1.0)"), Value::Bool(false));
    assert_eq!(eval("(not= 1 1 2)"), Value::Bool(true));
}

// =============================================================================
// Vectors
// =============================================================================

#[test]
fn vector_primitives_compose() {
    assert_eq!(eval("(first [5 6])"), Value::Int(5));
    assert_eq!(eval("(rest [5 6])"), Value::from(vec![6i64]));
    assert_eq!(eval("(nth [5 6] 1)"), Value::Int(6));
    assert_eq!(eval("(count [5 6 7])"), Value::Int(3));
    assert_eq!(eval("(conj [1] 2 3)"), Value::from(vec![1i64, 2, 3]));
    assert_eq!(eval("(cons 0 [1])"), Value::from(vec![0i64, 1]));
    assert_eq!(eval("(vector 1 2)"), Value::from(vec![1i64, 2]));
    assert_eq!(eval("(list 1 2)"), Value::from(vec![1i64, 2]));
}

#[test]
fn vector_updates_ignore_out_of_range_indices() {
    assert_eq!(eval("(= (assoc [1 2 3] 1 9) [1 9 3])"), Value::Bool(true));
    assert_eq!(eval("(= (assoc [1 2] 5 9) [1 2])"), Value::Bool(true));
    assert_eq!(eval("(get [10 20] 1)"), Value::Int(20));
    assert_eq!(eval("(get [10 20] 9)"), Value::Nil);
    assert_eq!(eval("(contains? [10 20] 1)"), Value::Bool(true));
    assert_eq!(eval("(contains? [10 20] 2)"), Value::Bool(false));
}

#[test]
fn nth_reports_index_and_length() {
    assert!(matches!(
        eval_err("(nth [1 2] 2)").kind,
        ErrorKind::IndexOutOfBounds {
            index: 2,
            length: 2
        }
    ));
    assert_eq!(eval("(nth \"abc\" 1)"), Value::from("b"));
    assert!(matches!(
        eval_err("(nth \"ab\" 9)").kind,
        ErrorKind::IndexOutOfBounds {
            index: 9,
            length: 2
        }
    ));
}

// =============================================================================
// Maps
// =============================================================================

#[test]
fn maps_look_up_and_extend() {
    assert_eq!(eval("(get {:a 1} :a)"), Value::Int(1));
    assert_eq!(eval("(get {:a 1} :b)"), Value::Nil);
    assert_eq!(eval("(get (assoc {:a 1} :b 2) :b)"), Value::Int(2));
    assert_eq!(eval("(count (assoc {:a 1} :b 2))"), Value::Int(2));
    assert_eq!(eval("(contains? {:a 1} :a)"), Value::Bool(true));
    assert_eq!(eval("(contains? {:a 1} :b)"), Value::Bool(false));
    assert_eq!(eval("(= (keys {:a 1}) [:a])"), Value::Bool(true));
    assert_eq!(eval("(= (vals {:a 1}) [1])"), Value::Bool(true));
}

#[test]
fn nil_acts_as_the_empty_collection() {
    assert_eq!(eval("(count nil)"), Value::Int(0));
    assert_eq!(eval("(first nil)"), Value::Nil);
    assert_eq!(eval("(= (rest nil) [])"), Value::Bool(true));
    assert_eq!(eval("(conj nil 1)"), Value::from(vec![1i64]));
    assert_eq!(eval("(cons 1 nil)"), Value::from(vec![1i64]));
    assert_eq!(eval("(get (assoc nil :k 1) :k)"), Value::Int(1));
    assert_eq!(eval("(= (keys nil) [])"), Value::Bool(true));
}

// =============================================================================
// Strings and Predicates
// =============================================================================

#[test]
fn count_treats_strings_as_characters() {
    assert_eq!(eval("(count \"garland\")"), Value::Int(7));
    assert_eq!(eval("(count \"\")"), Value::Int(0));
}

#[test]
fn str_renders_values_like_the_repl() {
    assert_eq!(
        eval("(str \"x=\" 2 \" \" 2.0 \" \" [1 2] \" \" nil)"),
        Value::from("x=2 2.0 [1 2] nil")
    );
    assert_eq!(eval("(str)"), Value::from(""));
}

#[test]
fn type_predicates_discriminate() {
    assert_eq!(eval("(int? 1)"), Value::Bool(true));
    assert_eq!(eval("(int? 1.0)"), Value::Bool(false));
    assert_eq!(eval("(float? 1.5)"), Value::Bool(true));
    assert_eq!(eval("(string? \"s\")"), Value::Bool(true));
    assert_eq!(eval("(keyword? :k)"), Value::Bool(true));
    assert_eq!(eval("(symbol? 's)"), Value::Bool(true));
    assert_eq!(eval("(vector? [])"), Value::Bool(true));
    assert_eq!(eval("(map? {})"), Value::Bool(true));
    assert_eq!(eval("(nil? nil)"), Value::Bool(true));
    assert_eq!(eval("(fn? first)"), Value::Bool(true));
    assert_eq!(eval("(fn? (fn [x] x))"), Value::Bool(true));
    assert_eq!(eval("(fn? 3)"), Value::Bool(false));
}

#[test]
fn not_treats_only_nil_and_false_as_falsy() {
    assert_eq!(eval("(not nil)"), Value::Bool(true));
    assert_eq!(eval("(not false)"), Value::Bool(true));
    assert_eq!(eval("(not 0)"), Value::Bool(false));
    assert_eq!(eval("(not \"\")"), Value::Bool(false));
    assert_eq!(eval("(not [])"), Value::Bool(false));
}
