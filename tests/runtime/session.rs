//! Session tests
//!
//! Covers file loading, decorator visibility across loads, seeded
//! reproducibility, and the scratch module.

use std::path::PathBuf;

use garland_foundation::Value;
use garland_runtime::Session;

fn temp_module_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("garland-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// File Loading
// =============================================================================

#[test]
fn load_file_resolves_against_the_load_path() {
    let dir = temp_module_dir("load-path");
    std::fs::write(
        dir.join("checkout.gar"),
        "(module checkout)\n(defn total [] 42)",
    )
    .unwrap();

    let mut session = Session::new();
    session.set_load_path(&dir);
    // No extension given; .gar is assumed.
    let name = session.load_file("checkout").unwrap();
    assert_eq!(name, "checkout");
    assert_eq!(
        session.call("checkout", "total", &[]).unwrap(),
        Value::Int(42)
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_file_accepts_absolute_paths() {
    let dir = temp_module_dir("absolute");
    let path = dir.join("audit.gar");
    std::fs::write(&path, "(module audit)\n(def level 2)").unwrap();

    let mut session = Session::new();
    let name = session.load_file(path.to_str().unwrap()).unwrap();
    assert_eq!(name, "audit");
    assert_eq!(session.eval("audit/level").unwrap(), Value::Int(2));

    let _ = std::fs::remove_dir_all(&dir);
}

// =============================================================================
// Decorator Visibility
// =============================================================================

#[test]
fn decorator_definitions_flow_to_later_loads() {
    let mut session = Session::new();
    session
        .load_source(
            "(module marks)\n\
             (defdecorators [mark 0])\n\
             (defdecorator mark [body ctx] `(cons \"m\" ~body))",
        )
        .unwrap();
    session
        .load_source(
            "(module wrap)\n\
             (use-decorators marks)\n\
             (defdecorators [stamp 0])\n\
             (defdecorator stamp [body ctx] `(cons \"s\" ~body))\n\
             (decorate (mark))\n\
             (defn probe [] [])",
        )
        .unwrap();
    session
        .load_source(
            "(module app)\n\
             (use-decorators wrap)\n\
             (decorate (marks/mark) (stamp))\n\
             (defn checkout [] [])",
        )
        .unwrap();

    assert_eq!(
        session.call("wrap", "probe", &[]).unwrap(),
        Value::from(vec!["m"])
    );
    assert_eq!(
        session.call("app", "checkout", &[]).unwrap(),
        Value::from(vec!["m", "s"])
    );
    assert!(session.registry().is_declared("wrap", "stamp", 0));
    assert!(session.registry().declares_any("marks"));
}

#[test]
fn decorations_accessor_tracks_loaded_modules() {
    let mut session = Session::new();
    assert!(session.decorations("missing").is_none());

    session.load_source("(module plain)\n(defn f [] 1)").unwrap();
    let table = session.decorations("plain").unwrap();
    assert!(table.is_empty());

    session
        .load_source(
            "(module util)\n\
             (defdecorators [tag 1])\n\
             (defdecorator tag [label body ctx] `(cons ~label ~body))\n\
             (decorate (tag \"x\"))\n\
             (defn f [] [])",
        )
        .unwrap();
    assert_eq!(session.decorations("util").unwrap().len(), 1);
}

// =============================================================================
// Seeded Expansion
// =============================================================================

#[test]
fn seeds_pin_generated_names() {
    let util = "(module util)\n\
                (defdecorators [memo 0])\n\
                (defdecorator memo [body ctx] `(let [v# ~body] v#))";
    let shop = "(module shop)\n\
                (use-decorators util)\n\
                (decorate (memo))\n\
                (defn f [] 1)";

    let expand = |seed: u64| {
        let mut session = Session::new().with_seed(seed);
        session.load_source(util).unwrap();
        session.expand_source(shop).unwrap()
    };

    assert_eq!(expand(7), expand(7));
    assert_ne!(expand(7), expand(8));
}

// =============================================================================
// Scratch Module
// =============================================================================

#[test]
fn scratch_definitions_are_callable_like_a_module() {
    let mut session = Session::new();
    session.eval("(defn double [n] (* n 2))").unwrap();

    assert!(session.has_function("user", "double", 1));
    assert_eq!(
        session.call("user", "double", &[Value::Int(21)]).unwrap(),
        Value::Int(42)
    );
}

#[test]
fn eval_returns_the_last_form_value() {
    let mut session = Session::new();
    assert_eq!(
        session.eval("(def a 1) (def b 2) (+ a b)").unwrap(),
        Value::Int(3)
    );
}
