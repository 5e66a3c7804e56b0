//! Embedding tests
//!
//! Rust-side decorators registered through the session registry, applied
//! to modules loaded afterwards.

use garland_expand::{FnContext, NativeDecorator};
use garland_foundation::{Error, ErrorKind, Result, Value};
use garland_language::Ast;
use garland_runtime::Session;

fn trace_wrap(_args: &[Ast], body: Ast, _ctx: &FnContext) -> Result<Ast> {
    Ok(Ast::list(vec![
        Ast::symbol("cons"),
        Ast::string("traced"),
        body,
    ]))
}

fn veto(_args: &[Ast], _body: Ast, ctx: &FnContext) -> Result<Ast> {
    Err(Error::decorator_failure(
        "host/strict",
        format!("{} is not allowed", ctx.name),
    ))
}

fn host_session() -> Session {
    let mut session = Session::new();
    session
        .registry_mut()
        .declare_native(
            "host",
            0,
            NativeDecorator {
                name: "traced",
                func: trace_wrap,
            },
        )
        .unwrap();
    session
}

// =============================================================================
// Native Decorators
// =============================================================================

#[test]
fn native_decorators_wrap_loaded_modules() {
    let mut session = host_session();
    session
        .load_source(
            "(module shop)\n\
             (use-decorators host)\n\
             (decorate (traced))\n\
             (defn checkout [] [])",
        )
        .unwrap();

    assert_eq!(
        session.call("shop", "checkout", &[]).unwrap(),
        Value::from(vec!["traced"])
    );
    // Native applications land in the reflection table like any other.
    let table = session.decorations("shop").unwrap();
    assert_eq!(table.lookup("checkout", "[]")[0][0].module, "host");
}

#[test]
fn native_and_template_chains_mix() {
    let mut session = host_session();
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
             (use-decorators util host)\n\
             (decorate (traced) (tag \"x\"))\n\
             (defn f [] [])",
        )
        .unwrap();

    // The native came first in the annotation, so it wraps outermost.
    assert_eq!(
        session.call("shop", "f", &[]).unwrap(),
        Value::from(vec!["traced", "x"])
    );
}

#[test]
fn native_failures_fail_the_load() {
    let mut session = Session::new();
    session
        .registry_mut()
        .declare_native(
            "host",
            0,
            NativeDecorator {
                name: "strict",
                func: veto,
            },
        )
        .unwrap();

    let err = session
        .load_source(
            "(module shop)\n\
             (use-decorators host)\n\
             (decorate (strict))\n\
             (defn refund [] [])",
        )
        .unwrap_err();

    let ErrorKind::DecoratorFailure { decorator, message } = &err.kind else {
        panic!("expected decorator failure, got {}", err.kind);
    };
    assert_eq!(decorator, "host/strict");
    assert_eq!(message, "refund is not allowed");
    // Nothing was installed.
    assert!(!session.has_function("shop", "refund", 0));
}

#[test]
fn registry_surveys_declarations() {
    let mut session = host_session();
    session
        .registry_mut()
        .declare_native(
            "host",
            1,
            NativeDecorator {
                name: "labeled",
                func: trace_wrap,
            },
        )
        .unwrap();

    let decls = session.registry().declarations("host");
    let pairs: Vec<(&str, usize)> = decls.iter().map(|d| (d.name.as_str(), d.arity)).collect();
    assert_eq!(pairs, vec![("traced", 0), ("labeled", 1)]);
    assert!(session.registry().is_declared("host", "traced", 0));
    assert!(!session.registry().is_declared("host", "traced", 1));
}
