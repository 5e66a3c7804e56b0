//! Annotation resolution tests
//!
//! Tests how decorator references resolve against declarations, and the
//! errors raised when they cannot.

use garland_expand::{
    DecoratorRegistry, ExpandOptions, ExpandedModule, NativeDecorator, expand_module,
};
use garland_foundation::{Error, ErrorKind, Result};
use garland_language::Ast;
use garland_language::pretty::pretty_print_all;

fn registry_from(source: &str) -> DecoratorRegistry {
    let expanded = expand_module(source, &DecoratorRegistry::new(), ExpandOptions::default())
        .expect("decorator module expands");
    let mut registry = DecoratorRegistry::new();
    registry.absorb(expanded.defined).expect("absorb");
    registry
}

fn util_registry() -> DecoratorRegistry {
    registry_from(
        "(module util)\n\
         (defdecorators [tag 1])\n\
         (defdecorator tag [label body ctx] `(cons ~label ~body))",
    )
}

fn expand_err(registry: &DecoratorRegistry, source: &str) -> Error {
    expand_module(source, registry, ExpandOptions::default())
        .expect_err("expansion should fail")
}

fn expand_ok(registry: &DecoratorRegistry, source: &str) -> ExpandedModule {
    expand_module(source, registry, ExpandOptions::default()).expect("module expands")
}

// =============================================================================
// Declaration Requirements
// =============================================================================

#[test]
fn annotation_requires_a_declaration() {
    let err = expand_err(
        &DecoratorRegistry::new(),
        "(module shop)\n\
         (decorate (tag \"x\"))\n\
         (defn f [] [])",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::UndeclaredDecorator { ref module, ref name, arity: 1 }
            if module == "shop" && name == "tag"
    ));
}

#[test]
fn arity_is_part_of_the_declared_pair() {
    let registry = util_registry();
    // tag is declared at arity 1; invoking it with none is a different pair.
    let err = expand_err(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (tag))\n\
         (defn f [] [])",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::UndeclaredDecorator { arity: 0, .. }
    ));
}

#[test]
fn resolution_fails_at_the_annotation_site() {
    let registry = util_registry();
    // The undeclared reference is fatal even though no definition follows.
    let err = expand_err(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate (missing))",
    );
    assert!(matches!(err.kind, ErrorKind::UndeclaredDecorator { .. }));
}

// =============================================================================
// Qualified and Unqualified References
// =============================================================================

#[test]
fn qualified_names_need_no_use_form() {
    let registry = util_registry();
    let expanded = expand_ok(
        &registry,
        "(module shop)\n\
         (decorate (util/tag \"x\"))\n\
         (defn f [] [])",
    );
    let out = pretty_print_all(&expanded.forms);
    assert!(out.contains("(defn f [] (cons \"x\" []))"), "got:\n{out}");
}

#[test]
fn qualified_misses_name_the_module() {
    let registry = util_registry();
    let err = expand_err(
        &registry,
        "(module shop)\n\
         (decorate (audit/tag \"x\"))\n\
         (defn f [] [])",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::UndeclaredDecorator { ref module, .. } if module == "audit"
    ));
}

#[test]
fn use_requires_a_declaring_module() {
    let err = expand_err(
        &DecoratorRegistry::new(),
        "(module shop)\n\
         (use-decorators nosuch)",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::UnknownDecoratorModule { ref module } if module == "nosuch"
    ));
}

#[test]
fn current_module_shadows_used_ones() {
    let registry = util_registry();
    // shop declares its own tag/1 whose template is the identity.
    let expanded = expand_ok(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (defdecorators [tag 1])\n\
         (defdecorator tag [label body ctx] `~body)\n\
         (decorate (tag \"x\"))\n\
         (defn f [] [])",
    );
    let out = pretty_print_all(&expanded.forms);
    assert!(out.contains("(defn f [] [])"), "got:\n{out}");

    let records = expanded.decorations.lookup("f", "[]");
    assert_eq!(records[0][0].module, "shop");
}

#[test]
fn use_order_breaks_ties() {
    let mut registry = registry_from(
        "(module a-marks)\n\
         (defdecorators [mark 0])\n\
         (defdecorator mark [body ctx] `(cons \"a\" ~body))",
    );
    let b = expand_module(
        "(module b-marks)\n\
         (defdecorators [mark 0])\n\
         (defdecorator mark [body ctx] `(cons \"b\" ~body))",
        &registry,
        ExpandOptions::default(),
    )
    .expect("b-marks expands");
    registry.absorb(b.defined).expect("absorb b-marks");

    let consumer = |uses: &str| {
        let expanded = expand_ok(
            &registry,
            &format!(
                "(module shop)\n\
                 (use-decorators {uses})\n\
                 (decorate (mark))\n\
                 (defn f [] [])"
            ),
        );
        pretty_print_all(&expanded.forms)
    };

    assert!(consumer("a-marks b-marks").contains("(cons \"a\" [])"));
    assert!(consumer("b-marks a-marks").contains("(cons \"b\" [])"));
}

// =============================================================================
// Declaration Conflicts
// =============================================================================

#[test]
fn redeclaring_a_pair_in_one_module_is_rejected() {
    let err = expand_err(
        &DecoratorRegistry::new(),
        "(module util)\n\
         (defdecorators [tag 1])\n\
         (defdecorators [tag 1])",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateDecorator { ref name, arity: 1, .. } if name == "tag"
    ));
}

#[test]
fn same_name_at_two_arities_is_fine() {
    let expanded = expand_ok(
        &DecoratorRegistry::new(),
        "(module util)\n\
         (defdecorators [tag 1 tag 2])",
    );
    assert_eq!(expanded.declarations().len(), 2);
}

#[test]
fn declared_but_unimplemented_fails_at_use() {
    let err = expand_err(
        &DecoratorRegistry::new(),
        "(module shop)\n\
         (defdecorators [tag 1])\n\
         (decorate (tag \"x\"))\n\
         (defn f [] [])",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::UnimplementedDecorator { ref name, arity: 1, .. } if name == "tag"
    ));
}

// =============================================================================
// Dangling Annotations
// =============================================================================

#[test]
fn dangling_annotation_at_module_end() {
    let registry = util_registry();
    let err = expand_err(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (defn f [] [])\n\
         (decorate (tag \"x\"))",
    );
    assert!(matches!(err.kind, ErrorKind::DanglingDecorate { count: 1 }));
}

#[test]
fn dangling_annotation_at_region_close() {
    let registry = util_registry();
    let err = expand_err(
        &registry,
        "(module shop)\n\
         (use-decorators util)\n\
         (decorate-all [(tag \"r\")]\n\
           (decorate (tag \"x\") (tag \"y\")))",
    );
    assert!(matches!(err.kind, ErrorKind::DanglingDecorate { count: 2 }));
}

// =============================================================================
// Reserved Names
// =============================================================================

#[test]
fn defining_the_query_name_is_reserved() {
    let err = expand_err(
        &DecoratorRegistry::new(),
        "(module shop)\n\
         (defn decorations [] 1)",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::ReservedName { ref name } if name == "decorations"
    ));

    let err = expand_err(
        &DecoratorRegistry::new(),
        "(module shop)\n\
         (def decorations 1)",
    );
    assert!(matches!(err.kind, ErrorKind::ReservedName { .. }));
}

#[test]
fn generated_marker_is_reserved_in_source() {
    let err = expand_err(
        &DecoratorRegistry::new(),
        "(module shop)\n\
         (defn f [] x__gar__1a2b3c4d_0)",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::ReservedName { ref name } if name.contains("__gar__")
    ));
}

// =============================================================================
// Implementation Errors
// =============================================================================

fn failing(_args: &[Ast], _body: Ast, _ctx: &garland_expand::FnContext) -> Result<Ast> {
    Err(Error::decorator_failure("checks/strict", "arity vetoed"))
}

#[test]
fn implementation_errors_surface_verbatim() {
    let mut registry = DecoratorRegistry::new();
    registry
        .declare_native(
            "checks",
            0,
            NativeDecorator {
                name: "strict",
                func: failing,
            },
        )
        .expect("declare native");

    let err = expand_err(
        &registry,
        "(module shop)\n\
         (use-decorators checks)\n\
         (decorate (strict))\n\
         (defn f [] [])",
    );
    let ErrorKind::DecoratorFailure { decorator, message } = &err.kind else {
        panic!("expected decorator failure, got {}", err.kind);
    };
    assert_eq!(decorator, "checks/strict");
    assert_eq!(message, "arity vetoed");
}
