//! Parser integration tests
//!
//! Tests AST shapes for realistic module source, literal-text recovery
//! through spans, and error positions.

use garland_foundation::ErrorKind;
use garland_language::{Ast, parse, parse_one};

// =============================================================================
// Form Shapes
// =============================================================================

#[test]
fn parses_a_module_header() {
    let ast = parse_one("(module shop)").unwrap();
    assert_eq!(ast.head_symbol(), Some("module"));
    let elems = ast.as_list().unwrap();
    assert_eq!(elems[1].as_symbol(), Some("shop"));
}

#[test]
fn parses_a_guarded_private_definition() {
    let ast = parse_one("(defn- pay [id n] :when (> n 0) (charge id n))").unwrap();
    let elems = ast.as_list().unwrap();

    assert_eq!(elems[0].as_symbol(), Some("defn-"));
    assert_eq!(elems[1].as_symbol(), Some("pay"));
    assert_eq!(elems[2].as_vector().unwrap().len(), 2);
    assert_eq!(elems[3].as_keyword(), Some("when"));
    assert_eq!(elems[4].head_symbol(), Some(">"));
    assert_eq!(elems[5].head_symbol(), Some("charge"));
}

#[test]
fn parses_decorator_declarations() {
    let ast = parse_one("(defdecorators [tag 1 timed 0])").unwrap();
    let pairs = ast.as_list().unwrap()[1].as_vector().unwrap();

    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[0].as_symbol(), Some("tag"));
    assert!(matches!(pairs[1], Ast::Int(1, _)));
    assert_eq!(pairs[2].as_symbol(), Some("timed"));
    assert!(matches!(pairs[3], Ast::Int(0, _)));
}

#[test]
fn template_bodies_keep_reader_macros() {
    let ast = parse_one("(defdecorator tag [label body ctx] `(cons ~label ~body))").unwrap();
    let elems = ast.as_list().unwrap();

    let Ast::SyntaxQuote(inner, _) = &elems[3] else {
        panic!("expected syntax-quoted template body, got {}", elems[3].type_name());
    };
    let call = inner.as_list().unwrap();
    assert_eq!(call[0].as_symbol(), Some("cons"));
    assert!(matches!(call[1], Ast::Unquote(_, _)));
    assert!(matches!(call[2], Ast::Unquote(_, _)));
}

#[test]
fn quoting_forms_desugar() {
    assert!(matches!(parse_one("'x").unwrap(), Ast::Quote(_, _)));
    assert!(matches!(parse_one("`x").unwrap(), Ast::SyntaxQuote(_, _)));
    assert!(matches!(parse_one("~x").unwrap(), Ast::Unquote(_, _)));
    assert!(matches!(parse_one("~@x").unwrap(), Ast::UnquoteSplice(_, _)));
}

#[test]
fn maps_keep_entry_order() {
    let ast = parse_one("{:b 2 :a 1}").unwrap();
    let Ast::Map(entries, _) = &ast else {
        panic!("expected map, got {}", ast.type_name());
    };
    assert_eq!(entries[0].0.as_keyword(), Some("b"));
    assert_eq!(entries[1].0.as_keyword(), Some("a"));
}

// =============================================================================
// Multiple Forms
// =============================================================================

#[test]
fn parse_returns_every_top_level_form() {
    let forms = parse(
        "(module shop)\n\
         ; the rate applied everywhere\n\
         (def rate 2)\n\
         (defn total [n] (* n rate))",
    )
    .unwrap();

    assert_eq!(forms.len(), 3);
    assert_eq!(forms[0].head_symbol(), Some("module"));
    assert_eq!(forms[1].head_symbol(), Some("def"));
    assert_eq!(forms[2].head_symbol(), Some("defn"));
}

#[test]
fn parse_one_reads_only_the_first_form() {
    assert!(matches!(parse_one("1 2 3").unwrap(), Ast::Int(1, _)));
}

// =============================================================================
// Literal Text Recovery
// =============================================================================

#[test]
fn spans_recover_parameter_text_verbatim() {
    // Reflection keys on the parameter vector exactly as written, so the
    // span must preserve interior whitespace.
    let source = "(defn f [id  total] id)";
    let ast = parse_one(source).unwrap();
    let params = &ast.as_list().unwrap()[2];
    assert_eq!(params.span().text(source), "[id  total]");
}

#[test]
fn spans_recover_argument_text_with_quotes() {
    let source = "(decorate (tag \"x\" 7))";
    let ast = parse_one(source).unwrap();
    let invocation = ast.as_list().unwrap()[1].as_list().unwrap();
    assert_eq!(invocation[1].span().text(source), "\"x\"");
    assert_eq!(invocation[2].span().text(source), "7");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unterminated_list_reports_its_line() {
    let err = parse("(module shop)\n(defn f [x]\n  (oops").unwrap_err();
    let ErrorKind::ParseError { line, context, .. } = &err.kind else {
        panic!("expected parse error, got {}", err.kind);
    };
    assert_eq!(*line, 3);
    assert!(context.contains("oops"));
}

#[test]
fn stray_closer_is_rejected() {
    let err = parse(")").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::ParseError { line: 1, column: 1, .. }
    ));
}

#[test]
fn deeply_nested_forms_parse() {
    let mut ast = parse_one("((((((42))))))").unwrap();
    for _ in 0..6 {
        let elems = ast.as_list().unwrap();
        assert_eq!(elems.len(), 1);
        ast = elems[0].clone();
    }
    assert!(matches!(ast, Ast::Int(42, _)));
}
