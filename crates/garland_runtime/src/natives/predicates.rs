//! Type predicates and logical negation.

use garland_foundation::{Result, Value};

/// `(not x)` negates under nil/false falsiness.
pub(crate) fn native_not(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(!args.first().is_some_and(Value::is_truthy)))
}

/// `(nil? x)`.
pub(crate) fn native_nil_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::Nil))))
}

/// `(int? x)`.
pub(crate) fn native_int_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::Int(_)))))
}

/// `(float? x)`.
pub(crate) fn native_float_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::Float(_)))))
}

/// `(string? x)`.
pub(crate) fn native_string_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::String(_)))))
}

/// `(keyword? x)`.
pub(crate) fn native_keyword_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::Keyword(_)))))
}

/// `(symbol? x)`.
pub(crate) fn native_symbol_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::Symbol(_)))))
}

/// `(vector? x)`.
pub(crate) fn native_vector_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::Vec(_)))))
}

/// `(map? x)`.
pub(crate) fn native_map_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::Map(_)))))
}

/// `(fn? x)`.
pub(crate) fn native_fn_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(args.first(), Some(Value::Fn(_)))))
}
