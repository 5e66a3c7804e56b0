//! Arithmetic and comparison natives.

use std::cmp::Ordering;

use garland_foundation::{Error, ErrorKind, Result, Type, Value};

/// Adds two values.
///
/// Supports Int + Int, Float + Float, mixed Int/Float (promoting to Float),
/// and String + String (concatenation).
pub(crate) fn add_values(x: Value, y: Value) -> Result<Value> {
    match (x, y) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x + y)),
        (Value::Float(x), Value::Float(y)) => Ok(Value::Float(x + y)),
        (Value::Int(x), Value::Float(y)) => Ok(Value::Float(x as f64 + y)),
        (Value::Float(x), Value::Int(y)) => Ok(Value::Float(x + y as f64)),
        (Value::String(x), Value::String(y)) => Ok(Value::String(format!("{x}{y}").into())),
        (x, _) => Err(Error::type_mismatch(Type::Int, x.value_type())),
    }
}

/// Subtracts two values, promoting ints to floats as needed.
pub(crate) fn sub_values(x: Value, y: Value) -> Result<Value> {
    match (x, y) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x - y)),
        (Value::Float(x), Value::Float(y)) => Ok(Value::Float(x - y)),
        (Value::Int(x), Value::Float(y)) => Ok(Value::Float(x as f64 - y)),
        (Value::Float(x), Value::Int(y)) => Ok(Value::Float(x - y as f64)),
        (x, _) => Err(Error::type_mismatch(Type::Int, x.value_type())),
    }
}

/// Multiplies two values, promoting ints to floats as needed.
pub(crate) fn mul_values(x: Value, y: Value) -> Result<Value> {
    match (x, y) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x * y)),
        (Value::Float(x), Value::Float(y)) => Ok(Value::Float(x * y)),
        (Value::Int(x), Value::Float(y)) => Ok(Value::Float(x as f64 * y)),
        (Value::Float(x), Value::Int(y)) => Ok(Value::Float(x * y as f64)),
        (x, _) => Err(Error::type_mismatch(Type::Int, x.value_type())),
    }
}

/// Divides two values, promoting ints to floats as needed.
///
/// Division by integer zero is an error.
pub(crate) fn div_values(x: Value, y: Value) -> Result<Value> {
    match (x, y) {
        (Value::Int(_) | Value::Float(_), Value::Int(0)) => {
            Err(Error::new(ErrorKind::DivisionByZero))
        }
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x / y)),
        (Value::Float(x), Value::Float(y)) => Ok(Value::Float(x / y)),
        (Value::Int(x), Value::Float(y)) => Ok(Value::Float(x as f64 / y)),
        (Value::Float(x), Value::Int(y)) => Ok(Value::Float(x / y as f64)),
        (x, _) => Err(Error::type_mismatch(Type::Int, x.value_type())),
    }
}

/// Computes the remainder of two values.
pub(crate) fn mod_values(x: Value, y: Value) -> Result<Value> {
    match (x, y) {
        (Value::Int(_) | Value::Float(_), Value::Int(0)) => {
            Err(Error::new(ErrorKind::DivisionByZero))
        }
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x % y)),
        (Value::Float(x), Value::Float(y)) => Ok(Value::Float(x % y)),
        (Value::Int(x), Value::Float(y)) => Ok(Value::Float(x as f64 % y)),
        (Value::Float(x), Value::Int(y)) => Ok(Value::Float(x % y as f64)),
        (x, _) => Err(Error::type_mismatch(Type::Int, x.value_type())),
    }
}

/// Negates a numeric value.
pub(crate) fn neg_value(x: Value) -> Result<Value> {
    match x {
        Value::Int(x) => Ok(Value::Int(-x)),
        Value::Float(x) => Ok(Value::Float(-x)),
        x => Err(Error::type_mismatch(Type::Int, x.value_type())),
    }
}

/// Compares two values and applies a predicate to the ordering.
///
/// Ints, floats, and mixed numeric pairs compare numerically; strings compare
/// lexicographically. Anything else is a type error.
pub(crate) fn compare_values<F>(x: &Value, y: &Value, check: F) -> Result<Value>
where
    F: FnOnce(Ordering) -> bool,
{
    let ordering = match (x, y) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Value::Int(x), Value::Float(y)) => {
            (*x as f64).partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Value::Float(x), Value::Int(y)) => {
            x.partial_cmp(&(*y as f64)).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (x, _) => return Err(Error::type_mismatch(Type::Int, x.value_type())),
    };
    Ok(Value::Bool(check(ordering)))
}

/// Checks a comparison predicate across every adjacent pair.
fn compare_chain(args: &[Value], check: fn(Ordering) -> bool) -> Result<Value> {
    if args.is_empty() {
        return Err(Error::arity_mismatch("at least 1 argument", 0));
    }
    for pair in args.windows(2) {
        if !compare_values(&pair[0], &pair[1], check)?.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// `(+ a b ...)` sums its arguments; strings concatenate.
pub(crate) fn native_add(args: &[Value]) -> Result<Value> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Value::Int(0));
    };
    rest.iter()
        .try_fold(first.clone(), |acc, v| add_values(acc, v.clone()))
}

/// `(- a b ...)` subtracts; with one argument, negates.
pub(crate) fn native_sub(args: &[Value]) -> Result<Value> {
    let Some((first, rest)) = args.split_first() else {
        return Err(Error::arity_mismatch("at least 1 argument", 0));
    };
    if rest.is_empty() {
        return neg_value(first.clone());
    }
    rest.iter()
        .try_fold(first.clone(), |acc, v| sub_values(acc, v.clone()))
}

/// `(* a b ...)` multiplies its arguments.
pub(crate) fn native_mul(args: &[Value]) -> Result<Value> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Value::Int(1));
    };
    rest.iter()
        .try_fold(first.clone(), |acc, v| mul_values(acc, v.clone()))
}

/// `(/ a b ...)` divides left to right.
pub(crate) fn native_div(args: &[Value]) -> Result<Value> {
    let Some((first, rest)) = args.split_first() else {
        return Err(Error::arity_mismatch("at least 2 arguments", 0));
    };
    if rest.is_empty() {
        return Err(Error::arity_mismatch("at least 2 arguments", 1));
    }
    rest.iter()
        .try_fold(first.clone(), |acc, v| div_values(acc, v.clone()))
}

/// `(mod a b)` computes the remainder.
pub(crate) fn native_mod(args: &[Value]) -> Result<Value> {
    match args {
        [x, y] => mod_values(x.clone(), y.clone()),
        _ => Err(Error::arity_mismatch("2 arguments", args.len())),
    }
}

/// `(= a b ...)` is true when every argument is equal.
pub(crate) fn native_eq(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(args.windows(2).all(|pair| pair[0] == pair[1])))
}

/// `(not= a b ...)` is the negation of `=`.
pub(crate) fn native_ne(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(!args.windows(2).all(|pair| pair[0] == pair[1])))
}

/// `(< a b ...)` strictly-increasing chain comparison.
pub(crate) fn native_lt(args: &[Value]) -> Result<Value> {
    compare_chain(args, Ordering::is_lt)
}

/// `(<= a b ...)` non-decreasing chain comparison.
pub(crate) fn native_le(args: &[Value]) -> Result<Value> {
    compare_chain(args, Ordering::is_le)
}

/// `(> a b ...)` strictly-decreasing chain comparison.
pub(crate) fn native_gt(args: &[Value]) -> Result<Value> {
    compare_chain(args, Ordering::is_gt)
}

/// `(>= a b ...)` non-increasing chain comparison.
pub(crate) fn native_ge(args: &[Value]) -> Result<Value> {
    compare_chain(args, Ordering::is_ge)
}
