//! Collection natives over persistent vectors and maps.

use garland_foundation::{Error, ErrorKind, GarMap, GarVec, Result, Type, Value};

/// `(cons x coll)` prepends `x` to a vector; consing onto nil yields a
/// one-element vector.
pub(crate) fn native_cons(args: &[Value]) -> Result<Value> {
    match (args.first(), args.get(1)) {
        (Some(x), Some(Value::Vec(items))) => Ok(Value::Vec(items.push_front(x.clone()))),
        (Some(x), Some(Value::Nil)) => Ok(Value::Vec(GarVec::new().push_back(x.clone()))),
        (Some(_), Some(other)) => Err(Error::type_mismatch(Type::Vec, other.value_type())),
        _ => Err(Error::arity_mismatch("2 arguments", args.len())),
    }
}

/// `(first coll)` returns the first element, or nil when empty.
pub(crate) fn native_first(args: &[Value]) -> Result<Value> {
    match args.first() {
        Some(Value::Vec(items)) => Ok(items.first().cloned().unwrap_or(Value::Nil)),
        Some(Value::Nil) | None => Ok(Value::Nil),
        Some(other) => Err(Error::type_mismatch(Type::Vec, other.value_type())),
    }
}

/// `(rest coll)` returns everything after the first element.
pub(crate) fn native_rest(args: &[Value]) -> Result<Value> {
    match args.first() {
        Some(Value::Vec(items)) => Ok(Value::Vec(items.skip(1))),
        Some(Value::Nil) | None => Ok(Value::Vec(GarVec::new())),
        Some(other) => Err(Error::type_mismatch(Type::Vec, other.value_type())),
    }
}

/// `(count coll)` returns the element count; strings count characters.
pub(crate) fn native_count(args: &[Value]) -> Result<Value> {
    match args.first() {
        Some(Value::Vec(items)) => Ok(Value::Int(items.len() as i64)),
        Some(Value::Map(entries)) => Ok(Value::Int(entries.len() as i64)),
        Some(Value::String(s)) => Ok(Value::Int(s.chars().count() as i64)),
        Some(Value::Nil) | None => Ok(Value::Int(0)),
        Some(other) => Err(Error::type_mismatch(Type::Vec, other.value_type())),
    }
}

/// `(nth coll idx)` indexes a vector or string; out of range is an error.
pub(crate) fn native_nth(args: &[Value]) -> Result<Value> {
    match (args.first(), args.get(1)) {
        (Some(Value::Vec(items)), Some(Value::Int(idx))) => {
            let index = usize::try_from(*idx).unwrap_or(usize::MAX);
            items.get(index).cloned().ok_or_else(|| {
                Error::new(ErrorKind::IndexOutOfBounds {
                    index,
                    length: items.len(),
                })
            })
        }
        (Some(Value::String(s)), Some(Value::Int(idx))) => {
            let index = usize::try_from(*idx).unwrap_or(usize::MAX);
            s.chars()
                .nth(index)
                .map(|c| Value::String(c.to_string().into()))
                .ok_or_else(|| {
                    Error::new(ErrorKind::IndexOutOfBounds {
                        index,
                        length: s.chars().count(),
                    })
                })
        }
        (Some(Value::Vec(_) | Value::String(_)), Some(other)) => {
            Err(Error::type_mismatch(Type::Int, other.value_type()))
        }
        (Some(other), Some(_)) => Err(Error::type_mismatch(Type::Vec, other.value_type())),
        _ => Err(Error::arity_mismatch("2 arguments", args.len())),
    }
}

/// `(get coll key)` looks up a map key or vector index, nil when absent.
pub(crate) fn native_get(args: &[Value]) -> Result<Value> {
    match (args.first(), args.get(1)) {
        (Some(Value::Map(entries)), Some(key)) => {
            Ok(entries.get(key).cloned().unwrap_or(Value::Nil))
        }
        (Some(Value::Vec(items)), Some(Value::Int(idx))) => {
            let index = usize::try_from(*idx).unwrap_or(usize::MAX);
            Ok(items.get(index).cloned().unwrap_or(Value::Nil))
        }
        _ => Ok(Value::Nil),
    }
}

/// `(assoc coll k v ...)` inserts key-value pairs into a map, or replaces
/// in-range indices of a vector. Out-of-range vector indices are ignored.
pub(crate) fn native_assoc(args: &[Value]) -> Result<Value> {
    match args.first() {
        Some(Value::Map(entries)) => {
            let mut result = entries.clone();
            let mut i = 1;
            while i + 1 < args.len() {
                result = result.insert(args[i].clone(), args[i + 1].clone());
                i += 2;
            }
            Ok(Value::Map(result))
        }
        Some(Value::Vec(items)) => {
            let mut result = items.clone();
            let mut i = 1;
            while i + 1 < args.len() {
                if let Value::Int(idx) = &args[i] {
                    let index = usize::try_from(*idx).unwrap_or(usize::MAX);
                    result = result.update(index, args[i + 1].clone()).unwrap_or(result);
                }
                i += 2;
            }
            Ok(Value::Vec(result))
        }
        Some(Value::Nil) | None => {
            let mut result = GarMap::new();
            let mut i = 1;
            while i + 1 < args.len() {
                result = result.insert(args[i].clone(), args[i + 1].clone());
                i += 2;
            }
            Ok(Value::Map(result))
        }
        Some(other) => Err(Error::type_mismatch(Type::Map, other.value_type())),
    }
}

/// `(conj coll x ...)` appends values to a vector.
pub(crate) fn native_conj(args: &[Value]) -> Result<Value> {
    match args.first() {
        Some(Value::Vec(items)) => {
            let mut result = items.clone();
            for value in args.iter().skip(1) {
                result = result.push_back(value.clone());
            }
            Ok(Value::Vec(result))
        }
        Some(Value::Nil) | None => {
            let mut result = GarVec::new();
            for value in args.iter().skip(1) {
                result = result.push_back(value.clone());
            }
            Ok(Value::Vec(result))
        }
        Some(other) => Err(Error::type_mismatch(Type::Vec, other.value_type())),
    }
}

/// `(contains? coll key)` checks map keys or vector index range.
pub(crate) fn native_contains_p(args: &[Value]) -> Result<Value> {
    match (args.first(), args.get(1)) {
        (Some(Value::Map(entries)), Some(key)) => Ok(Value::Bool(entries.contains_key(key))),
        (Some(Value::Vec(items)), Some(Value::Int(idx))) => {
            let index = usize::try_from(*idx).unwrap_or(usize::MAX);
            Ok(Value::Bool(index < items.len()))
        }
        _ => Ok(Value::Bool(false)),
    }
}

/// `(keys m)` returns the keys of a map as a vector.
pub(crate) fn native_keys(args: &[Value]) -> Result<Value> {
    match args.first() {
        Some(Value::Map(entries)) => Ok(Value::Vec(entries.keys().cloned().collect())),
        Some(Value::Nil) | None => Ok(Value::Vec(GarVec::new())),
        Some(other) => Err(Error::type_mismatch(Type::Map, other.value_type())),
    }
}

/// `(vals m)` returns the values of a map as a vector.
pub(crate) fn native_vals(args: &[Value]) -> Result<Value> {
    match args.first() {
        Some(Value::Map(entries)) => Ok(Value::Vec(entries.values().cloned().collect())),
        Some(Value::Nil) | None => Ok(Value::Vec(GarVec::new())),
        Some(other) => Err(Error::type_mismatch(Type::Map, other.value_type())),
    }
}

/// `(vector a b ...)` builds a vector from its arguments.
pub(crate) fn native_vector(args: &[Value]) -> Result<Value> {
    Ok(Value::Vec(args.iter().cloned().collect()))
}

/// `(list a b ...)` is an alias for `vector`; sequences are vectors here.
pub(crate) fn native_list(args: &[Value]) -> Result<Value> {
    native_vector(args)
}
