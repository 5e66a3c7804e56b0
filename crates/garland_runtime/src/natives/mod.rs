//! Native functions callable from Garland code.
//!
//! Natives are grouped by category:
//! - Arithmetic and comparison: `+` `-` `*` `/` `mod` `=` `not=` `<` `<=` `>` `>=`
//! - Collections: `cons` `first` `rest` `count` `nth` `get` `assoc` `conj`
//!   `contains?` `keys` `vals` `vector` `list`
//! - Predicates: `not` `nil?` `int?` `float?` `string?` `keyword?` `symbol?`
//!   `vector?` `map?` `fn?`
//! - Strings: `str`
//!
//! The interpreter resolves unqualified call heads against this table after
//! scope bindings and module functions, so a module-local `first/1` shadows
//! the native.

use garland_foundation::{NativeFn, Value};

#[allow(clippy::cast_precision_loss)]
mod arithmetic;
#[allow(clippy::unnecessary_wraps, clippy::cast_possible_wrap)]
mod collection;
#[allow(clippy::unnecessary_wraps)]
mod predicates;
#[allow(clippy::unnecessary_wraps)]
mod string;

#[allow(clippy::wildcard_imports)]
pub(crate) use arithmetic::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use collection::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use predicates::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use string::*;

/// Formats a value the way the REPL and `str` print it.
///
/// Differs from `Display` in one respect: whole floats keep a trailing `.0`
/// so `2.0` does not print as `2`.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Float(n) if n.fract() == 0.0 && n.is_finite() => format!("{n}.0"),
        Value::Vec(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(" "))
        }
        Value::Map(entries) => {
            let inner: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{} {}", format_value(k), format_value(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
        other => other.to_string(),
    }
}

/// Every native, in lookup order.
static NATIVES: &[NativeFn] = &[
    // Arithmetic and comparison
    NativeFn { name: "+", func: native_add },
    NativeFn { name: "-", func: native_sub },
    NativeFn { name: "*", func: native_mul },
    NativeFn { name: "/", func: native_div },
    NativeFn { name: "mod", func: native_mod },
    NativeFn { name: "=", func: native_eq },
    NativeFn { name: "not=", func: native_ne },
    NativeFn { name: "<", func: native_lt },
    NativeFn { name: "<=", func: native_le },
    NativeFn { name: ">", func: native_gt },
    NativeFn { name: ">=", func: native_ge },
    // Collections
    NativeFn { name: "cons", func: native_cons },
    NativeFn { name: "first", func: native_first },
    NativeFn { name: "rest", func: native_rest },
    NativeFn { name: "count", func: native_count },
    NativeFn { name: "nth", func: native_nth },
    NativeFn { name: "get", func: native_get },
    NativeFn { name: "assoc", func: native_assoc },
    NativeFn { name: "conj", func: native_conj },
    NativeFn { name: "contains?", func: native_contains_p },
    NativeFn { name: "keys", func: native_keys },
    NativeFn { name: "vals", func: native_vals },
    NativeFn { name: "vector", func: native_vector },
    NativeFn { name: "list", func: native_list },
    // Predicates
    NativeFn { name: "not", func: native_not },
    NativeFn { name: "nil?", func: native_nil_p },
    NativeFn { name: "int?", func: native_int_p },
    NativeFn { name: "float?", func: native_float_p },
    NativeFn { name: "string?", func: native_string_p },
    NativeFn { name: "keyword?", func: native_keyword_p },
    NativeFn { name: "symbol?", func: native_symbol_p },
    NativeFn { name: "vector?", func: native_vector_p },
    NativeFn { name: "map?", func: native_map_p },
    NativeFn { name: "fn?", func: native_fn_p },
    // Strings
    NativeFn { name: "str", func: native_str },
];

/// Looks up a native function by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static NativeFn> {
    NATIVES.iter().find(|native| native.name == name)
}

/// Returns every registered native.
#[must_use]
pub fn all() -> &'static [NativeFn] {
    NATIVES
}
