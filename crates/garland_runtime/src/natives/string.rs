//! String natives.

use garland_foundation::{Result, Value};

use super::format_value;

/// `(str a b ...)` concatenates the printed form of each argument.
///
/// Strings print bare (no quotes), nil prints as `nil`.
pub(crate) fn native_str(args: &[Value]) -> Result<Value> {
    let result: String = args.iter().map(format_value).collect();
    Ok(Value::String(result.into()))
}
