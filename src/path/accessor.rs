//! Reading and writing values at a path

use super::expr::{Alternative, PathExpr, Step};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Resolve every value matched by `path`
///
/// Alternatives are tried left to right and the first non-empty result wins.
/// `null` values count as absent and are never returned.
pub fn resolve(value: &Value, path: &PathExpr) -> Vec<Value> {
    for alternative in &path.alternatives {
        let found: Vec<Value> = match alternative {
            Alternative::Steps(steps) => walk(value, steps).into_iter().cloned().collect(),
            Alternative::Query(query) => find_with_jsonpath(value, query).unwrap_or_else(|e| {
                debug!(path = %path, error = %e, "JSONPath query failed");
                Vec::new()
            }),
        };

        let found: Vec<Value> = found.into_iter().filter(|v| !v.is_null()).collect();
        if !found.is_empty() {
            return found;
        }
    }

    Vec::new()
}

/// Resolve `path` and keep only the first match
pub fn resolve_first(value: &Value, path: &PathExpr) -> Option<Value> {
    resolve(value, path).into_iter().next()
}

/// Write `new_value` at every location matched by `path`
///
/// Only the first alternative is used. Missing object fields along the way
/// are created; array elements must already exist. Returns how many
/// locations were written.
pub fn assign(target: &mut Value, path: &PathExpr, new_value: Value) -> usize {
    match path.alternatives.first() {
        Some(Alternative::Steps(steps)) => assign_steps(target, steps, &new_value),
        _ => 0,
    }
}

fn walk<'a>(root: &'a Value, steps: &[Step]) -> Vec<&'a Value> {
    let mut current = vec![root];
    for step in steps {
        current = current
            .into_iter()
            .flat_map(|value| children(value, step))
            .collect();
        if current.is_empty() {
            break;
        }
    }
    current
}

fn children<'a>(value: &'a Value, step: &Step) -> Vec<&'a Value> {
    match (step, value) {
        (Step::Field(name), Value::Object(map)) => map.get(name).into_iter().collect(),
        (Step::AnyField, Value::Object(map)) => map.values().collect(),
        (Step::Index(index), Value::Array(items)) => normalize_index(*index, items.len())
            .and_then(|i| items.get(i))
            .into_iter()
            .collect(),
        (Step::AnyIndex, Value::Array(items)) => items.iter().collect(),
        _ => Vec::new(),
    }
}

fn assign_steps(target: &mut Value, steps: &[Step], new_value: &Value) -> usize {
    let Some((step, rest)) = steps.split_first() else {
        *target = new_value.clone();
        return 1;
    };

    if target.is_null() && matches!(step, Step::Field(_)) {
        *target = Value::Object(Map::new());
    }

    match (step, target) {
        (Step::Field(name), Value::Object(map)) => {
            if let Some(child) = map.get_mut(name) {
                return assign_steps(child, rest, new_value);
            }
            // Only objects are created on the way down; indices never are.
            if !matches!(rest.first(), None | Some(Step::Field(_))) {
                return 0;
            }
            let child = map.entry(name.clone()).or_insert(Value::Null);
            assign_steps(child, rest, new_value)
        }
        (Step::AnyField, Value::Object(map)) => map
            .values_mut()
            .map(|child| assign_steps(child, rest, new_value))
            .sum(),
        (Step::Index(index), Value::Array(items)) => {
            match normalize_index(*index, items.len()).and_then(|i| items.get_mut(i)) {
                Some(child) => assign_steps(child, rest, new_value),
                None => 0,
            }
        }
        (Step::AnyIndex, Value::Array(items)) => items
            .iter_mut()
            .map(|child| assign_steps(child, rest, new_value))
            .sum(),
        _ => 0,
    }
}

#[allow(clippy::cast_possible_wrap)]
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        len as i64 + index
    } else {
        index
    };
    usize::try_from(resolved).ok().filter(|i| *i < len)
}

/// Evaluate a full JSONPath query
pub(crate) fn find_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path)
        .map_err(|e| Error::path_syntax(path, format!("invalid JSONPath: {e}")))?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
