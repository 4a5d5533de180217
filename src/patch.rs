//! Path-addressed insert/set/remove operations over a [`Json`] tree.
//!
//! A patch is itself a `Json` object of the shape
//! `{"op": "insert"|"set"|"remove", "path": "/a/b/0", "value": <json>}`;
//! `value` is required for `insert` and `set` and ignored for `remove`.
//!
//! Every operation comes in two forms: a `try_*` form that reports why a
//! patch was rejected, and a plain form that collapses the outcome to a
//! `bool` for callers that only care whether the document changed.

use crate::error::PatchError;
use crate::path;
use crate::utils;
use crate::value::{Json, Kind};
use log::debug;

/// Applies a patch document to `target`.
///
/// The patch must carry `op` and `path` children; `insert` and `set` also
/// need `value`. `op` and `path` are read through the total string
/// coercion, so a numeric `path` is treated as its rendered text.
///
/// # Errors
///
/// Returns a [`PatchError`] describing the first requirement the patch
/// failed to meet. The target is never modified on failure.
pub fn try_apply(target: &mut Json, patch: &Json) -> Result<(), PatchError> {
    let op = patch
        .child_named("op")
        .ok_or(PatchError::MissingField { field: "op" })?
        .to_text();
    let path = patch
        .child_named("path")
        .ok_or(PatchError::MissingField { field: "path" })?
        .to_text();

    if op == "remove" {
        return try_remove(target, &path);
    }

    let value = patch
        .child_named("value")
        .ok_or(PatchError::MissingField { field: "value" })?
        .clone();

    match op.as_str() {
        "insert" => try_insert(target, &path, value),
        "set" => try_set(target, &path, value),
        _ => Err(PatchError::UnknownOp { op }),
    }
}

/// Removes the value addressed by `path`.
///
/// An array parent erases the leaf positionally (index 0 included); an
/// object parent removes every property matching the leaf name.
///
/// # Errors
///
/// Fails on an empty path, an unresolved parent segment, a non-numeric
/// leaf under an array parent, a leaf that addresses nothing, or a parent
/// that is not a container.
pub fn try_remove(target: &mut Json, path: &str) -> Result<(), PatchError> {
    let mut segments = path::split(path);
    let Some(leaf) = segments.pop() else {
        return Err(PatchError::EmptyPath);
    };
    let parent = resolve_parent(target, &segments, path)?;
    match parent.kind() {
        Kind::Array => {
            let index = utils::parse_index(leaf).ok_or_else(|| PatchError::InvalidIndex {
                segment: leaf.to_string(),
            })?;
            if parent.erase(index) {
                Ok(())
            } else {
                Err(PatchError::UnresolvedPath {
                    path: path.to_string(),
                })
            }
        }
        Kind::Object => {
            if parent.erase_named(leaf) {
                Ok(())
            } else {
                Err(PatchError::UnresolvedPath {
                    path: path.to_string(),
                })
            }
        }
        _ => Err(PatchError::NotAContainer {
            path: path::join(segments.iter().copied()),
        }),
    }
}

/// Inserts `value` at `path`.
///
/// The empty path replaces `target` wholesale. An array parent inserts
/// before the leaf index, shifting later elements (a leaf beyond the
/// current length Null-pads the gap first). An object parent assigns
/// through the auto-vivifying named accessor, which makes `insert`
/// behave exactly like [`try_set`] there.
///
/// # Errors
///
/// Fails on an unresolved parent segment, a non-numeric leaf under an
/// array parent, or a parent that is not a container.
pub fn try_insert(target: &mut Json, path: &str, value: impl Into<Json>) -> Result<(), PatchError> {
    let value = value.into();
    let mut segments = path::split(path);
    let Some(leaf) = segments.pop() else {
        *target = value;
        return Ok(());
    };
    let parent = resolve_parent(target, &segments, path)?;
    match parent.kind() {
        Kind::Array => {
            let index = utils::parse_index(leaf).ok_or_else(|| PatchError::InvalidIndex {
                segment: leaf.to_string(),
            })?;
            parent.insert(index, value);
            Ok(())
        }
        Kind::Object => {
            parent[leaf] = value;
            Ok(())
        }
        _ => Err(PatchError::NotAContainer {
            path: path::join(segments.iter().copied()),
        }),
    }
}

/// Overwrites the value at `path`.
///
/// The empty path replaces `target` wholesale. An array parent writes
/// through the auto-vivifying numeric accessor, growing the array with
/// Null gaps when the leaf is beyond the current length. An object parent
/// creates or overwrites the named property.
///
/// # Errors
///
/// Fails on an unresolved parent segment, a non-numeric leaf under an
/// array parent, or a parent that is not a container.
pub fn try_set(target: &mut Json, path: &str, value: impl Into<Json>) -> Result<(), PatchError> {
    let value = value.into();
    let mut segments = path::split(path);
    let Some(leaf) = segments.pop() else {
        *target = value;
        return Ok(());
    };
    let parent = resolve_parent(target, &segments, path)?;
    match parent.kind() {
        Kind::Array => {
            let index = utils::parse_index(leaf).ok_or_else(|| PatchError::InvalidIndex {
                segment: leaf.to_string(),
            })?;
            parent[index] = value;
            Ok(())
        }
        Kind::Object => {
            parent[leaf] = value;
            Ok(())
        }
        _ => Err(PatchError::NotAContainer {
            path: path::join(segments.iter().copied()),
        }),
    }
}

/// Lenient form of [`try_apply`]; a rejected patch leaves the target
/// untouched and reports `false`.
pub fn apply(target: &mut Json, patch: &Json) -> bool {
    swallow(try_apply(target, patch))
}

/// Lenient form of [`try_remove`].
pub fn remove(target: &mut Json, path: &str) -> bool {
    swallow(try_remove(target, path))
}

/// Lenient form of [`try_insert`].
pub fn insert(target: &mut Json, path: &str, value: impl Into<Json>) -> bool {
    swallow(try_insert(target, path, value))
}

/// Lenient form of [`try_set`].
pub fn set(target: &mut Json, path: &str, value: impl Into<Json>) -> bool {
    swallow(try_set(target, path, value))
}

fn swallow(outcome: Result<(), PatchError>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(error) => {
            debug!("patch rejected: {error}");
            false
        }
    }
}

fn resolve_parent<'a>(
    target: &'a mut Json,
    segments: &[&str],
    path: &str,
) -> Result<&'a mut Json, PatchError> {
    let mut node = target;
    for segment in segments {
        node = node
            .child_named_mut(segment)
            .ok_or_else(|| PatchError::UnresolvedPath {
                path: path.to_string(),
            })?;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read;

    #[test]
    fn test_set_overwrites_array_element() {
        let mut target = read(r#"{"a": [1, 2, 3]}"#);
        assert!(set(&mut target, "/a/1", 9.0));
        assert_eq!(target, read(r#"{"a": [1, 9, 3]}"#));
    }

    #[test]
    fn test_remove_accepts_index_zero() {
        let mut target = read(r#"{"a": [1, 2, 3]}"#);
        assert!(remove(&mut target, "/a/0"));
        assert_eq!(target, read(r#"{"a": [2, 3]}"#));
    }

    #[test]
    fn test_insert_creates_object_property() {
        let mut target = read("{}");
        assert!(insert(&mut target, "/b", "x"));
        assert_eq!(target, read(r#"{"b": "x"}"#));
    }

    #[test]
    fn test_insert_shifts_array_elements() {
        let mut target = read("[1, 3]");
        assert!(insert(&mut target, "/1", 2.0));
        assert_eq!(target, read("[1, 2, 3]"));
    }

    #[test]
    fn test_empty_path_replaces_root() {
        let mut target = read(r#"{"a": 1}"#);
        assert!(set(&mut target, "", true));
        assert_eq!(target, Json::Boolean(true));

        let mut target = read("[1]");
        assert!(insert(&mut target, "/", 5.0));
        assert_eq!(target, Json::Number(5.0));
    }

    #[test]
    fn test_remove_rejects_root() {
        let mut target = read(r#"{"a": 1}"#);
        assert!(!remove(&mut target, ""));
        assert!(!remove(&mut target, "/"));
        assert_eq!(target, read(r#"{"a": 1}"#));
    }

    #[test]
    fn test_set_grows_array_with_nulls() {
        let mut target = read(r#"{"a": [1]}"#);
        assert!(set(&mut target, "/a/3", 4.0));
        assert_eq!(target, read(r#"{"a": [1, null, null, 4]}"#));
    }

    #[test]
    fn test_set_on_object_parent_reports_success() {
        let mut target = read(r#"{"a": {"b": 1}}"#);
        assert!(try_set(&mut target, "/a/b", 2.0).is_ok());
        assert_eq!(target, read(r#"{"a": {"b": 2}}"#));
    }

    #[test]
    fn test_unresolved_parent_fails() {
        let mut target = read(r#"{"a": 1}"#);
        assert!(matches!(
            try_set(&mut target, "/missing/b", 1.0),
            Err(PatchError::UnresolvedPath { .. })
        ));
        assert_eq!(target, read(r#"{"a": 1}"#));
    }

    #[test]
    fn test_scalar_parent_fails() {
        let mut target = read(r#"{"a": 1}"#);
        assert!(matches!(
            try_set(&mut target, "/a/b", 2.0),
            Err(PatchError::NotAContainer { .. })
        ));
        assert!(matches!(
            try_remove(&mut target, "/a/b"),
            Err(PatchError::NotAContainer { .. })
        ));
    }

    #[test]
    fn test_array_leaf_must_be_an_index() {
        let mut target = read("[1, 2]");
        assert!(matches!(
            try_set(&mut target, "/x", 0.0),
            Err(PatchError::InvalidIndex { .. })
        ));
        assert!(matches!(
            try_insert(&mut target, "/-1", 0.0),
            Err(PatchError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn test_remove_erases_every_duplicate() {
        let mut target = read(r#"{"k": 1, "k": 2, "other": 3}"#);
        assert!(remove(&mut target, "/k"));
        assert_eq!(target.len(), 1);
        assert!(!remove(&mut target, "/k"));
    }

    #[test]
    fn test_apply_requires_op_path_and_value() {
        let mut target = read("{}");
        assert!(matches!(
            try_apply(&mut target, &read(r#"{"path": "/a"}"#)),
            Err(PatchError::MissingField { field: "op" })
        ));
        assert!(matches!(
            try_apply(&mut target, &read(r#"{"op": "set"}"#)),
            Err(PatchError::MissingField { field: "path" })
        ));
        assert!(matches!(
            try_apply(&mut target, &read(r#"{"op": "set", "path": "/a"}"#)),
            Err(PatchError::MissingField { field: "value" })
        ));
        assert!(target.is_empty());
    }

    #[test]
    fn test_apply_rejects_unknown_op() {
        let mut target = read("{}");
        let patch = read(r#"{"op": "merge", "path": "/a", "value": 1}"#);
        assert!(matches!(
            try_apply(&mut target, &patch),
            Err(PatchError::UnknownOp { .. })
        ));
        assert!(!apply(&mut target, &patch));
    }

    #[test]
    fn test_apply_dispatches_each_op() {
        let mut target = read(r#"{"a": [1, 2, 3]}"#);
        assert!(apply(&mut target, &read(r#"{"op": "set", "path": "/a/1", "value": 9}"#)));
        assert_eq!(target, read(r#"{"a": [1, 9, 3]}"#));
        assert!(apply(&mut target, &read(r#"{"op": "remove", "path": "/a/0"}"#)));
        assert_eq!(target, read(r#"{"a": [9, 3]}"#));
        assert!(apply(&mut target, &read(r#"{"op": "insert", "path": "/b", "value": "x"}"#)));
        assert_eq!(target, read(r#"{"a": [9, 3], "b": "x"}"#));
    }

    #[test]
    fn test_remove_ignores_value_field() {
        let mut target = read(r#"{"a": 1}"#);
        assert!(apply(&mut target, &read(r#"{"op": "remove", "path": "/a", "value": 7}"#)));
        assert!(target.is_empty());
    }
}
