//! Conversion of raw report JSON into a `ProfileTree`.
//!
//! The document is validated node by node in a single explicit-stack
//! pre-order walk. The first node that does not have the expected shape
//! aborts the whole conversion with `ProfileError::MalformedInput`
//! carrying that node's path; nothing partial is ever returned.

use super::schema::{NodeId, NodePath, ProfileNode, ProfileTree};
use crate::utils::config::ROOT_NAME;
use crate::utils::error::ProfileError;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Parse report text into a tree
///
/// **Public** - main entry point for parsing
///
/// A call tree nests two JSON levels (object + `children` array) per call
/// depth, so the recursion limit of `serde_json` is lifted and the
/// deserializer runs on a stack that grows on demand. The intermediate
/// `Value` is torn down iteratively afterwards.
///
/// # Errors
/// * `ProfileError::InvalidJson` - text is not JSON
/// * `ProfileError::MalformedInput` - JSON does not describe a call tree
pub fn parse_profile_str(text: &str) -> Result<ProfileTree, ProfileError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;

    let result = deserializer
        .end()
        .map_err(ProfileError::from)
        .and_then(|()| parse_profile_value(&value));

    dismantle(value);
    result
}

/// Drop a JSON value without recursing into its nesting
///
/// **Private** - `Value`'s own drop recurses once per level
fn dismantle(value: Value) {
    let mut stack = vec![value];

    while let Some(value) = stack.pop() {
        match value {
            Value::Array(items) => stack.extend(items),
            Value::Object(map) => stack.extend(map.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}

/// Convert an already-parsed JSON value into a tree
///
/// **Public** - used by `parse_profile_str` and by tests building documents with `json!`
pub fn parse_profile_value(value: &Value) -> Result<ProfileTree, ProfileError> {
    let root_path = NodePath::root();
    let root_obj = as_node_object(value, &root_path)?;
    let root = read_node(root_obj, &root_path, true)?;

    let mut tree = ProfileTree::new(root);

    // (json, parent id, path) in LIFO order; children pushed reversed so
    // siblings come off the stack left to right
    let mut stack: Vec<(&Value, NodeId, NodePath)> = Vec::new();
    push_children(&mut stack, root_obj, tree.root_id(), &root_path)?;

    while let Some((value, parent, path)) = stack.pop() {
        let obj = as_node_object(value, &path)?;
        let node = read_node(obj, &path, false)?;
        let id = tree.push_child(parent, node);
        push_children(&mut stack, obj, id, &path)?;
    }

    debug!("Parsed profile tree with {} nodes", tree.len());

    Ok(tree)
}

/// Queue the children of `obj` (if any) for conversion
///
/// **Private** - internal helper for parse_profile_value
fn push_children<'a>(
    stack: &mut Vec<(&'a Value, NodeId, NodePath)>,
    obj: &'a Map<String, Value>,
    id: NodeId,
    path: &NodePath,
) -> Result<(), ProfileError> {
    let Some(children) = children_array(obj, path)? else {
        return Ok(());
    };

    for (index, child) in children.iter().enumerate().rev() {
        stack.push((child, id, path.child(index)));
    }

    Ok(())
}

fn as_node_object<'a>(
    value: &'a Value,
    path: &NodePath,
) -> Result<&'a Map<String, Value>, ProfileError> {
    value.as_object().ok_or_else(|| {
        ProfileError::malformed(path, format!("expected a JSON object, found {}", kind(value)))
    })
}

fn children_array<'a>(
    obj: &'a Map<String, Value>,
    path: &NodePath,
) -> Result<Option<&'a Vec<Value>>, ProfileError> {
    match obj.get("children") {
        None => Ok(None),
        Some(Value::Array(children)) => Ok(Some(children)),
        Some(other) => Err(ProfileError::malformed(
            path,
            format!("field 'children' must be an array, found {}", kind(other)),
        )),
    }
}

/// Read the scalar fields of one node
///
/// **Private** - the root is allowed to omit everything except `total_time`
fn read_node(
    obj: &Map<String, Value>,
    path: &NodePath,
    is_root: bool,
) -> Result<ProfileNode, ProfileError> {
    let required = !is_root;

    let function_name = match obj.get("function_name") {
        Some(Value::String(name)) => name.clone(),
        None if is_root => ROOT_NAME.to_string(),
        None => return Err(missing(path, "function_name")),
        Some(other) => {
            return Err(ProfileError::malformed(
                path,
                format!("field 'function_name' must be a string, found {}", kind(other)),
            ))
        }
    };

    let function_source = match obj.get("function_source") {
        None | Some(Value::Null) => None,
        Some(Value::String(source)) if source.is_empty() => None,
        Some(Value::String(source)) => Some(source.clone()),
        Some(other) => {
            return Err(ProfileError::malformed(
                path,
                format!("field 'function_source' must be a string, found {}", kind(other)),
            ))
        }
    };

    let children = children_array(obj, path)?.map(|c| Vec::with_capacity(c.len()));

    Ok(ProfileNode {
        function_name,
        function_source,
        count: read_u64(obj, "count", path, required)?,
        total_time: read_u64(obj, "total_time", path, true)?,
        self_time: read_u64(obj, "self_time", path, required)?,
        children_time: read_u64(obj, "children_time", path, required)?,
        children,
    })
}

/// Read a non-negative integer field
///
/// **Private** - optional fields default to 0
fn read_u64(
    obj: &Map<String, Value>,
    field: &str,
    path: &NodePath,
    required: bool,
) -> Result<u64, ProfileError> {
    match obj.get(field) {
        None if required => Err(missing(path, field)),
        None => Ok(0),
        Some(value) => value.as_u64().ok_or_else(|| {
            ProfileError::malformed(
                path,
                format!(
                    "field '{}' must be a non-negative integer, found {}",
                    field, value
                ),
            )
        }),
    }
}

fn missing(path: &NodePath, field: &str) -> ProfileError {
    ProfileError::malformed(path, format!("missing required field '{}'", field))
}

/// JSON type name for error messages
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
