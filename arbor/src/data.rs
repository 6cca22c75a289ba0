//! Input payload: the hierarchical `{ name, children? }` record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One node of the input payload.
///
/// An absent or `null` `children` field deserializes to an empty vector, and
/// a node with no children is always a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default, deserialize_with = "nullable_children")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with the given children.
    pub fn with_children(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Append a child (builder style).
    pub fn child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }

    /// Depth of the deepest node below `self` (a leaf has height 0).
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Parse a JSON payload.
    ///
    /// Validation is done by hand rather than through `serde` so that errors
    /// name the offending node, e.g. `$.children[1].children[0]`.
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }

    /// Build a tree from an already parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Err(Error::MissingRoot);
        }
        node_from_value(value, "$")
    }
}

fn node_from_value(value: &Value, path: &str) -> Result<TreeNode> {
    let Some(object) = value.as_object() else {
        return Err(Error::invalid_node(
            path,
            format!("expected object, got {}", kind(value)),
        ));
    };

    let name = match object.get("name") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(Error::invalid_node(
                path,
                format!("name must be a string, got {}", kind(other)),
            ));
        }
        None => return Err(Error::invalid_node(path, "missing name")),
    };

    let children = match object.get("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| node_from_value(item, &format!("{path}.children[{i}]")))
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(Error::invalid_node(
                path,
                format!("children must be an array, got {}", kind(other)),
            ));
        }
    };

    Ok(TreeNode { name, children })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn nullable_children<'de, D>(deserializer: D) -> std::result::Result<Vec<TreeNode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<TreeNode>>::deserialize(deserializer)?.unwrap_or_default())
}
