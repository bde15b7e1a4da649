use std::collections::HashMap;

/// Attribute mapping of a node. Keys carry no order.
pub type Attributes = HashMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    String(String),
    Bool(bool),
    Number(f64),
    Nested(Attributes),
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::String(v.to_string())
    }
}
impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::String(v)
    }
}
impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}
impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Number(v)
    }
}
impl From<Attributes> for AttrValue {
    fn from(v: Attributes) -> Self {
        AttrValue::Nested(v)
    }
}

/// A named event hook on a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventBinding {
    pub name: String,
    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub extra_values: Vec<String>,
}

impl EventBinding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One node of a UI element tree.
///
/// Empty strings stand for absent fields. `None` collections are absent,
/// `Some` of an empty collection is present but empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeNode {
    pub id: String,
    pub element_kind: String,
    pub text: String,
    pub attributes: Option<Attributes>,
    pub report_events: Option<Vec<EventBinding>>,
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn element(kind: impl Into<String>) -> Self {
        Self {
            element_kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.as_ref()?.get(key)
    }

    /// Children in order; empty when the list is absent.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn events(&self) -> &[EventBinding] {
        self.report_events.as_deref().unwrap_or(&[])
    }

    /// Depth-first, pre-order search for a node carrying `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&TreeNode> {
        if !id.is_empty() && self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find_by_id(id))
    }

    /// Number of levels in this tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(TreeNode::depth).max().unwrap_or(0)
    }
}
