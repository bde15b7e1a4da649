use std::collections::BTreeMap;

use kickback_model::{AttrValue, Attributes, EventBinding, TreeNode};
use quote::quote;
use tracing::debug;

use crate::error::EmitError;
use crate::naming::{is_binding_name, is_identifier};

pub const GENERATED_HEADER: &str = "// Code generated by kickback. DO NOT EDIT.";

const INDENT: &str = "    ";
const TREE_NODE_FIELDS: usize = 6;
const EVENT_BINDING_FIELDS: usize = 4;

/// Compile named trees into one Rust source unit.
///
/// The unit holds a `pub mod <package>` with one `pub static <name>:
/// LazyLock<TreeNode>` per root, in the map's (lexicographic) order. Only
/// fields that differ from their defaults are written, attribute keys are
/// sorted, event and child order is kept. The same input always yields the
/// same bytes.
pub fn emit_source_unit(package: &str, roots: &BTreeMap<String, TreeNode>) -> Result<String, EmitError> {
    if !is_identifier(package) {
        return Err(EmitError::InvalidIdentifier(package.to_string()));
    }

    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\n");
    out.push_str(&format!("pub mod {package} {{\n"));
    out.push_str(&format!("{INDENT}#![allow(non_upper_case_globals, unused_imports)]\n\n"));
    out.push_str(&format!("{INDENT}use kickback_model::*;\n"));
    out.push_str(&format!("{INDENT}use std::sync::LazyLock;\n"));

    for (name, root) in roots {
        if !is_binding_name(name) {
            return Err(EmitError::InvalidIdentifier(name.clone()));
        }
        debug!(name = %name, "emitting tree");
        out.push_str(&format!(
            "\n{INDENT}pub static {name}: LazyLock<TreeNode> = LazyLock::new(|| {});\n",
            emit_node(root, 1)
        ));
    }
    out.push_str("}\n");

    syn::parse_file(&out).map_err(|e| EmitError::Invariant(e.to_string()))?;
    Ok(out)
}

/// Construction expression for `node`. The first line carries no
/// indentation, continuation lines are indented for nesting level `level`.
pub fn emit_node(node: &TreeNode, level: usize) -> String {
    let inner = level + 1;
    let mut fields = Vec::new();

    if !node.id.is_empty() {
        fields.push(format!("id: {}.into()", string_lit(&node.id)));
    }
    if !node.element_kind.is_empty() {
        fields.push(format!("element_kind: {}.into()", string_lit(&node.element_kind)));
    }
    if !node.text.is_empty() {
        fields.push(format!("text: {}.into()", string_lit(&node.text)));
    }
    if let Some(attributes) = &node.attributes {
        fields.push(format!("attributes: Some({})", emit_attributes(attributes, inner)));
    }
    if let Some(events) = &node.report_events {
        let items = events.iter().map(|e| emit_event(e, inner + 1)).collect();
        fields.push(format!("report_events: Some({})", emit_vec(items, inner)));
    }
    if let Some(children) = &node.children {
        let items = children.iter().map(|c| emit_node(c, inner + 1)).collect();
        fields.push(format!("children: Some({})", emit_vec(items, inner)));
    }

    struct_literal("TreeNode", fields, TREE_NODE_FIELDS, level)
}

pub fn emit_event(event: &EventBinding, level: usize) -> String {
    let mut fields = Vec::new();
    if !event.name.is_empty() {
        fields.push(format!("name: {}.into()", string_lit(&event.name)));
    }
    if event.prevent_default {
        fields.push("prevent_default: true".to_string());
    }
    if event.stop_propagation {
        fields.push("stop_propagation: true".to_string());
    }
    if !event.extra_values.is_empty() {
        let values: Vec<String> = event
            .extra_values
            .iter()
            .map(|v| format!("String::from({})", string_lit(v)))
            .collect();
        fields.push(format!("extra_values: vec![{}]", values.join(", ")));
    }
    struct_literal("EventBinding", fields, EVENT_BINDING_FIELDS, level)
}

/// Attribute map literal with keys in lexicographic order.
pub fn emit_attributes(attributes: &Attributes, level: usize) -> String {
    if attributes.is_empty() {
        return "Attributes::new()".to_string();
    }
    let mut entries: Vec<(&String, &AttrValue)> = attributes.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let pad = INDENT.repeat(level + 1);
    let mut out = String::from("Attributes::from([\n");
    for (key, value) in entries {
        out.push_str(&format!(
            "{pad}(String::from({}), {}),\n",
            string_lit(key),
            emit_value(value, level + 1)
        ));
    }
    out.push_str(&format!("{}])", INDENT.repeat(level)));
    out
}

fn emit_value(value: &AttrValue, level: usize) -> String {
    match value {
        AttrValue::String(s) => format!("AttrValue::String({}.into())", string_lit(s)),
        AttrValue::Bool(b) => format!("AttrValue::Bool({b})"),
        AttrValue::Number(n) => format!("AttrValue::Number({})", number_lit(*n)),
        AttrValue::Nested(m) => format!("AttrValue::Nested({})", emit_attributes(m, level)),
    }
}

fn struct_literal(ty: &str, fields: Vec<String>, total: usize, level: usize) -> String {
    if fields.is_empty() {
        return format!("{ty}::default()");
    }
    let pad = INDENT.repeat(level + 1);
    let mut out = format!("{ty} {{\n");
    let partial = fields.len() < total;
    for field in fields {
        out.push_str(&format!("{pad}{field},\n"));
    }
    if partial {
        out.push_str(&format!("{pad}..{ty}::default()\n"));
    }
    out.push_str(&format!("{}}}", INDENT.repeat(level)));
    out
}

/// `items` are expected to be rendered for `level + 1`.
fn emit_vec(items: Vec<String>, level: usize) -> String {
    if items.is_empty() {
        return "vec![]".to_string();
    }
    let pad = INDENT.repeat(level + 1);
    let mut out = String::from("vec![\n");
    for item in items {
        out.push_str(&format!("{pad}{item},\n"));
    }
    out.push_str(&format!("{}]", INDENT.repeat(level)));
    out
}

fn string_lit(s: &str) -> String {
    quote!(#s).to_string()
}

fn number_lit(n: f64) -> String {
    if n.is_nan() {
        "f64::NAN".to_string()
    } else if n == f64::INFINITY {
        "f64::INFINITY".to_string()
    } else if n == f64::NEG_INFINITY {
        "f64::NEG_INFINITY".to_string()
    } else {
        format!("{n:?}")
    }
}
