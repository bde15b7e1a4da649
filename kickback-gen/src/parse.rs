use std::collections::hash_map::Entry;

use kickback_model::{AttrValue, Attributes, EventBinding, TreeNode};
use pest::Parser;
use pest::iterators::Pair;

use crate::error::ParseError;

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
struct DisplayModelParser;

const ID_ATTR: &str = "id";
const EVENTS_ATTR: &str = "reportEvents";
const PREVENT_DEFAULT_FLAG: &str = "PD";
const STOP_PROPAGATION_FLAG: &str = "SP";

/// Parse one markup document into its root node.
///
/// - the tag name becomes `element_kind`, `id` becomes `id`
/// - `reportEvents="click:PD change:SP:target.value"` becomes the event list;
///   `PD`/`SP` set the propagation flags, other flags are extra values
/// - any other attribute is typed (`true`/`false`, numbers, strings);
///   dotted names (`style.color`) build nested structures
/// - an element without child elements takes its trimmed character data as
///   `text`; otherwise non-blank text runs become text-only children
pub fn parse_display_model(source: &str) -> Result<TreeNode, ParseError> {
    let mut pairs = DisplayModelParser::parse(Rule::document, source)?;
    let root = pairs
        .next()
        .and_then(|doc| doc.into_inner().find(|p| p.as_rule() == Rule::element))
        .ok_or_else(|| ParseError::at((1, 1), "document has no root element"))?;
    build_node(root)
}

enum Content {
    Text(String),
    Element(TreeNode),
}

fn build_node(element: Pair<Rule>) -> Result<TreeNode, ParseError> {
    let mut node = TreeNode::default();
    let mut attributes = Attributes::new();
    let mut seen_id = false;
    let mut content: Vec<Content> = Vec::new();

    for part in element.into_inner() {
        match part.as_rule() {
            // only the opening tag name is produced; the closing one is POPped
            Rule::name => node.element_kind = part.as_str().to_string(),
            Rule::attribute => {
                let pos = part.as_span().start_pos().line_col();
                let (name, value) = read_attribute(part)?;
                match name.as_str() {
                    ID_ATTR => {
                        if seen_id {
                            return Err(ParseError::at(pos, "duplicate attribute `id`"));
                        }
                        seen_id = true;
                        node.id = value;
                    }
                    EVENTS_ATTR => {
                        if node.report_events.is_some() {
                            return Err(ParseError::at(pos, "duplicate attribute `reportEvents`"));
                        }
                        let events = parse_report_events(&value).map_err(|m| ParseError::at(pos, m))?;
                        node.report_events = Some(events);
                    }
                    _ => insert_attribute(&mut attributes, &name, typed_value(value))
                        .map_err(|m| ParseError::at(pos, m))?,
                }
            }
            Rule::element => content.push(Content::Element(build_node(part)?)),
            Rule::chars => push_text(&mut content, part.as_str()),
            Rule::cdata => {
                let text = part.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                push_text(&mut content, text);
            }
            Rule::reference => {
                let pos = part.as_span().start_pos().line_col();
                let decoded = decode_reference(part.as_str())
                    .ok_or_else(|| ParseError::at(pos, format!("unknown entity `{}`", part.as_str())))?;
                push_text(&mut content, &decoded.to_string());
            }
            _ => {}
        }
    }

    if !attributes.is_empty() {
        node.attributes = Some(attributes);
    }

    let has_elements = content.iter().any(|c| matches!(c, Content::Element(_)));
    if has_elements {
        let mut children = Vec::with_capacity(content.len());
        for c in content {
            match c {
                Content::Element(child) => children.push(child),
                Content::Text(t) => {
                    let t = t.trim();
                    if !t.is_empty() {
                        children.push(TreeNode::text_node(t));
                    }
                }
            }
        }
        node.children = Some(children);
    } else if let Some(Content::Text(t)) = content.first() {
        node.text = t.trim().to_string();
    }

    Ok(node)
}

fn push_text(content: &mut Vec<Content>, s: &str) {
    if let Some(Content::Text(t)) = content.last_mut() {
        t.push_str(s);
    } else {
        content.push(Content::Text(s.to_string()));
    }
}

fn read_attribute(attr: Pair<Rule>) -> Result<(String, String), ParseError> {
    let mut name = String::new();
    let mut value = String::new();
    for part in attr.into_inner() {
        match part.as_rule() {
            Rule::name => name = part.as_str().to_string(),
            Rule::value => {
                let pos = part.as_span().start_pos().line_col();
                let raw = part.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                value = decode_entities(raw).map_err(|m| ParseError::at(pos, m))?;
            }
            _ => {}
        }
    }
    Ok((name, value))
}

fn parse_report_events(spec: &str) -> Result<Vec<EventBinding>, String> {
    let mut events = Vec::new();
    for binding in spec.split_whitespace() {
        let mut parts = binding.split(':');
        let name = parts.next().unwrap_or("");
        if name.is_empty() {
            return Err(format!("event binding `{binding}` has no name"));
        }
        let mut event = EventBinding::new(name);
        for flag in parts {
            match flag {
                PREVENT_DEFAULT_FLAG => event.prevent_default = true,
                STOP_PROPAGATION_FLAG => event.stop_propagation = true,
                "" => return Err(format!("event binding `{binding}` has an empty flag")),
                other => event.extra_values.push(other.to_string()),
            }
        }
        events.push(event);
    }
    Ok(events)
}

fn typed_value(raw: String) -> AttrValue {
    match raw.as_str() {
        "true" => AttrValue::Bool(true),
        "false" => AttrValue::Bool(false),
        s => match parse_number(s) {
            Some(n) => AttrValue::Number(n),
            None => AttrValue::String(raw),
        },
    }
}

/// Accepts `-?digits(.digits)?([eE][+-]?digits)?` with a finite value.
fn parse_number(s: &str) -> Option<f64> {
    let b = s.as_bytes();
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < b.len() && b[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > start
    };

    let mut i = 0;
    if b.first() == Some(&b'-') {
        i += 1;
    }
    if !digits(&mut i) {
        return None;
    }
    if b.get(i) == Some(&b'.') {
        i += 1;
        if !digits(&mut i) {
            return None;
        }
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(b.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !digits(&mut i) {
            return None;
        }
    }
    if i != b.len() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn insert_attribute(attributes: &mut Attributes, name: &str, value: AttrValue) -> Result<(), String> {
    let path: Vec<&str> = name.split('.').collect();
    if path.iter().any(|seg| seg.is_empty()) {
        return Err(format!("attribute `{name}` has an empty path segment"));
    }
    let Some((last, parents)) = path.split_last() else {
        return Err(format!("attribute `{name}` has no name"));
    };

    let mut map = attributes;
    for seg in parents {
        let entry = map
            .entry(seg.to_string())
            .or_insert_with(|| AttrValue::Nested(Attributes::new()));
        map = match entry {
            AttrValue::Nested(inner) => inner,
            _ => return Err(format!("attribute `{name}` nests under `{seg}`, which already holds a value")),
        };
    }
    match map.entry(last.to_string()) {
        Entry::Occupied(_) => Err(format!("duplicate attribute `{name}`")),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

fn decode_reference(reference: &str) -> Option<char> {
    let body = reference.strip_prefix('&')?.strip_suffix(';')?;
    match body {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

fn decode_entities(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let end = tail
            .find(';')
            .ok_or_else(|| format!("unterminated entity in `{raw}`"))?;
        let reference = &tail[..=end];
        let ch = decode_reference(reference).ok_or_else(|| format!("unknown entity `{reference}`"))?;
        out.push(ch);
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
