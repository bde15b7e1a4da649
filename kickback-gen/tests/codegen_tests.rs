use std::collections::BTreeMap;

use expect_test::expect;
use kickback_gen::codegen::{emit_attributes, emit_node};
use kickback_gen::{EmitError, emit_source_unit, parse_display_model};
use kickback_model::{AttrValue, Attributes, EventBinding, TreeNode};

fn roots(entries: Vec<(&str, TreeNode)>) -> BTreeMap<String, TreeNode> {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn sample_tree() -> TreeNode {
    let mut style = Attributes::new();
    style.insert("color".into(), "red".into());
    let mut attrs = Attributes::new();
    attrs.insert("z".into(), AttrValue::Number(1.0));
    attrs.insert("a".into(), "x".into());
    attrs.insert("style".into(), AttrValue::Nested(style));
    attrs.insert("on".into(), true.into());

    TreeNode {
        id: "root".into(),
        element_kind: "div".into(),
        attributes: Some(attrs),
        report_events: Some(vec![
            EventBinding {
                prevent_default: true,
                ..EventBinding::new("click")
            },
            EventBinding::new("hover"),
        ]),
        children: Some(vec![TreeNode::text_node("hi"), TreeNode::default()]),
        ..TreeNode::default()
    }
}

#[test]
fn emits_complete_source_unit() {
    let out = emit_source_unit(
        "screens",
        &roots(vec![("index", sample_tree()), ("empty", TreeNode::default())]),
    )
    .unwrap();

    expect![[r#"
// Code generated by kickback. DO NOT EDIT.

pub mod screens {
    #![allow(non_upper_case_globals, unused_imports)]

    use kickback_model::*;
    use std::sync::LazyLock;

    pub static empty: LazyLock<TreeNode> = LazyLock::new(|| TreeNode::default());

    pub static index: LazyLock<TreeNode> = LazyLock::new(|| TreeNode {
        id: "root".into(),
        element_kind: "div".into(),
        attributes: Some(Attributes::from([
            (String::from("a"), AttrValue::String("x".into())),
            (String::from("on"), AttrValue::Bool(true)),
            (String::from("style"), AttrValue::Nested(Attributes::from([
                (String::from("color"), AttrValue::String("red".into())),
            ]))),
            (String::from("z"), AttrValue::Number(1.0)),
        ])),
        report_events: Some(vec![
            EventBinding {
                name: "click".into(),
                prevent_default: true,
                ..EventBinding::default()
            },
            EventBinding {
                name: "hover".into(),
                ..EventBinding::default()
            },
        ]),
        children: Some(vec![
            TreeNode {
                text: "hi".into(),
                ..TreeNode::default()
            },
            TreeNode::default(),
        ]),
        ..TreeNode::default()
    });
}
"#]]
    .assert_eq(&out);
}

#[test]
fn emission_is_deterministic() {
    let input = roots(vec![("a", sample_tree()), ("b", sample_tree())]);
    let first = emit_source_unit("screens", &input).unwrap();
    for _ in 0..16 {
        // rebuild the maps so HashMap iteration order is reshuffled
        let rebuilt = roots(vec![("b", sample_tree()), ("a", sample_tree())]);
        assert_eq!(emit_source_unit("screens", &rebuilt).unwrap(), first);
    }
}

#[test]
fn attribute_keys_are_sorted() {
    let mut forward = Attributes::new();
    forward.insert("z".into(), AttrValue::Number(1.0));
    forward.insert("a".into(), AttrValue::Number(2.0));
    let mut backward = Attributes::new();
    backward.insert("a".into(), AttrValue::Number(2.0));
    backward.insert("z".into(), AttrValue::Number(1.0));

    let out = emit_attributes(&forward, 0);
    assert_eq!(out, emit_attributes(&backward, 0));
    let a = out.find(r#"String::from("a")"#).unwrap();
    let z = out.find(r#"String::from("z")"#).unwrap();
    assert!(a < z);
}

#[test]
fn present_but_empty_collections_are_emitted() {
    let node = TreeNode {
        attributes: Some(Attributes::new()),
        report_events: Some(vec![]),
        children: Some(vec![]),
        ..TreeNode::default()
    };
    let out = emit_node(&node, 0);
    assert!(out.contains("attributes: Some(Attributes::new())"), "{out}");
    assert!(out.contains("report_events: Some(vec![])"), "{out}");
    assert!(out.contains("children: Some(vec![])"), "{out}");
}

#[test]
fn event_order_is_preserved() {
    let node = TreeNode {
        report_events: Some(vec![EventBinding::new("click"), EventBinding::new("hover")]),
        ..TreeNode::default()
    };
    let out = emit_node(&node, 0);
    let click = out.find(r#""click""#).unwrap();
    let hover = out.find(r#""hover""#).unwrap();
    assert!(click < hover);
    assert!(!out.contains("prevent_default"));
    assert!(!out.contains("stop_propagation"));
}

#[test]
fn single_leaf_has_exactly_kind_and_text() {
    let leaf = parse_display_model("<div>hi</div>").unwrap();
    let out = emit_node(&leaf, 0);
    assert_eq!(
        out,
        "TreeNode {\n    element_kind: \"div\".into(),\n    text: \"hi\".into(),\n    ..TreeNode::default()\n}"
    );
}

#[test]
fn nested_children_keep_order_and_content() {
    let tree = parse_display_model("<ul><li>one</li><li>two</li></ul>").unwrap();
    let out = emit_node(&tree, 0);
    expect![[r#"
        TreeNode {
            element_kind: "ul".into(),
            children: Some(vec![
                TreeNode {
                    element_kind: "li".into(),
                    text: "one".into(),
                    ..TreeNode::default()
                },
                TreeNode {
                    element_kind: "li".into(),
                    text: "two".into(),
                    ..TreeNode::default()
                },
            ]),
            ..TreeNode::default()
        }"#]]
    .assert_eq(&out);
}

#[test]
fn node_with_every_field_has_no_default_update() {
    let node = TreeNode {
        id: "x".into(),
        element_kind: "p".into(),
        text: "t".into(),
        attributes: Some(Attributes::new()),
        report_events: Some(vec![]),
        children: Some(vec![]),
    };
    assert!(!emit_node(&node, 0).contains("..TreeNode::default()"));
}

#[test]
fn special_strings_and_numbers_stay_valid_rust() {
    let mut attrs = Attributes::new();
    attrs.insert("quote\"key".into(), "line\nbreak \\ tab\t".into());
    attrs.insert("nan".into(), f64::NAN.into());
    attrs.insert("inf".into(), f64::INFINITY.into());
    attrs.insert("neg".into(), AttrValue::Number(-2.5));
    let node = TreeNode {
        text: "unicode ✓ and 'quotes'".into(),
        attributes: Some(attrs),
        ..TreeNode::default()
    };
    // emit_source_unit re-parses its output with syn
    let out = emit_source_unit("screens", &roots(vec![("tricky", node)])).unwrap();
    assert!(out.contains("AttrValue::Number(f64::NAN)"));
    assert!(out.contains("AttrValue::Number(f64::INFINITY)"));
    assert!(out.contains("AttrValue::Number(-2.5)"));
}

#[test]
fn empty_root_set_still_compiles() {
    let out = emit_source_unit("views", &BTreeMap::new()).unwrap();
    assert!(out.contains("pub mod views {"));
    assert!(!out.contains("pub static"));
}

#[test]
fn invalid_identifiers_are_rejected() {
    let err = emit_source_unit("my-package", &BTreeMap::new()).unwrap_err();
    assert_eq!(err, EmitError::InvalidIdentifier("my-package".into()));

    let err = emit_source_unit("screens", &roots(vec![("match", TreeNode::default())])).unwrap_err();
    assert_eq!(err, EmitError::InvalidIdentifier("match".into()));

    let err = emit_source_unit("screens", &roots(vec![("r#index", TreeNode::default())])).unwrap_err();
    assert_eq!(err, EmitError::InvalidIdentifier("r#index".into()));
}

#[test]
fn prelude_names_cannot_be_roots() {
    let tree = TreeNode {
        attributes: Some(Attributes::from([("x".to_string(), AttrValue::Bool(true))])),
        ..TreeNode::default()
    };
    for name in ["Some", "None", "Ok", "Err"] {
        let err = emit_source_unit("screens", &roots(vec![(name, tree.clone())])).unwrap_err();
        assert_eq!(err, EmitError::InvalidIdentifier(name.into()));
    }
}
