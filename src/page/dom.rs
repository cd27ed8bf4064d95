use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData};
use std::cell::RefCell;
use std::rc::Rc;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

fn html_name(local: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(local))
}

/// Local tag name of an element, `None` for text/comment/document nodes.
pub fn tag_name(node: &Handle) -> Option<String> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref().to_string()),
        _ => None,
    }
}

pub fn is_element(node: &Handle, tag: &str) -> bool {
    match node.data {
        NodeData::Element { ref name, .. } => name.local.as_ref() == tag,
        _ => false,
    }
}

pub fn get_attr(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Set (or replace) an attribute. Non-element nodes are left alone.
pub fn set_attr(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|attr| attr.name.local.as_ref() == name) {
            Some(attr) => attr.value = StrTendril::from(value),
            None => attrs.push(Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                value: StrTendril::from(value),
            }),
        }
    }
}

pub fn classes(node: &Handle) -> Vec<String> {
    get_attr(node, "class")
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn has_class(node: &Handle, class: &str) -> bool {
    classes(node).iter().any(|c| c == class)
}

pub fn add_class(node: &Handle, class: &str) {
    let mut current = classes(node);
    if !current.iter().any(|c| c == class) {
        current.push(class.to_string());
        set_attr(node, "class", &current.join(" "));
    }
}

pub fn remove_class(node: &Handle, class: &str) {
    let current = classes(node);
    if current.iter().any(|c| c == class) {
        let kept: Vec<String> = current.into_iter().filter(|c| c != class).collect();
        set_attr(node, "class", &kept.join(" "));
    }
}

/// Add or remove `class` so that its presence matches `present`.
pub fn set_class(node: &Handle, class: &str, present: bool) {
    if present {
        add_class(node, class);
    } else {
        remove_class(node, class);
    }
}

/// Concatenated text of all descendant text nodes (DOM `textContent`).
pub fn text_content(node: &Handle) -> String {
    let mut output = String::new();
    collect_text(node, &mut output);
    output
}

fn collect_text(node: &Handle, output: &mut String) {
    match node.data {
        NodeData::Text { ref contents } => output.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, output);
            }
        }
    }
}

/// Replace all children of `node` with a single text node.
pub fn set_text(node: &Handle, text: &str) {
    let text_node = Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    });
    text_node.parent.set(Some(Rc::downgrade(node)));
    *node.children.borrow_mut() = vec![text_node];
}

pub fn create_element(tag: &str, attributes: &[(&str, &str)]) -> Handle {
    let attrs = attributes
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(*name)),
            value: StrTendril::from(*value),
        })
        .collect();

    Node::new(NodeData::Element {
        name: html_name(tag),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

pub fn parent_of(node: &Handle) -> Option<Handle> {
    // The parent cell is taken and put back since `Weak` is not `Copy`.
    let weak = node.parent.take()?;
    let parent = weak.upgrade();
    node.parent.set(Some(weak));
    parent
}

/// True when `node` is `ancestor` itself or lies somewhere below it.
pub fn is_inclusive_descendant(node: &Handle, ancestor: &Handle) -> bool {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if Rc::ptr_eq(&candidate, ancestor) {
            return true;
        }
        current = parent_of(&candidate);
    }
    false
}

/// Every element below `root` in document (pre-)order, `root` excluded.
pub fn descendant_elements(root: &Handle) -> Vec<Handle> {
    let mut output = Vec::new();
    collect_elements(root, &mut output);
    output
}

fn collect_elements(node: &Handle, output: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { .. } = child.data {
            output.push(child.clone());
        }
        collect_elements(child, output);
    }
}

/// First element below `root` carrying `class`.
pub fn find_by_class(root: &Handle, class: &str) -> Option<Handle> {
    descendant_elements(root)
        .into_iter()
        .find(|node| has_class(node, class))
}

pub fn find_by_id(root: &Handle, id: &str) -> Option<Handle> {
    descendant_elements(root)
        .into_iter()
        .find(|node| get_attr(node, "id").as_deref() == Some(id))
}

/// First element below `root` matching `#id` or `.class`; a bare name is a class.
pub fn select_first(root: &Handle, selector: &str) -> Option<Handle> {
    let selector = selector.trim();
    match selector.strip_prefix('#') {
        Some(id) => find_by_id(root, id),
        None => find_by_class(root, selector.strip_prefix('.').unwrap_or(selector)),
    }
}

pub fn find_by_tag(root: &Handle, tag: &str) -> Option<Handle> {
    descendant_elements(root)
        .into_iter()
        .find(|node| is_element(node, tag))
}
