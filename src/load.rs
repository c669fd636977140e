//! Describes existing DOM content as materialized [`VNode`]s, so that it can be patched instead of recreated.

use crate::{vnode::VNode, web::tag_name};
use tracing::{trace_span, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, Node, NodeList, Text};

/// Loads the [`VNode`]s of all element and text nodes in `child_nodes`.
///
/// Other nodes (like comments) are skipped with a warning.
/// They stay in the DOM, but aren't managed by the resulting tree.
#[must_use]
pub fn load_child_nodes(child_nodes: &NodeList) -> Vec<VNode<Node>> {
	(0..child_nodes.length())
		.filter_map(|i| child_nodes.item(i))
		.filter_map(|child| {
			if let Some(element) = child.dyn_ref::<Element>() {
				Some(load_element(element))
			} else if let Some(text) = child.dyn_ref::<Text>() {
				Some(load_text(text))
			} else {
				warn!("Skipping unrecognised child node: {:?}", child);
				None
			}
		})
		.collect()
}

/// Loads `element` and its content.
///
/// Properties, styles and classes are not loaded, so the first patch assigns all of the new tree's.
/// HTML tags are lower-cased, see [`tag_name`].
#[must_use]
pub fn load_element(element: &Element) -> VNode<Node> {
	let tag = tag_name(element);
	let span = trace_span!("Loading element", tag = tag.as_str());
	let _enter = span.enter();

	let node: &Node = element.as_ref();
	let mut vnode = VNode::element(tag);
	vnode.children = Some(load_child_nodes(&node.child_nodes()));
	vnode.elm = Some(node.clone());
	vnode
}

#[must_use]
pub fn load_text(text: &Text) -> VNode<Node> {
	let mut vnode = VNode::text(text.data());
	vnode.elm = Some(text.clone().into());
	vnode
}
