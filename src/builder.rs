//! Terse construction of [`VNode`] trees.
//!
//! ```
//! use vdom_patch::{builder::h, memory::NodeId, VNode, Value};
//!
//! let vnode: VNode<NodeId> = h("ul#list.menu.dark")
//! 	.style("color", "red")
//! 	.children(vec![h("li").key(1).with_text("one"), h("li").key(2).with_text("two")]);
//!
//! assert_eq!(vnode.tag.as_deref(), Some("ul"));
//! assert_eq!(vnode.props.attributes["id"], Value::from("list"));
//! assert_eq!(vnode.props.attributes["className"], Value::from("menu dark"));
//! ```

use crate::vnode::{Key, VNode, Value};
use core::fmt::Display;

/// Parses `selector` (`tag#id.class1.class2`) into an element node.
///
/// The tag ends at the first `#` or `.`.
/// The id is stored as the `id` property, the classes joined with spaces as the `className` property.
#[must_use]
pub fn h<N>(selector: &str) -> VNode<N> {
	let tag_end = selector.find(|c: char| c == '#' || c == '.').unwrap_or(selector.len());
	let (tag, mut rest) = selector.split_at(tag_end);
	let mut vnode = VNode::element(tag);

	if let Some(id_and_classes) = rest.strip_prefix('#') {
		let id_end = id_and_classes.find('.').unwrap_or(id_and_classes.len());
		let (id, classes) = id_and_classes.split_at(id_end);
		vnode.props.attributes.insert("id".to_owned(), id.into());
		rest = classes;
	}

	if let Some(classes) = rest.strip_prefix('.') {
		vnode.props.attributes.insert("className".to_owned(), classes.replace('.', " ").into());
	}

	vnode
}

/// Creates a text leaf.
#[must_use]
pub fn text<N>(text: impl Display) -> VNode<N> {
	VNode::text(text.to_string())
}

impl<N> VNode<N> {
	#[must_use]
	pub fn key(mut self, key: impl Into<Key>) -> Self {
		self.key = Some(key.into());
		self
	}

	#[must_use]
	pub fn style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.props.style.insert(name.into(), value.into());
		self
	}

	#[must_use]
	pub fn class(mut self, name: impl Into<String>, on: bool) -> Self {
		self.props.class.insert(name.into(), on);
		self
	}

	/// Sets an arbitrary host property.
	#[must_use]
	pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props.attributes.insert(name.into(), value.into());
		self
	}

	/// Sets the text content. Strings and numbers are accepted.
	#[must_use]
	pub fn with_text(mut self, text: impl Display) -> Self {
		self.text = Some(text.to_string());
		self
	}

	/// Appends one child.
	#[must_use]
	pub fn child(mut self, child: impl Into<VNode<N>>) -> Self {
		self.children.get_or_insert_with(Vec::new).push(child.into());
		self
	}

	/// Appends children, converting strings and numbers into text leaves.
	#[must_use]
	pub fn children<C: Into<VNode<N>>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
		self.children.get_or_insert_with(Vec::new).extend(children.into_iter().map(Into::into));
		self
	}
}
