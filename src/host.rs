//! The live tree that [`Differ`](`crate::Differ`) writes to.

use crate::vnode::Value;
use core::fmt::Debug;

/// Node creation, tree mutation and property access on a live host tree.
///
/// All tree mutations are scoped to a parent node and only ever reference host nodes.
///
/// Operations are infallible here. Implementations that can fail should log the failure and continue where possible.
pub trait Host {
	/// A cheap handle to a live node. Clones refer to the same node.
	type Node: Clone + Debug;

	fn create_element(&mut self, tag: &str) -> Self::Node;
	fn create_text_node(&mut self, text: &str) -> Self::Node;

	/// Creates a detached container.
	///
	/// Appending or inserting it moves all of its children into the target position (in order) and leaves it empty.
	fn create_fragment(&mut self) -> Self::Node;

	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

	/// Inserts (or moves) `child` into `parent` before `reference`, or at the end if `reference` is [`None`].
	fn insert_before(&mut self, parent: &Self::Node, child: &Self::Node, reference: Option<&Self::Node>);

	fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node);

	fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

	/// The node's tag name, or [`None`] if it's not an element.
	fn tag_name(&self, node: &Self::Node) -> Option<String>;

	fn set_property(&mut self, node: &Self::Node, name: &str, value: &Value);
	fn set_style(&mut self, node: &Self::Node, name: &str, value: &str);
	fn add_class(&mut self, node: &Self::Node, name: &str);
	fn remove_class(&mut self, node: &Self::Node, name: &str);

	/// Replaces an element's content with `text`, or the data of a text node.
	fn set_text_content(&mut self, node: &Self::Node, text: &str);
}
