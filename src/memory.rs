//! An in-memory [`Host`] that records every mutation.
//!
//! Useful for headless rendering and for asserting on exactly which host operations a patch issued.

use crate::{host::Host, vnode::Value};
use core::{fmt::Write as _, mem};
use std::collections::{BTreeMap, BTreeSet};
use tracing::error;

/// Handle of a node in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	Element(String),
	Text(String),
	Fragment,
}

/// One host operation, as issued through [`Host`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
	CreateElement { node: NodeId, tag: String },
	CreateTextNode { node: NodeId, text: String },
	CreateFragment { node: NodeId },
	AppendChild { parent: NodeId, child: NodeId },
	InsertBefore { parent: NodeId, child: NodeId, reference: Option<NodeId> },
	RemoveChild { parent: NodeId, child: NodeId },
	SetProperty { node: NodeId, name: String, value: Value },
	SetStyle { node: NodeId, name: String, value: String },
	AddClass { node: NodeId, name: String },
	RemoveClass { node: NodeId, name: String },
	SetTextContent { node: NodeId, text: String },
}

impl Mutation {
	/// Whether this is one of the creation operations.
	#[must_use]
	pub fn is_creation(&self) -> bool {
		matches!(self, Mutation::CreateElement { .. } | Mutation::CreateTextNode { .. } | Mutation::CreateFragment { .. })
	}
}

#[derive(Debug)]
struct NodeData {
	kind: NodeKind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	properties: BTreeMap<String, Value>,
	style: BTreeMap<String, String>,
	classes: BTreeSet<String>,
}

impl NodeData {
	fn new(kind: NodeKind) -> Self {
		Self {
			kind,
			parent: None,
			children: Vec::new(),
			properties: BTreeMap::new(),
			style: BTreeMap::new(),
			classes: BTreeSet::new(),
		}
	}
}

/// Arena-backed host tree. Nodes are never freed, so [`NodeId`]s stay valid for the host's lifetime.
#[derive(Debug, Default)]
pub struct MemoryHost {
	nodes: Vec<NodeData>,
	mutations: Vec<Mutation>,
}

impl MemoryHost {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a root element without logging a mutation.
	pub fn create_root(&mut self, tag: &str) -> NodeId {
		self.alloc(NodeKind::Element(tag.to_owned()))
	}

	/// All mutations since creation or the last [`MemoryHost::clear_mutations`].
	#[must_use]
	pub fn mutations(&self) -> &[Mutation] {
		&self.mutations
	}

	pub fn clear_mutations(&mut self) {
		self.mutations.clear()
	}

	#[must_use]
	pub fn kind(&self, node: NodeId) -> &NodeKind {
		&self.nodes[node.0].kind
	}

	#[must_use]
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.nodes[node.0].parent
	}

	#[must_use]
	pub fn children(&self, node: NodeId) -> &[NodeId] {
		&self.nodes[node.0].children
	}

	#[must_use]
	pub fn property(&self, node: NodeId, name: &str) -> Option<&Value> {
		self.nodes[node.0].properties.get(name)
	}

	#[must_use]
	pub fn style(&self, node: NodeId, name: &str) -> Option<&str> {
		self.nodes[node.0].style.get(name).map(String::as_str)
	}

	#[must_use]
	pub fn has_class(&self, node: NodeId, name: &str) -> bool {
		self.nodes[node.0].classes.contains(name)
	}

	/// Concatenated text of `node` and its descendants.
	#[must_use]
	pub fn text_content(&self, node: NodeId) -> String {
		match &self.nodes[node.0].kind {
			NodeKind::Text(text) => text.clone(),
			NodeKind::Element(_) | NodeKind::Fragment => self.children(node).iter().map(|&child| self.text_content(child)).collect(),
		}
	}

	/// A compact HTML-like rendering of `node`, for assertions.
	///
	/// Properties, styles and classes are not included. Text is not escaped.
	#[must_use]
	pub fn to_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		self.write_html(node, &mut html);
		html
	}

	fn write_html(&self, node: NodeId, html: &mut String) {
		match &self.nodes[node.0].kind {
			NodeKind::Text(text) => html.push_str(text),
			NodeKind::Fragment => {
				for &child in self.children(node) {
					self.write_html(child, html)
				}
			}
			NodeKind::Element(tag) => {
				write!(html, "<{}>", tag).ok();
				for &child in self.children(node) {
					self.write_html(child, html)
				}
				write!(html, "</{}>", tag).ok();
			}
		}
	}

	fn alloc(&mut self, kind: NodeKind) -> NodeId {
		self.nodes.push(NodeData::new(kind));
		NodeId(self.nodes.len() - 1)
	}

	fn detach(&mut self, node: NodeId) {
		if let Some(parent) = self.nodes[node.0].parent.take() {
			self.nodes[parent.0].children.retain(|&child| child != node);
		}
	}

	/// Inserts `child` (or, for a fragment, its children) into `parent` before `reference`.
	fn attach(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
		let moved = if self.nodes[child.0].kind == NodeKind::Fragment {
			let children = mem::take(&mut self.nodes[child.0].children);
			for &moved in &children {
				self.nodes[moved.0].parent = None;
			}
			children
		} else {
			self.detach(child);
			vec![child]
		};

		let mut index = match reference {
			None => self.nodes[parent.0].children.len(),
			Some(reference) => match self.nodes[parent.0].children.iter().position(|&c| c == reference) {
				Some(index) => index,
				None => {
					error!(?parent, ?reference, "Reference node is not a child of the parent. Appending instead.");
					self.nodes[parent.0].children.len()
				}
			},
		};
		for moved in moved {
			self.nodes[moved.0].parent = Some(parent);
			self.nodes[parent.0].children.insert(index, moved);
			index += 1;
		}
	}
}

impl Host for MemoryHost {
	type Node = NodeId;

	fn create_element(&mut self, tag: &str) -> NodeId {
		let node = self.alloc(NodeKind::Element(tag.to_owned()));
		self.mutations.push(Mutation::CreateElement { node, tag: tag.to_owned() });
		node
	}

	fn create_text_node(&mut self, text: &str) -> NodeId {
		let node = self.alloc(NodeKind::Text(text.to_owned()));
		self.mutations.push(Mutation::CreateTextNode { node, text: text.to_owned() });
		node
	}

	fn create_fragment(&mut self) -> NodeId {
		let node = self.alloc(NodeKind::Fragment);
		self.mutations.push(Mutation::CreateFragment { node });
		node
	}

	fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
		self.mutations.push(Mutation::AppendChild { parent: *parent, child: *child });
		self.attach(*parent, *child, None)
	}

	fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: Option<&NodeId>) {
		self.mutations.push(Mutation::InsertBefore {
			parent: *parent,
			child: *child,
			reference: reference.copied(),
		});
		self.attach(*parent, *child, reference.copied())
	}

	fn remove_child(&mut self, parent: &NodeId, child: &NodeId) {
		self.mutations.push(Mutation::RemoveChild { parent: *parent, child: *child });
		if self.nodes[child.0].parent == Some(*parent) {
			self.detach(*child)
		} else {
			error!(?parent, ?child, "Tried to remove a node from a parent it isn't a child of.");
		}
	}

	fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
		let parent = self.nodes[node.0].parent?;
		let siblings = &self.nodes[parent.0].children;
		let index = siblings.iter().position(|c| c == node)?;
		siblings.get(index + 1).copied()
	}

	fn tag_name(&self, node: &NodeId) -> Option<String> {
		match &self.nodes[node.0].kind {
			NodeKind::Element(tag) => Some(tag.clone()),
			NodeKind::Text(_) | NodeKind::Fragment => None,
		}
	}

	fn set_property(&mut self, node: &NodeId, name: &str, value: &Value) {
		self.mutations.push(Mutation::SetProperty {
			node: *node,
			name: name.to_owned(),
			value: value.clone(),
		});
		self.nodes[node.0].properties.insert(name.to_owned(), value.clone());
	}

	fn set_style(&mut self, node: &NodeId, name: &str, value: &str) {
		self.mutations.push(Mutation::SetStyle {
			node: *node,
			name: name.to_owned(),
			value: value.to_owned(),
		});
		self.nodes[node.0].style.insert(name.to_owned(), value.to_owned());
	}

	fn add_class(&mut self, node: &NodeId, name: &str) {
		self.mutations.push(Mutation::AddClass { node: *node, name: name.to_owned() });
		self.nodes[node.0].classes.insert(name.to_owned());
	}

	fn remove_class(&mut self, node: &NodeId, name: &str) {
		self.mutations.push(Mutation::RemoveClass { node: *node, name: name.to_owned() });
		self.nodes[node.0].classes.remove(name);
	}

	fn set_text_content(&mut self, node: &NodeId, text: &str) {
		self.mutations.push(Mutation::SetTextContent { node: *node, text: text.to_owned() });
		if let NodeKind::Text(data) = &mut self.nodes[node.0].kind {
			*data = text.to_owned();
			return;
		}

		for child in mem::take(&mut self.nodes[node.0].children) {
			self.nodes[child.0].parent = None;
		}
		if !text.is_empty() {
			let text_node = self.alloc(NodeKind::Text(text.to_owned()));
			self.attach(*node, text_node, None);
		}
	}
}
