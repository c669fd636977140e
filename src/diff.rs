use crate::{
	host::Host,
	props::apply_props,
	vnode::{Key, Props, VNode},
};
use core::mem;
use hashbrown::{hash_map::Entry, HashMap};
use tracing::{instrument, trace, trace_span, warn};

/// Owns a [`Host`] and reconciles [`VNode`] trees against it.
///
/// # Correct Use
///
/// Each [`VNode`] passed to [`Differ::patch`] as `old` must have been materialized by this [`Differ`] (or be a
/// [`Differ::empty_node_at`] sentinel), and the host subtree it describes must not have been changed by anything else.
/// Sibling keys must be unique among the siblings that have one.
///
/// Violations aren't detected (except for some `debug_assertions`), and lead to an incorrect host tree.
#[derive(Debug)]
pub struct Differ<H: Host> {
	host: H,
}

impl<H: Host> Differ<H> {
	#[must_use]
	pub fn new(host: H) -> Self {
		Self { host }
	}

	#[must_use]
	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	#[must_use]
	pub fn into_host(self) -> H {
		self.host
	}

	/// Wraps an existing host node (for example a mount point that already has content) so that it can be the `old`
	/// side of [`Differ::patch`].
	#[must_use]
	pub fn empty_node_at(&self, elm: H::Node) -> VNode<H::Node> {
		VNode::empty_at(self.host.tag_name(&elm), elm)
	}

	/// Creates the host subtree for `vnode`, stores its root handle in `vnode.elm` and returns it.
	///
	/// The returned node is not attached to any parent.
	#[instrument(skip(self, vnode))]
	pub fn materialize(&mut self, vnode: &mut VNode<H::Node>) -> H::Node {
		debug_assert!(vnode.elm.is_none(), "Tried to materialize an already materialized `VNode`.");
		self.create(vnode)
	}

	fn create(&mut self, vnode: &mut VNode<H::Node>) -> H::Node {
		let elm = match &vnode.tag {
			Some(tag) => {
				let span = trace_span!("Creating element", tag = tag.as_str(), key = ?vnode.key);
				let _enter = span.enter();

				let elm = self.host.create_element(tag);
				apply_props(&mut self.host, &elm, &Props::default(), &vnode.props);
				if let Some(children) = &mut vnode.children {
					for child in children {
						let child_elm = self.create(child);
						self.host.append_child(&elm, &child_elm);
					}
				} else if let Some(text) = &vnode.text {
					self.host.set_text_content(&elm, text);
				}
				elm
			}
			None => {
				let text = vnode.text.as_deref().unwrap_or_default();
				if cfg!(feature = "dangerous-logging") {
					trace!(text, "Creating text node");
				} else {
					trace!("Creating text node");
				}
				self.host.create_text_node(text)
			}
		};
		vnode.elm = Some(elm.clone());
		elm
	}

	/// Reconciles `old` into `new`, moving the host node from `old` to `new` and updating it and its descendants.
	///
	/// `new` is returned with every node in it materialized. `old` is spent.
	///
	/// `old` must be materialized and [the same](`VNode::is_same`) as `new`.
	/// The latter is only checked with `debug_assertions`.
	/// If `old` isn't materialized, `new` is created instead, and its host node is not attached to any parent.
	#[instrument(skip(self, old, new))]
	pub fn patch(&mut self, old: VNode<H::Node>, mut new: VNode<H::Node>) -> VNode<H::Node> {
		debug_assert!(
			old.is_same(&new),
			"Tried to patch non-equivalent nodes: {:?}/{:?} -> {:?}/{:?}",
			old.tag,
			old.key,
			new.tag,
			new.key
		);
		self.patch_into(old, &mut new);
		new
	}

	/// Returns `false` iff `new` was created detached because `old` had no host node.
	fn patch_into(&mut self, old: VNode<H::Node>, new: &mut VNode<H::Node>) -> bool {
		let span = trace_span!("Patching", tag = ?new.tag, key = ?new.key);
		let _enter = span.enter();

		let elm = match old.elm {
			Some(elm) => elm,
			None => {
				warn!("Patched `VNode` wasn't materialized. Creating it instead.");
				self.create(new);
				return false;
			}
		};
		new.elm = Some(elm.clone());

		apply_props(&mut self.host, &elm, &old.props, &new.props);
		match &new.text {
			Some(text) => {
				if old.text.as_ref() != Some(text) {
					if cfg!(feature = "dangerous-logging") {
						trace!(text = text.as_str(), "Updating text content");
					} else {
						trace!("Updating text content");
					}
					self.host.set_text_content(&elm, text);
				}
			}
			None => self.update_children(&elm, old.children.unwrap_or_default(), new.children.as_deref_mut().unwrap_or_default()),
		}
		true
	}

	#[allow(clippy::too_many_lines)]
	fn update_children(&mut self, parent: &H::Node, old_children: Vec<VNode<H::Node>>, new_children: &mut [VNode<H::Node>]) {
		let span = trace_span!("Updating children", "old_children.len()" = old_children.len(), "new_children.len()" = new_children.len());
		let _enter = span.enter();

		let mut old: Vec<OldChild<H::Node>> = old_children.into_iter().map(OldChild::Pending).collect();

		// Half-open windows: `old_start..old_end`, `new_start..new_end`.
		// The host holds `new_children[..new_start]`, then the window's unvisited old nodes, then `new_children[new_end..]`.
		let (mut old_start, mut old_end) = (0, old.len());
		let (mut new_start, mut new_end) = (0, new_children.len());
		let mut key_to_old_index: Option<HashMap<Key, usize>> = None;

		while old_start < old_end && new_start < new_end {
			if old[old_start].is_consumed() {
				old_start += 1;
			} else if old[old_end - 1].is_consumed() {
				old_end -= 1;
			} else if old[old_start].is_same(&new_children[new_start]) {
				while old_start < old_end && new_start < new_end && old[old_start].is_same(&new_children[new_start]) {
					if let Some(old_vnode) = old[old_start].take_patched() {
						if !self.patch_into(old_vnode, &mut new_children[new_start]) {
							let reference = front_anchor(&old[old_start + 1..old_end], &new_children[new_end..]);
							if let Some(elm) = &new_children[new_start].elm {
								self.host.insert_before(parent, elm, reference.as_ref());
							}
						}
					}
					old_start += 1;
					new_start += 1;
				}
			} else if old[old_end - 1].is_same(&new_children[new_end - 1]) {
				if let Some(old_vnode) = old[old_end - 1].take_patched() {
					if !self.patch_into(old_vnode, &mut new_children[new_end - 1]) {
						let reference = new_children.get(new_end).and_then(|placed| placed.elm.clone());
						if let Some(elm) = &new_children[new_end - 1].elm {
							self.host.insert_before(parent, elm, reference.as_ref());
						}
					}
				}
				old_end -= 1;
				new_end -= 1;
			} else if old[old_start].is_same(&new_children[new_end - 1]) {
				trace!("Moving node right");
				if let Some(old_vnode) = old[old_start].take_patched() {
					self.patch_into(old_vnode, &mut new_children[new_end - 1]);
				}
				let reference = old[old_end - 1].elm().and_then(|elm| self.host.next_sibling(elm));
				if let Some(elm) = &new_children[new_end - 1].elm {
					self.host.insert_before(parent, elm, reference.as_ref());
				}
				old_start += 1;
				new_end -= 1;
			} else if old[old_end - 1].is_same(&new_children[new_start]) {
				trace!("Moving node left");
				if let Some(old_vnode) = old[old_end - 1].take_patched() {
					self.patch_into(old_vnode, &mut new_children[new_start]);
				}
				if let Some(elm) = &new_children[new_start].elm {
					self.host.insert_before(parent, elm, old[old_start].elm());
				}
				old_end -= 1;
				new_start += 1;
			} else {
				let key_to_old_index = key_to_old_index.get_or_insert_with(|| create_key_to_old_index(&old, old_start, old_end));
				let new_vnode = &mut new_children[new_start];

				let old_index = new_vnode.key.as_ref().and_then(|key| key_to_old_index.get(key).copied());
				// A key match with a different tag isn't reusable.
				let reused = match old_index {
					Some(i) if old[i].is_same(new_vnode) => old[i].consume(),
					_ => None,
				};

				match reused {
					Some(old_vnode) => {
						trace!(key = ?new_vnode.key, "Moving keyed node");
						self.patch_into(old_vnode, new_vnode);
					}
					None => {
						self.create(new_vnode);
					}
				}
				if let Some(elm) = &new_vnode.elm {
					self.host.insert_before(parent, elm, old[old_start].elm());
				}
				new_start += 1;
			}
		}

		if old_start >= old_end {
			if new_start < new_end {
				let span = trace_span!("Inserting remaining", count = new_end - new_start);
				let _enter = span.enter();

				let fragment = self.host.create_fragment();
				for new_vnode in &mut new_children[new_start..new_end] {
					let elm = self.create(new_vnode);
					self.host.append_child(&fragment, &elm);
				}
				// Everything from `new_end` on is already in place.
				let reference = new_children.get(new_end).and_then(|placed| placed.elm.as_ref());
				self.host.insert_before(parent, &fragment, reference);
			}
		} else if new_start >= new_end {
			let span = trace_span!("Removing remaining", count = old_end - old_start);
			let _enter = span.enter();

			for slot in &mut old[old_start..old_end] {
				if let Some(old_vnode) = slot.consume() {
					trace!(tag = ?old_vnode.tag, key = ?old_vnode.key, "Removing node");
					if let Some(elm) = &old_vnode.elm {
						self.host.remove_child(parent, elm);
					}
				}
			}
		}
	}
}

/// An old child position during `Differ::update_children`.
enum OldChild<N> {
	/// Not yet visited.
	Pending(VNode<N>),
	/// Patched in place. Only the host node is kept, as insertion anchor.
	Patched(N),
	/// Reused out of order through the key index, or removed.
	Consumed,
}

impl<N: Clone> OldChild<N> {
	fn is_consumed(&self) -> bool {
		matches!(self, OldChild::Consumed)
	}

	fn is_same(&self, new: &VNode<N>) -> bool {
		matches!(self, OldChild::Pending(old) if old.is_same(new))
	}

	fn elm(&self) -> Option<&N> {
		match self {
			OldChild::Pending(vnode) => vnode.elm.as_ref(),
			OldChild::Patched(elm) => Some(elm),
			OldChild::Consumed => None,
		}
	}

	/// Takes the pending [`VNode`] out, keeping its host node in place.
	fn take_patched(&mut self) -> Option<VNode<N>> {
		match mem::replace(self, OldChild::Consumed) {
			OldChild::Pending(vnode) => {
				if let Some(elm) = &vnode.elm {
					*self = OldChild::Patched(elm.clone());
				}
				Some(vnode)
			}
			other => {
				*self = other;
				None
			}
		}
	}

	/// Takes the pending [`VNode`] out, leaving this position [`OldChild::Consumed`].
	fn consume(&mut self) -> Option<VNode<N>> {
		match mem::replace(self, OldChild::Consumed) {
			OldChild::Pending(vnode) => Some(vnode),
			other => {
				*self = other;
				None
			}
		}
	}
}

/// The host node to insert before to land right after `new_children[..new_start]`,
/// given the unvisited rest of the old window and the already placed new tail.
fn front_anchor<N: Clone>(old_window: &[OldChild<N>], placed_tail: &[VNode<N>]) -> Option<N> {
	old_window
		.iter()
		.find_map(OldChild::elm)
		.or_else(|| placed_tail.first().and_then(|placed| placed.elm.as_ref()))
		.cloned()
}

fn create_key_to_old_index<N>(old: &[OldChild<N>], old_start: usize, old_end: usize) -> HashMap<Key, usize> {
	let mut map = HashMap::new();
	for (i, slot) in old.iter().enumerate().take(old_end).skip(old_start) {
		if let OldChild::Pending(VNode { key: Some(key), .. }) = slot {
			match map.entry(key.clone()) {
				Entry::Occupied(mut occupied) => {
					warn!(%key, "Duplicate sibling key. Only the last occurrence can be reused.");
					occupied.insert(i);
				}
				Entry::Vacant(vacant) => {
					vacant.insert(i);
				}
			}
		}
	}
	trace!("Indexed {} keyed old node(s).", map.len());
	map
}
