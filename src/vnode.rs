//! The declarative tree model.

use core::{
	convert::TryFrom,
	fmt::{self, Display, Formatter},
};
use std::collections::BTreeMap;

/// Stable sibling identity, used only to match old and new children across reorders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
	Int(i64),
	Str(String),
}

impl From<i64> for Key {
	fn from(key: i64) -> Self {
		Self::Int(key)
	}
}

impl From<i32> for Key {
	fn from(key: i32) -> Self {
		Self::Int(key.into())
	}
}

/// Indices beyond [`i64::MAX`] become [`Key::Str`], so distinct indices stay distinct keys.
impl From<usize> for Key {
	fn from(key: usize) -> Self {
		i64::try_from(key).map_or_else(|_| Self::Str(key.to_string()), Self::Int)
	}
}

impl From<&str> for Key {
	fn from(key: &str) -> Self {
		Self::Str(key.to_owned())
	}
}

impl From<String> for Key {
	fn from(key: String) -> Self {
		Self::Str(key)
	}
}

impl Display for Key {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Key::Int(key) => write!(f, "{}", key),
			Key::Str(key) => write!(f, "{:?}", key),
		}
	}
}

/// A primitive value assigned directly onto a host node property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Str(String),
	Number(f64),
	Bool(bool),
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Number(value.into())
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Str(value) => f.write_str(value),
			Value::Number(value) => write!(f, "{}", value),
			Value::Bool(value) => write!(f, "{}", value),
		}
	}
}

/// The properties bag of an element node.
///
/// `style` and `class` are diffed per entry against the previous bag.
/// Everything in `attributes` is assigned onto the host node on every patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
	/// CSS property name → value.
	pub style: BTreeMap<String, String>,
	/// Class name → presence.
	pub class: BTreeMap<String, bool>,
	/// Property name → value.
	pub attributes: BTreeMap<String, Value>,
}

impl Props {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}
}

/// A declarative tree node, either an element (`tag` is [`Some`]) or a text leaf.
///
/// `N` is the host's node handle type, see [`Host::Node`](`crate::host::Host::Node`).
///
/// If both `children` and `text` are set on an element, `children` take precedence when materializing.
/// Avoid this combination.
#[derive(Debug, Clone, PartialEq)]
pub struct VNode<N> {
	pub tag: Option<String>,
	pub key: Option<Key>,
	pub props: Props,
	pub children: Option<Vec<VNode<N>>>,
	pub text: Option<String>,
	/// The live host node, set once this [`VNode`] is materialized or patched.
	pub elm: Option<N>,
}

impl<N> VNode<N> {
	/// Creates an empty element node.
	#[must_use]
	pub fn element(tag: impl Into<String>) -> Self {
		Self {
			tag: Some(tag.into()),
			key: None,
			props: Props::default(),
			children: None,
			text: None,
			elm: None,
		}
	}

	/// Creates a text leaf.
	#[must_use]
	pub fn text(text: impl Into<String>) -> Self {
		Self {
			tag: None,
			key: None,
			props: Props::default(),
			children: None,
			text: Some(text.into()),
			elm: None,
		}
	}

	/// Wraps an existing host node without describing any of its content.
	///
	/// Patching this against a new tree with the same `tag` appends the new tree's children
	/// to the existing host node.
	#[must_use]
	pub fn empty_at(tag: Option<String>, elm: N) -> Self {
		Self {
			tag,
			key: None,
			props: Props::default(),
			children: Some(Vec::new()),
			text: None,
			elm: Some(elm),
		}
	}

	/// Whether `self` and `other` can be patched into each other in place.
	///
	/// Only `key` and `tag` are compared.
	#[must_use]
	pub fn is_same(&self, other: &Self) -> bool {
		self.key == other.key && self.tag == other.tag
	}

	#[must_use]
	pub fn is_text(&self) -> bool {
		self.tag.is_none()
	}

	#[must_use]
	pub fn is_materialized(&self) -> bool {
		self.elm.is_some()
	}
}

impl<N> From<&str> for VNode<N> {
	fn from(text: &str) -> Self {
		Self::text(text)
	}
}

impl<N> From<String> for VNode<N> {
	fn from(text: String) -> Self {
		Self::text(text)
	}
}

macro_rules! text_from_number {
	($($number:ty),*$(,)?) => {$(
		impl<N> From<$number> for VNode<N> {
			fn from(number: $number) -> Self {
				Self::text(number.to_string())
			}
		}
	)*};
}
text_from_number!(i32, i64, u32, u64, usize, f64);
