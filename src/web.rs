//! A [`Host`] for the browser DOM, through [`web_sys`].

use crate::{host::Host, vnode::Value};
use js_sys::Reflect;
use tracing::error;
use wasm_bindgen::{throw_str, JsCast, JsValue};

/// Creates and mutates nodes in a given [***Document***](https://developer.mozilla.org/en-US/docs/Web/API/Document).
///
/// Style names are CSS property names (`background-color`, not `backgroundColor`).
/// Other properties are assigned as JavaScript properties on the node object, as with `node[name] = value`.
///
/// Failing DOM calls are logged as errors and otherwise ignored, except for failed element creation, which throws.
#[derive(Debug, Clone)]
pub struct DomHost {
	document: web_sys::Document,
}

impl DomHost {
	#[must_use]
	pub fn new(document: web_sys::Document) -> Self {
		Self { document }
	}

	/// Uses the document that owns `node`.
	///
	/// # Panics
	///
	/// Throws into JavaScript if `node` is a document itself.
	#[must_use]
	pub fn for_node(node: &web_sys::Node) -> Self {
		match node.owner_document() {
			Some(document) => Self::new(document),
			None => throw_str("vdom-patch: No owner document found for node."),
		}
	}

	#[must_use]
	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}
}

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// `element`'s tag as it's written in an [`h`](`crate::builder::h`) selector.
///
/// `tagName` is upper case for elements in the HTML namespace, so those are lower-cased. Other tags (like SVG's
/// `foreignObject`) are kept as they are.
#[must_use]
pub fn tag_name(element: &web_sys::Element) -> String {
	let tag = element.tag_name();
	if element.namespace_uri().as_deref() == Some(HTML_NAMESPACE) {
		tag.to_ascii_lowercase()
	} else {
		tag
	}
}

impl Host for DomHost {
	type Node = web_sys::Node;

	fn create_element(&mut self, tag: &str) -> web_sys::Node {
		match self.document.create_element(tag) {
			Ok(element) => element.into(),
			Err(error) => {
				error!("Failed to create element <{}>: {:?}", tag, error);
				throw_str("vdom-patch: Failed to create element.")
			}
		}
	}

	fn create_text_node(&mut self, text: &str) -> web_sys::Node {
		self.document.create_text_node(text).into()
	}

	fn create_fragment(&mut self) -> web_sys::Node {
		self.document.create_document_fragment().into()
	}

	fn append_child(&mut self, parent: &web_sys::Node, child: &web_sys::Node) {
		if let Err(error) = parent.append_child(child) {
			error!("Failed to append node: {:?}", error);
		}
	}

	fn insert_before(&mut self, parent: &web_sys::Node, child: &web_sys::Node, reference: Option<&web_sys::Node>) {
		if let Err(error) = parent.insert_before(child, reference) {
			error!("Failed to insert node: {:?}", error);
		}
	}

	fn remove_child(&mut self, parent: &web_sys::Node, child: &web_sys::Node) {
		if let Err(error) = parent.remove_child(child) {
			error!("Failed to remove node: {:?}", error);
		}
	}

	fn next_sibling(&self, node: &web_sys::Node) -> Option<web_sys::Node> {
		node.next_sibling()
	}

	fn tag_name(&self, node: &web_sys::Node) -> Option<String> {
		node.dyn_ref::<web_sys::Element>().map(tag_name)
	}

	fn set_property(&mut self, node: &web_sys::Node, name: &str, value: &Value) {
		let js_value = match value {
			Value::Str(value) => JsValue::from_str(value),
			Value::Number(value) => JsValue::from_f64(*value),
			Value::Bool(value) => JsValue::from_bool(*value),
		};
		if let Err(error) = Reflect::set(node.as_ref(), &JsValue::from_str(name), &js_value) {
			error!("Failed to set property {:?}: {:?}", name, error);
		}
	}

	fn set_style(&mut self, node: &web_sys::Node, name: &str, value: &str) {
		match node.dyn_ref::<web_sys::HtmlElement>() {
			Some(element) => {
				if let Err(error) = element.style().set_property(name, value) {
					error!("Failed to set style {:?}: {:?}", name, error);
				}
			}
			None => error!("Expected `web_sys::HtmlElement` to set style {:?} on but found {:?}. Ignoring.", name, node),
		}
	}

	fn add_class(&mut self, node: &web_sys::Node, name: &str) {
		match node.dyn_ref::<web_sys::Element>() {
			Some(element) => {
				if let Err(error) = element.class_list().add_1(name) {
					error!("Failed to add class {:?}: {:?}", name, error);
				}
			}
			None => error!("Expected `web_sys::Element` to add class {:?} to but found {:?}. Ignoring.", name, node),
		}
	}

	fn remove_class(&mut self, node: &web_sys::Node, name: &str) {
		match node.dyn_ref::<web_sys::Element>() {
			Some(element) => {
				if let Err(error) = element.class_list().remove_1(name) {
					error!("Failed to remove class {:?}: {:?}", name, error);
				}
			}
			None => error!("Expected `web_sys::Element` to remove class {:?} from but found {:?}. Ignoring.", name, node),
		}
	}

	fn set_text_content(&mut self, node: &web_sys::Node, text: &str) {
		node.set_text_content(Some(text));
	}
}
