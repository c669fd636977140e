#![cfg(target_arch = "wasm32")]

use vdom_patch::{builder::h, load, web::DomHost, Differ};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn properties_styles_classes() {
	let document = window().unwrap().document().unwrap();
	let container: web_sys::Node = document.create_element("div").unwrap().into();
	document.body().unwrap().append_child(&container).unwrap();

	let mut differ = Differ::new(DomHost::new(document.clone()));

	let vdom = differ.patch(
		differ.empty_node_at(container.clone()),
		h("div").child(h("button#test-button.primary").prop("title", "Press").style("color", "red").with_text("Press me")),
	);

	let button: HtmlElement = document.get_element_by_id("test-button").unwrap().dyn_into().unwrap();
	assert_eq!(button.title(), "Press");
	assert_eq!(button.class_name(), "primary");
	assert_eq!(button.style().get_property_value("color").unwrap(), "red");

	let vdom = differ.patch(
		vdom,
		h("div").child(h("button#test-button").prop("title", "Pressed").style("color", "blue").class("active", true).with_text("Pressed")),
	);
	assert_eq!(button.title(), "Pressed");
	assert!(button.class_list().contains("primary"));
	assert!(button.class_list().contains("active"));
	assert_eq!(button.style().get_property_value("color").unwrap(), "blue");
	assert_eq!(button.text_content().as_deref(), Some("Pressed"));

	let _vdom = differ.patch(vdom, h("div"));
	assert!(document.get_element_by_id("test-button").is_none());
	container.dyn_ref::<HtmlElement>().unwrap().remove();
}

#[wasm_bindgen_test]
fn load_and_patch_existing_content() {
	let document = window().unwrap().document().unwrap();
	let container = document.create_element("div").unwrap();
	let existing: web_sys::Node = document.create_element("p").unwrap().into();
	existing.set_text_content(Some("server"));
	container.append_child(&existing).unwrap();
	document.body().unwrap().append_child(&container).unwrap();

	let old = load::load_element(&container);
	let children = old.children.as_ref().unwrap();
	assert_eq!(children.len(), 1);
	assert_eq!(children[0].tag.as_deref(), Some("p"));
	assert_eq!(children[0].elm.as_ref(), Some(&existing));

	let mut differ = Differ::new(DomHost::new(document));
	let vdom = differ.patch(old, h("div").child(h("p").with_text("client")));

	assert_eq!(vdom.children.as_ref().unwrap()[0].elm.as_ref(), Some(&existing));
	assert_eq!(existing.text_content().as_deref(), Some("client"));

	let _vdom = differ.patch(vdom, h("div"));
	assert_eq!(container.child_nodes().length(), 0);
	container.remove();
}
