#![cfg(target_arch = "wasm32")]

use vdom_patch::{builder::h, host::Host, web::DomHost, Differ, VNode};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, HtmlBodyElement};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn text() {
	test_create(VNode::text("Hello vdom-patch!"), "Hello vdom-patch!");
}

#[wasm_bindgen_test]
fn element_with_text() {
	test_create(h("p#create-text.greeting").with_text("Hello vdom-patch!"), "Hello vdom-patch!");
}

#[wasm_bindgen_test]
fn nested() {
	test_create(h("ul").children(vec![h("li").with_text("one"), h("li").with_text("two")]), "onetwo");
}

fn test_create(mut vdom: VNode<web_sys::Node>, expected_text: &str) {
	let body = window().unwrap().document().unwrap().body().unwrap().dyn_into::<HtmlBodyElement>().unwrap();
	let body: web_sys::Node = body.into();

	let mut differ = Differ::new(DomHost::for_node(&body));

	let elm = differ.materialize(&mut vdom);
	assert_eq!(vdom.elm.as_ref(), Some(&elm));
	assert_eq!(elm.parent_node(), None);

	differ.host_mut().append_child(&body, &elm);
	assert_eq!(elm.text_content().as_deref(), Some(expected_text));

	differ.host_mut().remove_child(&body, &elm);
}
