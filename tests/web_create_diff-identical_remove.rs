#![cfg(target_arch = "wasm32")]

use vdom_patch::{builder::h, web::DomHost, Differ, VNode};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

static mut LOG_INITIALIZED: bool = false;

#[wasm_bindgen_test]
fn text() {
	test_create_diff_identical_remove(|| vec![VNode::text("Hello vdom-patch text!")], 1);
}

#[wasm_bindgen_test]
fn multi() {
	test_create_diff_identical_remove(
		|| vec![VNode::text("Hello vdom-patch"), VNode::text(" multiple "), VNode::text("nodes!")],
		3,
	);
}

#[wasm_bindgen_test]
fn keyed() {
	test_create_diff_identical_remove(
		|| {
			vec![
				h("span").key(0).with_text("Hello vdom-patch"),
				h("span").key(1).with_text(" keyed "),
				h("span").key(2).with_text(" nodes."),
			]
		},
		3,
	);
}

#[wasm_bindgen_test]
fn minimal_div() {
	test_create_diff_identical_remove(|| vec![h("div")], 1);
}

#[wasm_bindgen_test]
fn styled_div() {
	test_create_diff_identical_remove(|| vec![h("div#styled.a.b").style("color", "red").class("c", true).with_text("styled")], 1);
}

#[wasm_bindgen_test]
fn keyed_reorder() {
	init_log();
	let container = container();
	let mut differ = Differ::new(DomHost::for_node(&container));

	let list = |keys: &[i32]| h("div").children(keys.iter().map(|&key| h("b").key(key).with_text(key)).collect::<Vec<_>>());

	let vdom = differ.patch(differ.empty_node_at(container.clone()), list(&[1, 2, 3]));
	let before: Vec<web_sys::Node> = vdom.children.iter().flatten().map(|child| child.elm.clone().unwrap()).collect();

	let vdom = differ.patch(vdom, list(&[3, 1, 2]));
	let after: Vec<web_sys::Node> = vdom.children.iter().flatten().map(|child| child.elm.clone().unwrap()).collect();
	assert_eq!(after, vec![before[2].clone(), before[0].clone(), before[1].clone()]);
	assert_eq!(container.text_content().as_deref(), Some("312"));

	let _vdom = differ.patch(vdom, h("div"));
	assert_eq!(container.child_nodes().length(), 0);
	container.dyn_ref::<HtmlElement>().unwrap().remove();
}

#[wasm_bindgen_test]
fn container_sentinel_has_lower_case_tag() {
	init_log();
	let container = container();
	let mut differ = Differ::new(DomHost::for_node(&container));

	let sentinel = differ.empty_node_at(container.clone());
	assert_eq!(sentinel.tag.as_deref(), Some("div"));

	let vdom = differ.patch(sentinel, h("div").child(h("p").with_text("hydrated")));
	assert_eq!(vdom.elm.as_ref(), Some(&container));
	assert_eq!(container.text_content().as_deref(), Some("hydrated"));

	let _vdom = differ.patch(vdom, h("div"));
	container.dyn_ref::<HtmlElement>().unwrap().remove();
}

#[wasm_bindgen_test]
fn keyed_move_then_append() {
	init_log();
	let container = container();
	let mut differ = Differ::new(DomHost::for_node(&container));

	let list = |keys: &[i32]| h("div").children(keys.iter().map(|&key| h("b").key(key).with_text(key)).collect::<Vec<_>>());

	let vdom = differ.patch(differ.empty_node_at(container.clone()), list(&[1, 2, 3]));
	let vdom = differ.patch(vdom, list(&[3, 1, 2, 4]));
	assert_eq!(container.text_content().as_deref(), Some("3124"));

	let _vdom = differ.patch(vdom, h("div"));
	container.dyn_ref::<HtmlElement>().unwrap().remove();
}

fn test_create_diff_identical_remove(vdom: impl Fn() -> Vec<VNode<web_sys::Node>>, dom_len: u32) {
	init_log();
	let container = container();
	let mut differ = Differ::new(DomHost::for_node(&container));

	let first = differ.patch(differ.empty_node_at(container.clone()), h("div").children(vdom()));
	assert_eq!(container.child_nodes().length(), dom_len);
	let first_elms: Vec<web_sys::Node> = first.children.iter().flatten().map(|child| child.elm.clone().unwrap()).collect();

	let second = differ.patch(first, h("div").children(vdom()));
	assert_eq!(container.child_nodes().length(), dom_len);
	let second_elms: Vec<web_sys::Node> = second.children.iter().flatten().map(|child| child.elm.clone().unwrap()).collect();
	assert_eq!(first_elms, second_elms);

	let _third = differ.patch(second, h("div"));
	assert_eq!(container.child_nodes().length(), 0);
	container.dyn_ref::<HtmlElement>().unwrap().remove();
}

/// A fresh `<div>` appended to the body, isolated from the test runner's own content.
fn container() -> web_sys::Node {
	let document = window().unwrap().document().unwrap();
	let container: web_sys::Node = document.create_element("div").unwrap().into();
	document.body().unwrap().append_child(&container).unwrap();
	container
}

fn init_log() {
	unsafe {
		if !LOG_INITIALIZED {
			tracing_wasm::set_as_global_default();
			LOG_INITIALIZED = true;
		}
	}
}
