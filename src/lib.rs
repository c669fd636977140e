#![doc(html_root_url = "https://docs.rs/vdom-patch/0.1.0")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod builder;
mod diff;
pub mod host;
pub mod load;
pub mod memory;
mod props;
mod vnode;
pub mod web;

pub use diff::Differ;
pub use props::apply_props;
pub use vnode::{Key, Props, VNode, Value};
