use crate::{host::Host, vnode::Props};
use tracing::trace;

/// Applies the difference between `old` and `new` onto `node`.
///
/// - A `style` entry is written if its value changed or it is new.
/// - A `class` entry is toggled if its presence changed or it is new (`false` entries that are new are removed).
/// - Every entry in `attributes` is assigned unconditionally.
///
/// Entries missing from `new` are left untouched on the host node.
/// Use [`Props::default()`] as `old` for a fresh node.
pub fn apply_props<H: Host + ?Sized>(host: &mut H, node: &H::Node, old: &Props, new: &Props) {
	for (name, value) in &new.style {
		if old.style.get(name) != Some(value) {
			if cfg!(feature = "dangerous-logging") {
				trace!(name = name.as_str(), value = value.as_str(), "Setting style");
			} else {
				trace!(name = name.as_str(), "Setting style");
			}
			host.set_style(node, name, value);
		}
	}

	for (name, &on) in &new.class {
		if old.class.get(name) != Some(&on) {
			trace!(name = name.as_str(), on, "Toggling class");
			if on {
				host.add_class(node, name);
			} else {
				host.remove_class(node, name);
			}
		}
	}

	for (name, value) in &new.attributes {
		if cfg!(feature = "dangerous-logging") {
			trace!(name = name.as_str(), %value, "Setting property");
		}
		host.set_property(node, name, value);
	}
}
