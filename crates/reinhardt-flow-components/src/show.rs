//! Conditional rendering.

use crate::children::{Children, RemountFn, render_payload};
use crate::key::remount_key;
use crate::truthy::IntoCondition;
use reinhardt_flow_types::{IntoPage, Page};
use serde::Serialize;
use std::fmt;

/// Renders its children only when a condition is truthy, or an optional
/// fallback otherwise.
///
/// # Example
///
/// ```
/// use reinhardt_flow_components::Show;
/// use reinhardt_flow_types::{IntoPage, Page};
///
/// struct User {
/// 	name: &'static str,
/// }
///
/// let user = Some(User { name: "Ada" });
///
/// // Function children receive the unwrapped value
/// let page = Show::new(user.as_ref())
/// 	.fallback("Please log in")
/// 	.render_with(|user| format!("Welcome, {}", user.name))
/// 	.into_page();
/// assert_eq!(page.render_to_string(), "Welcome, Ada");
///
/// let page = Show::new(None::<&User>)
/// 	.fallback("Please log in")
/// 	.children(Page::text("dashboard"))
/// 	.into_page();
/// assert_eq!(page.render_to_string(), "Please log in");
/// ```
pub struct Show<'a, W: IntoCondition> {
	when: W,
	keyed: Option<RemountFn<W::Value>>,
	fallback: Option<Page>,
	children: Option<Children<'a, W::Value>>,
}

impl<'a, W> Show<'a, W>
where
	W: IntoCondition,
	W::Value: 'a,
{
	/// Creates a `Show` for the given condition.
	pub fn new(when: W) -> Self {
		Self {
			when,
			keyed: None,
			fallback: None,
			children: None,
		}
	}

	/// Remounts the rendered subtree whenever the condition value changes.
	///
	/// The result of function children is wrapped in a keyed fragment whose
	/// key is derived from the value (see [`remount_key`]). Static children
	/// are not affected.
	pub fn keyed(mut self) -> Self
	where
		W::Value: Serialize,
	{
		self.keyed = Some(remount_key::<W::Value>);
		self
	}

	/// Sets the content rendered when the condition is falsy.
	pub fn fallback(mut self, fallback: impl IntoPage) -> Self {
		self.fallback = Some(fallback.into_page());
		self
	}

	/// Sets static children.
	pub fn children(mut self, children: impl IntoPage) -> Self {
		self.children = Some(Children::fixed(children));
		self
	}

	/// Sets a render function receiving the truthy condition value.
	pub fn render_with<F, R>(mut self, render: F) -> Self
	where
		F: FnOnce(W::Value) -> R + 'a,
		R: IntoPage + 'a,
	{
		self.children = Some(Children::render(render));
		self
	}

	/// Evaluates the condition and renders the matching content.
	pub fn render(self) -> Page {
		match self.when.into_condition() {
			Some(value) => match self.children {
				Some(children) => render_payload(value, children, self.keyed),
				None => Page::Empty,
			},
			None => self.fallback.unwrap_or_default(),
		}
	}
}

impl<'a, W> IntoPage for Show<'a, W>
where
	W: IntoCondition,
	W::Value: 'a,
{
	fn into_page(self) -> Page {
		self.render()
	}
}

impl<W> fmt::Debug for Show<'_, W>
where
	W: IntoCondition + fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Show")
			.field("when", &self.when)
			.field("keyed", &self.keyed.is_some())
			.field("fallback", &self.fallback)
			.field("children", &self.children)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_flow_types::PageElement;
	use rstest::rstest;
	use serde_json::json;
	use std::cell::Cell;

	#[rstest]
	fn test_falsy_without_fallback_renders_nothing() {
		let page = Show::new(false).children("hidden").render();
		assert_eq!(page, Page::Empty);
	}

	#[rstest]
	#[case(Show::new(0).fallback("fallback").children("content").render())]
	#[case(Show::new(String::new()).fallback("fallback").children("content").render())]
	#[case(Show::new(None::<u32>).fallback("fallback").children("content").render())]
	fn test_falsy_renders_fallback(#[case] page: Page) {
		assert_eq!(page, Page::text("fallback"));
	}

	#[rstest]
	fn test_truthy_static_children_unchanged() {
		let children = PageElement::new("p").child("shown").into_page();
		let page = Show::new(true)
			.fallback("fallback")
			.children(children.clone())
			.render();
		assert_eq!(page, children);
	}

	#[rstest]
	fn test_function_children_called_once_with_value() {
		let calls = Cell::new(0);
		let page = Show::new(Some(41_u32))
			.render_with(|n| {
				calls.set(calls.get() + 1);
				(n + 1).to_string()
			})
			.render();
		assert_eq!(calls.get(), 1);
		assert_eq!(page.render_to_string(), "42");
	}

	#[rstest]
	fn test_function_children_not_called_when_falsy() {
		let calls = Cell::new(0);
		let page = Show::new(None::<u32>)
			.render_with(|n| {
				calls.set(calls.get() + 1);
				n.to_string()
			})
			.render();
		assert_eq!(calls.get(), 0);
		assert!(page.is_empty());
	}

	#[rstest]
	fn test_truthy_without_children_renders_nothing() {
		assert!(Show::new(true).render().is_empty());
	}

	#[rstest]
	fn test_keyed_primitive_uses_string_form() {
		let page = Show::new(Some("settings"))
			.keyed()
			.render_with(|route| route.to_string())
			.render();
		assert_eq!(page.key().map(|k| k.as_str()), Some("settings"));
		assert_eq!(page.render_to_string(), "settings");
	}

	#[rstest]
	fn test_keyed_object_uses_json_form() {
		let page = Show::new(json!({ "name": "Ada", "id": 1 }))
			.keyed()
			.render_with(|user| user["name"].as_str().unwrap_or_default().to_string())
			.render();
		assert_eq!(
			page.key().map(|k| k.as_str()),
			Some(r#"{"id":1,"name":"Ada"}"#)
		);
	}

	#[rstest]
	fn test_keyed_key_changes_with_value() {
		let render = |id: u32| Show::new(id).keyed().render_with(|id| id.to_string()).render();
		assert_ne!(render(1).key(), render(2).key());
		assert_eq!(render(1), render(1));
	}

	#[rstest]
	fn test_keyed_remounts_between_infinities() {
		let render = |value: f64| Show::new(value).keyed().render_with(|v| v.to_string()).render();
		let positive = render(f64::INFINITY);
		let negative = render(f64::NEG_INFINITY);
		assert_eq!(positive.key().map(|k| k.as_str()), Some("Infinity"));
		assert_eq!(negative.key().map(|k| k.as_str()), Some("-Infinity"));
	}

	#[rstest]
	fn test_keyed_ignored_for_static_children() {
		let page = Show::new(7_u8).keyed().children("static").render();
		assert_eq!(page, Page::text("static"));
	}

	#[rstest]
	fn test_unkeyed_function_result_is_not_wrapped() {
		let page = Show::new(7_u8).render_with(|n| n.to_string()).render();
		assert_eq!(page, Page::text("7"));
	}

	#[rstest]
	fn test_into_page_nests_in_elements() {
		let page = PageElement::new("div")
			.child(Show::new(true).children("yes"))
			.child(Show::new(false).children("no"))
			.into_page();
		assert_eq!(page.render_to_string(), "<div>yes</div>");
	}

	#[rstest]
	fn test_debug_output() {
		let show = Show::new(true).keyed().children("x");
		let debug = format!("{show:?}");
		assert!(debug.contains("keyed: true"));
		assert!(debug.contains("Static"));
	}
}
