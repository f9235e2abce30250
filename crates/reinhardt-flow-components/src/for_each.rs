//! List rendering.

use crate::key::generate_stable_key;
use crate::settings::FlowSettings;
use reinhardt_flow_types::{IntoPage, Page, PageKey};
use serde::Serialize;
use std::fmt;

type KeyFn<'a, T> = Box<dyn FnMut(&T, usize) -> PageKey + 'a>;
type RenderItemFn<'a, T> = Box<dyn FnMut(T, usize) -> Page + 'a>;

/// Renders one keyed fragment per item of a list, or a fallback when the
/// list is absent or empty.
///
/// Items are keyed with [`generate_stable_key`] unless a key function is
/// given through [`For::key_by`] or [`For::with_key`].
///
/// # Example
///
/// ```
/// use reinhardt_flow_components::For;
/// use reinhardt_flow_types::{IntoPage, PageElement};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Todo {
/// 	id: u32,
/// 	title: &'static str,
/// }
///
/// let todos = vec![
/// 	Todo { id: 1, title: "Write docs" },
/// 	Todo { id: 2, title: "Ship it" },
/// ];
///
/// let list = PageElement::new("ul")
/// 	.child(
/// 		For::new(&todos)
/// 			.fallback("Nothing to do")
/// 			.render_with(|todo, _| PageElement::new("li").child(todo.title)),
/// 	)
/// 	.into_page();
///
/// assert_eq!(list.render_to_string(), "<ul><li>Write docs</li><li>Ship it</li></ul>");
/// ```
pub struct For<'a, T> {
	items: Vec<T>,
	fallback: Option<Page>,
	key: KeyFn<'a, T>,
	render: Option<RenderItemFn<'a, T>>,
	warn_on_duplicates: bool,
}

impl<'a, T: 'a> For<'a, T> {
	/// Creates a `For` over `items`, keyed by [`generate_stable_key`].
	pub fn new(items: impl IntoIterator<Item = T>) -> Self
	where
		T: Serialize,
	{
		Self::with_key(items, |item: &T, index| generate_stable_key(item, index))
	}

	/// Creates a `For` over an optional list. `None` behaves like an empty list.
	pub fn from_option<I>(items: Option<I>) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Serialize,
	{
		Self::new(items.into_iter().flatten())
	}

	/// Creates a `For` keyed by `key`, for item types that are not
	/// serializable.
	pub fn with_key<F, K>(items: impl IntoIterator<Item = T>, key: F) -> Self
	where
		F: FnMut(&T, usize) -> K + 'a,
		K: Into<PageKey> + 'a,
	{
		Self {
			items: items.into_iter().collect(),
			fallback: None,
			key: Self::boxed_key(key),
			render: None,
			warn_on_duplicates: FlowSettings::default().keys.warn_on_duplicates,
		}
	}

	/// Replaces the key function.
	///
	/// Keys may be strings, string slices or integers. A slice borrowed from
	/// the item works when the items are themselves references
	/// (`For::new(&items)`); for owned items, return an owned `String`.
	pub fn key_by<F, K>(mut self, key: F) -> Self
	where
		F: FnMut(&T, usize) -> K + 'a,
		K: Into<PageKey> + 'a,
	{
		self.key = Self::boxed_key(key);
		self
	}

	/// Sets the content rendered when the list is empty.
	pub fn fallback(mut self, fallback: impl IntoPage) -> Self {
		self.fallback = Some(fallback.into_page());
		self
	}

	/// Sets the function rendering each item.
	///
	/// It is called exactly once per item and render, with the item and its
	/// position.
	pub fn render_with<F, R>(mut self, mut render: F) -> Self
	where
		F: FnMut(T, usize) -> R + 'a,
		R: IntoPage + 'a,
	{
		self.render = Some(Box::new(move |item, index| render(item, index).into_page()));
		self
	}

	/// Enables or disables the duplicate-key warning.
	pub fn warn_on_duplicates(mut self, enabled: bool) -> Self {
		self.warn_on_duplicates = enabled;
		self
	}

	/// Applies key settings.
	pub fn settings(self, settings: &FlowSettings) -> Self {
		self.warn_on_duplicates(settings.keys.warn_on_duplicates)
	}

	/// Returns the number of items.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns `true` when there is nothing to iterate.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Renders the list.
	pub fn render(self) -> Page {
		let Self {
			items,
			fallback,
			mut key,
			mut render,
			warn_on_duplicates,
		} = self;

		if items.is_empty() {
			return fallback.unwrap_or_default();
		}

		tracing::trace!(count = items.len(), "rendering list");

		let pages = items
			.into_iter()
			.enumerate()
			.map(|(index, item)| {
				let key = key(&item, index);
				let content = match render.as_mut() {
					Some(render) => render(item, index),
					None => Page::Empty,
				};
				Page::keyed(key, content)
			})
			.collect();
		let page = Page::Fragment(pages);

		if warn_on_duplicates {
			if let Err(error) = page.validate_sibling_keys() {
				tracing::warn!(%error, "list rendered with duplicate keys");
			}
		}

		page
	}

	fn boxed_key<F, K>(mut key: F) -> KeyFn<'a, T>
	where
		F: FnMut(&T, usize) -> K + 'a,
		K: Into<PageKey> + 'a,
	{
		Box::new(move |item: &T, index: usize| key(item, index).into())
	}
}

impl<'a, T: 'a> IntoPage for For<'a, T> {
	fn into_page(self) -> Page {
		self.render()
	}
}

impl<T: fmt::Debug> fmt::Debug for For<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("For")
			.field("items", &self.items)
			.field("fallback", &self.fallback)
			.field("key", &"<closure>")
			.field("render", &self.render.as_ref().map(|_| "<closure>"))
			.field("warn_on_duplicates", &self.warn_on_duplicates)
			.finish()
	}
}
