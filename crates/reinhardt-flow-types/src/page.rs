//! Page types for control-flow rendering.
//!
//! The `Page` enum is the tree every component in reinhardt-flow produces.
//! It can represent elements, text nodes, fragments, keyed fragments, or
//! nothing at all. Pages are plain values: two render passes over the same
//! inputs can be compared with `==`.
//!
//! ## Example
//!
//! ```
//! use reinhardt_flow_types::page::{IntoPage, Page, PageElement};
//!
//! let view = PageElement::new("div")
//! 	.attr("class", "container")
//! 	.child("Hello, World!")
//! 	.into_page();
//!
//! assert_eq!(view.render_to_string(), "<div class=\"container\">Hello, World!</div>");
//! ```

mod key;
mod options;
mod util;

pub use key::{KeyedFragment, PageError, PageKey};
pub use options::{KEY_MARKER_END, KEY_MARKER_START, RenderOptions};

use std::borrow::Cow;
use std::collections::HashMap;
use util::{comment_escape, html_escape};

/// A unified representation of renderable content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
	/// A DOM element.
	Element(PageElement),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple pages (no wrapper element).
	Fragment(Vec<Page>),
	/// A fragment carrying an identity key.
	Keyed(KeyedFragment),
	/// Renders nothing.
	#[default]
	Empty,
}

/// Represents a DOM element in the page tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
	/// The tag name (e.g., "div", "span").
	tag: Cow<'static, str>,
	/// HTML attributes.
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	/// Child pages.
	children: Vec<Page>,
	/// Whether this is a void element (no closing tag).
	is_void: bool,
}

impl PageElement {
	/// Creates a new element.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child page.
	pub fn child(mut self, child: impl IntoPage) -> Self {
		self.children.push(child.into_page());
		self
	}

	/// Adds multiple child pages.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_page()));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the child pages.
	pub fn child_pages(&self) -> &[Page] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Consumes the element and returns the children.
	pub fn into_children(self) -> Vec<Page> {
		self.children
	}
}

impl Page {
	/// Creates an element.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> PageElement {
		PageElement::new(tag)
	}

	/// Creates a text page.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_page()).collect())
	}

	/// Wraps `content` in a keyed fragment.
	pub fn keyed(key: impl Into<PageKey>, content: impl IntoPage) -> Self {
		Self::Keyed(KeyedFragment::new(key, content))
	}

	/// Creates an empty page.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Returns `true` for [`Page::Empty`].
	pub fn is_empty(&self) -> bool {
		matches!(self, Page::Empty)
	}

	/// Returns the key of a keyed fragment.
	pub fn key(&self) -> Option<&PageKey> {
		match self {
			Page::Keyed(keyed) => Some(keyed.key()),
			_ => None,
		}
	}

	/// Returns the direct children of this page.
	///
	/// Elements and fragments return their children, keyed fragments their
	/// single content page. Text and empty pages have no children.
	pub fn children(&self) -> &[Page] {
		match self {
			Page::Element(el) => el.child_pages(),
			Page::Fragment(children) => children,
			Page::Keyed(keyed) => std::slice::from_ref(keyed.content()),
			Page::Text(_) | Page::Empty => &[],
		}
	}

	/// Returns the keys of the direct children, in order.
	///
	/// Unkeyed children are skipped.
	pub fn child_keys(&self) -> Vec<&PageKey> {
		self.children().iter().filter_map(Page::key).collect()
	}

	/// Checks that keys are unique within every sibling group of the tree.
	///
	/// Returns the first duplicate found, in depth-first order.
	pub fn validate_keys(&self) -> Result<(), PageError> {
		self.validate_sibling_keys()?;
		self.children().iter().try_for_each(Page::validate_keys)
	}

	/// Checks that the direct children of this page carry unique keys.
	pub fn validate_sibling_keys(&self) -> Result<(), PageError> {
		let siblings = self.children();
		let mut seen: HashMap<&PageKey, usize> = HashMap::with_capacity(siblings.len());
		for (position, sibling) in siblings.iter().enumerate() {
			let Some(key) = sibling.key() else {
				continue;
			};
			if let Some(first) = seen.insert(key, position) {
				return Err(PageError::DuplicateKey {
					key: key.to_string(),
					first,
					second: position,
				});
			}
		}
		Ok(())
	}

	/// Renders the page to an HTML string.
	///
	/// Keyed fragments render their content only.
	pub fn render_to_string(&self) -> String {
		self.render_with(&RenderOptions::default())
	}

	/// Renders the page to an HTML string with the given options.
	pub fn render_with(&self, options: &RenderOptions) -> String {
		let mut output = String::new();
		self.render_inner(options, &mut output);
		output
	}

	fn render_inner(&self, options: &RenderOptions, output: &mut String) {
		match self {
			Page::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_pages() {
						child.render_inner(options, output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			Page::Text(text) => {
				output.push_str(&html_escape(text));
			}
			Page::Fragment(children) => {
				for child in children {
					child.render_inner(options, output);
				}
			}
			Page::Keyed(keyed) => {
				if options.key_markers {
					output.push_str("<!--");
					output.push_str(KEY_MARKER_START);
					output.push_str(&comment_escape(keyed.key().as_str()));
					output.push_str("-->");
					keyed.content().render_inner(options, output);
					output.push_str("<!--");
					output.push_str(KEY_MARKER_END);
					output.push_str("-->");
				} else {
					keyed.content().render_inner(options, output);
				}
			}
			Page::Empty => {}
		}
	}
}

/// Trait for types that can be converted into a Page.
///
/// This is the primary abstraction for renderable content. The control-flow
/// components implement it so they can be nested anywhere a page is expected.
pub trait IntoPage {
	/// Converts self into a Page.
	fn into_page(self) -> Page;
}

// Core implementations

impl IntoPage for Page {
	fn into_page(self) -> Page {
		self
	}
}

impl IntoPage for PageElement {
	fn into_page(self) -> Page {
		Page::Element(self)
	}
}

impl IntoPage for KeyedFragment {
	fn into_page(self) -> Page {
		Page::Keyed(self)
	}
}

impl IntoPage for String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self))
	}
}

impl IntoPage for &String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self.clone()))
	}
}

impl IntoPage for &'static str {
	fn into_page(self) -> Page {
		Page::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoPage> IntoPage for Option<T> {
	fn into_page(self) -> Page {
		match self {
			Some(v) => v.into_page(),
			None => Page::Empty,
		}
	}
}

impl<T: IntoPage> IntoPage for Vec<T> {
	fn into_page(self) -> Page {
		Page::Fragment(self.into_iter().map(|v| v.into_page()).collect())
	}
}

impl IntoPage for () {
	fn into_page(self) -> Page {
		Page::Empty
	}
}

// Tuple implementations for fragments

impl<A: IntoPage, B: IntoPage> IntoPage for (A, B) {
	fn into_page(self) -> Page {
		Page::Fragment(vec![self.0.into_page(), self.1.into_page()])
	}
}

impl<A: IntoPage, B: IntoPage, C: IntoPage> IntoPage for (A, B, C) {
	fn into_page(self) -> Page {
		Page::Fragment(vec![
			self.0.into_page(),
			self.1.into_page(),
			self.2.into_page(),
		])
	}
}
