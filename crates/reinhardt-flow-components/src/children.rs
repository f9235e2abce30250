//! Render payloads shared by `Show` and `Match`.

use crate::key::KeyError;
use reinhardt_flow_types::{IntoPage, Page, PageKey};
use std::fmt;

/// Computes the remount key for a matched value.
pub(crate) type RemountFn<T> = fn(&T) -> Result<PageKey, KeyError>;

/// Content rendered when a condition holds.
///
/// Static content is returned as-is. A render function receives the matched
/// value and is called at most once.
pub enum Children<'a, T> {
	/// Content that does not depend on the matched value.
	Static(Page),
	/// Builds content from the matched value.
	Render(Box<dyn FnOnce(T) -> Page + 'a>),
}

impl<'a, T: 'a> Children<'a, T> {
	/// Creates static children.
	pub fn fixed(content: impl IntoPage) -> Self {
		Self::Static(content.into_page())
	}

	/// Creates children from a render function.
	pub fn render<F, R>(render: F) -> Self
	where
		F: FnOnce(T) -> R + 'a,
		R: IntoPage + 'a,
	{
		Self::Render(Box::new(move |value| render(value).into_page()))
	}

	/// Returns `true` when the children depend on the matched value.
	pub fn is_render(&self) -> bool {
		matches!(self, Children::Render(_))
	}
}

impl<T> fmt::Debug for Children<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Children::Static(page) => f.debug_tuple("Static").field(page).finish(),
			Children::Render(_) => f.debug_tuple("Render").field(&"<closure>").finish(),
		}
	}
}

/// Renders a payload for a value whose condition already holds.
///
/// With a remount function, function children are wrapped in a keyed
/// fragment. Static children ignore it.
pub(crate) fn render_payload<T>(
	value: T,
	children: Children<'_, T>,
	remount: Option<RemountFn<T>>,
) -> Page {
	let render = match children {
		Children::Static(page) => return page,
		Children::Render(render) => render,
	};

	let Some(remount) = remount else {
		return render(value);
	};

	match remount(&value) {
		Ok(key) => Page::keyed(key, render(value)),
		Err(error) => {
			tracing::warn!(%error, "cannot derive remount key, rendering unkeyed");
			render(value)
		}
	}
}
