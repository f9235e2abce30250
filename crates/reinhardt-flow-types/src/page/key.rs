//! Sibling keys and keyed fragments.

use super::{IntoPage, Page};
use std::borrow::Cow;
use std::fmt;

/// Identity key attached to a keyed fragment.
///
/// Keys are compared within a sibling group only. Key functions may produce
/// either strings or integers; integers are stored in their decimal form, so
/// `PageKey::from(1)` and `PageKey::from("1")` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageKey(Cow<'static, str>);

impl PageKey {
	/// Creates a key from any string-like value.
	pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
		Self(key.into())
	}

	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Consumes the key and returns the owned string.
	pub fn into_string(self) -> String {
		self.0.into_owned()
	}
}

impl fmt::Display for PageKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for PageKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<String> for PageKey {
	fn from(key: String) -> Self {
		Self(Cow::Owned(key))
	}
}

impl From<&String> for PageKey {
	fn from(key: &String) -> Self {
		Self(Cow::Owned(key.clone()))
	}
}

// Copies, so key functions may return borrows of the item they key.
// Use `PageKey::new` for a zero-copy `&'static str`.
impl From<&str> for PageKey {
	fn from(key: &str) -> Self {
		Self(Cow::Owned(key.to_owned()))
	}
}

impl From<Cow<'static, str>> for PageKey {
	fn from(key: Cow<'static, str>) -> Self {
		Self(key)
	}
}

macro_rules! impl_page_key_from_int {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for PageKey {
				fn from(key: $ty) -> Self {
					Self(Cow::Owned(key.to_string()))
				}
			}
		)*
	};
}

impl_page_key_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// A fragment carrying an identity key.
///
/// Keyed fragments render nothing of their own. The key tells the host which
/// subtree is which across render passes: a changed key discards the previous
/// subtree instead of reusing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedFragment {
	key: PageKey,
	content: Box<Page>,
}

impl KeyedFragment {
	/// Creates a keyed fragment around `content`.
	pub fn new(key: impl Into<PageKey>, content: impl IntoPage) -> Self {
		Self {
			key: key.into(),
			content: Box::new(content.into_page()),
		}
	}

	/// Returns the key.
	pub fn key(&self) -> &PageKey {
		&self.key
	}

	/// Returns the wrapped content.
	pub fn content(&self) -> &Page {
		&self.content
	}

	/// Consumes the fragment and returns its key and content.
	pub fn into_parts(self) -> (PageKey, Page) {
		(self.key, *self.content)
	}
}

/// Errors reported when inspecting a page tree.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
	/// Two keyed siblings share the same key.
	#[error("duplicate sibling key `{key}` at positions {first} and {second}")]
	DuplicateKey {
		/// The duplicated key.
		key: String,
		/// Position of the first sibling carrying the key.
		first: usize,
		/// Position of the second sibling carrying the key.
		second: usize,
	},
}
