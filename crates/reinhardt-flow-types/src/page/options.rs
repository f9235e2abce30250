//! Server-side rendering options.

/// Prefix of the comment opening a keyed fragment in SSR output.
pub const KEY_MARKER_START: &str = "rf-key:";

/// Comment closing a keyed fragment in SSR output.
pub const KEY_MARKER_END: &str = "/rf-key";

/// Options controlling [`Page::render_with`](super::Page::render_with).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
	/// Wraps every keyed fragment in `<!--rf-key:KEY-->` / `<!--/rf-key-->`
	/// comments so a hydrating client can recover sibling identity.
	pub key_markers: bool,
}

impl RenderOptions {
	/// Creates the default options (no key markers).
	pub fn new() -> Self {
		Self::default()
	}

	/// Enables or disables key markers.
	pub fn key_markers(mut self, enabled: bool) -> Self {
		self.key_markers = enabled;
		self
	}
}
