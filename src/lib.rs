//! # Reinhardt Flow
//!
//! Declarative control-flow components for building page trees.
//!
//! - [`For`](components::For): renders one keyed fragment per list item
//! - [`Show`](components::Show): renders content when a condition is truthy
//! - [`Switch`](components::Switch) / [`Match`](components::Match) /
//!   [`Fallback`](components::Fallback): renders the first matching branch
//!
//! Components produce a [`Page`](types::Page) tree that renders to HTML on
//! the server. List items carry stable keys so a client-side reconciler can
//! preserve identity across renders.
//!
//! ## Crates
//!
//! - [`types`]: the page tree, keys and server-side rendering
//! - [`components`]: the control-flow components, key generation and settings
//!
//! ## Quick Example
//!
//! ```
//! use reinhardt_flow::prelude::*;
//!
//! #[derive(Serialize)]
//! struct Todo {
//! 	id: u32,
//! 	title: &'static str,
//! }
//!
//! let todos = vec![Todo { id: 1, title: "Write docs" }];
//!
//! let page = PageElement::new("ul")
//! 	.child(
//! 		For::new(&todos)
//! 			.fallback("Nothing to do")
//! 			.render_with(|todo, _| PageElement::new("li").child(todo.title)),
//! 	)
//! 	.into_page();
//!
//! assert_eq!(page.render_to_string(), "<ul><li>Write docs</li></ul>");
//! assert_eq!(page.children()[0].child_keys()[0].as_str(), "1");
//! ```

#![warn(missing_docs)]

pub use reinhardt_flow_components as components;
pub use reinhardt_flow_types as types;

/// Commonly used types and components.
pub mod prelude {
	pub use reinhardt_flow_components::{
		Fallback, FlowSettings, For, IntoCondition, Match, Selection, Show, Switch, Truthy,
		generate_stable_key, remount_key,
	};
	pub use reinhardt_flow_types::{IntoPage, Page, PageElement, PageKey, RenderOptions};

	pub use serde::Serialize;
}
