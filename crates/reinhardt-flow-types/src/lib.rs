//! Page tree types for reinhardt-flow.
//!
//! This crate provides the host tree that the control-flow components in
//! `reinhardt-flow-components` produce: elements, text, fragments and keyed
//! fragments, plus server-side rendering to HTML.
//!
//! ## Example
//!
//! ```
//! use reinhardt_flow_types::{IntoPage, Page, PageElement};
//!
//! let page = PageElement::new("ul")
//! 	.child(Page::keyed("a", PageElement::new("li").child("Alpha")))
//! 	.child(Page::keyed("b", PageElement::new("li").child("Beta")))
//! 	.into_page();
//!
//! assert_eq!(page.render_to_string(), "<ul><li>Alpha</li><li>Beta</li></ul>");
//! ```

#![warn(missing_docs)]

pub mod page;

pub use page::{
	IntoPage, KeyedFragment, Page, PageElement, PageError, PageKey, RenderOptions,
};
