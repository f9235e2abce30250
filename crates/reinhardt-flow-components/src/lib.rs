//! Declarative control-flow components for reinhardt-flow.
//!
//! - [`For`]: one keyed fragment per list item, or a fallback for empty lists
//! - [`Show`]: content when a condition is truthy, or a fallback
//! - [`Switch`] with [`Match`] and [`Fallback`]: the first matching branch
//!
//! Every component implements [`IntoPage`](reinhardt_flow_types::IntoPage)
//! and can be nested anywhere a page is expected.
//!
//! ## Example
//!
//! ```
//! use reinhardt_flow_components::{Fallback, For, Match, Show, Switch};
//! use reinhardt_flow_types::{IntoPage, PageElement};
//!
//! let items = vec!["one", "two"];
//! let logged_in = true;
//!
//! let page = PageElement::new("main")
//! 	.child(Show::new(logged_in).children("Hello"))
//! 	.child(
//! 		PageElement::new("ul").child(
//! 			For::new(&items).render_with(|item, _| PageElement::new("li").child(*item)),
//! 		),
//! 	)
//! 	.child(
//! 		Switch::new()
//! 			.child(Match::new(items.is_empty()).children("empty"))
//! 			.child(Fallback::new("has items")),
//! 	)
//! 	.into_page();
//!
//! assert_eq!(
//! 	page.render_to_string(),
//! 	"<main>Hello<ul><li>one</li><li>two</li></ul>has items</main>"
//! );
//! ```

#![warn(missing_docs)]

pub mod children;
pub mod for_each;
pub mod key;
pub mod settings;
pub mod show;
pub mod switch;
pub mod truthy;

pub use children::Children;
pub use for_each::For;
pub use key::{KeyError, generate_stable_key, remount_key};
pub use settings::{FlowSettings, KeySettings, RenderSettings, SettingsError};
pub use show::Show;
pub use switch::{BranchKind, Fallback, Match, MatchArm, Selection, Switch, SwitchChild};
pub use truthy::{IntoCondition, Truthy};
