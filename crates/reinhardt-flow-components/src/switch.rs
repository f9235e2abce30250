//! Mutually exclusive branching.
//!
//! A [`Switch`] owns an ordered list of [`SwitchChild`] declarations. Each
//! render runs three steps:
//!
//! 1. **Scan**: children are classified by their [`BranchKind`] tag.
//! 2. **Decide**: [`Switch::decide`] picks the first `Match` whose condition
//!    holds, else the first `Fallback`, else the `fallback` prop.
//! 3. **Render**: only the selected declaration's content is rendered.
//!
//! Conditions are evaluated once, when a [`Match`] is declared. The render
//! step never re-checks them, so the decision made by `decide` is final for
//! the pass.

use crate::children::{Children, RemountFn, render_payload};
use crate::key::remount_key;
use crate::truthy::IntoCondition;
use reinhardt_flow_types::{IntoPage, Page};
use serde::Serialize;
use std::fmt;

/// Renders the first [`Match`] whose condition holds.
///
/// # Example
///
/// ```
/// use reinhardt_flow_components::{Fallback, Match, Switch};
/// use reinhardt_flow_types::IntoPage;
///
/// let route = "settings";
///
/// let page = Switch::new()
/// 	.child(Match::new(route == "home").children("Home"))
/// 	.child(Match::new(route == "settings").children("Settings"))
/// 	.child(Fallback::new("Not found"))
/// 	.into_page();
///
/// assert_eq!(page.render_to_string(), "Settings");
/// ```
#[derive(Debug, Default)]
pub struct Switch<'a> {
	children: Vec<SwitchChild<'a>>,
	fallback: Option<Page>,
}

/// The outcome of [`Switch::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
	/// The `Match` child at this position holds.
	Match(usize),
	/// No `Match` holds; the `Fallback` child at this position is used.
	Fallback(usize),
	/// No `Match` holds and there is no `Fallback` child; the `fallback` prop
	/// is used.
	Default,
	/// Nothing is rendered.
	Nothing,
}

/// Discriminant of a [`SwitchChild`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
	/// A conditional branch.
	Match,
	/// The "else" branch.
	Fallback,
	/// Anything else; ignored by `Switch`.
	Other,
}

/// A child declaration of a [`Switch`].
pub enum SwitchChild<'a> {
	/// A conditional branch.
	Match(MatchArm<'a>),
	/// The "else" branch.
	Fallback(Fallback),
	/// Arbitrary content. `Switch` never renders it.
	Other(Page),
}

impl SwitchChild<'_> {
	/// Returns the discriminant.
	pub fn kind(&self) -> BranchKind {
		match self {
			SwitchChild::Match(_) => BranchKind::Match,
			SwitchChild::Fallback(_) => BranchKind::Fallback,
			SwitchChild::Other(_) => BranchKind::Other,
		}
	}

	fn holds(&self) -> bool {
		matches!(self, SwitchChild::Match(arm) if arm.holds())
	}

	fn render_selected(self) -> Page {
		match self {
			SwitchChild::Match(arm) => arm.render(),
			SwitchChild::Fallback(fallback) => fallback.render(),
			SwitchChild::Other(_) => Page::Empty,
		}
	}
}

impl fmt::Debug for SwitchChild<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SwitchChild::Match(arm) => f.debug_tuple("Match").field(arm).finish(),
			SwitchChild::Fallback(fallback) => f.debug_tuple("Fallback").field(fallback).finish(),
			SwitchChild::Other(page) => f.debug_tuple("Other").field(page).finish(),
		}
	}
}

impl<'a, V: 'a> From<Match<'a, V>> for SwitchChild<'a> {
	fn from(arm: Match<'a, V>) -> Self {
		SwitchChild::Match(arm.into())
	}
}

impl From<Fallback> for SwitchChild<'_> {
	fn from(fallback: Fallback) -> Self {
		SwitchChild::Fallback(fallback)
	}
}

impl From<Page> for SwitchChild<'_> {
	fn from(page: Page) -> Self {
		SwitchChild::Other(page)
	}
}

impl<'a> Switch<'a> {
	/// Creates an empty `Switch`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a child declaration.
	pub fn child(mut self, child: impl Into<SwitchChild<'a>>) -> Self {
		self.children.push(child.into());
		self
	}

	/// Appends several child declarations.
	pub fn children<I>(mut self, children: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<SwitchChild<'a>>,
	{
		self.children.extend(children.into_iter().map(Into::into));
		self
	}

	/// Sets the content rendered when no `Match` holds and no `Fallback`
	/// child is declared.
	pub fn fallback(mut self, fallback: impl IntoPage) -> Self {
		self.fallback = Some(fallback.into_page());
		self
	}

	/// Returns the child declarations.
	pub fn declarations(&self) -> &[SwitchChild<'a>] {
		&self.children
	}

	/// Decides which declaration renders, without rendering anything.
	pub fn decide(&self) -> Selection {
		if let Some(position) = self.children.iter().position(SwitchChild::holds) {
			return Selection::Match(position);
		}
		if let Some(position) = self
			.children
			.iter()
			.position(|child| child.kind() == BranchKind::Fallback)
		{
			return Selection::Fallback(position);
		}
		if self.fallback.is_some() {
			Selection::Default
		} else {
			Selection::Nothing
		}
	}

	/// Renders the selected declaration.
	pub fn render(self) -> Page {
		let selection = self.decide();
		tracing::debug!(?selection, branches = self.children.len(), "switch selected");

		let Self {
			mut children,
			fallback,
		} = self;
		match selection {
			Selection::Match(position) | Selection::Fallback(position) => {
				children.swap_remove(position).render_selected()
			}
			Selection::Default => fallback.unwrap_or_default(),
			Selection::Nothing => Page::Empty,
		}
	}
}

impl IntoPage for Switch<'_> {
	fn into_page(self) -> Page {
		self.render()
	}
}

/// A conditional branch of a [`Switch`].
///
/// Outside a `Switch`, a `Match` renders its content when its own condition
/// holds and nothing otherwise.
///
/// # Example
///
/// ```
/// use reinhardt_flow_components::Match;
/// use reinhardt_flow_types::IntoPage;
///
/// let page = Match::new(Some(3))
/// 	.render_with(|n| format!("{n} unread"))
/// 	.into_page();
/// assert_eq!(page.render_to_string(), "3 unread");
/// ```
pub struct Match<'a, V> {
	value: Option<V>,
	keyed: Option<RemountFn<V>>,
	children: Option<Children<'a, V>>,
}

impl<'a, V: 'a> Match<'a, V> {
	/// Declares a branch for the given condition.
	///
	/// The condition is evaluated here, once.
	pub fn new<W>(when: W) -> Self
	where
		W: IntoCondition<Value = V>,
	{
		Self {
			value: when.into_condition(),
			keyed: None,
			children: None,
		}
	}

	/// Remounts the rendered subtree whenever the matched value changes.
	///
	/// Behaves like [`Show::keyed`](crate::Show::keyed).
	pub fn keyed(mut self) -> Self
	where
		V: Serialize,
	{
		self.keyed = Some(remount_key::<V>);
		self
	}

	/// Sets static children.
	pub fn children(mut self, children: impl IntoPage) -> Self {
		self.children = Some(Children::fixed(children));
		self
	}

	/// Sets a render function receiving the matched value.
	pub fn render_with<F, R>(mut self, render: F) -> Self
	where
		F: FnOnce(V) -> R + 'a,
		R: IntoPage + 'a,
	{
		self.children = Some(Children::render(render));
		self
	}

	/// Returns `true` when the condition holds.
	pub fn holds(&self) -> bool {
		self.value.is_some()
	}

	/// Renders the content if the condition holds.
	pub fn render(self) -> Page {
		match (self.value, self.children) {
			(Some(value), Some(children)) => render_payload(value, children, self.keyed),
			_ => Page::Empty,
		}
	}
}

impl<'a, V: 'a> IntoPage for Match<'a, V> {
	fn into_page(self) -> Page {
		self.render()
	}
}

impl<V> fmt::Debug for Match<'_, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Match")
			.field("holds", &self.value.is_some())
			.field("keyed", &self.keyed.is_some())
			.field("children", &self.children)
			.finish()
	}
}

/// A type-erased [`Match`], as stored by a [`Switch`].
pub struct MatchArm<'a> {
	inner: Box<dyn Branch + 'a>,
}

impl MatchArm<'_> {
	/// Returns `true` when the condition holds.
	pub fn holds(&self) -> bool {
		self.inner.holds()
	}

	/// Renders the content if the condition holds.
	pub fn render(self) -> Page {
		self.inner.render()
	}
}

impl<'a, V: 'a> From<Match<'a, V>> for MatchArm<'a> {
	fn from(arm: Match<'a, V>) -> Self {
		Self {
			inner: Box::new(arm),
		}
	}
}

impl fmt::Debug for MatchArm<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MatchArm")
			.field("holds", &self.holds())
			.finish()
	}
}

trait Branch {
	fn holds(&self) -> bool;

	fn render(self: Box<Self>) -> Page;
}

impl<'a, V: 'a> Branch for Match<'a, V> {
	fn holds(&self) -> bool {
		Match::holds(self)
	}

	fn render(self: Box<Self>) -> Page {
		Match::render(*self)
	}
}

/// The "else" branch of a [`Switch`].
///
/// Outside a `Switch` it renders its content unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fallback {
	content: Page,
}

impl Fallback {
	/// Creates a fallback branch.
	pub fn new(content: impl IntoPage) -> Self {
		Self {
			content: content.into_page(),
		}
	}

	/// Returns the content.
	pub fn content(&self) -> &Page {
		&self.content
	}

	/// Renders the content.
	pub fn render(self) -> Page {
		self.content
	}
}

impl IntoPage for Fallback {
	fn into_page(self) -> Page {
		self.render()
	}
}
