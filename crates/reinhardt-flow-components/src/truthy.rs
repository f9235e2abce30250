//! Truthiness of condition values.
//!
//! `Show` and `Match` render only when their condition is truthy. The rules
//! are fixed per type:
//!
//! | Type | Falsy when |
//! |------|-----------|
//! | `bool` | `false` |
//! | integers | `0` |
//! | `f32` / `f64` | `0.0`, `-0.0` or `NaN` |
//! | `str` / `String` | empty |
//! | `Option<T>` | `None` |
//! | `()` | always |
//! | `serde_json::Value` | `null`, `false`, `0`, `""` |
//! | `Vec<T>`, slices, `char` | never |
//!
//! A numeric condition of zero or an empty string is therefore "no match".
//! `Some(value)` always holds, whatever `value` is: the option already says
//! whether something is present. Collections are truthy even when empty;
//! check `is_empty()` yourself when emptiness should hide content.

use serde_json::Value;
use std::rc::Rc;
use std::sync::Arc;

/// A value with a truthiness.
pub trait Truthy {
	/// Returns `true` when the value should count as a holding condition.
	fn is_truthy(&self) -> bool;
}

/// Conversion of a condition into the value handed to render functions.
///
/// A truthy condition yields `Some(value)`, a falsy one `None`. For
/// `Option<T>` the yielded value is the inner `T`, so render functions never
/// see the nullable wrapper.
pub trait IntoCondition {
	/// The value passed to render functions when the condition holds.
	type Value;

	/// Evaluates the condition.
	fn into_condition(self) -> Option<Self::Value>;
}

impl Truthy for bool {
	fn is_truthy(&self) -> bool {
		*self
	}
}

macro_rules! impl_truthy_int {
	($($ty:ty),* $(,)?) => {
		$(
			impl Truthy for $ty {
				fn is_truthy(&self) -> bool {
					*self != 0
				}
			}
		)*
	};
}

impl_truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_truthy_float {
	($($ty:ty),* $(,)?) => {
		$(
			impl Truthy for $ty {
				fn is_truthy(&self) -> bool {
					*self != 0.0 && !self.is_nan()
				}
			}
		)*
	};
}

impl_truthy_float!(f32, f64);

impl Truthy for char {
	fn is_truthy(&self) -> bool {
		true
	}
}

impl Truthy for str {
	fn is_truthy(&self) -> bool {
		!self.is_empty()
	}
}

impl Truthy for String {
	fn is_truthy(&self) -> bool {
		!self.is_empty()
	}
}

impl Truthy for () {
	fn is_truthy(&self) -> bool {
		false
	}
}

impl<T> Truthy for [T] {
	fn is_truthy(&self) -> bool {
		true
	}
}

impl<T> Truthy for Vec<T> {
	fn is_truthy(&self) -> bool {
		true
	}
}

impl Truthy for Value {
	fn is_truthy(&self) -> bool {
		match self {
			Value::Null => false,
			Value::Bool(b) => *b,
			Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
			Value::String(s) => !s.is_empty(),
			Value::Array(_) | Value::Object(_) => true,
		}
	}
}

impl<T> Truthy for Option<T> {
	fn is_truthy(&self) -> bool {
		self.is_some()
	}
}

impl<T: Truthy + ?Sized> Truthy for &T {
	fn is_truthy(&self) -> bool {
		(**self).is_truthy()
	}
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
	fn is_truthy(&self) -> bool {
		(**self).is_truthy()
	}
}

impl<T: Truthy + ?Sized> Truthy for Rc<T> {
	fn is_truthy(&self) -> bool {
		(**self).is_truthy()
	}
}

impl<T: Truthy + ?Sized> Truthy for Arc<T> {
	fn is_truthy(&self) -> bool {
		(**self).is_truthy()
	}
}

impl<T> IntoCondition for Option<T> {
	type Value = T;

	fn into_condition(self) -> Option<T> {
		self
	}
}

macro_rules! impl_into_condition {
	($($ty:ty),* $(,)?) => {
		$(
			impl IntoCondition for $ty {
				type Value = $ty;

				fn into_condition(self) -> Option<$ty> {
					self.is_truthy().then_some(self)
				}
			}
		)*
	};
}

impl_into_condition!(
	bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
	String, Value, ()
);

impl<T> IntoCondition for Vec<T> {
	type Value = Vec<T>;

	fn into_condition(self) -> Option<Vec<T>> {
		Some(self)
	}
}

impl<'a, T: Truthy + ?Sized> IntoCondition for &'a T {
	type Value = &'a T;

	fn into_condition(self) -> Option<&'a T> {
		self.is_truthy().then_some(self)
	}
}

impl<T: Truthy + ?Sized> IntoCondition for Box<T> {
	type Value = Box<T>;

	fn into_condition(self) -> Option<Box<T>> {
		self.is_truthy().then_some(self)
	}
}

impl<T: Truthy + ?Sized> IntoCondition for Rc<T> {
	type Value = Rc<T>;

	fn into_condition(self) -> Option<Rc<T>> {
		self.is_truthy().then_some(self)
	}
}

impl<T: Truthy + ?Sized> IntoCondition for Arc<T> {
	type Value = Arc<T>;

	fn into_condition(self) -> Option<Arc<T>> {
		self.is_truthy().then_some(self)
	}
}
