//! Stable keys for list items and remount keys for keyed branches.
//!
//! Scalars are classified directly from their `Serialize` impl. Everything
//! else is lowered to a [`serde_json::Value`] and classified by shape:
//!
//! | Shape | Key |
//! |-------|-----|
//! | string / number / boolean | `{kind}-{value}-{index}` |
//! | object with an `id` member | string form of `id` (index ignored) |
//! | other object or array | `obj-{k:v\|k:v...}-{index}`, members sorted by name |
//! | anything else | `idx-{index}` |
//!
//! Numbers use the classic dynamic-value string form: `1.0` is `1`,
//! `1e-7` and `1e21` use exponent notation (`1e-7`, `1e+21`), and
//! non-finite floats are `NaN`, `Infinity` and `-Infinity`.
//!
//! The `idx-` fallback ties identity to position only and does not survive
//! reordering. Items that fail to serialize also land there; key generation
//! never fails.

use reinhardt_flow_types::PageKey;
use serde::Serialize;
use serde::ser::{self, Impossible};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Errors raised while computing a remount key.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
	/// The value could not be serialized.
	#[error("failed to serialize value for key: {0}")]
	Serialize(#[from] serde_json::Error),
}

/// Generates a stable key for a list item at `index`.
///
/// # Example
///
/// ```
/// use reinhardt_flow_components::key::generate_stable_key;
/// use serde_json::json;
///
/// assert_eq!(generate_stable_key(&1, 0), "number-1-0");
/// assert_eq!(generate_stable_key("1", 0), "string-1-0");
/// assert_eq!(generate_stable_key(&f64::INFINITY, 2), "number-Infinity-2");
/// assert_eq!(generate_stable_key(&json!({ "id": 7, "name": "a" }), 3), "7");
/// assert_eq!(generate_stable_key(&json!({ "b": 2, "a": 1 }), 1), "obj-a:1|b:2-1");
/// assert_eq!(generate_stable_key(&(), 4), "idx-4");
/// ```
pub fn generate_stable_key<T: Serialize + ?Sized>(item: &T, index: usize) -> String {
	match lower(item) {
		Ok(Lowered::Scalar(scalar)) => scalar_key(scalar, index),
		Ok(Lowered::Value(value)) => key_for_value(&value, index),
		Err(error) => {
			tracing::trace!(index, %error, "item is not serializable, using index key");
			index_key(index)
		}
	}
}

/// Computes the key that forces a keyed branch to remount when `value` changes.
///
/// Objects and arrays use their compact JSON form with object members
/// sorted by name at every level, so two maps with equal contents always
/// produce the same key whatever their insertion order. Other values use
/// their plain string form (`"abc"` → `abc`, `42` → `42`,
/// `f64::INFINITY` → `Infinity`).
pub fn remount_key<V: Serialize + ?Sized>(value: &V) -> Result<PageKey, KeyError> {
	let key = match lower(value)? {
		Lowered::Scalar(scalar) => scalar.into_string_form(),
		Lowered::Value(value @ (Value::Object(_) | Value::Array(_))) => {
			serde_json::to_string(&sorted(value))?
		}
		Lowered::Value(other) => string_form(&other),
	};
	Ok(PageKey::from(key))
}

enum Lowered {
	Scalar(Scalar),
	Value(Value),
}

enum Scalar {
	String(String),
	Number(String),
	Bool(bool),
	Null,
}

impl Scalar {
	fn into_string_form(self) -> String {
		match self {
			Scalar::String(s) | Scalar::Number(s) => s,
			Scalar::Bool(b) => b.to_string(),
			Scalar::Null => "null".to_string(),
		}
	}
}

fn lower<T: Serialize + ?Sized>(item: &T) -> Result<Lowered, serde_json::Error> {
	match item.serialize(ScalarSerializer) {
		Ok(scalar) => Ok(Lowered::Scalar(scalar)),
		Err(ScalarError::Compound) => serde_json::to_value(item).map(Lowered::Value),
		Err(ScalarError::Custom(message)) => Err(ser::Error::custom(message)),
	}
}

#[derive(Debug, thiserror::Error)]
enum ScalarError {
	#[error("value is not a scalar")]
	Compound,
	#[error("{0}")]
	Custom(String),
}

impl ser::Error for ScalarError {
	fn custom<T: fmt::Display>(msg: T) -> Self {
		ScalarError::Custom(msg.to_string())
	}
}

/// Captures scalars before JSON lowering, which maps non-finite floats to
/// `null`. Compound values report [`ScalarError::Compound`].
struct ScalarSerializer;

macro_rules! serialize_integers {
	($($method:ident: $ty:ty),* $(,)?) => {
		$(
			fn $method(self, v: $ty) -> Result<Scalar, ScalarError> {
				Ok(Scalar::Number(v.to_string()))
			}
		)*
	};
}

impl ser::Serializer for ScalarSerializer {
	type Ok = Scalar;
	type Error = ScalarError;
	type SerializeSeq = Impossible<Scalar, ScalarError>;
	type SerializeTuple = Impossible<Scalar, ScalarError>;
	type SerializeTupleStruct = Impossible<Scalar, ScalarError>;
	type SerializeTupleVariant = Impossible<Scalar, ScalarError>;
	type SerializeMap = Impossible<Scalar, ScalarError>;
	type SerializeStruct = Impossible<Scalar, ScalarError>;
	type SerializeStructVariant = Impossible<Scalar, ScalarError>;

	serialize_integers!(
		serialize_i8: i8,
		serialize_i16: i16,
		serialize_i32: i32,
		serialize_i64: i64,
		serialize_i128: i128,
		serialize_u8: u8,
		serialize_u16: u16,
		serialize_u32: u32,
		serialize_u64: u64,
		serialize_u128: u128,
	);

	fn serialize_bool(self, v: bool) -> Result<Scalar, ScalarError> {
		Ok(Scalar::Bool(v))
	}

	fn serialize_f32(self, v: f32) -> Result<Scalar, ScalarError> {
		Ok(Scalar::Number(float_form(v)))
	}

	fn serialize_f64(self, v: f64) -> Result<Scalar, ScalarError> {
		Ok(Scalar::Number(float_form(v)))
	}

	fn serialize_char(self, v: char) -> Result<Scalar, ScalarError> {
		Ok(Scalar::String(v.to_string()))
	}

	fn serialize_str(self, v: &str) -> Result<Scalar, ScalarError> {
		Ok(Scalar::String(v.to_string()))
	}

	fn serialize_bytes(self, _v: &[u8]) -> Result<Scalar, ScalarError> {
		Err(ScalarError::Compound)
	}

	fn serialize_none(self) -> Result<Scalar, ScalarError> {
		Ok(Scalar::Null)
	}

	fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Scalar, ScalarError> {
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<Scalar, ScalarError> {
		Ok(Scalar::Null)
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Result<Scalar, ScalarError> {
		Ok(Scalar::Null)
	}

	fn serialize_unit_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		variant: &'static str,
	) -> Result<Scalar, ScalarError> {
		Ok(Scalar::String(variant.to_string()))
	}

	fn serialize_newtype_struct<T: Serialize + ?Sized>(
		self,
		_name: &'static str,
		value: &T,
	) -> Result<Scalar, ScalarError> {
		value.serialize(self)
	}

	fn serialize_newtype_variant<T: Serialize + ?Sized>(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_value: &T,
	) -> Result<Scalar, ScalarError> {
		Err(ScalarError::Compound)
	}

	fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ScalarError> {
		Err(ScalarError::Compound)
	}

	fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ScalarError> {
		Err(ScalarError::Compound)
	}

	fn serialize_tuple_struct(
		self,
		_name: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleStruct, ScalarError> {
		Err(ScalarError::Compound)
	}

	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleVariant, ScalarError> {
		Err(ScalarError::Compound)
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, ScalarError> {
		Err(ScalarError::Compound)
	}

	fn serialize_struct(
		self,
		_name: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStruct, ScalarError> {
		Err(ScalarError::Compound)
	}

	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStructVariant, ScalarError> {
		Err(ScalarError::Compound)
	}
}

fn scalar_key(scalar: Scalar, index: usize) -> String {
	match scalar {
		Scalar::String(s) => format!("string-{s}-{index}"),
		Scalar::Number(n) => format!("number-{n}-{index}"),
		Scalar::Bool(b) => format!("boolean-{b}-{index}"),
		Scalar::Null => index_key(index),
	}
}

fn key_for_value(value: &Value, index: usize) -> String {
	match value {
		Value::String(s) => format!("string-{s}-{index}"),
		Value::Number(n) => format!("number-{}-{index}", number_form(n)),
		Value::Bool(b) => format!("boolean-{b}-{index}"),
		Value::Object(map) => match map.get("id") {
			Some(id) => string_form(id),
			None => members_key(object_members(map), index),
		},
		Value::Array(items) => members_key(array_members(items), index),
		Value::Null => index_key(index),
	}
}

fn index_key(index: usize) -> String {
	format!("idx-{index}")
}

fn object_members(map: &Map<String, Value>) -> Vec<(String, &Value)> {
	map.iter().map(|(k, v)| (k.clone(), v)).collect()
}

fn array_members(items: &[Value]) -> Vec<(String, &Value)> {
	items
		.iter()
		.enumerate()
		.map(|(i, v)| (i.to_string(), v))
		.collect()
}

fn members_key(mut members: Vec<(String, &Value)>, index: usize) -> String {
	// Member names compare as strings: "10" sorts before "2"
	members.sort_by(|(a, _), (b, _)| a.cmp(b));
	let props = members
		.iter()
		.map(|(k, v)| format!("{k}:{}", string_form(v)))
		.collect::<Vec<_>>()
		.join("|");
	format!("obj-{props}-{index}")
}

/// Rebuilds objects with members inserted in name order. `Map` keeps
/// insertion order when serde_json's `preserve_order` feature is enabled.
fn sorted(value: Value) -> Value {
	match value {
		Value::Object(map) => {
			let mut members: Vec<(String, Value)> = map.into_iter().collect();
			members.sort_by(|(a, _), (b, _)| a.cmp(b));
			Value::Object(members.into_iter().map(|(k, v)| (k, sorted(v))).collect())
		}
		Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
		other => other,
	}
}

/// String coercion of a dynamic value.
fn string_form(value: &Value) -> String {
	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => number_form(n),
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(|v| match v {
				Value::Null => String::new(),
				other => string_form(other),
			})
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => "[object Object]".to_string(),
	}
}

fn number_form(n: &Number) -> String {
	if let Some(i) = n.as_i64() {
		return i.to_string();
	}
	if let Some(u) = n.as_u64() {
		return u.to_string();
	}
	match n.as_f64() {
		Some(f) => float_form(f),
		None => n.to_string(),
	}
}

/// Formats a float like a dynamic number: shortest round-trip digits,
/// exponent notation outside `1e-6..1e21`.
fn float_form<F>(f: F) -> String
where
	F: Copy + Into<f64> + fmt::Display + fmt::LowerExp,
{
	let value: f64 = f.into();
	if value.is_nan() {
		return "NaN".to_string();
	}
	if value.is_infinite() {
		let form = if value > 0.0 { "Infinity" } else { "-Infinity" };
		return form.to_string();
	}
	if value == 0.0 {
		return "0".to_string();
	}
	if (1e-6..1e21).contains(&value.abs()) {
		return f.to_string();
	}
	let exponent = format!("{f:e}");
	match exponent.split_once('e') {
		Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
		_ => exponent,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde::ser::Error as _;
	use serde::Serializer;
	use serde_json::json;
	use std::collections::{BTreeMap, HashMap};

	#[derive(Serialize)]
	struct Todo {
		id: u32,
		title: &'static str,
	}

	#[derive(Serialize)]
	struct Point {
		y: i32,
		x: i32,
	}

	struct Unserializable;

	impl Serialize for Unserializable {
		fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
			Err(S::Error::custom("cannot serialize"))
		}
	}

	#[rstest]
	#[case(json!("apple"), 0, "string-apple-0")]
	#[case(json!(42), 3, "number-42-3")]
	#[case(json!(-1.5), 1, "number--1.5-1")]
	#[case(json!(2.0), 0, "number-2-0")]
	#[case(json!(true), 2, "boolean-true-2")]
	#[case(json!(null), 5, "idx-5")]
	fn test_primitive_keys(#[case] item: Value, #[case] index: usize, #[case] expected: &str) {
		assert_eq!(generate_stable_key(&item, index), expected);
	}

	#[rstest]
	fn test_number_and_string_do_not_collide() {
		assert_ne!(generate_stable_key(&1, 0), generate_stable_key("1", 0));
		assert_ne!(generate_stable_key(&true, 0), generate_stable_key("true", 0));
	}

	#[rstest]
	fn test_same_primitive_same_index_same_key() {
		assert_eq!(generate_stable_key("a", 4), generate_stable_key("a", 4));
		assert_ne!(generate_stable_key("a", 4), generate_stable_key("a", 5));
	}

	#[rstest]
	#[case(0)]
	#[case(1)]
	#[case(99)]
	fn test_id_key_ignores_index(#[case] index: usize) {
		let todo = Todo { id: 7, title: "write docs" };
		assert_eq!(generate_stable_key(&todo, index), "7");
	}

	#[rstest]
	#[case(json!({ "id": "abc" }), "abc")]
	#[case(json!({ "id": null }), "null")]
	#[case(json!({ "id": [1, null, 3] }), "1,,3")]
	#[case(json!({ "id": { "nested": true } }), "[object Object]")]
	fn test_id_string_forms(#[case] item: Value, #[case] expected: &str) {
		assert_eq!(generate_stable_key(&item, 0), expected);
	}

	#[rstest]
	fn test_object_key_sorted_by_member_name() {
		let point = Point { y: 2, x: 1 };
		assert_eq!(generate_stable_key(&point, 0), "obj-x:1|y:2-0");
	}

	#[rstest]
	fn test_object_key_independent_of_insertion_order() {
		let mut forward = HashMap::new();
		forward.insert("alpha", 1);
		forward.insert("beta", 2);
		forward.insert("gamma", 3);

		let mut backward = BTreeMap::new();
		backward.insert("gamma", 3);
		backward.insert("beta", 2);
		backward.insert("alpha", 1);

		assert_eq!(
			generate_stable_key(&forward, 1),
			generate_stable_key(&backward, 1)
		);
	}

	#[rstest]
	fn test_object_member_string_forms() {
		let item = json!({ "list": [1, 2], "nested": { "a": 1 }, "none": null });
		assert_eq!(
			generate_stable_key(&item, 2),
			"obj-list:1,2|nested:[object Object]|none:null-2"
		);
	}

	#[rstest]
	fn test_array_members_sort_as_strings() {
		let item: Vec<u32> = (0..11).collect();
		let key = generate_stable_key(&item, 0);
		assert!(key.starts_with("obj-0:0|1:1|10:10|2:2"));
		assert!(key.ends_with("9:9-0"));
	}

	#[rstest]
	fn test_empty_object_key() {
		assert_eq!(generate_stable_key(&json!({}), 3), "obj--3");
	}

	#[rstest]
	fn test_unserializable_falls_back_to_index() {
		assert_eq!(generate_stable_key(&Unserializable, 8), "idx-8");
	}

	#[rstest]
	#[case(f64::INFINITY, 1, "number-Infinity-1")]
	#[case(f64::NEG_INFINITY, 1, "number--Infinity-1")]
	#[case(f64::NAN, 0, "number-NaN-0")]
	#[case(-0.0, 2, "number-0-2")]
	#[case(2.0, 0, "number-2-0")]
	#[case(0.1, 0, "number-0.1-0")]
	#[case(1e-6, 0, "number-0.000001-0")]
	#[case(1e-7, 0, "number-1e-7-0")]
	#[case(1.5e-7, 0, "number-1.5e-7-0")]
	#[case(1e20, 0, "number-100000000000000000000-0")]
	#[case(1e21, 0, "number-1e+21-0")]
	#[case(-2.5e22, 3, "number--2.5e+22-3")]
	fn test_float_keys(#[case] item: f64, #[case] index: usize, #[case] expected: &str) {
		assert_eq!(generate_stable_key(&item, index), expected);
	}

	#[rstest]
	fn test_f32_keys_use_f32_digits() {
		assert_eq!(generate_stable_key(&0.1_f32, 0), "number-0.1-0");
		assert_eq!(generate_stable_key(&f32::INFINITY, 0), "number-Infinity-0");
	}

	#[rstest]
	fn test_non_finite_floats_are_distinct_from_null() {
		let keys = [
			generate_stable_key(&f64::INFINITY, 1),
			generate_stable_key(&f64::NEG_INFINITY, 1),
			generate_stable_key(&f64::NAN, 1),
			generate_stable_key(&(), 1),
		];
		for (i, a) in keys.iter().enumerate() {
			for b in &keys[i + 1..] {
				assert_ne!(a, b);
			}
		}
	}

	#[rstest]
	#[case(Some(3_u8), "number-3-0")]
	#[case(None, "idx-0")]
	fn test_option_scalar_keys(#[case] item: Option<u8>, #[case] expected: &str) {
		assert_eq!(generate_stable_key(&item, 0), expected);
	}

	#[rstest]
	fn test_unit_variant_keys_as_string() {
		#[derive(Serialize)]
		enum Status {
			Open,
		}
		assert_eq!(generate_stable_key(&Status::Open, 0), "string-Open-0");
		assert_eq!(generate_stable_key(&'x', 1), "string-x-1");
	}

	#[rstest]
	#[case(json!("home"), "home")]
	#[case(json!(3), "3")]
	#[case(json!(true), "true")]
	#[case(json!([1, "a"]), "[1,\"a\"]")]
	fn test_remount_key_forms(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(remount_key(&value).unwrap().as_str(), expected);
	}

	#[rstest]
	#[case(f64::INFINITY, "Infinity")]
	#[case(f64::NEG_INFINITY, "-Infinity")]
	#[case(f64::NAN, "NaN")]
	#[case(1.5, "1.5")]
	#[case(1e21, "1e+21")]
	fn test_remount_key_float_forms(#[case] value: f64, #[case] expected: &str) {
		assert_eq!(remount_key(&value).unwrap().as_str(), expected);
	}

	#[rstest]
	fn test_remount_key_distinguishes_infinities() {
		assert_ne!(
			remount_key(&f64::INFINITY).unwrap(),
			remount_key(&f64::NEG_INFINITY).unwrap()
		);
	}

	#[rstest]
	fn test_remount_key_sorts_nested_members() {
		let mut inner = Map::new();
		inner.insert("z".to_string(), json!(1));
		inner.insert("a".to_string(), json!(2));
		let mut outer = Map::new();
		outer.insert("list".to_string(), json!([Value::Object(inner)]));
		outer.insert("b".to_string(), json!(true));

		assert_eq!(
			remount_key(&Value::Object(outer)).unwrap().as_str(),
			r#"{"b":true,"list":[{"a":2,"z":1}]}"#
		);
	}

	#[rstest]
	fn test_sorted_orders_members_at_every_level() {
		let value = sorted(json!({ "y": { "d": 1, "c": 2 }, "x": [{ "f": 0, "e": 0 }] }));
		let names = |v: &Value| v.as_object().map(|m| m.keys().cloned().collect::<Vec<_>>());
		assert_eq!(names(&value), Some(vec!["x".to_string(), "y".to_string()]));
		assert_eq!(names(&value["y"]), Some(vec!["c".to_string(), "d".to_string()]));
		assert_eq!(names(&value["x"][0]), Some(vec!["e".to_string(), "f".to_string()]));
	}

	#[rstest]
	fn test_remount_key_is_order_independent() {
		let mut first = HashMap::new();
		first.insert("name", json!("Ada"));
		first.insert("id", json!(1));
		let second = json!({ "id": 1, "name": "Ada" });

		assert_eq!(remount_key(&first).unwrap(), remount_key(&second).unwrap());
		assert_eq!(remount_key(&second).unwrap().as_str(), r#"{"id":1,"name":"Ada"}"#);
	}

	#[rstest]
	fn test_remount_key_reports_serialize_error() {
		let err = remount_key(&Unserializable).unwrap_err();
		assert!(matches!(err, KeyError::Serialize(_)));
		assert!(err.to_string().contains("cannot serialize"));
	}
}
