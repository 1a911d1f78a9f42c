//! Schema-less response objects.
//!
//! A [`Resource`] is built once from a decoded JSON object and never changes
//! afterwards. It keeps the raw payload for display and re-serialization, and
//! a materialized [`Field`] per key for navigation:
//!
//! - objects become nested [`Resource`]s,
//! - arrays become [`Field::List`], element by element,
//! - scalars are stored as they are.
//!
//! Nothing about key names or shapes is validated. Callers probe with
//! [`Resource::contains`], [`Resource::get`] or [`Resource::pointer`] before
//! reading a field.

mod variants;

pub use variants::{Feed, Post, Profile, Session};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::TypeError;

/// A materialized JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Resource(Resource),
    List(Vec<Field>),
}

impl Field {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Field::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Field::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Field]> {
        match self {
            Field::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        let document = Arc::new(value);
        materialize(&document, String::new(), &document)
    }
}

/// Convert `value`, found at `pointer` inside `document`.
///
/// Nested resources share `document` and remember their own pointer, so the
/// payload is stored once however deep the nesting goes.
fn materialize(document: &Arc<Value>, pointer: String, value: &Value) -> Field {
    match value {
        Value::Null => Field::Null,
        Value::Bool(b) => Field::Bool(*b),
        Value::Number(n) => Field::Number(n.clone()),
        Value::String(s) => Field::String(s.clone()),
        Value::Array(items) => Field::List(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| materialize(document, format!("{pointer}/{i}"), item))
                .collect(),
        ),
        Value::Object(map) => Field::Resource(Resource::within(document, pointer, map)),
    }
}

/// RFC 6901 reference token.
fn escape_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// A JSON object with keyed access to its materialized fields.
#[derive(Clone)]
pub struct Resource {
    document: Arc<Value>,
    pointer: String,
    fields: BTreeMap<String, Field>,
}

impl Resource {
    /// Materialize a decoded JSON object.
    pub fn from_object(map: Map<String, Value>) -> Self {
        let document = Arc::new(Value::Object(map));
        let Value::Object(map) = &*document else {
            unreachable!("document was built from an object");
        };
        Self::within(&document, String::new(), map)
    }

    fn within(document: &Arc<Value>, pointer: String, map: &Map<String, Value>) -> Self {
        let fields = map
            .iter()
            .map(|(key, value)| {
                let child = format!("{pointer}/{}", escape_token(key));
                (key.clone(), materialize(document, child, value))
            })
            .collect();

        Self {
            document: Arc::clone(document),
            pointer,
            fields,
        }
    }

    /// Returns the field stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Returns true if the object had `key`, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Field::as_str)
    }

    pub fn get_resource(&self, key: &str) -> Option<&Resource> {
        self.get(key).and_then(Field::as_resource)
    }

    pub fn get_list(&self, key: &str) -> Option<&[Field]> {
        self.get(key).and_then(Field::as_list)
    }

    /// Follow a chain of object keys, e.g. `["value", "reply", "root"]`.
    ///
    /// Returns `None` as soon as a key is absent or an intermediate field is
    /// not an object.
    pub fn pointer(&self, path: &[&str]) -> Option<&Field> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.get_resource(key)?;
        }
        current.get(last)
    }

    /// Like [`Resource::get_str`], but a missing or non-string field is an error.
    pub fn require_str(&self, key: &str) -> Result<&str, TypeError> {
        match self.get(key) {
            Some(Field::String(s)) => Ok(s),
            Some(_) => Err(TypeError::WrongFieldType {
                field: key.to_string(),
                expected: "a string",
            }),
            None => Err(TypeError::MissingField {
                field: key.to_string(),
            }),
        }
    }

    /// Iterate over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The payload this resource was built from.
    pub fn raw(&self) -> &Value {
        self.document
            .pointer(&self.pointer)
            .unwrap_or(&Value::Null)
    }
}

impl TryFrom<Value> for Resource {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::from_object(map)),
            other => Err(TypeError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Two resources are equal when their payloads are, wherever they sit.
impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.raw() == other.raw()
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Resource").field(self.raw()).finish()
    }
}

/// Compact JSON; `{:#}` pretty-prints.
impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#}", self.raw())
        } else {
            write!(f, "{}", self.raw())
        }
    }
}

impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: Value) -> Resource {
        Resource::try_from(value).unwrap()
    }

    #[test]
    fn scalars_pass_through() {
        let r = resource(json!({
            "text": "hello",
            "likeCount": 3,
            "ratio": 0.5,
            "pinned": true,
            "labels": null
        }));

        assert_eq!(r.get_str("text"), Some("hello"));
        assert_eq!(r.get("likeCount").and_then(Field::as_i64), Some(3));
        assert_eq!(r.get("ratio").and_then(Field::as_f64), Some(0.5));
        assert_eq!(r.get("pinned").and_then(Field::as_bool), Some(true));
        assert!(r.get("labels").is_some_and(Field::is_null));
        assert!(r.contains("labels"));
    }

    #[test]
    fn nested_objects_become_resources() {
        let r = resource(json!({
            "author": {"handle": "alice.test", "viewer": {"muted": false}}
        }));

        let author = r.get_resource("author").unwrap();
        assert_eq!(author.get_str("handle"), Some("alice.test"));
        assert_eq!(
            r.pointer(&["author", "viewer", "muted"]).and_then(Field::as_bool),
            Some(false)
        );
    }

    #[test]
    fn arrays_keep_order_and_convert_objects() {
        let r = resource(json!({
            "images": [{"alt": "one"}, {"alt": "two"}],
            "langs": ["en", "fr"],
            "mixed": [1, {"k": "v"}, "s"]
        }));

        let images = r.get_list("images").unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].as_resource().unwrap().get_str("alt"), Some("one"));
        assert_eq!(images[1].as_resource().unwrap().get_str("alt"), Some("two"));

        let langs: Vec<_> = r
            .get_list("langs")
            .unwrap()
            .iter()
            .filter_map(Field::as_str)
            .collect();
        assert_eq!(langs, ["en", "fr"]);

        let mixed = r.get_list("mixed").unwrap();
        assert_eq!(mixed[0].as_i64(), Some(1));
        assert_eq!(mixed[1].as_resource().unwrap().get_str("k"), Some("v"));
        assert_eq!(mixed[2].as_str(), Some("s"));
    }

    #[test]
    fn empty_array_is_empty_list_not_absent() {
        let r = resource(json!({"labels": []}));
        let labels = r.get_list("labels").unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn missing_fields_probe_as_none() {
        let r = resource(json!({"uri": "at://x/y/z"}));
        assert!(!r.contains("value"));
        assert!(r.get("value").is_none());
        assert!(r.pointer(&["value", "reply", "root"]).is_none());
        assert!(r.pointer(&["uri", "nested"]).is_none());
        assert!(r.pointer(&[]).is_none());
    }

    #[test]
    fn require_str_reports_shape() {
        let r = resource(json!({"uri": 7}));
        assert!(matches!(
            r.require_str("uri"),
            Err(TypeError::WrongFieldType { .. })
        ));
        assert!(matches!(
            r.require_str("cid"),
            Err(TypeError::MissingField { .. })
        ));
    }

    #[test]
    fn raw_payload_is_preserved() {
        let payload = json!({"a": {"b": [1, 2]}, "c": "d"});
        let r = resource(payload.clone());
        assert_eq!(r.raw(), &payload);
        assert_eq!(serde_json::to_value(&r).unwrap(), payload);
        assert_eq!(r.to_string(), payload.to_string());
        assert_eq!(format!("{r:#}"), serde_json::to_string_pretty(&payload).unwrap());
    }

    #[test]
    fn nested_resources_expose_their_own_subtree() {
        let r = resource(json!({
            "post": {"record": {"text": "hi"}, "embed": {"images": [{"alt": "a"}]}},
            "a/b~c": {"k": 1}
        }));

        let record = r.pointer(&["post", "record"]).and_then(Field::as_resource).unwrap();
        assert_eq!(record.raw(), &json!({"text": "hi"}));

        let image = r.pointer(&["post", "embed", "images"]).and_then(Field::as_list).unwrap()[0]
            .as_resource()
            .unwrap();
        assert_eq!(image.to_string(), r#"{"alt":"a"}"#);

        let odd = r.get_resource("a/b~c").unwrap();
        assert_eq!(odd.raw(), &json!({"k": 1}));
    }

    #[test]
    fn nested_resources_share_one_payload() {
        let r = resource(json!({"a": {"b": {"c": {}}}}));
        let c = r.pointer(&["a", "b", "c"]).and_then(Field::as_resource).unwrap();

        assert!(Arc::ptr_eq(&r.document, &c.document));
        assert_eq!(c, &resource(json!({})));
    }

    #[test]
    fn top_level_array_materializes_elements() {
        let field = Field::from(json!([{"uri": "u"}, 2]));
        let items = field.as_list().unwrap();
        assert_eq!(items[0].as_resource().unwrap().raw(), &json!({"uri": "u"}));
        assert_eq!(items[1].as_i64(), Some(2));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = Resource::try_from(json!([1, 2])).unwrap_err();
        assert!(matches!(err, TypeError::NotAnObject { found: "an array" }));
    }

    #[test]
    fn keys_named_like_accessors_are_plain_fields() {
        let r = resource(json!({"raw": "x", "fields": 1, "document": null}));
        assert_eq!(r.get_str("raw"), Some("x"));
        assert!(r.get("document").is_some_and(Field::is_null));
        assert_eq!(r.raw(), &json!({"raw": "x", "fields": 1, "document": null}));
    }
}
