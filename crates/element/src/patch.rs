//! Sparse attribute updates.
//!
//! A patch is a JSON object of attribute keys to new values. Applying it
//! shallow-merges the keys into the target's JSON form: present keys replace
//! the old value wholesale, `null` clears the attribute, absent keys are left
//! alone.

use crate::element::{ATTRIBUTE_KEYS, IMMUTABLE_KEYS};
use crate::Element;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from building or applying a patch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("patch must be a JSON object")]
    NotAnObject,

    #[error("attribute `{0}` cannot be changed")]
    ImmutableField(String),

    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("invalid attributes: {0}")]
    Invalid(String),
}

/// A sparse set of element attribute changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementPatch(Map<String, Value>);

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a patch from an arbitrary JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, PatchError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(PatchError::NotAnObject),
        }
    }

    /// Set an attribute to a new value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Clear an attribute back to its default.
    pub fn clear(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), Value::Null);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Whether the patch replaces the element's children.
    pub fn touches_children(&self) -> bool {
        self.0.contains_key("children")
    }

    /// Check every key against the element attribute set.
    pub fn check_keys(&self) -> Result<(), PatchError> {
        for key in self.0.keys() {
            if IMMUTABLE_KEYS.contains(&key.as_str()) {
                return Err(PatchError::ImmutableField(key.clone()));
            }
            if !ATTRIBUTE_KEYS.contains(&key.as_str()) {
                return Err(PatchError::UnknownAttribute(key.clone()));
            }
        }
        Ok(())
    }

    /// Produce the merged element without modifying `element`.
    pub fn apply_to(&self, element: &Element) -> Result<Element, PatchError> {
        self.check_keys()?;
        merge_json(element, &self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Shallow-merge `patch` into the JSON form of `value` and parse it back.
pub fn merge_json<T>(value: &T, patch: &Map<String, Value>) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(PatchError::NotAnObject),
        Err(e) => return Err(PatchError::Invalid(e.to_string())),
    };

    for (key, new_value) in patch {
        if new_value.is_null() {
            merged.remove(key);
        } else {
            merged.insert(key.clone(), new_value.clone());
        }
    }

    serde_json::from_value(Value::Object(merged)).map_err(|e| PatchError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;
    use serde_json::json;

    #[test]
    fn merges_only_present_keys() {
        let element = Element::new(ElementKind::Text).with_label("First name");
        let patch = ElementPatch::new().set("required", true).set("width", 6);

        let merged = patch.apply_to(&element).unwrap();
        assert!(merged.required);
        assert_eq!(merged.layout.width, Some(6));
        assert_eq!(merged.label.as_deref(), Some("First name"));
        assert_eq!(merged.id, element.id);
    }

    #[test]
    fn null_clears_an_attribute() {
        let element = Element::new(ElementKind::Text);
        let merged = ElementPatch::new().clear("placeholder").apply_to(&element).unwrap();
        assert!(merged.placeholder.is_none());
    }

    #[test]
    fn nested_values_are_replaced_wholesale() {
        let mut element = Element::new(ElementKind::Text);
        element.layout.margin.top = 10;
        let patch = ElementPatch::from_value(json!({ "margin": { "left": 4 } })).unwrap();

        let merged = patch.apply_to(&element).unwrap();
        assert_eq!(merged.layout.margin.top, 0);
        assert_eq!(merged.layout.margin.left, 4);
    }

    #[test]
    fn id_and_type_are_immutable() {
        let element = Element::new(ElementKind::Text);
        assert_eq!(
            ElementPatch::new().set("type", "email").apply_to(&element),
            Err(PatchError::ImmutableField("type".into()))
        );
        assert_eq!(
            ElementPatch::new().set("id", "x").apply_to(&element),
            Err(PatchError::ImmutableField("id".into()))
        );
    }

    #[test]
    fn unknown_keys_are_refused() {
        let element = Element::new(ElementKind::Text);
        assert_eq!(
            ElementPatch::new().set("colour", "red").apply_to(&element),
            Err(PatchError::UnknownAttribute("colour".into()))
        );
    }

    #[test]
    fn ill_typed_values_are_invalid() {
        let element = Element::new(ElementKind::Text);
        let result = ElementPatch::new().set("width", "wide").apply_to(&element);
        assert!(matches!(result, Err(PatchError::Invalid(_))));
    }

    #[test]
    fn non_object_patch_is_refused() {
        assert_eq!(ElementPatch::from_value(json!([1, 2])), Err(PatchError::NotAnObject));
    }
}
