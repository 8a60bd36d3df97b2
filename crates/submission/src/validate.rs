//! Submit-time checks on entered values.

use element::{ElementId, Settings};
use regex::Regex;
use render::{project, Capabilities, FieldBinding, InputType};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use store::ElementTree;
use thiserror::Error;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    InvalidEmail,
    NotANumber,
}

fn describe(kind: &FieldErrorKind) -> &'static str {
    match kind {
        FieldErrorKind::Required => "this field is required",
        FieldErrorKind::InvalidEmail => "enter a valid email address",
        FieldErrorKind::NotANumber => "enter a number",
    }
}

/// A problem with one submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{name}: {}", describe(.kind))]
pub struct FieldError {
    pub id: ElementId,
    pub name: String,
    pub kind: FieldErrorKind,
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn check_field(field: &FieldBinding, values: &Map<String, Value>) -> Option<FieldErrorKind> {
    let value = values.get(&field.name);
    if is_blank(value) {
        return field.required.then_some(FieldErrorKind::Required);
    }
    match (field.input, value) {
        (InputType::Email, Some(Value::String(s))) if !email_pattern().is_match(s.trim()) => {
            Some(FieldErrorKind::InvalidEmail)
        }
        (InputType::Number, Some(Value::String(s))) if s.trim().parse::<f64>().is_err() => {
            Some(FieldErrorKind::NotANumber)
        }
        (InputType::Number, Some(v)) if !v.is_number() && !v.is_string() => Some(FieldErrorKind::NotANumber),
        _ => None,
    }
}

/// Check submitted `values` against the input fields of `tree`.
///
/// Hidden fields are never required.
pub fn validate_submission(tree: &ElementTree, values: &Map<String, Value>) -> Vec<FieldError> {
    let render = project(
        tree,
        &Settings::default(),
        Capabilities {
            interactive: false,
            form_project: true,
        },
    );
    render
        .fields()
        .filter(|field| field.input != InputType::Hidden)
        .filter_map(|field| {
            check_field(field, values).map(|kind| FieldError {
                id: field.id,
                name: field.name.clone(),
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use element::{Element, ElementKind};
    use serde_json::json;

    fn tree() -> (ElementTree, [ElementId; 4]) {
        let name = Element::new(ElementKind::Text).with_name("name").with_required(true);
        let email = Element::new(ElementKind::Email).with_name("email").with_required(true);
        let age = Element::new(ElementKind::Number).with_name("age");
        let terms = Element::new(ElementKind::Checkbox).with_name("terms").with_required(true);
        let ids = [name.id, email.id, age.id, terms.id];
        let container = Element::new(ElementKind::Container).with_children(vec![name, email, age]);
        let tree = ElementTree::from_elements(vec![container, terms]).unwrap();
        (tree, ids)
    }

    fn values(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn complete_submission_passes() {
        let (tree, _) = tree();
        let values = values(json!({ "name": "Ada", "email": "ada@example.com", "age": 36, "terms": true }));
        assert_eq!(validate_submission(&tree, &values), vec![]);
    }

    #[test]
    fn missing_required_values() {
        let (tree, [name, _, _, terms]) = tree();
        let values = values(json!({ "name": "  ", "email": "ada@example.com", "terms": false }));
        let errors = validate_submission(&tree, &values);
        assert_eq!(
            errors,
            vec![
                FieldError { id: name, name: "name".into(), kind: FieldErrorKind::Required },
                FieldError { id: terms, name: "terms".into(), kind: FieldErrorKind::Required },
            ]
        );
        assert_eq!(errors[0].to_string(), "name: this field is required");
    }

    #[test]
    fn format_checks() {
        let (tree, [_, email, age, _]) = tree();
        let values = values(json!({ "name": "Ada", "email": "not-an-email", "age": "old", "terms": true }));
        let kinds: Vec<_> = validate_submission(&tree, &values).into_iter().map(|e| (e.id, e.kind)).collect();
        assert_eq!(
            kinds,
            vec![(email, FieldErrorKind::InvalidEmail), (age, FieldErrorKind::NotANumber)]
        );
    }

    #[test]
    fn optional_blank_fields_are_fine() {
        let (tree, _) = tree();
        let values = values(json!({ "name": "Ada", "email": "a@b.co", "age": "", "terms": true }));
        assert!(validate_submission(&tree, &values).is_empty());
    }
}
