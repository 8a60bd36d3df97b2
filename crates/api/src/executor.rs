//! Command and query execution against a Store.
//!
//! This module connects the abstract Command/Query types to the store,
//! executing operations and returning results.

use crate::{Command, CommandResult, ElementInfo, Query, QueryResult};
use element::Element;
use store::Store;

/// Execute a command against a store.
pub fn execute_command(store: &mut Store, command: Command) -> CommandResult {
    match command {
        Command::AddElement {
            kind,
            parent,
            index,
            attributes,
        } => {
            let element = match attributes.apply_to(&Element::new(kind)) {
                Ok(element) => element,
                Err(e) => return CommandResult::Rejected { reason: e.into() },
            };
            store.insert(element, parent, index).into()
        }

        Command::Duplicate { target } => match target.resolve(store) {
            Ok(id) => store.duplicate(id).into(),
            Err(reason) => reason.into(),
        },

        Command::Remove { target } => match target.resolve(store) {
            Ok(id) => store.remove(id).into(),
            Err(reason) => reason.into(),
        },

        Command::UpdateElement { target, attributes } => match target.resolve(store) {
            Ok(id) => store.update(id, &attributes).into(),
            Err(reason) => reason.into(),
        },

        Command::Reorder { parent, from, to } => store.reorder(parent, from, to).into(),

        Command::MoveToContainer { target, container } => match target.resolve(store) {
            Ok(id) => store.move_to_container(id, container).into(),
            Err(reason) => reason.into(),
        },

        Command::MoveTo {
            target,
            parent,
            index,
        } => match target.resolve(store) {
            Ok(id) => store.move_to(id, parent, index).into(),
            Err(reason) => reason.into(),
        },

        Command::Select { id } => store.select(Some(id)).into(),

        Command::ClearSelection => store.clear_selection().into(),

        Command::UpdateSettings { settings } => store.update_settings(&settings).into(),

        Command::Batch { commands } => {
            let mut all_created = Vec::new();
            let mut all_modified = Vec::new();
            let mut all_deleted = Vec::new();

            for (i, cmd) in commands.into_iter().enumerate() {
                match execute_command(store, cmd) {
                    CommandResult::Success {
                        created,
                        modified,
                        deleted,
                    } => {
                        all_created.extend(created);
                        all_modified.extend(modified);
                        all_deleted.extend(deleted);
                    }
                    CommandResult::Ignored { reason } => {
                        tracing::debug!("Batch command {} ignored: {}", i, reason);
                    }
                    rejected @ CommandResult::Rejected { .. } => {
                        tracing::debug!("Batch stopped at command {}", i);
                        return rejected;
                    }
                }
            }

            CommandResult::Success {
                created: all_created,
                modified: all_modified,
                deleted: all_deleted,
            }
        }
    }
}

/// Execute a query against a store.
pub fn execute_query(store: &Store, query: Query) -> QueryResult {
    let tree = store.tree();
    match query {
        Query::GetTree => QueryResult::Tree {
            elements: tree.roots().to_vec(),
        },

        Query::GetElement { id } => QueryResult::Element {
            element: tree.get(id).cloned(),
        },

        Query::GetSelection => QueryResult::Selection {
            id: store.selection(),
        },

        Query::GetSettings => QueryResult::Settings {
            settings: store.settings().clone(),
        },

        Query::GetParent { id } => {
            if !tree.contains(id) {
                return QueryResult::Error {
                    message: format!("element {} not found", id),
                };
            }
            QueryResult::Parent {
                parent: tree.parent_of(id),
                nested: tree.is_nested(id),
            }
        }

        Query::GetElementCount => QueryResult::Count { count: tree.len() },

        Query::FindByKind { kind } => QueryResult::Elements {
            elements: tree
                .find_by_kind(kind)
                .into_iter()
                .map(|element| ElementInfo::new(element, tree))
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Target;
    use element::{ElementId, ElementKind, ElementPatch};
    use serde_json::json;
    use store::{IgnoreReason, RejectReason};

    fn add(store: &mut Store, kind: ElementKind, parent: Option<ElementId>) -> ElementId {
        execute_command(
            store,
            Command::AddElement {
                kind,
                parent,
                index: None,
                attributes: ElementPatch::new(),
            },
        )
        .created_id()
        .unwrap()
    }

    #[test]
    fn add_with_attributes() {
        let mut store = Store::new();
        let result = execute_command(
            &mut store,
            Command::AddElement {
                kind: ElementKind::Email,
                parent: None,
                index: None,
                attributes: ElementPatch::new().set("name", "email").set("required", true),
            },
        );
        let id = result.created_id().unwrap();
        let element = store.get(id).unwrap();
        assert_eq!(element.name.as_deref(), Some("email"));
        assert!(element.required);
        assert_eq!(store.selection(), Some(id));
    }

    #[test]
    fn add_with_bad_attributes_is_rejected() {
        let mut store = Store::new();
        let result = execute_command(
            &mut store,
            Command::AddElement {
                kind: ElementKind::Text,
                parent: None,
                index: None,
                attributes: ElementPatch::new().set("colour", "red"),
            },
        );
        assert_eq!(
            result,
            CommandResult::Rejected {
                reason: RejectReason::UnknownAttribute { key: "colour".into() }
            }
        );
        assert!(store.tree().is_empty());
    }

    #[test]
    fn add_with_an_invalid_or_missing_name_is_rejected() {
        let mut store = Store::new();
        let result = execute_command(
            &mut store,
            Command::AddElement {
                kind: ElementKind::Text,
                parent: None,
                index: None,
                attributes: ElementPatch::new().set("name", "first name!"),
            },
        );
        assert_eq!(
            result,
            CommandResult::Rejected {
                reason: RejectReason::InvalidName {
                    name: "first name!".into()
                }
            }
        );

        let result = execute_command(
            &mut store,
            Command::AddElement {
                kind: ElementKind::Email,
                parent: None,
                index: None,
                attributes: ElementPatch::new().clear("name"),
            },
        );
        assert_eq!(result, CommandResult::Rejected { reason: RejectReason::MissingName });
        assert!(store.tree().is_empty());
        assert!(element::validate_elements(store.elements()).is_empty());
    }

    #[test]
    fn selection_target_commands() {
        let mut store = Store::new();
        let id = add(&mut store, ElementKind::Heading, None);

        let result = execute_command(
            &mut store,
            Command::UpdateElement {
                target: Target::Selection,
                attributes: ElementPatch::new().set("content", "Welcome"),
            },
        );
        assert_eq!(result, CommandResult::modified(vec![id]));
        assert_eq!(store.get(id).unwrap().content.as_deref(), Some("Welcome"));

        let result = execute_command(&mut store, Command::Remove { target: Target::Selection });
        assert_eq!(result, CommandResult::deleted(vec![id]));

        let result = execute_command(&mut store, Command::Remove { target: Target::Selection });
        assert_eq!(result, CommandResult::Ignored { reason: IgnoreReason::NoSelection });
    }

    #[test]
    fn batch_builds_a_form() {
        let mut store = Store::new();
        let container = add(&mut store, ElementKind::Container, None);
        let commands: Vec<Command> = serde_json::from_value(json!([
            { "type": "add_element", "kind": "text", "parent": container.to_uuid_string() },
            { "type": "update_element", "attributes": { "label": "Full name" } },
            { "type": "add_element", "kind": "email", "parent": container.to_uuid_string() },
            { "type": "clear_selection" },
            { "type": "update_settings", "settings": { "title": "Signup" } }
        ]))
        .unwrap();

        let result = execute_command(&mut store, Command::Batch { commands });
        let CommandResult::Success { created, modified, .. } = result else {
            panic!("Expected success, got {:?}", result);
        };
        assert_eq!(created.len(), 2);
        assert_eq!(modified, vec![created[0]]);
        assert_eq!(store.get(container).unwrap().children.len(), 2);
        assert_eq!(store.settings().title, "Signup");
        assert_eq!(store.selection(), None);
    }

    #[test]
    fn batch_stops_at_first_rejection() {
        let mut store = Store::new();
        let text = add(&mut store, ElementKind::Text, None);

        let result = execute_command(
            &mut store,
            Command::Batch {
                commands: vec![
                    Command::ClearSelection,
                    Command::AddElement {
                        kind: ElementKind::Email,
                        parent: Some(text),
                        index: None,
                        attributes: ElementPatch::new(),
                    },
                    Command::Remove { target: Target::Element(text) },
                ],
            },
        );
        assert_eq!(
            result,
            CommandResult::Rejected {
                reason: RejectReason::NotAContainer { id: text }
            }
        );
        assert!(store.tree().contains(text));
        assert_eq!(store.selection(), None);
    }

    #[test]
    fn move_commands() {
        let mut store = Store::new();
        let text = add(&mut store, ElementKind::Text, None);
        let columns = add(&mut store, ElementKind::Columns, None);

        let result = execute_command(
            &mut store,
            Command::MoveToContainer {
                target: Target::Element(text),
                container: columns,
            },
        );
        assert_eq!(result, CommandResult::modified(vec![text]));

        let result = execute_command(
            &mut store,
            Command::MoveTo {
                target: Target::Element(text),
                parent: None,
                index: Some(0),
            },
        );
        assert!(result.is_success());
        assert_eq!(store.elements()[0].id, text);

        let result = execute_command(
            &mut store,
            Command::MoveToContainer {
                target: Target::Element(columns),
                container: columns,
            },
        );
        assert!(result.is_rejected());
    }

    #[test]
    fn queries() {
        let mut store = Store::new();
        let rows = add(&mut store, ElementKind::Rows, None);
        let first = add(&mut store, ElementKind::Text, Some(rows));
        let second = add(&mut store, ElementKind::Text, Some(rows));

        assert_eq!(execute_query(&store, Query::GetElementCount), QueryResult::Count { count: 3 });
        assert_eq!(execute_query(&store, Query::GetSelection), QueryResult::Selection { id: Some(second) });
        assert_eq!(
            execute_query(&store, Query::GetParent { id: first }),
            QueryResult::Parent {
                parent: Some(rows),
                nested: true
            }
        );
        assert!(matches!(
            execute_query(&store, Query::GetParent { id: ElementId::from_u128(1) }),
            QueryResult::Error { .. }
        ));

        let QueryResult::Elements { elements } = execute_query(&store, Query::FindByKind { kind: ElementKind::Text }) else {
            panic!("Expected elements");
        };
        let ids: Vec<_> = elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert!(elements.iter().all(|e| e.depth == 1));

        let QueryResult::Element { element: Some(element) } = execute_query(&store, Query::GetElement { id: rows }) else {
            panic!("Expected element");
        };
        assert_eq!(element.children.len(), 2);
    }

    #[test]
    fn reorder_reports_out_of_range() {
        let mut store = Store::new();
        add(&mut store, ElementKind::Text, None);
        assert_eq!(
            execute_command(&mut store, Command::Reorder { parent: None, from: 0, to: 1 }),
            CommandResult::Ignored {
                reason: IgnoreReason::IndexOutOfRange { index: 1, len: 1 }
            }
        );
    }
}
