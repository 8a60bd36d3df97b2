//! The projection from element tree to render tree.
//!
//! Every output (canvas, live form, static export) calls [`project`] with
//! its own [`Capabilities`]; none of them walk the element tree directly.

use crate::node::{Chrome, Content, FieldBinding, InputType, RenderNode, RenderTree, SubmitButton};
use crate::style::element_style;
use element::{attrs::backgrounds_for, default_name, Element, ElementId, ElementKind, Settings};
use serde::{Deserialize, Serialize};
use store::{ElementTree, Store};

/// What the consumer of a projection can do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Editable canvas: nodes carry selection chrome and drop zones.
    pub interactive: bool,
    /// Inputs bind to submitted data and a submit button closes the tree.
    pub form_project: bool,
}

impl Capabilities {
    /// The editing canvas.
    pub fn canvas() -> Self {
        Self {
            interactive: true,
            form_project: false,
        }
    }

    /// A live, submittable rendering of the document.
    pub fn live(settings: &Settings) -> Self {
        Self {
            interactive: false,
            form_project: settings.is_form(),
        }
    }

    /// Static output with no behaviour attached.
    pub fn static_export() -> Self {
        Self::default()
    }
}

/// Project `tree` into a render tree.
pub fn project(tree: &ElementTree, settings: &Settings, capabilities: Capabilities) -> RenderTree {
    project_with_selection(tree, settings, None, capabilities)
}

/// Project a store's document, marking its current selection.
pub fn project_store(store: &Store, capabilities: Capabilities) -> RenderTree {
    project_with_selection(store.tree(), store.settings(), store.selection(), capabilities)
}

fn project_with_selection(
    tree: &ElementTree,
    settings: &Settings,
    selection: Option<ElementId>,
    capabilities: Capabilities,
) -> RenderTree {
    let projector = Projector {
        selection,
        capabilities,
    };
    let nodes = tree
        .roots()
        .iter()
        .map(|element| projector.node(element, 0))
        .collect();
    let submit = capabilities.form_project.then(|| SubmitButton {
        text: settings.submit_text.clone(),
        background: settings.primary_color.clone(),
    });

    RenderTree {
        title: settings.title.clone(),
        nodes,
        submit,
    }
}

struct Projector {
    selection: Option<ElementId>,
    capabilities: Capabilities,
}

impl Projector {
    fn node(&self, element: &Element, depth: usize) -> RenderNode {
        let mut style = element_style(element);
        if element.kind == ElementKind::Hidden && !self.capabilities.interactive {
            style.push("display", "none");
        }

        let field = if self.capabilities.form_project {
            InputType::for_kind(element.kind).map(|input| FieldBinding {
                id: element.id,
                name: element
                    .name
                    .clone()
                    .unwrap_or_else(|| default_name(element.kind, element.id)),
                required: element.required,
                input,
                label: element.label.clone(),
            })
        } else {
            None
        };

        let chrome = self.capabilities.interactive.then(|| {
            let selected = self.selection == Some(element.id);
            Chrome {
                selected,
                toolbar: selected,
                resize_handles: selected && element.kind != ElementKind::Hidden,
                drop_zone: element.is_container(),
            }
        });

        RenderNode {
            id: element.id,
            kind: element.kind,
            nested: depth > 0,
            depth,
            width_percent: element.layout.width_percent(),
            style,
            content: self.content(element),
            field,
            chrome,
            children: element
                .children
                .iter()
                .map(|child| self.node(child, depth + 1))
                .collect(),
        }
    }

    fn content(&self, element: &Element) -> Content {
        if element.kind.is_input() {
            return Content::Field {
                label: element.label.clone(),
                placeholder: element.placeholder.clone(),
                options: element.options.clone(),
                max_rating: element.max_rating,
                disabled: self.capabilities.interactive || !self.capabilities.form_project,
            };
        }

        let text = || element.content.clone().unwrap_or_default();
        match element.kind {
            ElementKind::Heading | ElementKind::Paragraph | ElementKind::RichText => {
                Content::Text { text: text() }
            }
            ElementKind::Button => {
                let button = element.button.clone().unwrap_or_default();
                Content::Button {
                    text: text(),
                    variant: button.variant,
                    href: button.href,
                    new_tab: button.new_tab,
                }
            }
            ElementKind::Image => {
                let image = element.image.clone().unwrap_or_default();
                Content::Image {
                    src: image.src,
                    alt: image.alt,
                    width: image.width,
                    height: image.height,
                }
            }
            ElementKind::Divider => Content::Divider,
            ElementKind::Social => Content::Social {
                links: element.social_links.clone(),
            },
            ElementKind::Menu => Content::Menu {
                items: element.menu_items.clone(),
            },
            ElementKind::Columns => Content::Cells {
                backgrounds: backgrounds_for(&element.column_backgrounds, element.cell_count()),
            },
            ElementKind::Rows => Content::Cells {
                backgrounds: backgrounds_for(&element.row_backgrounds, element.cell_count()),
            },
            ElementKind::Grid => Content::Cells {
                backgrounds: backgrounds_for(&element.column_backgrounds, element.cell_count()),
            },
            _ => Content::Container,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use element::ElementPatch;
    use serde_json::json;

    fn form() -> (Store, ElementId, ElementId, ElementId) {
        let mut store = Store::new();
        let columns = store.add(ElementKind::Columns, None).created_id().unwrap();
        let name = store.add(ElementKind::Text, Some(columns)).created_id().unwrap();
        let heading = store.add(ElementKind::Heading, None).created_id().unwrap();
        store.update(
            name,
            &ElementPatch::new()
                .set("name", "full_name")
                .set("required", true)
                .set("width", 6),
        );
        (store, columns, name, heading)
    }

    #[test]
    fn live_form_binds_inputs_and_adds_submit() {
        let (store, columns, name, _) = form();
        let render = project(store.tree(), store.settings(), Capabilities::live(store.settings()));

        let fields: Vec<_> = render.fields().collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id, name);
        assert_eq!(fields[0].name, "full_name");
        assert!(fields[0].required);
        assert_eq!(fields[0].input, InputType::Text);

        let submit = render.submit.as_ref().unwrap();
        assert_eq!(submit.text, "Submit");
        assert_eq!(submit.background, "#3b82f6");

        let node = render.find(name).unwrap();
        assert!(node.nested);
        assert_eq!(node.depth, 1);
        assert_eq!(node.width_percent, 50.0);
        assert!(node.chrome.is_none());
        assert!(matches!(node.content, Content::Field { disabled: false, .. }));
        assert!(!render.find(columns).unwrap().nested);
    }

    #[test]
    fn canvas_marks_selection() {
        let (mut store, columns, name, heading) = form();
        store.select(Some(name));
        let render = project_store(&store, Capabilities::canvas());

        let chrome = render.find(name).unwrap().chrome.unwrap();
        assert!(chrome.selected && chrome.toolbar && chrome.resize_handles);
        assert!(!render.find(heading).unwrap().chrome.unwrap().selected);
        assert!(render.find(columns).unwrap().chrome.unwrap().drop_zone);
        assert!(render.submit.is_none());
        assert_eq!(render.fields().count(), 0);
        assert!(render.outline().contains(&format!("* text {}", name)));
    }

    #[test]
    fn page_projects_have_no_submit() {
        let (mut store, ..) = form();
        let serde_json::Value::Object(patch) = json!({ "projectKind": "page" }) else {
            unreachable!()
        };
        store.update_settings(&patch);
        let render = project_store(&store, Capabilities::live(store.settings()));
        assert!(render.submit.is_none());
        assert_eq!(render.fields().count(), 0);
    }

    #[test]
    fn cell_backgrounds_are_padded() {
        let mut store = Store::new();
        let columns = store.add(ElementKind::Columns, None).created_id().unwrap();
        store.update(
            columns,
            &ElementPatch::new()
                .set("columnCount", 3)
                .set("columnBackgrounds", json!([null, "#eee"])),
        );
        let render = project(store.tree(), store.settings(), Capabilities::static_export());
        assert_eq!(
            render.find(columns).unwrap().content,
            Content::Cells {
                backgrounds: vec![None, Some("#eee".to_string()), None]
            }
        );
    }

    #[test]
    fn hidden_fields_are_hidden_outside_the_canvas() {
        let mut store = Store::new();
        let hidden = store.add(ElementKind::Hidden, None).created_id().unwrap();

        let live = project_store(&store, Capabilities::live(store.settings()));
        assert_eq!(live.find(hidden).unwrap().style.get("display"), Some("none"));
        assert_eq!(live.fields().next().unwrap().input, InputType::Hidden);

        let canvas = project_store(&store, Capabilities::canvas());
        assert_eq!(canvas.find(hidden).unwrap().style.get("display"), None);
    }

    #[test]
    fn serializes_camel_case() {
        let (store, ..) = form();
        let render = project_store(&store, Capabilities::live(store.settings()));
        let json = serde_json::to_value(&render).unwrap();
        assert_eq!(json["nodes"][0]["widthPercent"], 100.0);
        assert_eq!(json["nodes"][0]["content"]["type"], "cells");
        assert_eq!(json["submit"]["text"], "Submit");
    }
}
