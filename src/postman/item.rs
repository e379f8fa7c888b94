use crate::field::Field;
use crate::postman::auth::Auth;
use crate::postman::common::{DescriptionField, Event, Settings, Variable};
use crate::postman::request::{RequestField, ResponseEntry};
use serde::{Deserialize, Serialize};

/// What an item holds: a request, or child items.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// `item` is kept as written when a node carries both a request and children.
    Leaf {
        request: RequestField,
        response: Field<Vec<ResponseEntry>>,
        item: Field<Vec<Item>>,
    },
    /// `item` is `Absent` for a node that carries neither a request nor children.
    /// `null_request` records an explicit `"request": null`.
    Folder { item: Field<Vec<Item>>, null_request: bool },
}

/// A node of the collection tree.
///
/// Whether a node is a leaf or a folder is decided once while decoding: a node
/// with a request is a leaf, everything else is a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    pub name: Field<String>,
    pub id: Field<String>,
    pub description: Field<DescriptionField>,
    pub event: Field<Vec<Event>>,
    pub variable: Field<Vec<Variable>>,
    pub auth: Field<Auth>,
    pub protocol_profile_behavior: Field<Settings>,
    pub kind: ItemKind,
}

impl Item {
    pub fn leaf(name: &str, request: RequestField) -> Self {
        Item::with_kind(
            name,
            ItemKind::Leaf {
                request,
                response: Field::Absent,
                item: Field::Absent,
            },
        )
    }

    pub fn folder(name: &str, children: Vec<Item>) -> Self {
        Item::with_kind(
            name,
            ItemKind::Folder {
                item: Field::Present(children),
                null_request: false,
            },
        )
    }

    fn with_kind(name: &str, kind: ItemKind) -> Self {
        Item {
            name: Field::Present(name.to_string()),
            id: Field::Absent,
            description: Field::Absent,
            event: Field::Absent,
            variable: Field::Absent,
            auth: Field::Absent,
            protocol_profile_behavior: Field::Absent,
            kind,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.get().map(String::as_str)
    }

    pub fn request(&self) -> Option<&RequestField> {
        match &self.kind {
            ItemKind::Leaf { request, .. } => Some(request),
            ItemKind::Folder { .. } => None,
        }
    }

    /// Child items of a folder; empty for leaves.
    pub fn children(&self) -> &[Item] {
        match &self.kind {
            ItemKind::Folder {
                item: Field::Present(children),
                ..
            } => children.as_slice(),
            _ => &[],
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder { .. })
    }
}

/// Flat wire shape of an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ItemRecord {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    description: Field<DescriptionField>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    event: Field<Vec<Event>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    variable: Field<Vec<Variable>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    auth: Field<Auth>,
    #[serde(rename = "protocolProfileBehavior", default, skip_serializing_if = "Field::is_absent")]
    protocol_profile_behavior: Field<Settings>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    request: Field<RequestField>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    response: Field<Vec<ResponseEntry>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    item: Field<Vec<Item>>,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        let kind = match record.request {
            Field::Present(request) => ItemKind::Leaf {
                request,
                response: record.response,
                item: record.item,
            },
            Field::Absent => ItemKind::Folder {
                item: record.item,
                null_request: false,
            },
            Field::Null => ItemKind::Folder {
                item: record.item,
                null_request: true,
            },
        };

        Item {
            name: record.name,
            id: record.id,
            description: record.description,
            event: record.event,
            variable: record.variable,
            auth: record.auth,
            protocol_profile_behavior: record.protocol_profile_behavior,
            kind,
        }
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        let mut record = ItemRecord {
            id: item.id,
            name: item.name,
            description: item.description,
            event: item.event,
            variable: item.variable,
            auth: item.auth,
            protocol_profile_behavior: item.protocol_profile_behavior,
            ..Default::default()
        };

        match item.kind {
            ItemKind::Leaf { request, response, item } => {
                record.request = Field::Present(request);
                record.response = response;
                record.item = item;
            }
            ItemKind::Folder { item, null_request } => {
                if null_request {
                    record.request = Field::Null;
                }
                record.item = item;
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_with_request_is_leaf() {
        let item: Item = serde_json::from_value(json!({
            "name": "get user",
            "request": {"method": "GET", "url": "http://localhost/user"},
            "response": []
        }))
        .unwrap();

        assert!(!item.is_folder());
        assert!(item.request().is_some());
        assert!(item.children().is_empty());
    }

    #[test]
    fn test_node_with_children_is_folder() {
        let item: Item = serde_json::from_value(json!({
            "name": "users",
            "item": [{"name": "list", "request": "http://localhost/users"}]
        }))
        .unwrap();

        assert!(item.is_folder());
        assert_eq!(item.children().len(), 1);
        assert_eq!(item.children()[0].name(), Some("list"));
    }

    #[test]
    fn test_node_with_neither_is_empty_folder() {
        let raw = json!({ "name": "nothing" });
        let item: Item = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(
            item.kind,
            ItemKind::Folder {
                item: Field::Absent,
                null_request: false
            }
        );
        // no spurious `item` key on the way back
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_explicit_null_request_round_trips() {
        let raw = json!({ "name": "x", "request": null, "item": [] });
        let item: Item = serde_json::from_value(raw.clone()).unwrap();

        assert!(item.is_folder());
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_leaf_keeps_children_written_next_to_request() {
        let raw = json!({
            "name": "x",
            "request": "http://a/b",
            "item": [{"name": "child", "request": "http://a/c"}]
        });
        let item: Item = serde_json::from_value(raw.clone()).unwrap();

        assert!(!item.is_folder());
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }
}
