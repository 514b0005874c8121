// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// One structural event from the document walker: a named node and its
/// string value, if it has one.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeEvent {
    pub name: String,
    #[serde(default)]
    pub value: Option<EventValue>,
    /// False when the element has element children
    #[serde(default = "default_leaf")]
    pub leaf: bool,
}

fn default_leaf() -> bool {
    true
}

/// Node value as it appears in the event stream. Numbers are accepted
/// verbatim so `"price": 9.5` and `"price": "9.5"` index identically.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum EventValue {
    Text(String),
    Number(serde_json::Number),
}

impl EventValue {
    /// Value text as the index sees it.
    pub fn as_text(&self) -> String {
        match self {
            EventValue::Text(s) => s.clone(),
            EventValue::Number(n) => n.to_string(),
        }
    }
}

impl NodeEvent {
    pub fn new(name: &str, value: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            value: value.map(|v| EventValue::Text(v.to_string())),
            leaf: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_event() {
        let event: NodeEvent = serde_json::from_str(r#"{"name": "title"}"#).unwrap();
        assert_eq!(event.name, "title");
        assert_eq!(event.value, None);
        assert!(event.leaf);
    }

    #[test]
    fn test_parse_numeric_value() {
        let event: NodeEvent =
            serde_json::from_str(r#"{"name": "price", "value": 9.5, "leaf": true}"#).unwrap();
        assert_eq!(event.value.unwrap().as_text(), "9.5");
    }

    #[test]
    fn test_parse_branch_event() {
        let event: NodeEvent = serde_json::from_str(r#"{"name": "book", "leaf": false}"#).unwrap();
        assert!(!event.leaf);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<NodeEvent>(r#"{"name": "a", "kind": 1}"#).is_err());
    }
}
