//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for export files (a JSON array of conversations) inside a temp dir
pub struct ExportBuilder {
    temp_dir: TempDir,
    conversations: Vec<ConversationBuilder>,
}

impl ExportBuilder {
    /// Create a new builder with no conversations
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, conversations: Vec::new() }
    }

    /// Add a conversation to the export
    pub fn with_conversation(mut self, conversation: ConversationBuilder) -> Self {
        self.conversations.push(conversation);
        self
    }

    /// Render the export as a JSON string
    pub fn to_json(&self) -> String {
        let items: Vec<Value> = self.conversations.iter().map(|c| c.to_value()).collect();
        serde_json::to_string_pretty(&items).expect("Failed to serialize export")
    }

    /// Write `conversations.json` and return the temp dir holding it
    pub fn build(self) -> BuiltExport {
        let export_path = self.temp_dir.path().join("conversations.json");
        fs::write(&export_path, self.to_json()).expect("Failed to write export file");
        BuiltExport { temp_dir: self.temp_dir, export_path }
    }
}

impl Default for ExportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An export written to disk, plus a sibling path for the store file
pub struct BuiltExport {
    temp_dir: TempDir,
    export_path: PathBuf,
}

impl BuiltExport {
    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    pub fn store_path(&self) -> PathBuf {
        self.temp_dir.path().join("data").join("conversations_store.json")
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Builder for one exported conversation
pub struct ConversationBuilder {
    id: Option<String>,
    conversation_id: Option<String>,
    title: Option<String>,
    create_time: Option<f64>,
    update_time: Option<f64>,
    current_node: Option<String>,
    nodes: Vec<NodeBuilder>,
}

impl ConversationBuilder {
    /// Create a conversation with the given `conversation_id` and no nodes
    pub fn new(conversation_id: &str) -> Self {
        Self {
            id: None,
            conversation_id: Some(conversation_id.to_string()),
            title: None,
            create_time: None,
            update_time: None,
            current_node: None,
            nodes: Vec::new(),
        }
    }

    /// Create a conversation with no identifiers at all
    pub fn anonymous() -> Self {
        Self { conversation_id: None, ..Self::new("") }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn create_time(mut self, ts: f64) -> Self {
        self.create_time = Some(ts);
        self
    }

    pub fn update_time(mut self, ts: f64) -> Self {
        self.update_time = Some(ts);
        self
    }

    pub fn current_node(mut self, node_id: &str) -> Self {
        self.current_node = Some(node_id.to_string());
        self
    }

    pub fn node(mut self, node: NodeBuilder) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append a linear user/assistant exchange and point `current_node` at its last node
    pub fn linear(mut self, turns: &[(&str, &str)]) -> Self {
        let mut parent: Option<String> = self.nodes.last().map(|n| n.id.clone());
        for (i, (role, text)) in turns.iter().enumerate() {
            let id = format!("{}-n{}", self.conversation_id.as_deref().unwrap_or("x"), i);
            let mut node = NodeBuilder::message(&id, role, text).create_time(1000.0 + i as f64);
            if let Some(p) = &parent {
                node = node.parent(p);
            }
            parent = Some(id);
            self.nodes.push(node);
        }
        self.current_node = parent;
        self
    }

    pub fn to_value(&self) -> Value {
        let mapping: serde_json::Map<String, Value> =
            self.nodes.iter().map(|n| (n.id.clone(), n.to_value())).collect();

        json!({
            "id": self.id,
            "conversation_id": self.conversation_id,
            "title": self.title,
            "create_time": self.create_time,
            "update_time": self.update_time,
            "current_node": self.current_node,
            "mapping": mapping,
        })
    }
}

/// Builder for one node of a conversation graph
pub struct NodeBuilder {
    id: String,
    parent: Option<String>,
    role: Option<String>,
    content_type: String,
    parts: Vec<Value>,
    create_time: Option<f64>,
}

impl NodeBuilder {
    /// A node without a message payload
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            parent: None,
            role: None,
            content_type: "text".to_string(),
            parts: Vec::new(),
            create_time: None,
        }
    }

    /// A node carrying a plain text message
    pub fn message(id: &str, role: &str, text: &str) -> Self {
        Self { role: Some(role.to_string()), parts: vec![json!(text)], ..Self::placeholder(id) }
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn create_time(mut self, ts: f64) -> Self {
        self.create_time = Some(ts);
        self
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    /// Replace the content parts with raw JSON values
    pub fn parts(mut self, parts: Vec<Value>) -> Self {
        self.parts = parts;
        self
    }

    pub fn to_value(&self) -> Value {
        let message = self.role.as_ref().map(|role| {
            json!({
                "id": format!("msg-{}", self.id),
                "author": {"role": role, "name": null, "metadata": {}},
                "create_time": self.create_time,
                "update_time": null,
                "content": {"content_type": self.content_type, "parts": self.parts},
                "status": "finished_successfully",
                "metadata": {},
            })
        });

        json!({
            "id": self.id,
            "parent": self.parent,
            "children": [],
            "message": message,
        })
    }
}

/// Helper for the canonical two-turn export used across tests
pub fn hello_export() -> BuiltExport {
    ExportBuilder::new()
        .with_conversation(
            ConversationBuilder::new("c1")
                .title("")
                .node(NodeBuilder::message("n1", "user", "Hello").create_time(1000.0))
                .node(NodeBuilder::message("n2", "assistant", "Hi there").parent("n1").create_time(2000.0))
                .current_node("n2"),
        )
        .build()
}

/// Helper for a realistic export with branches, system prompts and an empty conversation
pub fn realistic_export() -> BuiltExport {
    ExportBuilder::new()
        .with_conversation(
            ConversationBuilder::new("trip")
                .title("Trip planning")
                .create_time(1_700_000_000.0)
                .update_time(1_700_100_000.0)
                .node(NodeBuilder::placeholder("root"))
                .node(
                    NodeBuilder::message("sys", "system", "You are a helpful assistant")
                        .parent("root"),
                )
                .node(
                    NodeBuilder::message("u1", "user", "Plan a trip to Lisbon")
                        .parent("sys")
                        .create_time(1_700_000_100.0),
                )
                .node(
                    NodeBuilder::message("a1-old", "assistant", "Discarded draft")
                        .parent("u1")
                        .create_time(1_700_000_200.0),
                )
                .node(
                    NodeBuilder::message("a1", "assistant", "Day 1: Alfama")
                        .parent("u1")
                        .create_time(1_700_000_300.0),
                )
                .node(
                    NodeBuilder::message("u2", "user", "Add a day trip")
                        .parent("a1")
                        .create_time(1_700_086_400.0),
                )
                .node(
                    NodeBuilder::message("a2", "assistant", "Day 2: Sintra")
                        .parent("u2")
                        .create_time(1_700_086_500.0),
                )
                .current_node("a2"),
        )
        .with_conversation(ConversationBuilder::new("empty").title("Nothing here"))
        .with_conversation(
            ConversationBuilder::new("recipes").title("Recipes").linear(&[
                ("user", "How do I make bread?"),
                ("assistant", "Mix flour, water, salt and yeast."),
            ]),
        )
        .build()
}
