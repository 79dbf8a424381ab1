//! One-shot flash messages shown on the next page view

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Flash message severity; also the icon the modal shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Warning,
    Info,
}

impl FlashKind {
    /// Accepts the shorthands used around the codebase (`s`, `good`, `e`, `err`)
    pub fn from_name(name: &str) -> Self {
        match name {
            "s" | "good" | "success" => FlashKind::Success,
            "e" | "err" | "error" => FlashKind::Error,
            "warning" => FlashKind::Warning,
            _ => FlashKind::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
            FlashKind::Warning => "warning",
            FlashKind::Info => "info",
        }
    }
}

impl fmt::Display for FlashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: FlashKind,
    pub title: String,
    pub is_modal: bool,
    pub icon: String,
}

impl FlashMessage {
    /// Build a message; an empty title becomes `Success!` or `Oops...`
    pub fn new(
        message: impl Into<String>,
        kind: &str,
        title: Option<&str>,
        is_modal: bool,
    ) -> Self {
        let kind = FlashKind::from_name(kind);
        let title = match title.filter(|t| !t.is_empty()) {
            Some(title) => title.to_string(),
            None if kind == FlashKind::Success => "Success!".to_string(),
            None => "Oops...".to_string(),
        };

        Self {
            message: message.into(),
            kind,
            title,
            is_modal,
            icon: kind.to_string(),
        }
    }
}

/// Session-backed flash storage
pub trait FlashStore: Send + Sync {
    /// Replace the pending message for a session
    fn put(&self, session_id: &str, message: FlashMessage);

    /// Take the pending message, clearing it
    fn pull(&self, session_id: &str) -> Option<FlashMessage>;

    fn exists(&self, session_id: &str) -> bool;
}

/// Flash storage kept in process memory
#[derive(Default)]
pub struct MemoryFlashStore {
    messages: RwLock<HashMap<String, FlashMessage>>,
}

impl MemoryFlashStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlashStore for MemoryFlashStore {
    fn put(&self, session_id: &str, message: FlashMessage) {
        if let Ok(mut messages) = self.messages.write() {
            messages.insert(session_id.to_string(), message);
        }
    }

    fn pull(&self, session_id: &str) -> Option<FlashMessage> {
        self.messages.write().ok()?.remove(session_id)
    }

    fn exists(&self, session_id: &str) -> bool {
        self.messages
            .read()
            .map(|messages| messages.contains_key(session_id))
            .unwrap_or(false)
    }
}
