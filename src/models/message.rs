use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::store::{Draft, Entity, Facet, StoreError, require};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    New,
    Read,
    Replied,
}

impl MessageStatus {
    pub const ALL: [MessageStatus; 3] = [MessageStatus::New, MessageStatus::Read, MessageStatus::Replied];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::New => "new",
            MessageStatus::Read => "read",
            MessageStatus::Replied => "replied",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            MessageStatus::New => MessageStatus::Read,
            MessageStatus::Read => MessageStatus::Replied,
            MessageStatus::Replied => MessageStatus::New,
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" => Ok(MessageStatus::New),
            "read" => Ok(MessageStatus::Read),
            "replied" => Ok(MessageStatus::Replied),
            other => Err(format!("unknown message status: {}", other)),
        }
    }
}

/// An enquiry left through the site's contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: NaiveDateTime,
}

/// The contact form payload, also the draft shape of a [`Message`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

impl From<&Message> for ContactForm {
    fn from(message: &Message) -> Self {
        Self {
            name: message.name.clone(),
            phone: message.phone.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
        }
    }
}

impl Draft for ContactForm {
    fn validate(&self) -> Result<(), StoreError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("message", &self.message)
    }
}

const FACETS: &[Facet] = &[Facet {
    key: "status",
    label: "Status",
    options: &["new", "read", "replied"],
}];

impl Entity for Message {
    type Draft = ContactForm;

    const COLLECTION: &'static str = "messages";

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, now: NaiveDateTime, draft: ContactForm) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            message: draft.message,
            status: MessageStatus::New,
            created_at: now,
        }
    }

    fn apply(&mut self, draft: ContactForm) {
        self.name = draft.name;
        self.email = draft.email;
        self.phone = draft.phone;
        self.message = draft.message;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.message]
    }

    fn facets() -> &'static [Facet] {
        FACETS
    }

    fn facet_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }
}
