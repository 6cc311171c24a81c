use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TranscriptRole {
    User,
    System,
}

impl TranscriptRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::System => "system",
        }
    }

    pub fn is_user(self) -> bool {
        self == TranscriptRole::User
    }
}

impl AsRef<str> for TranscriptRole {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for TranscriptRole {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl TryFrom<&str> for TranscriptRole {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(TranscriptRole::User),
            "system" => Ok(TranscriptRole::System),
            _ => Err(format!("invalid transcript role: {value}")),
        }
    }
}

impl TryFrom<String> for TranscriptRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<TranscriptRole> for String {
    fn from(value: TranscriptRole) -> Self {
        value.as_str().to_string()
    }
}

/// How a system message is rendered and which affordances target it.
/// `Preview` entries are the copyable ones; the copy shortcut always acts
/// on the newest `Preview` in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Plain,
    Preview,
    Grammar,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: TranscriptRole,
    pub kind: MessageKind,
    pub content: String,
}

impl Message {
    pub fn new(role: TranscriptRole, kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            role,
            kind,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::User, MessageKind::Plain, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::System, MessageKind::Plain, content)
    }

    pub fn preview(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::System, MessageKind::Preview, content)
    }

    pub fn grammar(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::System, MessageKind::Grammar, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::System, MessageKind::Error, content)
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_preview(&self) -> bool {
        self.kind == MessageKind::Preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_role_and_kind() {
        assert_eq!(Message::user("hi").role, TranscriptRole::User);
        assert_eq!(Message::system("ok").role, TranscriptRole::System);
        assert_eq!(Message::preview("1. a b").kind, MessageKind::Preview);
        assert_eq!(Message::error("boom").kind, MessageKind::Error);
        assert!(Message::preview("x").is_preview());
        assert!(!Message::system("x").is_preview());
    }

    #[test]
    fn invalid_role_strings_are_rejected() {
        assert!(TranscriptRole::try_from("assistant").is_err());
        assert!(TranscriptRole::try_from("app/info").is_err());
    }

    #[test]
    fn roles_compare_against_strings() {
        assert_eq!(TranscriptRole::User, "user");
        assert_eq!(TranscriptRole::System, "system");
    }
}
