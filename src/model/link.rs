use serde::{Deserialize, Serialize};

/// A user-managed external reference shown in navigation.
/// Name and url may be empty; only links with both non-empty are navigable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundLink {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl BackgroundLink {
    /// Create an empty link with the given id (fields filled in later)
    pub fn empty(id: impl Into<String>) -> Self {
        BackgroundLink {
            id: id.into(),
            name: String::new(),
            url: String::new(),
        }
    }

    /// Whether the link has both fields and can be shown as navigation
    pub fn is_navigable(&self) -> bool {
        !self.name.is_empty() && !self.url.is_empty()
    }
}

/// The two editable link fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Name,
    Url,
}

impl LinkField {
    pub fn key(self) -> &'static str {
        match self {
            LinkField::Name => "name",
            LinkField::Url => "url",
        }
    }

    pub fn parse(s: &str) -> Option<LinkField> {
        match s {
            "name" => Some(LinkField::Name),
            "url" => Some(LinkField::Url),
            _ => None,
        }
    }
}
