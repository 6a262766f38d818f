//! Content library — instance-scoped repository of reusable content items.
//!
//! Each consumer owns (or borrows) its own library; there is no shared
//! global collection to leak state between tests or sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of library entry this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Image,
    Video,
    Caption,
    Template,
}

/// A reusable piece of content owned by a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    pub kind: ContentKind,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn new(title: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            kind,
            favorite: false,
            created_at: Utc::now(),
        }
    }
}

/// In-memory content collection with favorites.
#[derive(Debug, Default)]
pub struct ContentLibrary {
    items: Vec<ContentItem>,
}

impl ContentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library pre-seeded with a handful of sample items.
    pub fn with_samples() -> Self {
        let mut library = Self::new();
        for (title, kind) in [
            ("Launch announcement", ContentKind::Template),
            ("Product shot, white background", ContentKind::Image),
            ("Customer testimonial reel", ContentKind::Video),
            ("Friday engagement question", ContentKind::Caption),
            ("Holiday promo banner", ContentKind::Image),
        ] {
            library.add(title, kind);
        }
        library
    }

    /// Add an item, returning its generated id.
    pub fn add(&mut self, title: impl Into<String>, kind: ContentKind) -> Uuid {
        let item = ContentItem::new(title, kind);
        let id = item.id;
        self.items.push(item);
        id
    }

    /// All items, oldest first.
    pub fn list(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items currently marked favorite, in insertion order.
    pub fn favorites(&self) -> Vec<&ContentItem> {
        self.items.iter().filter(|i| i.favorite).collect()
    }

    /// Flip an item's favorite flag. Returns the new value, or `None` for
    /// an unknown id.
    pub fn toggle_favorite(&mut self, id: Uuid) -> Option<bool> {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        item.favorite = !item.favorite;
        Some(item.favorite)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
