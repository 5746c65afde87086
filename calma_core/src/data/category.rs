use std::fmt;

use serde::{Deserialize, Serialize};

/// The color shown for events whose category no longer exists.
pub const FALLBACK_COLOR: &str = "#cbd5e1";
/// The label shown for events whose category no longer exists.
pub const FALLBACK_NAME: &str = "Sem categoria";

/// An opaque identifier for a category. Assigned by the store on creation and
/// never changed afterwards.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        CategoryId(id.to_owned())
    }
}

/// A coarse tag describing what kind of activity a category groups. This is
/// informational only.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default, Serialize, Deserialize)]
pub enum CategoryKind {
    Work,
    #[default]
    Personal,
    Health,
    Social,
    Other,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// A short label for the category, e.g. "Trabalho"
    pub name: String,
    /// A hex color such as "#FF8C5F". Several categories may share a color.
    pub color: String,
    pub kind: CategoryKind,
}

/// The fields of a category that is about to be created.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub kind: CategoryKind,
}

/// A partial update to a category. Fields that are `None` keep their current
/// value.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub kind: Option<CategoryKind>,
}

/// What a view needs to render the category of an event: either the real
/// category or the neutral fallback.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CategoryDisplay<'a> {
    pub name: &'a str,
    pub color: &'a str,
    /// Whether the category could not be found and the fallback was used.
    pub is_fallback: bool,
}

/// The number of events that reference a category.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CategoryUsage<'a> {
    pub category: &'a Category,
    pub event_count: usize,
}

impl NewCategory {
    pub(crate) fn into_category(self, id: CategoryId) -> Category {
        let NewCategory { name, color, kind } = self;
        Category { id, name, color, kind }
    }
}

impl CategoryPatch {
    /// Overwrites the fields of `category` that are present in this patch.
    /// The id is never changed.
    pub fn apply_to(self, category: &mut Category) {
        let CategoryPatch { name, color, kind } = self;
        if let Some(name) = name {
            category.name = name;
        }
        if let Some(color) = color {
            category.color = color;
        }
        if let Some(kind) = kind {
            category.kind = kind;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CategoryPatch::default()
    }
}

impl<'a> CategoryDisplay<'a> {
    pub fn of(category: &'a Category) -> Self {
        CategoryDisplay { name: &category.name, color: &category.color, is_fallback: false }
    }

    pub fn fallback(color: &'a str) -> Self {
        CategoryDisplay { name: FALLBACK_NAME, color, is_fallback: true }
    }
}

impl CategoryUsage<'_> {
    /// Returns whether no event uses the category. Distribution charts skip
    /// these.
    pub fn is_empty(&self) -> bool {
        self.event_count == 0
    }
}
