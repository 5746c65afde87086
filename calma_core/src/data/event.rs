use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::category::CategoryId;

/// An opaque identifier for an event. Assigned by the store on creation and
/// never changed afterwards.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId(id.to_owned())
    }
}

/// A titled interval of local wall-clock time.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    /// A short description of the event, e.g. "Reunião de Design".
    pub title: String,
    /// A longer description of the event.
    pub description: Option<String>,
    pub start: NaiveDateTime,
    /// Should be strictly after `start`. The store does not check this; the
    /// form layer does.
    pub end: NaiveDateTime,
    /// The category of the event. May refer to a category that has since been
    /// deleted.
    pub category_id: CategoryId,
    pub completed: bool,
}

/// The fields of an event that is about to be created.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category_id: CategoryId,
    /// Defaults to not completed.
    pub completed: Option<bool>,
}

/// A partial update to an event. Fields that are `None` keep their current
/// value. `description: Some(None)` clears the description.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub category_id: Option<CategoryId>,
    pub completed: Option<bool>,
}

impl CalendarEvent {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns whether the event ends strictly after it starts.
    pub fn has_valid_interval(&self) -> bool {
        self.end > self.start
    }
}

impl NewEvent {
    pub(crate) fn into_event(self, id: EventId) -> CalendarEvent {
        let NewEvent { title, description, start, end, category_id, completed } = self;
        CalendarEvent {
            id,
            title,
            description,
            start,
            end,
            category_id,
            completed: completed.unwrap_or(false),
        }
    }
}

impl EventPatch {
    /// Overwrites the fields of `event` that are present in this patch. The id
    /// is never changed.
    pub fn apply_to(self, event: &mut CalendarEvent) {
        let EventPatch { title, description, start, end, category_id, completed } = self;
        if let Some(title) = title {
            event.title = title;
        }
        if let Some(description) = description {
            event.description = description;
        }
        if let Some(start) = start {
            event.start = start;
        }
        if let Some(end) = end {
            event.end = end;
        }
        if let Some(category_id) = category_id {
            event.category_id = category_id;
        }
        if let Some(completed) = completed {
            event.completed = completed;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    pub fn completed(completed: bool) -> Self {
        EventPatch { completed: Some(completed), ..Default::default() }
    }
}

/// Sorts events ascending by start time. Events with equal start times keep
/// their relative order.
pub fn sorted_by_start<'a>(
    events: impl IntoIterator<Item = &'a CalendarEvent>,
) -> Vec<&'a CalendarEvent> {
    let mut events: Vec<_> = events.into_iter().collect();
    events.sort_by_key(|event| event.start);
    events
}
