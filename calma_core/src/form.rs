//! Drafting and validating the event and category forms.
//!
//! The store accepts any fields it is given; this is where user input is
//! checked before it reaches the store. Validation never panics and reports
//! every problem at once so each can be shown next to its field.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::data::{
    CalendarEvent, Category, CategoryId, CategoryKind, CategoryPatch, EventPatch, NewCategory,
    NewEvent,
};

const DEFAULT_START: &str = "09:00";
const DEFAULT_END: &str = "10:00";
const DEFAULT_CATEGORY_COLOR: &str = "#FF8C5F";

/// Which time input of the form a problem refers to.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TimeField {
    Start,
    End,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Start => f.write_str("start"),
            TimeField::End => f.write_str("end"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FormError {
    #[error("title is required")]
    TitleRequired,
    #[error("a category must be chosen")]
    CategoryRequired,
    #[error("name is required")]
    NameRequired,
    #[error("{field} time `{value}` is not a valid HH:MM time")]
    InvalidTime { field: TimeField, value: String },
    #[error("end time must be after start time")]
    EndNotAfterStart,
}

/// All problems found in a draft, in field order.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{} problem(s) in form", .0.len())]
pub struct FormErrors(pub Vec<FormError>);

impl FormErrors {
    pub fn contains(&self, error: &FormError) -> bool {
        self.0.contains(error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormError> {
        self.0.iter()
    }
}

/// The raw contents of the event form. Times are kept as the "HH:MM" text of
/// the inputs until validation.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub start_time: String,
    pub end_time: String,
}

/// A draft that passed validation, anchored to a day.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ValidDraft {
    title: String,
    description: Option<String>,
    category_id: CategoryId,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl EventDraft {
    /// An empty form for creating an event, preselecting the first category.
    pub fn blank(categories: &[Category]) -> Self {
        EventDraft {
            title: String::new(),
            description: String::new(),
            category_id: categories.first().map(|c| c.id.0.clone()).unwrap_or_default(),
            start_time: DEFAULT_START.to_owned(),
            end_time: DEFAULT_END.to_owned(),
        }
    }

    /// A form prefilled with an existing event, for editing.
    pub fn from_event(event: &CalendarEvent) -> Self {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            category_id: event.category_id.0.clone(),
            start_time: event.start.format("%H:%M").to_string(),
            end_time: event.end.format("%H:%M").to_string(),
        }
    }

    /// Checks the draft and places its times on `day`.
    pub fn validate(&self, day: NaiveDate) -> Result<ValidDraft, FormErrors> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FormError::TitleRequired);
        }
        if self.category_id.is_empty() {
            errors.push(FormError::CategoryRequired);
        }

        let start = parse_time(TimeField::Start, &self.start_time).map_err(|e| errors.push(e));
        let end = parse_time(TimeField::End, &self.end_time).map_err(|e| errors.push(e));
        if let (Ok(start), Ok(end)) = (start, end) {
            if end <= start {
                errors.push(FormError::EndNotAfterStart);
            }
        }

        match (start, end) {
            (Ok(start), Ok(end)) if errors.is_empty() => {
                let description = self.description.trim();
                Ok(ValidDraft {
                    title: title.to_owned(),
                    description: (!description.is_empty()).then(|| description.to_owned()),
                    category_id: CategoryId(self.category_id.clone()),
                    start: day.and_time(start),
                    end: day.and_time(end),
                })
            }
            _ => Err(FormErrors(errors)),
        }
    }
}

impl ValidDraft {
    pub fn into_new_event(self) -> NewEvent {
        let ValidDraft { title, description, category_id, start, end } = self;
        NewEvent { title, description, start, end, category_id, completed: Some(false) }
    }

    /// A patch replacing every field the form edits. Completion is left as
    /// it is.
    pub fn into_patch(self) -> EventPatch {
        let ValidDraft { title, description, category_id, start, end } = self;
        EventPatch {
            title: Some(title),
            description: Some(description),
            start: Some(start),
            end: Some(end),
            category_id: Some(category_id),
            completed: None,
        }
    }
}

/// The raw contents of the category form.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
    pub kind: CategoryKind,
}

impl CategoryDraft {
    /// An empty form for creating a category.
    pub fn blank() -> Self {
        CategoryDraft {
            name: String::new(),
            color: DEFAULT_CATEGORY_COLOR.to_owned(),
            kind: CategoryKind::Personal,
        }
    }

    pub fn from_category(category: &Category) -> Self {
        CategoryDraft {
            name: category.name.clone(),
            color: category.color.clone(),
            kind: category.kind,
        }
    }

    /// Checks the draft. The name is trimmed and must not be empty.
    pub fn validate(&self) -> Result<NewCategory, FormErrors> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormErrors(vec![FormError::NameRequired]));
        }
        Ok(NewCategory { name: name.to_owned(), color: self.color.clone(), kind: self.kind })
    }

    /// Same as `validate`, as a patch replacing every field of an existing
    /// category.
    pub fn validate_patch(&self) -> Result<CategoryPatch, FormErrors> {
        let NewCategory { name, color, kind } = self.validate()?;
        Ok(CategoryPatch { name: Some(name), color: Some(color), kind: Some(kind) })
    }
}

fn parse_time(field: TimeField, value: &str) -> Result<NaiveTime, FormError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| FormError::InvalidTime { field, value: value.to_owned() })
}
