//! In-memory store and calendar queries for a personal scheduling app.
//!
//! An application creates one [`EventStore`] at startup and hands references
//! to it to whatever needs to read or change events and categories.

pub mod data;
pub mod digest;
pub mod error;
pub mod form;
pub mod settings;
pub mod wellness;

pub use data::{
    CalendarEvent, Category, CategoryId, CategoryKind, CategoryPatch, EventId, EventPatch,
    EventStore, NewCategory, NewEvent, WeekStart,
};
pub use digest::Digestible;
pub use error::{SettingsError, StoreError};
pub use settings::Settings;
