pub mod category;
pub mod event;
pub mod seed;
pub mod store;
pub mod time;

pub use category::{
    Category, CategoryDisplay, CategoryId, CategoryKind, CategoryPatch, CategoryUsage,
    NewCategory,
};
pub use event::{sorted_by_start, CalendarEvent, EventId, EventPatch, NewEvent};
pub use store::EventStore;
pub use time::{DateSpan, WeekStart};
