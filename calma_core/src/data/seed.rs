//! The fixed dataset a fresh store starts with.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{
    category::{Category, CategoryId, CategoryKind},
    event::{CalendarEvent, EventId},
};

pub fn categories() -> Vec<Category> {
    [
        ("1", "Trabalho", "#FF8C5F", CategoryKind::Work),
        ("2", "Foco", "#49A1FF", CategoryKind::Work),
        ("3", "Saúde", "#7ED321", CategoryKind::Health),
        ("4", "Social", "#F4A261", CategoryKind::Social),
        ("5", "Lazer", "#E76F51", CategoryKind::Personal),
    ]
    .into_iter()
    .map(|(id, name, color, kind)| Category {
        id: CategoryId::from(id),
        name: name.to_owned(),
        color: color.to_owned(),
        kind,
    })
    .collect()
}

/// The seed events, all placed on `today`.
pub fn events(today: NaiveDate) -> Vec<CalendarEvent> {
    let at = |hour: u32, minute: u32| -> NaiveDateTime {
        today.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN))
    };
    vec![
        CalendarEvent {
            id: EventId::from("1"),
            title: "Meditação Matinal".to_owned(),
            description: Some("Começar o dia com calma.".to_owned()),
            start: at(7, 0),
            end: at(7, 30),
            category_id: CategoryId::from("3"),
            completed: false,
        },
        CalendarEvent {
            id: EventId::from("2"),
            title: "Reunião de Design".to_owned(),
            description: Some("Discutir novas features.".to_owned()),
            start: at(10, 0),
            end: at(11, 0),
            category_id: CategoryId::from("1"),
            completed: false,
        },
        CalendarEvent {
            id: EventId::from("3"),
            title: "Almoço com Amigos".to_owned(),
            description: None,
            start: at(12, 30),
            end: at(13, 30),
            category_id: CategoryId::from("4"),
            completed: false,
        },
    ]
}
