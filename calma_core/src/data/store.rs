use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

use super::{
    category::{
        Category, CategoryDisplay, CategoryId, CategoryPatch, CategoryUsage, NewCategory,
        FALLBACK_COLOR,
    },
    event::{sorted_by_start, CalendarEvent, EventId, EventPatch, NewEvent},
    seed,
    time::{month_span, week_span, DateSpan, WeekStart},
};
use crate::error::StoreError;

/// Number of base-36 digits in a generated identifier.
const ID_LEN: usize = 7;
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The single owner of all events and categories.
///
/// Both collections keep insertion order. Every query is computed from the
/// live collections, so a mutation is visible to the very next read.
#[derive(Debug)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    categories: Vec<Category>,
    /// The day the calendar views are centered on.
    view_date: NaiveDate,
    /// The day the user last picked, if any.
    selected_date: Option<NaiveDate>,
    /// Color used for events whose category cannot be found.
    fallback_color: String,
    /// First day of the week for week queries.
    week_start: WeekStart,
    rng: StdRng,
}

impl EventStore {
    /// Creates an empty store whose views start on `today`.
    pub fn new(today: NaiveDate) -> Self {
        EventStore {
            events: Vec::new(),
            categories: Vec::new(),
            view_date: today,
            selected_date: Some(today),
            fallback_color: FALLBACK_COLOR.to_owned(),
            week_start: WeekStart::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a store holding the fixed startup dataset, with the seed
    /// events placed on `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        let mut store = EventStore::new(today);
        store.categories = seed::categories();
        store.events = seed::events(today);
        store
    }

    /// Same as `seeded`, using the current local date.
    pub fn seeded_now() -> Self {
        EventStore::seeded(Local::now().date_naive())
    }

    /// Replaces the random source used for identifiers, e.g. with a
    /// deterministic one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    // Draws base-36 tokens until one is found that `taken` rejects.
    fn gen_unique_id(rng: &mut StdRng, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id: String = (0..ID_LEN)
                .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
                .collect();
            if !taken(&id) {
                return id;
            }
        }
    }

    fn event_index(&self, id: &EventId) -> Option<usize> {
        self.events.iter().position(|event| &event.id == id)
    }

    fn category_index(&self, id: &CategoryId) -> Option<usize> {
        self.categories.iter().position(|category| &category.id == id)
    }

    // ---- events ----

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn event(&self, id: &EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Appends a new event under a freshly generated id and returns that id.
    /// No validation is done on the fields.
    pub fn add_event(&mut self, new_event: NewEvent) -> EventId {
        let events = &self.events;
        let id = EventId(Self::gen_unique_id(&mut self.rng, |candidate| {
            events.iter().any(|event| event.id.as_str() == candidate)
        }));
        debug!(event_id = %id, title = %new_event.title, "adding event");
        self.events.push(new_event.into_event(id.clone()));
        id
    }

    /// Merges the patch into the event with the given id, returning the
    /// updated event.
    pub fn update_event(
        &mut self,
        id: &EventId,
        patch: EventPatch,
    ) -> Result<&CalendarEvent, StoreError> {
        let Some(index) = self.event_index(id) else {
            debug!(event_id = %id, "update of unknown event ignored");
            return Err(StoreError::EventNotFound(id.clone()));
        };
        debug!(event_id = %id, "updating event");
        let event = &mut self.events[index];
        patch.apply_to(event);
        Ok(event)
    }

    /// Removes the event with the given id, returning it.
    pub fn delete_event(&mut self, id: &EventId) -> Result<CalendarEvent, StoreError> {
        let Some(index) = self.event_index(id) else {
            debug!(event_id = %id, "delete of unknown event ignored");
            return Err(StoreError::EventNotFound(id.clone()));
        };
        debug!(event_id = %id, "deleting event");
        Ok(self.events.remove(index))
    }

    /// Flips the completion flag of the event with the given id, returning the
    /// new value.
    pub fn toggle_event_completion(&mut self, id: &EventId) -> Result<bool, StoreError> {
        let Some(index) = self.event_index(id) else {
            debug!(event_id = %id, "toggle of unknown event ignored");
            return Err(StoreError::EventNotFound(id.clone()));
        };
        let event = &mut self.events[index];
        event.completed = !event.completed;
        debug!(event_id = %id, completed = event.completed, "toggled event completion");
        Ok(event.completed)
    }

    // ---- categories ----

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    /// Appends a new category under a freshly generated id and returns that
    /// id.
    pub fn add_category(&mut self, new_category: NewCategory) -> CategoryId {
        let categories = &self.categories;
        let id = CategoryId(Self::gen_unique_id(&mut self.rng, |candidate| {
            categories.iter().any(|category| category.id.as_str() == candidate)
        }));
        debug!(category_id = %id, name = %new_category.name, "adding category");
        self.categories.push(new_category.into_category(id.clone()));
        id
    }

    pub fn update_category(
        &mut self,
        id: &CategoryId,
        patch: CategoryPatch,
    ) -> Result<&Category, StoreError> {
        let Some(index) = self.category_index(id) else {
            debug!(category_id = %id, "update of unknown category ignored");
            return Err(StoreError::CategoryNotFound(id.clone()));
        };
        debug!(category_id = %id, "updating category");
        let category = &mut self.categories[index];
        patch.apply_to(category);
        Ok(category)
    }

    /// Removes the category with the given id, returning it. Events that
    /// reference the category are left untouched and keep the now dangling
    /// reference.
    pub fn delete_category(&mut self, id: &CategoryId) -> Result<Category, StoreError> {
        let Some(index) = self.category_index(id) else {
            debug!(category_id = %id, "delete of unknown category ignored");
            return Err(StoreError::CategoryNotFound(id.clone()));
        };
        debug!(category_id = %id, "deleting category");
        Ok(self.categories.remove(index))
    }

    // ---- queries ----

    /// Returns all events starting on the given day, in store order.
    pub fn events_for_date(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        self.events_in_span(DateSpan::single(day))
    }

    /// Returns all events starting on any day of the span, in store order.
    pub fn events_in_span(&self, span: DateSpan) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|event| span.contains_datetime(event.start)).collect()
    }

    /// Returns the events of the week containing `day`, using the store's
    /// configured week start.
    pub fn events_for_week(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        self.events_in_span(week_span(day, self.week_start))
    }

    pub fn events_for_month(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        self.events_in_span(month_span(day))
    }

    /// Returns the events of a day in chronological order.
    pub fn agenda_for(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        sorted_by_start(self.events_for_date(day))
    }

    /// Resolves the category of an event for display, falling back to a
    /// neutral label and color when the category no longer exists.
    pub fn category_display(&self, id: &CategoryId) -> CategoryDisplay<'_> {
        match self.category(id) {
            Some(category) => CategoryDisplay::of(category),
            None => {
                trace!(category_id = %id, "category not found, using fallback");
                CategoryDisplay::fallback(&self.fallback_color)
            }
        }
    }

    pub fn fallback_color(&self) -> &str {
        &self.fallback_color
    }

    pub fn set_fallback_color(&mut self, color: impl Into<String>) {
        self.fallback_color = color.into();
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn set_week_start(&mut self, week_start: WeekStart) {
        self.week_start = week_start;
    }

    /// Counts the events referencing each category, in category order.
    /// Categories without events are included with a count of zero.
    pub fn category_usage(&self) -> Vec<CategoryUsage<'_>> {
        let mut counts: HashMap<&CategoryId, usize> = HashMap::new();
        for event in self.events.iter() {
            *counts.entry(&event.category_id).or_default() += 1;
        }
        self.categories
            .iter()
            .map(|category| CategoryUsage {
                category,
                event_count: counts.get(&category.id).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Returns the events whose category no longer exists, in store order.
    pub fn dangling_events(&self) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|event| self.category(&event.category_id).is_none()).collect()
    }

    // ---- view state ----

    pub fn view_date(&self) -> NaiveDate {
        self.view_date
    }

    pub fn set_view_date(&mut self, day: NaiveDate) {
        self.view_date = day;
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn set_selected_date(&mut self, day: Option<NaiveDate>) {
        self.selected_date = day;
    }
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDateTime, Weekday};

    use super::super::category::CategoryKind;
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("calma_core=trace")
            .with_test_writer()
            .try_init();
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        day.and_hms_opt(hour, minute, 0).unwrap()
    }

    fn new_event(
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        category: &str,
    ) -> NewEvent {
        NewEvent {
            title: title.to_owned(),
            description: None,
            start,
            end,
            category_id: CategoryId::from(category),
            completed: None,
        }
    }

    fn titles<'a>(events: &[&'a CalendarEvent]) -> Vec<&'a str> {
        events.iter().map(|event| event.title.as_str()).collect()
    }

    #[test]
    fn add_event_assigns_fresh_id() {
        init_tracing();
        let mut store = EventStore::seeded(today()).with_rng(StdRng::seed_from_u64(7));
        let before: Vec<_> = store.events().iter().map(|e| e.id.clone()).collect();

        let fields = new_event("X", at(today(), 15, 0), at(today(), 16, 0), "1");
        let id = store.add_event(fields.clone());

        assert!(!before.contains(&id));
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(id.as_str().bytes().all(|b| ID_ALPHABET.contains(&b)));
        let matching: Vec<_> = store.events().iter().filter(|e| e.id == id).collect();
        assert_eq!(matching, vec![&fields.into_event(id.clone())]);
        assert_eq!(store.events().len(), before.len() + 1);
        assert_eq!(store.events().last().map(|e| &e.id), Some(&id));
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut store = EventStore::new(today()).with_rng(StdRng::seed_from_u64(1));
        for i in 0..2000 {
            let title = format!("e{i}");
            store.add_event(new_event(&title, at(today(), 9, 0), at(today(), 10, 0), "1"));
        }
        let mut ids: Vec<_> = store.events().iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 2000);
    }

    #[test]
    fn gen_unique_id_skips_taken_tokens() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = EventStore::gen_unique_id(&mut rng.clone(), |_| false);
        let second = EventStore::gen_unique_id(&mut rng, |candidate| candidate == first);
        assert_ne!(first, second);
    }

    #[test]
    fn unknown_ids_leave_store_unchanged() {
        init_tracing();
        let mut store = EventStore::seeded(today());
        let events_before = store.events().to_vec();
        let categories_before = store.categories().to_vec();
        let missing = EventId::from("nope");

        assert_eq!(
            store.update_event(&missing, EventPatch::completed(true)),
            Err(StoreError::EventNotFound(missing.clone()))
        );
        assert_eq!(store.delete_event(&missing), Err(StoreError::EventNotFound(missing.clone())));
        assert_eq!(
            store.toggle_event_completion(&missing),
            Err(StoreError::EventNotFound(missing.clone()))
        );

        let missing = CategoryId::from("nope");
        assert_eq!(
            store.update_category(&missing, CategoryPatch::default()),
            Err(StoreError::CategoryNotFound(missing.clone()))
        );
        assert_eq!(
            store.delete_category(&missing),
            Err(StoreError::CategoryNotFound(missing.clone()))
        );

        assert_eq!(store.events(), &events_before[..]);
        assert_eq!(store.categories(), &categories_before[..]);
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut store = EventStore::seeded(today());
        let id = EventId::from("2");
        let original = store.event(&id).map(|e| e.completed);

        assert_eq!(store.toggle_event_completion(&id), Ok(true));
        assert_eq!(store.toggle_event_completion(&id), Ok(false));
        assert_eq!(store.event(&id).map(|e| e.completed), original);
    }

    #[test]
    fn add_update_toggle_scenario() {
        let mut store = EventStore::seeded(today());
        let id = store.add_event(new_event("X", at(today(), 8, 0), at(today(), 9, 0), "1"));
        assert_eq!(store.event(&id).map(|e| e.completed), Some(false));

        let updated = store.update_event(&id, EventPatch::completed(true)).unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "X");

        assert_eq!(store.toggle_event_completion(&id), Ok(false));
        assert_eq!(store.event(&id).map(|e| e.completed), Some(false));
    }

    #[test]
    fn update_event_merges_fields() {
        let mut store = EventStore::seeded(today());
        let id = EventId::from("1");
        let before = store.event(&id).cloned().unwrap();

        let patch = EventPatch {
            title: Some("Meditação Longa".to_owned()),
            end: Some(at(today(), 8, 0)),
            ..Default::default()
        };
        let after = store.update_event(&id, patch).unwrap().clone();

        assert_eq!(
            after,
            CalendarEvent {
                title: "Meditação Longa".to_owned(),
                end: at(today(), 8, 0),
                ..before
            }
        );
    }

    #[test]
    fn delete_event_removes_only_that_event() {
        let mut store = EventStore::seeded(today());
        let removed = store.delete_event(&EventId::from("2")).unwrap();
        assert_eq!(removed.title, "Reunião de Design");
        let remaining: Vec<_> = store.events().iter().collect();
        assert_eq!(titles(&remaining), vec!["Meditação Matinal", "Almoço com Amigos"]);
        assert_eq!(store.event(&EventId::from("2")), None);
    }

    #[test]
    fn seeded_agenda_for_today() {
        let store = EventStore::seeded(today());
        let agenda = store.agenda_for(today());
        assert_eq!(
            titles(&agenda),
            vec!["Meditação Matinal", "Reunião de Design", "Almoço com Amigos"]
        );
        let categories: Vec<_> = agenda.iter().map(|e| e.category_id.as_str()).collect();
        assert_eq!(categories, vec!["3", "1", "4"]);
    }

    #[test]
    fn events_for_date_keeps_store_order() {
        let mut store = EventStore::seeded(today());
        store.add_event(new_event("Cedo", at(today(), 6, 0), at(today(), 6, 30), "3"));
        let tomorrow = today().succ_opt().unwrap();
        store.add_event(new_event("Amanhã", at(tomorrow, 6, 0), at(tomorrow, 7, 0), "3"));

        let on_day = store.events_for_date(today());
        assert_eq!(
            titles(&on_day),
            vec!["Meditação Matinal", "Reunião de Design", "Almoço com Amigos", "Cedo"]
        );
        assert_eq!(titles(&store.agenda_for(today()))[0], "Cedo");

        let empty_day = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(store.events_for_date(empty_day).is_empty());
    }

    #[test]
    fn events_for_date_uses_day_granularity() {
        let mut store = EventStore::new(today());
        let tomorrow = today().succ_opt().unwrap();
        store.add_event(new_event("midnight", at(today(), 0, 0), at(today(), 1, 0), "1"));
        store.add_event(new_event("late", at(today(), 23, 59), at(tomorrow, 0, 30), "1"));
        store.add_event(new_event("next", at(tomorrow, 0, 0), at(tomorrow, 1, 0), "1"));

        assert_eq!(titles(&store.events_for_date(today())), vec!["midnight", "late"]);
        assert_eq!(titles(&store.events_for_date(tomorrow)), vec!["next"]);
    }

    #[test]
    fn week_and_month_queries() {
        let mut store = EventStore::new(today());
        // 2024-05-12 is a sunday, 2024-05-13 a monday
        let sunday = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();
        let next_sunday = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
        let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        store.add_event(new_event("sun", at(sunday, 9, 0), at(sunday, 10, 0), "1"));
        store.add_event(new_event("sat", at(saturday, 9, 0), at(saturday, 10, 0), "1"));
        store.add_event(new_event("next sun", at(next_sunday, 9, 0), at(next_sunday, 10, 0), "1"));
        store.add_event(new_event("june", at(june, 9, 0), at(june, 10, 0), "1"));

        assert_eq!(store.week_start(), WeekStart(Weekday::Sun));
        assert_eq!(titles(&store.events_for_week(today())), vec!["sun", "sat"]);
        store.set_week_start(WeekStart(Weekday::Mon));
        assert_eq!(titles(&store.events_for_week(today())), vec!["sat", "next sun"]);
        assert_eq!(titles(&store.events_for_month(today())), vec!["sun", "sat", "next sun"]);
    }

    #[test]
    fn deleting_category_leaves_dangling_reference() {
        init_tracing();
        let mut store = EventStore::seeded(today());
        let id = store.add_category(NewCategory {
            name: "Leitura".to_owned(),
            color: "#111111".to_owned(),
            kind: CategoryKind::Personal,
        });
        let event_id =
            store.add_event(new_event("Ler", at(today(), 21, 0), at(today(), 22, 0), id.as_str()));
        let event_before = store.event(&event_id).cloned();

        assert_eq!(store.category_display(&id).name, "Leitura");
        let removed = store.delete_category(&id).unwrap();
        assert_eq!(removed.color, "#111111");

        assert!(store.categories().iter().all(|c| c.id != id));
        assert_eq!(store.event(&event_id).cloned(), event_before);
        assert_eq!(store.event(&event_id).map(|e| &e.category_id), Some(&id));

        let display = store.category_display(&id);
        assert!(display.is_fallback);
        assert_eq!(display.color, FALLBACK_COLOR);
        assert_eq!(titles(&store.dangling_events()), vec!["Ler"]);
    }

    #[test]
    fn fallback_color_is_configurable() {
        let mut store = EventStore::new(today());
        store.set_fallback_color("#999999");
        assert_eq!(store.category_display(&CategoryId::from("gone")).color, "#999999");
    }

    #[test]
    fn update_category_merges_fields() {
        let mut store = EventStore::seeded(today());
        let id = CategoryId::from("2");
        let patch = CategoryPatch { name: Some("Foco Total".to_owned()), ..Default::default() };
        let updated = store.update_category(&id, patch).unwrap();
        assert_eq!(updated.name, "Foco Total");
        assert_eq!(updated.color, "#49A1FF");
        assert_eq!(updated.kind, CategoryKind::Work);
    }

    #[test]
    fn category_usage_counts_events() {
        let mut store = EventStore::seeded(today());
        store.add_event(new_event("Trabalho extra", at(today(), 15, 0), at(today(), 16, 0), "1"));
        store.add_event(new_event("Sem dono", at(today(), 17, 0), at(today(), 18, 0), "gone"));

        let usage: Vec<_> = store
            .category_usage()
            .iter()
            .map(|usage| (usage.category.id.as_str(), usage.event_count))
            .collect();
        assert_eq!(usage, vec![("1", 2), ("2", 0), ("3", 1), ("4", 1), ("5", 0)]);

        let nonempty = store.category_usage().into_iter().filter(|usage| !usage.is_empty()).count();
        assert_eq!(nonempty, 3);
    }

    #[test]
    fn view_state() {
        let mut store = EventStore::new(today());
        assert_eq!(store.view_date(), today());
        assert_eq!(store.selected_date(), Some(today()));

        let other = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        store.set_view_date(other);
        store.set_selected_date(None);
        assert_eq!(store.view_date(), other);
        assert_eq!(store.selected_date(), None);
    }
}
