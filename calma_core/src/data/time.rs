use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// The day on which a calendar week begins. Weeks always span seven days
/// starting at this weekday.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekStart(pub Weekday);

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart(Weekday::Sun)
    }
}

/// An inclusive span of calendar days, from `first` up to and including
/// `last`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateSpan {
    /// Creates a span covering `first` through `last`. If `last` is before
    /// `first` the span is empty.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        DateSpan { first, last }
    }

    /// A span containing only the given day.
    pub fn single(day: NaiveDate) -> Self {
        DateSpan { first: day, last: day }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.first <= day && day <= self.last
    }

    /// Returns whether the local date-time falls on one of the days of this
    /// span.
    pub fn contains_datetime(&self, dt: NaiveDateTime) -> bool {
        self.contains(dt.date())
    }

    /// Iterates over every day in the span in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        // `iter_days` never yields `NaiveDate::MAX`, so step with `succ_opt`
        std::iter::successors(Some(self.first), |day| day.succ_opt())
            .take_while(move |day| *day <= last)
    }

    pub fn len(&self) -> usize {
        self.days().count()
    }

    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }
}

/// Returns whether the date-time falls on the given calendar day. Comparison
/// is done at day granularity on local wall-clock time.
pub fn same_day(dt: NaiveDateTime, day: NaiveDate) -> bool {
    dt.date() == day
}

pub fn start_of_week(day: NaiveDate, week_start: WeekStart) -> NaiveDate {
    // number of days since the most recent week start (0 if today is one)
    let offset = (7 + day.weekday().num_days_from_sunday() - week_start.0.num_days_from_sunday())
        % 7;
    // weeks are clamped to chrono's supported range at either end
    day.checked_sub_days(Days::new(u64::from(offset))).unwrap_or(NaiveDate::MIN)
}

pub fn end_of_week(day: NaiveDate, week_start: WeekStart) -> NaiveDate {
    start_of_week(day, week_start).checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
}

pub fn week_span(day: NaiveDate, week_start: WeekStart) -> DateSpan {
    DateSpan::new(start_of_week(day, week_start), end_of_week(day, week_start))
}

pub fn start_of_month(day: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    day.with_day(1).unwrap_or(day)
}

pub fn end_of_month(day: NaiveDate) -> NaiveDate {
    let first = start_of_month(day);
    // the last day of the month is the day before the first of the next
    // month; this only fails at the very end of chrono's supported range
    first
        .checked_add_months(Months::new(1))
        .and_then(|next_first| next_first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

pub fn month_span(day: NaiveDate) -> DateSpan {
    DateSpan::new(start_of_month(day), end_of_month(day))
}

/// Returns the seven days of the week containing `day`, starting at the
/// configured week start.
pub fn week_days(day: NaiveDate, week_start: WeekStart) -> [NaiveDate; 7] {
    let start = start_of_week(day, week_start);
    std::array::from_fn(|i| {
        start.checked_add_days(Days::new(i as u64)).unwrap_or(NaiveDate::MAX)
    })
}

/// Returns the days displayed by a month grid: from the start of the week
/// containing the first of the month to the end of the week containing the
/// last of the month. The length is always a multiple of seven, and days
/// outside of the month pad the first and last rows.
pub fn month_grid(day: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let first = start_of_week(start_of_month(day), week_start);
    let last = end_of_week(end_of_month(day), week_start);
    DateSpan::new(first, last).days().collect()
}
