use crate::models::{Activity, ActivityCatalog};
use chrono::Weekday;

pub const SCHOOL_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Literal, case-insensitive match of the full day name ("Wed" alone never matches).
pub fn meets_on(schedule: &str, day: Weekday) -> bool {
    schedule
        .to_lowercase()
        .contains(&day_name(day).to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry<'a> {
    pub name: &'a str,
    pub activity: &'a Activity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn<'a> {
    pub day: Weekday,
    pub entries: Vec<CalendarEntry<'a>>,
}

impl DayColumn<'_> {
    pub fn title(&self) -> &'static str {
        day_name(self.day)
    }
}

/// One column per school day; an activity lands in every day its schedule names.
pub fn week_columns(catalog: &ActivityCatalog) -> Vec<DayColumn<'_>> {
    SCHOOL_DAYS
        .iter()
        .map(|&day| DayColumn {
            day,
            entries: catalog
                .iter()
                .filter(|(_, activity)| meets_on(&activity.schedule, day))
                .map(|(name, activity)| CalendarEntry { name, activity })
                .collect(),
        })
        .collect()
}
