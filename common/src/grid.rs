use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};

use crate::appointment::Appointment;

/// The calendar displays fixed half-hour slots from 08:00 through 19:00
/// inclusive: 23 rows.
pub const FIRST_SLOT_HOUR: u32 = 8;
pub const LAST_SLOT_HOUR: u32 = 19;
pub const SLOT_COUNT: usize = ((LAST_SLOT_HOUR - FIRST_SLOT_HOUR) * 2 + 1) as usize;

/// Convert a slot index to (hour, minute).
pub fn slot_time(slot: usize) -> Option<(u32, u32)> {
    if slot >= SLOT_COUNT {
        return None;
    }
    let hour = FIRST_SLOT_HOUR + slot as u32 / 2;
    let minute = (slot as u32 % 2) * 30;
    Some((hour, minute))
}

/// Format a slot as "HH:MM".
pub fn slot_label(slot: usize) -> String {
    match slot_time(slot) {
        Some((h, m)) => format!("{h:02}:{m:02}"),
        None => "??:??".into(),
    }
}

/// All slot labels in display order: "08:00", "08:30", ..., "19:00".
pub fn slot_labels() -> Vec<String> {
    (0..SLOT_COUNT).map(slot_label).collect()
}

/// Slot index for a time of day. Only exact half-hour boundaries inside the
/// displayed range match; anything else returns `None` and is hidden in
/// grid mode.
pub fn slot_for_time(time: NaiveTime) -> Option<usize> {
    use chrono::Timelike;
    if time.second() != 0 || time.nanosecond() != 0 {
        return None;
    }
    let (hour, minute) = (time.hour(), time.minute());
    if minute != 0 && minute != 30 {
        return None;
    }
    if hour < FIRST_SLOT_HOUR || hour > LAST_SLOT_HOUR || (hour == LAST_SLOT_HOUR && minute != 0) {
        return None;
    }
    Some(((hour - FIRST_SLOT_HOUR) * 2 + minute / 30) as usize)
}

/// Monday of the week containing the reference date.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    let back = reference.weekday().num_days_from_monday() as u64;
    reference - Days::new(back)
}

/// The seven consecutive days starting at `start`.
pub fn week_days(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| start + Days::new(i as u64))
}

/// Full weekday name for display (0 = Monday in our grids).
pub fn weekday_name(day: Weekday) -> &'static str {
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

/// Short weekday name for column headers.
pub fn weekday_name_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Barber filter for the calendar: everything, or one barber's bookings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BarberFilter {
    #[default]
    All,
    Only(String),
}

impl BarberFilter {
    pub fn matches(&self, barber_id: &str) -> bool {
        match self {
            BarberFilter::All => true,
            BarberFilter::Only(id) => id == barber_id,
        }
    }
}

/// Free-text search over client name and service names, case-insensitive.
/// An empty search matches everything.
pub fn matches_search(apt: &Appointment, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    apt.client_name.to_lowercase().contains(&needle)
        || apt
            .services
            .iter()
            .any(|s| s.name.to_lowercase().contains(&needle))
}

/// Combined calendar filter predicate.
pub fn passes(apt: &Appointment, filter: &BarberFilter, search: &str) -> bool {
    filter.matches(&apt.barber_id) && matches_search(apt, search)
}

/// Filtered view of the store, insertion order preserved.
pub fn filter_appointments<'a>(
    appointments: &'a [Appointment],
    filter: &BarberFilter,
    search: &str,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|apt| passes(apt, filter, search))
        .collect()
}

/// Filtered appointments falling on one calendar day, for the list view.
pub fn appointments_for_day<'a>(
    appointments: &'a [Appointment],
    day: NaiveDate,
    filter: &BarberFilter,
    search: &str,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|apt| apt.date.date() == day && passes(apt, filter, search))
        .collect()
}

/// One slot row of the weekly grid: a label plus a cell per weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub slot: usize,
    pub label: String,
    pub cells: [Vec<Appointment>; 7],
}

/// The rendered week: seven days by [`SLOT_COUNT`] half-hour rows.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub days: [NaiveDate; 7],
    pub rows: Vec<GridRow>,
}

impl WeekGrid {
    /// Total appointments placed in the grid.
    pub fn len(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(Vec::len).sum::<usize>())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket appointments into the week containing `reference`, applying the
/// barber filter and search. Pure function of its inputs: appointments off
/// a slot boundary or outside the week are left out, and insertion order is
/// preserved within each cell.
pub fn build_week_grid(
    appointments: &[Appointment],
    reference: NaiveDate,
    filter: &BarberFilter,
    search: &str,
) -> WeekGrid {
    let days = week_days(week_start(reference));
    let mut rows: Vec<GridRow> = (0..SLOT_COUNT)
        .map(|slot| GridRow {
            slot,
            label: slot_label(slot),
            cells: std::array::from_fn(|_| Vec::new()),
        })
        .collect();

    for apt in appointments {
        if !passes(apt, filter, search) {
            continue;
        }
        let Some(day_index) = days.iter().position(|d| *d == apt.date.date()) else {
            continue;
        };
        let Some(slot) = slot_for_time(apt.date.time()) else {
            continue;
        };
        rows[slot].cells[day_index].push(apt.clone());
    }

    WeekGrid { days, rows }
}
