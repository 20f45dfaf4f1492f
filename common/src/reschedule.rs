use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::appointment::Appointment;
use crate::grid::{slot_label, slot_time, weekday_name};
use crate::store::AppointmentStore;

/// Drag interaction state for the weekly grid. One drag at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(String),
}

impl DragState {
    /// Drag-start targeting an appointment.
    pub fn begin(&mut self, id: impl Into<String>) {
        *self = DragState::Dragging(id.into());
    }

    /// The appointment currently in flight, if any.
    pub fn active_id(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(id) => Some(id),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    /// End the drag, returning the dragged id. Used both for drops on a
    /// valid target and for cancellation (drop outside any slot).
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging(id) => Some(id),
        }
    }
}

/// Timestamp for a drop target: the given week day at the slot's hour:minute.
pub fn drop_target_datetime(
    days: &[NaiveDate; 7],
    day_index: usize,
    slot: usize,
) -> Option<NaiveDateTime> {
    let day = *days.get(day_index)?;
    let (hour, minute) = slot_time(slot)?;
    day.and_hms_opt(hour, minute, 0)
}

/// Confirmation message naming the client and the new day/time.
pub fn reschedule_notice(apt: &Appointment, slot: usize) -> String {
    format!(
        "{} rescheduled to {} at {}",
        apt.client_name,
        weekday_name(apt.date.weekday()),
        slot_label(slot),
    )
}

/// Complete a drop over `(day_index, slot)`.
///
/// Rewrites the dragged appointment's date in the store and returns the
/// user-facing confirmation. This is a client-side preview only: the grid
/// never writes the new time back to the gateway. Returns `None` (and
/// resets to `Idle` without mutating) when nothing was being dragged or the
/// target is invalid.
pub fn complete_drop(
    store: &mut AppointmentStore,
    drag: &mut DragState,
    days: &[NaiveDate; 7],
    day_index: usize,
    slot: usize,
) -> Option<String> {
    let id = drag.take()?;
    let new_date = drop_target_datetime(days, day_index, slot)?;
    let updated = store.reschedule(&id, new_date)?;
    Some(reschedule_notice(&updated, slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::{AppointmentRecord, ServiceLine};
    use crate::grid::{week_days, week_start};

    fn record(id: &str, date: &str) -> AppointmentRecord {
        AppointmentRecord {
            id: id.into(),
            client_name: "João Silva".into(),
            barber_id: "A".into(),
            barber_name: "Otavio".into(),
            date: date.into(),
            total_price: 45.0,
            services: vec![ServiceLine {
                name: "Corte + Barba".into(),
                price: 45.0,
                commission_percent: None,
            }],
        }
    }

    fn march_week() -> [NaiveDate; 7] {
        week_days(week_start(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()))
    }

    #[test]
    fn drag_state_transitions() {
        let mut drag = DragState::Idle;
        assert!(!drag.is_dragging());
        assert_eq!(drag.take(), None);

        drag.begin("1");
        assert_eq!(drag.active_id(), Some("1"));
        assert_eq!(drag.take(), Some("1".into()));
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn drop_target_combines_day_and_slot() {
        let days = march_week();
        // Day index 2 = Wednesday 2024-03-06, slot 12 = 14:00
        let when = drop_target_datetime(&days, 2, 12).unwrap();
        assert_eq!(
            when,
            NaiveDate::from_ymd_opt(2024, 3, 6)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap()
        );
        assert!(drop_target_datetime(&days, 7, 12).is_none());
        assert!(drop_target_datetime(&days, 2, 23).is_none());
    }

    #[test]
    fn drop_on_wednesday_fourteen_hundred_moves_only_the_date() {
        let mut store = AppointmentStore::new();
        store.load(vec![
            record("1", "2024-03-04T09:00:00"),
            record("2", "2024-03-04T09:30:00"),
        ]);
        let untouched = store.get("2").unwrap().clone();
        let before = store.get("1").unwrap().clone();

        let mut drag = DragState::Idle;
        drag.begin("1");
        let notice = complete_drop(&mut store, &mut drag, &march_week(), 2, 12).unwrap();

        let moved = store.get("1").unwrap();
        assert_eq!(
            moved.date,
            NaiveDate::from_ymd_opt(2024, 3, 6)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap()
        );
        assert_eq!(moved.client_name, before.client_name);
        assert_eq!(moved.barber_id, before.barber_id);
        assert_eq!(moved.barber_name, before.barber_name);
        assert_eq!(moved.services, before.services);
        assert_eq!(store.get("2").unwrap(), &untouched);

        assert_eq!(notice, "João Silva rescheduled to Wednesday at 14:00");
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn drop_without_active_drag_or_valid_target_mutates_nothing() {
        let mut store = AppointmentStore::new();
        store.load(vec![record("1", "2024-03-04T09:00:00")]);
        let snapshot = store.clone();
        let days = march_week();

        let mut drag = DragState::Idle;
        assert!(complete_drop(&mut store, &mut drag, &days, 2, 12).is_none());

        drag.begin("1");
        assert!(complete_drop(&mut store, &mut drag, &days, 9, 12).is_none());
        assert_eq!(store, snapshot);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn cancelled_drag_leaves_the_store_untouched() {
        let mut store = AppointmentStore::new();
        store.load(vec![record("1", "2024-03-04T09:00:00")]);
        let snapshot = store.clone();

        let mut drag = DragState::Idle;
        drag.begin("1");
        drag.take(); // drop outside any slot
        assert_eq!(store, snapshot);
        assert_eq!(drag, DragState::Idle);
    }
}
