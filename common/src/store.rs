use chrono::NaiveDateTime;

use crate::appointment::{Appointment, AppointmentRecord};
use crate::grid::BarberFilter;

/// In-memory appointment collection for the visible calendar.
///
/// Populated from the gateway, mutated locally on drag-reschedule. Scoped to
/// one page view; there is exactly one writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Replace the store's contents with a fresh fetch, discarding records
    /// whose date fails to parse. Returns how many records were dropped.
    pub fn load(&mut self, records: Vec<AppointmentRecord>) -> usize {
        let total = records.len();
        self.appointments = records
            .into_iter()
            .filter_map(Appointment::from_record)
            .collect();
        total - self.appointments.len()
    }

    /// Append a gateway-created record. Returns the stored appointment, or
    /// `None` when the gateway handed back an invalid date.
    pub fn add(&mut self, record: AppointmentRecord) -> Option<&Appointment> {
        let apt = Appointment::from_record(record)?;
        self.appointments.push(apt);
        self.appointments.last()
    }

    /// Local-only reschedule: rewrite the date of the matching appointment,
    /// leaving every other field and every other appointment untouched.
    /// Returns a copy of the updated appointment.
    pub fn reschedule(&mut self, id: &str, new_date: NaiveDateTime) -> Option<Appointment> {
        let apt = self.appointments.iter_mut().find(|a| a.id == id)?;
        apt.date = new_date;
        Some(apt.clone())
    }

    /// Count and projected revenue over the filtered view, for the week
    /// summary footer.
    pub fn filtered_totals(&self, filter: &BarberFilter, search: &str) -> (usize, f64) {
        let filtered = crate::grid::filter_appointments(&self.appointments, filter, search);
        let revenue = filtered.iter().map(|a| a.total_price()).sum();
        (filtered.len(), revenue)
    }
}
