use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wire timestamp format the gateway speaks: naive local, no offset.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One priced service on an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub name: String,
    pub price: f64,
    /// Barber's cut as a fraction (0.0–1.0). Absent on older records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_percent: Option<f64>,
}

/// Appointment exactly as the gateway sends it. The date stays a raw string
/// here; validation happens in [`Appointment::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub id: String,
    pub client_name: String,
    pub barber_id: String,
    pub barber_name: String,
    pub date: String,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
}

/// Create-appointment request body: a record minus `id` and `barberName`,
/// both of which the gateway assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub client_name: String,
    pub barber_id: String,
    pub date: String,
    pub total_price: f64,
    pub services: Vec<ServiceLine>,
}

impl NewAppointment {
    pub fn new(
        client_name: String,
        barber_id: String,
        date: NaiveDateTime,
        services: Vec<ServiceLine>,
    ) -> Self {
        let total_price = services.iter().map(|s| s.price).sum();
        Self {
            client_name,
            barber_id,
            date: date.format(WIRE_DATE_FORMAT).to_string(),
            total_price,
            services,
        }
    }
}

/// A validated appointment held in the local store.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub barber_id: String,
    pub barber_name: String,
    pub date: NaiveDateTime,
    pub services: Vec<ServiceLine>,
}

impl Appointment {
    /// Validate a fetched record. Returns `None` when the date does not
    /// parse to a valid instant; such records are dropped before display.
    pub fn from_record(record: AppointmentRecord) -> Option<Self> {
        let date = parse_wire_date(&record.date)?;
        Some(Self {
            id: record.id,
            client_name: record.client_name,
            barber_id: record.barber_id,
            barber_name: record.barber_name,
            date,
            services: record.services,
        })
    }

    pub fn to_record(&self) -> AppointmentRecord {
        AppointmentRecord {
            id: self.id.clone(),
            client_name: self.client_name.clone(),
            barber_id: self.barber_id.clone(),
            barber_name: self.barber_name.clone(),
            date: self.date.format(WIRE_DATE_FORMAT).to_string(),
            total_price: self.total_price(),
            services: self.services.clone(),
        }
    }

    /// Sum of service prices. Display always derives the total rather than
    /// trusting a stored `totalPrice` that may be stale after edits.
    pub fn total_price(&self) -> f64 {
        self.services.iter().map(|s| s.price).sum()
    }

    /// Service names joined for one-line display.
    pub fn service_names(&self) -> String {
        self.services
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a gateway timestamp. Accepts naive timestamps with optional
/// fractional seconds, or RFC 3339 taken as wall-clock time.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn dummy_record(id: &str, date: &str) -> AppointmentRecord {
        AppointmentRecord {
            id: id.into(),
            client_name: "João Silva".into(),
            barber_id: "b-1".into(),
            barber_name: "Otavio".into(),
            date: date.into(),
            total_price: 45.0,
            services: vec![
                ServiceLine {
                    name: "Corte".into(),
                    price: 25.0,
                    commission_percent: Some(0.5),
                },
                ServiceLine {
                    name: "Barba".into(),
                    price: 20.0,
                    commission_percent: Some(0.5),
                },
            ],
        }
    }

    #[test]
    fn from_record_parses_plain_wire_date() {
        let apt = Appointment::from_record(dummy_record("1", "2024-03-04T09:00:00")).unwrap();
        assert_eq!(apt.date.date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(apt.date.hour(), 9);
        assert_eq!(apt.date.minute(), 0);
    }

    #[test]
    fn from_record_accepts_rfc3339_and_fractional_seconds() {
        assert!(Appointment::from_record(dummy_record("1", "2024-03-04T09:00:00.000")).is_some());
        assert!(Appointment::from_record(dummy_record("2", "2024-03-04T09:00:00Z")).is_some());
    }

    #[test]
    fn from_record_rejects_garbage_date() {
        assert!(Appointment::from_record(dummy_record("1", "not-a-date")).is_none());
        assert!(Appointment::from_record(dummy_record("2", "")).is_none());
        assert!(Appointment::from_record(dummy_record("3", "2024-13-99T09:00:00")).is_none());
    }

    #[test]
    fn total_price_derives_from_services() {
        let apt = Appointment::from_record(dummy_record("1", "2024-03-04T09:00:00")).unwrap();
        assert_eq!(apt.total_price(), 45.0);
        assert_eq!(apt.service_names(), "Corte, Barba");
    }

    #[test]
    fn record_round_trips_through_domain_type() {
        let record = dummy_record("1", "2024-03-04T09:00:00");
        let apt = Appointment::from_record(record.clone()).unwrap();
        assert_eq!(apt.to_record(), record);
    }

    #[test]
    fn wire_shapes_are_camel_case() {
        let record = dummy_record("1", "2024-03-04T09:00:00");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("clientName").is_some());
        assert!(json.get("barberId").is_some());
        assert!(json.get("barberName").is_some());
        assert!(json.get("totalPrice").is_some());
        assert!(json["services"][0].get("commissionPercent").is_some());
    }

    #[test]
    fn new_appointment_computes_total_and_formats_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 6)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        let new = NewAppointment::new(
            "Pedro".into(),
            "b-2".into(),
            date,
            vec![ServiceLine {
                name: "Corte Simples".into(),
                price: 25.0,
                commission_percent: Some(0.0),
            }],
        );
        assert_eq!(new.date, "2024-03-06T14:00:00");
        assert_eq!(new.total_price, 25.0);
        let json = serde_json::to_value(&new).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("barberName").is_none());
    }
}
