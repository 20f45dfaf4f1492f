use chrono::{Datelike, Days, Local};
use dioxus::prelude::*;

use shear_common::appointment::Appointment;
use shear_common::currency::format_brl;
use shear_common::grid::weekday_name;
use shear_common::summary::{
    month_range, variation_percent, BarberSummary, DailySummary, RangeSummary,
};

use super::gateway::{gateway_for, surface_error};
use super::new_appointment_modal::NewAppointmentModal;
use super::session_state::use_session;

/// Revenue dashboard: daily and monthly aggregates, per-barber totals and
/// the next bookings. All figures come from the gateway; the five fetches
/// are dispatched together and joined before anything updates.
#[component]
pub fn DashboardView() -> Element {
    let mut session = use_session();
    let nav = use_navigator();

    let mut today_summary = use_signal(DailySummary::default);
    let mut yesterday_summary = use_signal(DailySummary::default);
    let mut month_summary = use_signal(RangeSummary::default);
    let mut barber_totals = use_signal(Vec::<BarberSummary>::new);
    let mut upcoming = use_signal(Vec::<Appointment>::new);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut show_modal = use_signal(|| false);
    let mut refresh = use_signal(|| 0u32);

    let _loader = use_resource(move || async move {
        let _generation = *refresh.read();
        let client = gateway_for(&session);

        let today = Local::now().date_naive();
        let yesterday = today - Days::new(1);
        let Some((month_start, month_end)) = month_range(today.year(), today.month()) else {
            return;
        };

        let (day, prev_day, month, per_barber, next) = futures::join!(
            client.summary_by_date(today),
            client.summary_by_date(yesterday),
            client.summary_by_range(month_start, month_end),
            client.summary_by_barber(month_start, month_end),
            client.next_appointments(3),
        );

        match (day, prev_day, month, per_barber, next) {
            (Ok(day), Ok(prev_day), Ok(month), Ok(per_barber), Ok(next)) => {
                today_summary.set(day);
                yesterday_summary.set(prev_day);
                month_summary.set(month);
                barber_totals.set(per_barber);
                upcoming.set(next.into_iter().filter_map(Appointment::from_record).collect());
                error.set(None);
            }
            (day, prev_day, month, per_barber, next) => {
                // One message for the whole group; figures already on
                // screen stay as they were.
                let first = day
                    .err()
                    .or(prev_day.err())
                    .or(month.err())
                    .or(per_barber.err())
                    .or(next.err());
                if let Some(err) = first {
                    error.set(Some(surface_error(&err, &mut session, &nav)));
                }
            }
        }
    });

    let today = today_summary.read().clone();
    let yesterday = yesterday_summary.read().clone();
    let month = month_summary.read().clone();
    let totals = barber_totals.read().clone();
    let next = upcoming.read().clone();
    let variation = variation_percent(today.total_earnings, yesterday.total_earnings);
    let variation_label = format!("{}{:.1}% vs yesterday", if variation >= 0.0 { "+" } else { "" }, variation);

    rsx! {
        div { class: "dashboard-page",
            div { class: "dashboard-toolbar",
                h2 { "Dashboard" }
                button {
                    class: "primary-btn",
                    onclick: move |_| show_modal.set(true),
                    "+ New appointment"
                }
            }

            if let Some(msg) = notice.read().as_ref() {
                div { class: "notice",
                    span { "{msg}" }
                    button { onclick: move |_| notice.set(None), "×" }
                }
            }
            if let Some(msg) = error.read().as_ref() {
                div { class: "error-banner",
                    span { "{msg}" }
                    button { onclick: move |_| error.set(None), "×" }
                }
            }

            div { class: "summary-cards",
                div { class: "card",
                    span { class: "card-label", "Earnings today" }
                    span { class: "card-value", "{format_brl(today.total_earnings)}" }
                    span {
                        class: if variation >= 0.0 { "card-trend up" } else { "card-trend down" },
                        "{variation_label}"
                    }
                }
                div { class: "card",
                    span { class: "card-label", "Cuts today" }
                    span { class: "card-value", "{today.total_appointments}" }
                }
                div { class: "card",
                    span { class: "card-label", "Monthly earnings" }
                    span { class: "card-value", "{format_brl(month.total_earnings)}" }
                    span { class: "card-sub", "{month.total_appointments} appointments" }
                }
                div { class: "card",
                    span { class: "card-label", "Today's split" }
                    span { class: "card-value", "{format_brl(today.admin_receives)}" }
                    span { class: "card-sub", "barbers: {format_brl(today.barber_receives)}" }
                }
            }

            div { class: "dashboard-section",
                h3 { "Earnings by barber (this month)" }
                if totals.is_empty() {
                    p { class: "empty-state", "No earnings recorded yet" }
                } else {
                    table { class: "barber-table",
                        thead {
                            tr {
                                th { "Barber" }
                                th { "Total" }
                            }
                        }
                        tbody {
                            for summary in totals.iter() {
                                tr { key: "{summary.barber_id}",
                                    td { "{summary.barber_name}" }
                                    td { "{format_brl(summary.total)}" }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "dashboard-section",
                h3 { "Next appointments" }
                if next.is_empty() {
                    p { class: "empty-state", "Nothing coming up" }
                } else {
                    for apt in next.iter() {
                        div { class: "list-item", key: "{apt.id}",
                            div { class: "list-item-top",
                                span { class: "client-name", "{apt.client_name}" }
                                span { class: "price", "{format_brl(apt.total_price())}" }
                            }
                            p { class: "services", "{apt.service_names()}" }
                            p { class: "when",
                                "{weekday_name(apt.date.weekday())}, {apt.date.format(\"%d/%m\")} at {apt.date.format(\"%H:%M\")}"
                            }
                            span { class: "barber-badge", "{apt.barber_name}" }
                        }
                    }
                }
            }

            if *show_modal.read() {
                NewAppointmentModal {
                    on_close: move |_| show_modal.set(false),
                    on_created: move |_record| {
                        show_modal.set(false);
                        notice.set(Some("Appointment created".into()));
                        refresh += 1;
                    },
                }
            }
        }
    }
}
