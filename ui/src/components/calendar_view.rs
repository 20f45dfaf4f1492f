use chrono::{Datelike, Days, Local, NaiveDate};
use dioxus::prelude::*;

use shear_common::appointment::Appointment;
use shear_common::currency::format_brl;
use shear_common::grid::{
    appointments_for_day, build_week_grid, filter_appointments, week_days, week_start,
    weekday_name, weekday_name_short, BarberFilter,
};
use shear_common::reschedule::{complete_drop, DragState};
use shear_common::store::AppointmentStore;
use shear_common::user::User;

use super::gateway::{gateway_for, surface_error};
use super::new_appointment_modal::NewAppointmentModal;
use super::session_state::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Grid,
    List,
}

/// Weekly appointment calendar: filter, search, grid/list views and
/// drag-to-reschedule. The reschedule is a local preview; the gateway is
/// never written to on drop.
#[component]
pub fn CalendarView() -> Element {
    let mut session = use_session();
    let nav = use_navigator();

    let mut store = use_signal(AppointmentStore::new);
    let mut drag = use_signal(|| DragState::Idle);
    let mut reference = use_signal(|| Local::now().date_naive());
    let mut barber_filter = use_signal(|| BarberFilter::All);
    let mut search = use_signal(String::new);
    let mut view_mode = use_signal(|| ViewMode::Grid);
    let mut selected_day = use_signal(|| None::<NaiveDate>);
    let mut users = use_signal(Vec::<User>::new);
    let mut loading = use_signal(|| true);
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);
    let mut show_modal = use_signal(|| false);

    // Appointments and staff load together; a failure surfaces one message
    // and leaves whatever was already on screen.
    let _loader = use_resource(move || async move {
        loading.set(true);
        let client = gateway_for(&session);
        let (appointments, staff) =
            futures::join!(client.list_appointments(), client.list_users());

        match appointments {
            Ok(records) => {
                let dropped = store.write().load(records);
                if dropped > 0 {
                    tracing::warn!("hid {dropped} appointments with unreadable dates");
                }
            }
            Err(err) => {
                error.set(Some(surface_error(&err, &mut session, &nav)));
            }
        }
        match staff {
            Ok(list) => users.set(list),
            Err(err) => {
                error.set(Some(surface_error(&err, &mut session, &nav)));
            }
        }
        loading.set(false);
    });

    let reference_day = *reference.read();
    let start = week_start(reference_day);
    let days = week_days(start);
    let today = Local::now().date_naive();
    let filter = barber_filter.read().clone();
    let search_term = search.read().trim().to_string();

    let snapshot = store.read();
    let grid = build_week_grid(snapshot.appointments(), reference_day, &filter, &search_term);
    let (week_count, week_revenue) = snapshot.filtered_totals(&filter, &search_term);
    let day_counts: [usize; 7] = std::array::from_fn(|i| {
        appointments_for_day(snapshot.appointments(), days[i], &filter, &search_term).len()
    });
    let mut listed: Vec<Appointment> = match *selected_day.read() {
        Some(day) => appointments_for_day(snapshot.appointments(), day, &filter, &search_term)
            .into_iter()
            .cloned()
            .collect(),
        None => filter_appointments(snapshot.appointments(), &filter, &search_term)
            .into_iter()
            .cloned()
            .collect(),
    };
    listed.sort_by_key(|a| a.date);
    drop(snapshot);

    let barbers: Vec<User> = users.read().iter().filter(|u| u.is_barber()).cloned().collect();
    let range_label = format!(
        "{} – {}",
        start.format("%d %b"),
        (start + Days::new(6)).format("%d %b %Y")
    );
    let mode = *view_mode.read();

    rsx! {
        div { class: "calendar-page",
            div { class: "calendar-toolbar",
                div { class: "week-nav",
                    button {
                        onclick: move |_| {
                            let back = *reference.read() - Days::new(7);
                            reference.set(back);
                        },
                        "<"
                    }
                    button {
                        onclick: move |_| reference.set(Local::now().date_naive()),
                        "Today"
                    }
                    button {
                        onclick: move |_| {
                            let ahead = *reference.read() + Days::new(7);
                            reference.set(ahead);
                        },
                        ">"
                    }
                    span { class: "week-range", "{range_label}" }
                }
                div { class: "view-toggle",
                    button {
                        class: if mode == ViewMode::Grid { "active" } else { "" },
                        onclick: move |_| view_mode.set(ViewMode::Grid),
                        "Grid"
                    }
                    button {
                        class: if mode == ViewMode::List { "active" } else { "" },
                        onclick: move |_| view_mode.set(ViewMode::List),
                        "List"
                    }
                }
                input {
                    class: "search-input",
                    r#type: "text",
                    placeholder: "Search client or service...",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    class: "barber-select",
                    onchange: move |evt| {
                        let value = evt.value();
                        if value == "all" {
                            barber_filter.set(BarberFilter::All);
                        } else {
                            barber_filter.set(BarberFilter::Only(value));
                        }
                    },
                    option { value: "all", "All barbers" }
                    for barber in barbers.iter() {
                        option { key: "{barber.id}", value: "{barber.id}", "{barber.name}" }
                    }
                }
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
            if *loading.read() {
                p { class: "loading", "Loading appointments..." }
            }

            if mode == ViewMode::Grid {
                div { class: "calendar-grid",
                    div { class: "grid-corner", "Time" }
                    for (i, day) in days.iter().enumerate() {
                        div { class: "grid-day-header", key: "day-{i}",
                            div { class: "day-name", "{weekday_name_short(day.weekday())}" }
                            div {
                                class: if *day == today { "day-number today" } else { "day-number" },
                                "{day.format(\"%d\")}"
                            }
                        }
                    }
                    for row in grid.rows.iter() {
                        div { class: "grid-slot-label", key: "label-{row.slot}", "{row.label}" }
                        for (day_index, cell) in row.cells.iter().enumerate() {
                            div {
                                class: if cell.is_empty() { "grid-cell" } else { "grid-cell occupied" },
                                key: "cell-{day_index}-{row.slot}",
                                ondragover: move |evt| evt.prevent_default(),
                                ondrop: {
                                    let slot = row.slot;
                                    move |evt: Event<DragData>| {
                                        evt.prevent_default();
                                        let mut st = store.write();
                                        let mut dg = drag.write();
                                        if let Some(msg) =
                                            complete_drop(&mut st, &mut dg, &days, day_index, slot)
                                        {
                                            drop(st);
                                            drop(dg);
                                            notice.set(Some(msg));
                                        }
                                    }
                                },
                                for apt in cell.iter() {
                                    AppointmentCard {
                                        key: "{apt.id}",
                                        appointment: apt.clone(),
                                        dragging: drag.read().active_id() == Some(apt.id.as_str()),
                                        on_drag_start: move |id: String| drag.write().begin(id),
                                        on_drag_end: move |_| {
                                            // Drop outside any slot: no mutation
                                            drag.write().take();
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            } else {
                div { class: "calendar-list",
                    div { class: "day-chips",
                        for (i, day) in days.iter().enumerate() {
                            button {
                                key: "chip-{i}",
                                class: if *selected_day.read() == Some(*day) { "day-chip selected" } else { "day-chip" },
                                onclick: {
                                    let day = *day;
                                    move |_| {
                                        let current = *selected_day.read();
                                        selected_day.set(if current == Some(day) { None } else { Some(day) });
                                    }
                                },
                                span { class: "day-name", "{weekday_name_short(day.weekday())}" }
                                span {
                                    class: if *day == today { "day-number today" } else { "day-number" },
                                    "{day.format(\"%d\")}"
                                }
                                if day_counts[i] > 0 {
                                    span { class: "day-count", "{day_counts[i]}" }
                                }
                            }
                        }
                    }
                    if listed.is_empty() && !*loading.read() {
                        p { class: "empty-state", "No appointments found" }
                    }
                    for apt in listed.iter() {
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

            div { class: "week-summary",
                h3 { "Week summary" }
                div { class: "summary-figures",
                    div { class: "figure",
                        span { class: "figure-label", "Appointments" }
                        span { class: "figure-value", "{week_count}" }
                    }
                    div { class: "figure",
                        span { class: "figure-label", "Projected revenue" }
                        span { class: "figure-value", "{format_brl(week_revenue)}" }
                    }
                }
            }

            if *show_modal.read() {
                NewAppointmentModal {
                    on_close: move |_| show_modal.set(false),
                    on_created: move |record| {
                        if store.write().add(record).is_none() {
                            tracing::warn!("gateway returned an appointment with an invalid date");
                        }
                        show_modal.set(false);
                        notice.set(Some("Appointment created".into()));
                    },
                }
            }
        }
    }
}

/// Draggable appointment card inside a grid cell.
#[component]
fn AppointmentCard(
    appointment: Appointment,
    dragging: bool,
    on_drag_start: EventHandler<String>,
    on_drag_end: EventHandler<()>,
) -> Element {
    let id = appointment.id.clone();

    rsx! {
        div {
            class: if dragging { "appointment-card dragging" } else { "appointment-card" },
            draggable: "true",
            ondragstart: move |_| on_drag_start.call(id.clone()),
            ondragend: move |_| on_drag_end.call(()),
            div { class: "card-top",
                span { class: "client-name", "{appointment.client_name}" }
                span { class: "price", "{format_brl(appointment.total_price())}" }
            }
            p { class: "services", "{appointment.service_names()}" }
            span { class: "barber-badge", "{appointment.barber_name}" }
        }
    }
}
