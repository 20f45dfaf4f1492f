use chrono::NaiveDate;
use dioxus::prelude::*;

use shear_common::appointment::{AppointmentRecord, NewAppointment};
use shear_common::currency::format_brl;
use shear_common::grid::slot_labels;
use shear_common::service_draft::ServiceDraftList;
use shear_common::user::User;

use super::gateway::{gateway_for, surface_error};
use super::session_state::use_session;

/// Modal form for booking a new appointment.
///
/// Validation happens entirely client-side before the create call: required
/// fields, parseable service prices, and the double-booking check against
/// the barber's existing bookings.
#[component]
pub fn NewAppointmentModal(
    on_created: EventHandler<AppointmentRecord>,
    on_close: EventHandler<()>,
) -> Element {
    let mut session = use_session();
    let nav = use_navigator();

    let mut client_name = use_signal(String::new);
    let mut barber_id = use_signal(String::new);
    let mut date_input = use_signal(String::new);
    let mut time_slot = use_signal(String::new);
    let mut services = use_signal(ServiceDraftList::default);
    let mut barbers = use_signal(Vec::<User>::new);
    let mut taken_times = use_signal(Vec::<String>::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    // Staff options: every BARBER plus the logged-in user
    let _staff_loader = use_resource(move || async move {
        let client = gateway_for(&session);
        match client.list_users().await {
            Ok(users) => {
                let own_id = session.read().user().map(|u| u.id.clone());
                barbers.set(
                    users
                        .into_iter()
                        .filter(|u| u.is_barber() || Some(&u.id) == own_id.as_ref())
                        .collect(),
                );
            }
            Err(err) => {
                error.set(Some(surface_error(&err, &mut session, &nav)));
            }
        }
    });

    // Occupied times for the chosen barber and day
    let _taken_loader = use_resource(move || async move {
        let barber = barber_id.read().clone();
        let day = date_input.read().clone();
        if barber.is_empty() || day.is_empty() {
            taken_times.set(Vec::new());
            return;
        }
        let client = gateway_for(&session);
        match client.list_by_barber(&barber).await {
            Ok(records) => {
                let occupied: Vec<String> = records
                    .iter()
                    .filter(|r| r.date.starts_with(&day))
                    .filter_map(|r| r.date.get(11..16).map(str::to_string))
                    .collect();
                taken_times.set(occupied);
            }
            Err(err) => {
                error.set(Some(surface_error(&err, &mut session, &nav)));
            }
        }
    });

    let show_commission = {
        let state = session.read();
        match state.user() {
            Some(user) => {
                let chosen = barber_id.read();
                user.is_admin() && !chosen.is_empty() && *chosen != user.id
            }
            None => false,
        }
    };

    let submit = move |_| {
        let name = client_name.read().trim().to_string();
        let barber = barber_id.read().clone();
        let day = date_input.read().clone();
        let slot = time_slot.read().clone();

        if name.is_empty() || barber.is_empty() || day.is_empty() || slot.is_empty() {
            error.set(Some("Fill in all required fields".into()));
            return;
        }
        if taken_times.read().contains(&slot) {
            error.set(Some("That time is already booked".into()));
            return;
        }
        let parsed_services = match services.read().parse() {
            Ok(list) => list,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        let Some(date) = combine(&day, &slot) else {
            error.set(Some("Pick a valid date and time".into()));
            return;
        };

        busy.set(true);
        spawn(async move {
            let client = gateway_for(&session);
            let new = NewAppointment::new(name, barber, date, parsed_services);
            match client.create_appointment(&new).await {
                Ok(record) => on_created.call(record),
                Err(err) => {
                    error.set(Some(surface_error(&err, &mut session, &nav)));
                }
            }
            busy.set(false);
        });
    };

    let rows = services.read().rows().to_vec();
    let running_total = services.read().total();
    let taken = taken_times.read().clone();
    let staff = barbers.read().clone();

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                div { class: "modal-header",
                    h2 { "New appointment" }
                    button { class: "close-btn", onclick: move |_| on_close.call(()), "×" }
                }

                div { class: "form-group",
                    label { "Client name *" }
                    input {
                        r#type: "text",
                        placeholder: "Client name...",
                        value: "{client_name}",
                        oninput: move |evt| client_name.set(evt.value()),
                    }
                }

                div { class: "form-group",
                    div { class: "services-header",
                        label { "Services *" }
                        button {
                            class: "small-btn",
                            onclick: move |_| {
                                let updated = services.read().added();
                                services.set(updated);
                            },
                            "+ Add"
                        }
                    }
                    for (i, row) in rows.iter().enumerate() {
                        div { class: "service-row", key: "service-{i}",
                            input {
                                r#type: "text",
                                placeholder: "e.g. Corte + Barba",
                                value: "{row.name}",
                                oninput: move |evt| {
                                    let updated = services.read().with_name(i, evt.value());
                                    services.set(updated);
                                },
                            }
                            input {
                                r#type: "number",
                                step: "0.01",
                                placeholder: "Price (R$)",
                                value: "{row.price}",
                                oninput: move |evt| {
                                    let updated = services.read().with_price(i, evt.value());
                                    services.set(updated);
                                },
                            }
                            if show_commission {
                                input {
                                    r#type: "number",
                                    step: "1",
                                    max: "100",
                                    placeholder: "Commission %",
                                    value: "{row.commission}",
                                    oninput: move |evt| {
                                        let updated = services.read().with_commission(i, evt.value());
                                        services.set(updated);
                                    },
                                }
                            }
                            if rows.len() > 1 {
                                button {
                                    class: "small-btn remove",
                                    onclick: move |_| {
                                        let updated = services.read().removed(i);
                                        services.set(updated);
                                    },
                                    "×"
                                }
                            }
                        }
                    }
                    if running_total > 0.0 {
                        div { class: "service-total",
                            span { "Total" }
                            span { class: "price", "{format_brl(running_total)}" }
                        }
                    }
                }

                div { class: "form-group",
                    label { "Barber *" }
                    select {
                        onchange: move |evt| barber_id.set(evt.value()),
                        option { value: "", "Select a barber" }
                        for barber in staff.iter() {
                            option { key: "{barber.id}", value: "{barber.id}", "{barber.name}" }
                        }
                    }
                }

                div { class: "form-row",
                    div { class: "form-group",
                        label { "Date *" }
                        input {
                            r#type: "date",
                            value: "{date_input}",
                            oninput: move |evt| date_input.set(evt.value()),
                        }
                    }
                    div { class: "form-group",
                        label { "Time *" }
                        select {
                            onchange: move |evt| {
                                let value = evt.value();
                                if taken_times.read().contains(&value) {
                                    error.set(Some("That time is already booked".into()));
                                } else {
                                    time_slot.set(value);
                                }
                            },
                            option { value: "", "Select a time" }
                            for label in slot_labels() {
                                option {
                                    key: "{label}",
                                    value: "{label}",
                                    disabled: taken.contains(&label),
                                    if taken.contains(&label) { "{label} (booked)" } else { "{label}" }
                                }
                            }
                        }
                    }
                }

                if let Some(err) = error.read().as_ref() {
                    span { class: "field-error", "{err}" }
                }

                div { class: "modal-footer",
                    button {
                        class: "secondary-btn",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "primary-btn",
                        disabled: *busy.read(),
                        onclick: submit,
                        if *busy.read() { "Saving..." } else { "Create appointment" }
                    }
                }
            }
        }
    }
}

/// Combine a `YYYY-MM-DD` date input with an `HH:MM` slot label.
fn combine(day: &str, slot: &str) -> Option<chrono::NaiveDateTime> {
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    let (hour, minute) = slot.split_once(':')?;
    date.and_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}
