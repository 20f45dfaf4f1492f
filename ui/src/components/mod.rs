pub mod app;
pub mod calendar_view;
pub mod dashboard_view;
pub mod gateway;
pub mod login_view;
pub mod new_appointment_modal;
pub mod session_state;
