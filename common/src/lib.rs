pub mod appointment;
pub mod currency;
pub mod grid;
pub mod reschedule;
pub mod service_draft;
pub mod session;
pub mod store;
pub mod summary;
pub mod user;
