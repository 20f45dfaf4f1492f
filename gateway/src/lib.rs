mod client;
mod error;

pub use client::GatewayClient;
pub use error::GatewayError;
