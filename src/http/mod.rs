pub mod client;
pub mod error;
pub mod fake;
pub mod request;
pub mod transport;
