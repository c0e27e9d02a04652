//! Clients for the external collaborators of the calculator.

pub mod pricing;

pub use pricing::{PricingClient, PricingError};
