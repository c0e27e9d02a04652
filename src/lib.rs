//! Client-side engine of the Fargo delivery tariff calculator.
//!
//! Decides which tariff types are offerable between two cities given their
//! pickup-point and locker coverage, renders localized warnings when a
//! tariff is degraded, and drives the single in-flight pricing request.
//! The UI layer, city catalog, and pricing backend are external collaborators.

pub mod calculator;
pub mod domain;
pub mod i18n;
pub mod infra;

pub use calculator::{TariffCalculator, ValidationError};
pub use domain::{
    CalculationRequest, CalculationResponse, CalculatorForm, City, DeliveryOption,
    EligibilityVerdict, FormUpdate, InfraGap, RequestState, TariffType, WarningKind,
};
pub use i18n::{format_message, Language, Translations};
pub use infra::{PricingClient, PricingError};
