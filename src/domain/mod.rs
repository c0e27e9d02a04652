//! Domain logic for tariff eligibility lives here.

pub mod eligibility;
pub mod entities;

pub use eligibility::{classify, evaluate, EligibilityVerdict, InfraGap, WarningKind};
pub use entities::{
    CalculationRequest, CalculationResponse, CalculatorForm, City, DeliveryOption,
    EndpointRequirement, FormUpdate, RequestState, TariffType,
};
