//! Tariff calculator controller: owns the form state, derives the
//! eligibility verdict, and drives the single in-flight pricing request.

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::domain::{
    classify, evaluate, CalculationRequest, CalculationResponse, CalculatorForm,
    EligibilityVerdict, FormUpdate, RequestState,
};
use crate::i18n::{format_message, Language, Translations};
use crate::infra::pricing::{PricingClient, PricingError};

/// Recoverable input errors. Each maps to a localized message the controller
/// records for the UI; none is fatal.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("origin and destination cities must be selected before a tariff type")]
    CitiesNotSelected,
    #[error("all form fields must be filled")]
    MissingFields,
    #[error("weight must be a positive number")]
    InvalidWeight,
    #[error("the selected tariff cannot be fulfilled between these cities")]
    TariffUnavailable,
    #[error("a calculation is already in progress")]
    CalculationInFlight,
}

/// One calculator session. Form and request state are owned exclusively by
/// this instance; the single-flight guard lives in [`RequestState`].
#[derive(Clone, Debug)]
pub struct TariffCalculator {
    form: CalculatorForm,
    state: RequestState,
    form_error: Option<String>,
    messages: &'static Translations,
}

impl TariffCalculator {
    pub fn new(language: Language) -> Self {
        Self {
            form: CalculatorForm::default(),
            state: RequestState::Idle,
            form_error: None,
            messages: language.messages(),
        }
    }

    pub fn form(&self) -> &CalculatorForm {
        &self.form
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Last recorded validation message, already localized.
    pub fn error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn messages(&self) -> &'static Translations {
        self.messages
    }

    /// Merges a partial update into the form.
    ///
    /// Selecting a tariff type before both cities are set is rejected without
    /// mutating anything; any successful update clears the recorded error.
    pub fn update_form(&mut self, update: FormUpdate) -> Result<(), ValidationError> {
        if update.tariff_type.is_some()
            && (self.form.origin_city.is_none() || self.form.destination_city.is_none())
        {
            self.form_error = Some(self.messages.select_cities_first.to_string());
            return Err(ValidationError::CitiesNotSelected);
        }

        if let Some(city) = update.origin_city {
            self.form.origin_city = Some(city);
        }
        if let Some(city) = update.destination_city {
            self.form.destination_city = Some(city);
        }
        if let Some(tariff) = update.tariff_type {
            self.form.tariff_type = Some(tariff);
        }
        if let Some(weight) = update.weight {
            self.form.weight = weight;
        }

        self.form_error = None;
        Ok(())
    }

    /// Clears the form, any recorded error, and the request state.
    pub fn reset_form(&mut self) {
        self.form = CalculatorForm::default();
        self.state = RequestState::Idle;
        self.form_error = None;
    }

    /// All fields set and the weight parses as a positive finite number.
    pub fn is_form_valid(&self) -> bool {
        self.form.origin_city.is_some()
            && self.form.destination_city.is_some()
            && self.form.tariff_type.is_some()
            && parse_weight(&self.form.weight).is_some()
    }

    /// Eligibility of the currently selected route and tariff.
    pub fn verdict(&self) -> EligibilityVerdict {
        let gap = classify(
            self.form.origin_city.as_ref(),
            self.form.destination_city.as_ref(),
            self.form.tariff_type,
        );
        evaluate(
            gap,
            self.form
                .origin_city
                .as_ref()
                .map(|city| city.name.as_str())
                .unwrap_or_default(),
            self.form
                .destination_city
                .as_ref()
                .map(|city| city.name.as_str())
                .unwrap_or_default(),
        )
    }

    /// Rendered warehouse warning for the current form, if any.
    pub fn warning(&self) -> Option<String> {
        self.verdict().message(self.messages)
    }

    /// Validates the form and transitions to `Loading`, returning the request
    /// payload to send.
    ///
    /// While a request is in flight this is a no-op: it returns
    /// [`ValidationError::CalculationInFlight`] without touching any state,
    /// so a second concurrent call can never be issued.
    pub fn begin_calculation(&mut self) -> Result<CalculationRequest, ValidationError> {
        if self.state.is_loading() {
            debug!("calculation already in flight; ignoring submit");
            return Err(ValidationError::CalculationInFlight);
        }

        let (Some(origin), Some(destination), Some(tariff)) = (
            self.form.origin_city.as_ref(),
            self.form.destination_city.as_ref(),
            self.form.tariff_type,
        ) else {
            self.form_error = Some(self.messages.fill_all_fields.to_string());
            return Err(ValidationError::MissingFields);
        };
        if self.form.weight.trim().is_empty() {
            self.form_error = Some(self.messages.fill_all_fields.to_string());
            return Err(ValidationError::MissingFields);
        }

        let Some(weight) = parse_weight(&self.form.weight) else {
            self.form_error = Some(self.messages.correct_weight.to_string());
            return Err(ValidationError::InvalidWeight);
        };

        let verdict = self.verdict();
        if verdict.disabled {
            self.form_error = verdict.message(self.messages);
            return Err(ValidationError::TariffUnavailable);
        }

        let request = CalculationRequest {
            from_latitude: origin.center_latitude,
            from_longitude: origin.center_longitude,
            to_latitude: destination.center_latitude,
            to_longitude: destination.center_longitude,
            courier_type: tariff,
            weight,
        };

        self.form_error = None;
        self.state = RequestState::Loading;
        Ok(request)
    }

    /// Applies the outcome of the pricing call. Replacing the state is what
    /// clears `Loading`, so it is cleared on every exit path.
    pub fn settle(&mut self, outcome: Result<CalculationResponse, PricingError>) {
        self.state = match outcome {
            Ok(response) => RequestState::Success(response),
            Err(error) => RequestState::Failed(self.describe_failure(&error)),
        };
    }

    /// Validates, issues the pricing request, and stores the terminal state.
    /// Re-entrant calls while a request is loading do nothing.
    pub async fn calculate(&mut self, client: &PricingClient) {
        let request = match self.begin_calculation() {
            Ok(request) => request,
            Err(_) => return,
        };
        let outcome = client.calculate_tariff(&request).await;
        self.settle(outcome);
    }

    fn describe_failure(&self, error: &PricingError) -> String {
        match error {
            PricingError::Status(code) => {
                let params = HashMap::from([("status", code.to_string())]);
                format_message(self.messages.calculation_error, &params)
            }
            other => {
                let message = other.to_string();
                if message.is_empty() {
                    self.messages.calculation_failed.to_string()
                } else {
                    message
                }
            }
        }
    }
}

fn parse_weight(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{City, DeliveryOption, TariffType, WarningKind};

    fn city(name: &str, has_office: bool, has_locker: bool) -> City {
        City {
            id: 1,
            name: name.to_string(),
            center_latitude: 41.31,
            center_longitude: 69.28,
            has_office,
            has_locker,
        }
    }

    fn calculator_with_cities() -> TariffCalculator {
        let mut calculator = TariffCalculator::new(Language::En);
        calculator
            .update_form(FormUpdate::origin(city("Tashkent", true, true)))
            .unwrap();
        calculator
            .update_form(FormUpdate::destination(city("Samarkand", true, true)))
            .unwrap();
        calculator
    }

    #[test]
    fn tariff_before_cities_is_rejected_without_mutation() {
        let mut calculator = TariffCalculator::new(Language::En);
        let result = calculator.update_form(FormUpdate::tariff(TariffType::DoorDoor));
        assert_eq!(result, Err(ValidationError::CitiesNotSelected));
        assert_eq!(calculator.form().tariff_type, None);
        assert_eq!(
            calculator.error(),
            Some("Please select origin and destination cities first")
        );
    }

    #[test]
    fn successful_update_clears_the_recorded_error() {
        let mut calculator = TariffCalculator::new(Language::En);
        let _ = calculator.update_form(FormUpdate::tariff(TariffType::DoorDoor));
        assert!(calculator.error().is_some());

        calculator
            .update_form(FormUpdate::origin(city("Tashkent", true, true)))
            .unwrap();
        assert_eq!(calculator.error(), None);
    }

    #[test]
    fn tariff_is_accepted_once_both_cities_are_set() {
        let mut calculator = calculator_with_cities();
        calculator
            .update_form(FormUpdate::tariff(TariffType::OfficeDoor))
            .unwrap();
        assert_eq!(calculator.form().tariff_type, Some(TariffType::OfficeDoor));
    }

    #[test]
    fn form_validity_requires_a_positive_weight() {
        let mut calculator = calculator_with_cities();
        calculator
            .update_form(FormUpdate::tariff(TariffType::DoorDoor))
            .unwrap();
        assert!(!calculator.is_form_valid());

        for bad in ["", "  ", "abc", "-5", "0", "inf", "NaN"] {
            calculator.update_form(FormUpdate::weight(bad)).unwrap();
            assert!(!calculator.is_form_valid(), "weight {bad:?}");
        }

        calculator.update_form(FormUpdate::weight(" 2.5 ")).unwrap();
        assert!(calculator.is_form_valid());
    }

    #[test]
    fn begin_calculation_rejects_an_incomplete_form() {
        let mut calculator = calculator_with_cities();
        calculator
            .update_form(FormUpdate::tariff(TariffType::DoorDoor))
            .unwrap();

        assert_eq!(
            calculator.begin_calculation(),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(calculator.error(), Some("Please fill in all fields"));
        assert_eq!(*calculator.state(), RequestState::Idle);
    }

    #[test]
    fn begin_calculation_rejects_bad_weights() {
        for bad in ["-5", "abc"] {
            let mut calculator = calculator_with_cities();
            calculator
                .update_form(FormUpdate::tariff(TariffType::DoorDoor))
                .unwrap();
            calculator.update_form(FormUpdate::weight(bad)).unwrap();

            assert_eq!(
                calculator.begin_calculation(),
                Err(ValidationError::InvalidWeight)
            );
            assert_eq!(calculator.error(), Some("Please enter a valid weight"));
            assert_eq!(*calculator.state(), RequestState::Idle);
        }
    }

    #[test]
    fn begin_calculation_builds_the_wire_payload() {
        let mut calculator = TariffCalculator::new(Language::En);
        let origin = City {
            id: 1,
            name: "Tashkent".to_string(),
            center_latitude: 41.31,
            center_longitude: 69.28,
            has_office: true,
            has_locker: true,
        };
        let destination = City {
            id: 2,
            name: "Samarkand".to_string(),
            center_latitude: 39.65,
            center_longitude: 66.96,
            has_office: true,
            has_locker: true,
        };
        calculator
            .update_form(FormUpdate::origin(origin))
            .unwrap();
        calculator
            .update_form(FormUpdate::destination(destination))
            .unwrap();
        calculator
            .update_form(FormUpdate::tariff(TariffType::OfficePostamat))
            .unwrap();
        calculator.update_form(FormUpdate::weight("2.5")).unwrap();

        let request = calculator.begin_calculation().unwrap();
        assert_eq!(request.from_latitude, 41.31);
        assert_eq!(request.to_longitude, 66.96);
        assert_eq!(request.courier_type, TariffType::OfficePostamat);
        assert_eq!(request.weight, 2.5);
        assert!(calculator.state().is_loading());
        assert_eq!(calculator.error(), None);
    }

    #[test]
    fn submit_while_loading_is_a_silent_no_op() {
        let mut calculator = calculator_with_cities();
        calculator
            .update_form(FormUpdate::tariff(TariffType::DoorDoor))
            .unwrap();
        calculator.update_form(FormUpdate::weight("1")).unwrap();

        calculator.begin_calculation().unwrap();
        assert!(calculator.state().is_loading());

        assert_eq!(
            calculator.begin_calculation(),
            Err(ValidationError::CalculationInFlight)
        );
        assert!(calculator.state().is_loading());
        assert_eq!(calculator.error(), None);
    }

    #[test]
    fn disabled_verdict_blocks_submission() {
        let mut calculator = TariffCalculator::new(Language::En);
        calculator
            .update_form(FormUpdate::origin(city("Gulistan", false, true)))
            .unwrap();
        calculator
            .update_form(FormUpdate::destination(city("Termez", true, false)))
            .unwrap();
        calculator
            .update_form(FormUpdate::tariff(TariffType::OfficePostamat))
            .unwrap();
        calculator.update_form(FormUpdate::weight("3")).unwrap();

        assert!(calculator.verdict().disabled);
        assert_eq!(
            calculator.begin_calculation(),
            Err(ValidationError::TariffUnavailable)
        );
        assert_eq!(*calculator.state(), RequestState::Idle);
        let error = calculator.error().unwrap();
        assert!(error.contains("Gulistan") && error.contains("Termez"));
    }

    #[test]
    fn degraded_route_warns_but_still_submits() {
        let mut calculator = TariffCalculator::new(Language::En);
        calculator
            .update_form(FormUpdate::origin(city("Gulistan", false, true)))
            .unwrap();
        calculator
            .update_form(FormUpdate::destination(city("Tashkent", true, true)))
            .unwrap();
        calculator
            .update_form(FormUpdate::tariff(TariffType::OfficeDoor))
            .unwrap();
        calculator.update_form(FormUpdate::weight("1.2")).unwrap();

        let verdict = calculator.verdict();
        assert!(!verdict.disabled);
        assert_eq!(verdict.warning, Some(WarningKind::NoOriginWarehouse));
        assert_eq!(
            calculator.warning().as_deref(),
            Some("No Fargo pickup point in origin city \"Gulistan\"")
        );

        assert!(calculator.begin_calculation().is_ok());
    }

    #[test]
    fn settle_stores_success_and_clears_loading() {
        let mut calculator = calculator_with_cities();
        calculator
            .update_form(FormUpdate::tariff(TariffType::DoorDoor))
            .unwrap();
        calculator.update_form(FormUpdate::weight("1")).unwrap();
        calculator.begin_calculation().unwrap();

        let response = CalculationResponse {
            options: vec![DeliveryOption {
                delivery_time: Some(2),
                ..DeliveryOption::default()
            }],
        };
        calculator.settle(Ok(response.clone()));
        assert_eq!(*calculator.state(), RequestState::Success(response));
        assert!(!calculator.state().is_loading());
    }

    #[test]
    fn settle_localizes_status_failures() {
        let mut calculator = calculator_with_cities();
        calculator
            .update_form(FormUpdate::tariff(TariffType::DoorDoor))
            .unwrap();
        calculator.update_form(FormUpdate::weight("1")).unwrap();
        calculator.begin_calculation().unwrap();

        calculator.settle(Err(PricingError::Status(502)));
        assert_eq!(
            *calculator.state(),
            RequestState::Failed("Calculation error: 502".to_string())
        );
    }

    #[test]
    fn reset_returns_to_the_idle_empty_state() {
        let mut calculator = calculator_with_cities();
        calculator
            .update_form(FormUpdate::tariff(TariffType::DoorDoor))
            .unwrap();
        calculator.update_form(FormUpdate::weight("1")).unwrap();
        calculator.begin_calculation().unwrap();
        calculator.settle(Err(PricingError::Status(500)));

        calculator.reset_form();
        assert_eq!(*calculator.form(), CalculatorForm::default());
        assert_eq!(*calculator.state(), RequestState::Idle);
        assert_eq!(calculator.error(), None);
    }
}
