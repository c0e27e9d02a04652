use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::i18n::{format_message, Translations};

/// City record from the warehouse catalog. The engine only reads these; the
/// caller resolves them from the directory service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub center_latitude: f64,
    pub center_longitude: f64,
    /// City has at least one staffed Fargo pickup point.
    pub has_office: bool,
    /// City has at least one Fargo parcel locker (postamat).
    pub has_locker: bool,
}

/// What a tariff requires of one endpoint of the shipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointRequirement {
    /// A staffed pickup point must exist in the city.
    Office,
    /// Courier hand-off at an address; always available.
    Door,
    /// A parcel locker must exist in the city.
    Locker,
}

/// Delivery tariff: drop-off modality at the origin, hand-off modality at the
/// destination. The serialized snake_case name is the `courier_type` value of
/// the pricing API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffType {
    OfficeOffice,
    OfficeDoor,
    DoorOffice,
    DoorDoor,
    OfficePostamat,
    DoorPostamat,
}

impl TariffType {
    pub const ALL: [TariffType; 6] = [
        TariffType::OfficeOffice,
        TariffType::OfficeDoor,
        TariffType::DoorOffice,
        TariffType::DoorDoor,
        TariffType::OfficePostamat,
        TariffType::DoorPostamat,
    ];

    /// Fixed capability table: what this tariff requires at the origin and at
    /// the destination. Every eligibility decision derives from this pair.
    pub fn requirements(self) -> (EndpointRequirement, EndpointRequirement) {
        use EndpointRequirement::*;
        match self {
            TariffType::OfficeOffice => (Office, Office),
            TariffType::OfficeDoor => (Office, Door),
            TariffType::DoorOffice => (Door, Office),
            TariffType::DoorDoor => (Door, Door),
            TariffType::OfficePostamat => (Office, Locker),
            TariffType::DoorPostamat => (Door, Locker),
        }
    }

    /// Localized display name.
    pub fn label(self, messages: &Translations) -> &'static str {
        match self {
            TariffType::OfficeOffice => messages.office_office,
            TariffType::OfficeDoor => messages.office_door,
            TariffType::DoorOffice => messages.door_office,
            TariffType::DoorDoor => messages.door_door,
            TariffType::OfficePostamat => messages.office_postamat,
            TariffType::DoorPostamat => messages.door_postamat,
        }
    }
}

/// Mutable calculator input. `weight` stays raw text until submission so the
/// UI can hold partially typed values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculatorForm {
    pub origin_city: Option<City>,
    pub destination_city: Option<City>,
    pub tariff_type: Option<TariffType>,
    pub weight: String,
}

/// Partial form update; unset fields keep their current value.
#[derive(Clone, Debug, Default)]
pub struct FormUpdate {
    pub origin_city: Option<City>,
    pub destination_city: Option<City>,
    pub tariff_type: Option<TariffType>,
    pub weight: Option<String>,
}

impl FormUpdate {
    pub fn origin(city: City) -> Self {
        Self {
            origin_city: Some(city),
            ..Self::default()
        }
    }

    pub fn destination(city: City) -> Self {
        Self {
            destination_city: Some(city),
            ..Self::default()
        }
    }

    pub fn tariff(tariff: TariffType) -> Self {
        Self {
            tariff_type: Some(tariff),
            ..Self::default()
        }
    }

    pub fn weight(weight: impl Into<String>) -> Self {
        Self {
            weight: Some(weight.into()),
            ..Self::default()
        }
    }
}

/// Payload of the pricing service call. Field names are the wire contract.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub from_latitude: f64,
    pub from_longitude: f64,
    pub to_latitude: f64,
    pub to_longitude: f64,
    pub courier_type: TariffType,
    pub weight: f64,
}

/// One delivery option returned by the pricing service. Treated as opaque
/// beyond the fields needed for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOption {
    #[serde(default)]
    pub tariff_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Estimated delivery time in days.
    #[serde(default)]
    pub delivery_time: Option<u32>,
}

impl DeliveryOption {
    /// Localized "Delivery time: {time} days" line, if the service reported one.
    pub fn delivery_time_text(&self, messages: &Translations) -> Option<String> {
        self.delivery_time.map(|days| {
            let params = HashMap::from([("time", days.to_string())]);
            format_message(messages.delivery_time, &params)
        })
    }
}

/// Result of one successful calculation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculationResponse {
    pub options: Vec<DeliveryOption>,
}

impl CalculationResponse {
    pub fn count(&self) -> usize {
        self.options.len()
    }

    /// Localized "Found {count} delivery option(s)" summary.
    pub fn summary(&self, messages: &Translations) -> String {
        let params = HashMap::from([("count", self.count().to_string())]);
        format_message(messages.found_variants, &params)
    }
}

/// Lifecycle of the single pricing request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(CalculationResponse),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&CalculationResponse> {
        match self {
            RequestState::Success(response) => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn courier_type_serializes_to_snake_case() {
        let encoded = serde_json::to_string(&TariffType::OfficePostamat).unwrap();
        assert_eq!(encoded, "\"office_postamat\"");
        let decoded: TariffType = serde_json::from_str("\"door_door\"").unwrap();
        assert_eq!(decoded, TariffType::DoorDoor);
    }

    #[test]
    fn every_tariff_has_a_requirement_pair_and_label() {
        let messages = Language::En.messages();
        for tariff in TariffType::ALL {
            // Origin legs are office or door only; lockers only appear on the
            // destination side of the product.
            let (origin, _) = tariff.requirements();
            assert_ne!(origin, EndpointRequirement::Locker, "{tariff:?}");
            assert!(!tariff.label(messages).is_empty());
        }
    }

    #[test]
    fn response_summary_embeds_the_option_count() {
        let response = CalculationResponse {
            options: vec![DeliveryOption::default(), DeliveryOption::default()],
        };
        let text = response.summary(Language::En.messages());
        assert_eq!(text, "Found 2 delivery option(s)");
    }

    #[test]
    fn delivery_time_text_is_absent_without_a_time() {
        let messages = Language::En.messages();
        let option = DeliveryOption {
            delivery_time: Some(3),
            ..DeliveryOption::default()
        };
        assert_eq!(
            option.delivery_time_text(messages).as_deref(),
            Some("Delivery time: 3 days")
        );
        assert_eq!(DeliveryOption::default().delivery_time_text(messages), None);
    }
}
