//! Thin asynchronous client for the tariff pricing service.
//!
//! - POSTs the calculation payload and maps the response into domain types.
//! - Parses the body leniently: the service has shipped both a bare array
//!   and an enveloped list of delivery options.

use log::{debug, warn};
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{CalculationRequest, CalculationResponse, DeliveryOption};

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/";
const USER_AGENT: &str = "tariff-engine/0.1.0";

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("calculation request failed with status {0}")]
    Status(u16),
    #[error("api error: {0}")]
    Api(String),
}

/// Pricing service client. Cheap to clone; the inner `reqwest::Client` is
/// already reference counted.
#[derive(Clone)]
pub struct PricingClient {
    http: Client,
    base_url: Url,
}

impl PricingClient {
    pub fn new() -> Result<Self, PricingError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, PricingError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    /// Sends one calculation request. Non-2xx responses surface as
    /// [`PricingError::Status`] with the status code.
    pub async fn calculate_tariff(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, PricingError> {
        let url = self.base_url.join("calculate-tariff")?;
        debug!("requesting tariff calculation from {url}");

        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("tariff calculation failed with status {status}");
            return Err(PricingError::Status(status.as_u16()));
        }

        let raw: serde_json::Value = response.json().await?;
        let parsed = parse_response(raw)?;
        debug!(
            "tariff calculation returned {} delivery option(s)",
            parsed.count()
        );
        Ok(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct DeliveryOptionDto {
    #[serde(default, alias = "name")]
    tariff_name: Option<String>,
    #[serde(default, alias = "cost")]
    price: Option<f64>,
    #[serde(default, alias = "deliveryTime", alias = "delivery_time_days")]
    delivery_time: Option<u32>,
}

impl From<DeliveryOptionDto> for DeliveryOption {
    fn from(dto: DeliveryOptionDto) -> Self {
        Self {
            tariff_name: dto.tariff_name,
            price: dto.price,
            delivery_time: dto.delivery_time,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(alias = "options", alias = "data")]
    variants: Vec<DeliveryOptionDto>,
}

fn parse_response(value: serde_json::Value) -> Result<CalculationResponse, PricingError> {
    if let Ok(entries) = serde_json::from_value::<Vec<DeliveryOptionDto>>(value.clone()) {
        return Ok(CalculationResponse {
            options: entries.into_iter().map(DeliveryOption::from).collect(),
        });
    }

    if let Ok(envelope) = serde_json::from_value::<ResponseEnvelope>(value) {
        return Ok(CalculationResponse {
            options: envelope
                .variants
                .into_iter()
                .map(DeliveryOption::from)
                .collect(),
        });
    }

    Err(PricingError::Api(
        "unrecognised calculation response shape".to_string(),
    ))
}
