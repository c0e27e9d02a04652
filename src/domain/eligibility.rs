//! Warehouse eligibility rules: which tariffs can be offered between two
//! cities given their pickup-point and locker coverage.

use std::collections::HashMap;

use super::entities::{City, EndpointRequirement, TariffType};
use crate::i18n::{format_message, Translations};

/// Which required capability is missing, and on which side of the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfraGap {
    None,
    OriginMissingOffice,
    DestinationMissingOffice,
    BothMissingOffice,
    OriginMissingLocker,
    DestinationMissingLocker,
    BothMissingLocker,
    /// The one gap spanning two capability kinds: the tariff needs an office
    /// at the origin and a locker at the destination, and both are absent.
    OriginOfficeAndDestinationLocker,
}

/// Localized warning key attached to a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    NoOriginWarehouse,
    NoDestinationWarehouse,
    NoWarehouses,
    NoOriginLocker,
    NoDestinationLocker,
    NoLockers,
    NoOriginWarehouseAndDestinationLocker,
}

impl WarningKind {
    pub fn template(self, messages: &Translations) -> &'static str {
        match self {
            WarningKind::NoOriginWarehouse => messages.no_origin_warehouse,
            WarningKind::NoDestinationWarehouse => messages.no_destination_warehouse,
            WarningKind::NoWarehouses => messages.no_warehouses,
            WarningKind::NoOriginLocker => messages.no_origin_locker,
            WarningKind::NoDestinationLocker => messages.no_destination_locker,
            WarningKind::NoLockers => messages.no_lockers,
            WarningKind::NoOriginWarehouseAndDestinationLocker => {
                messages.no_origin_warehouse_and_destination_locker
            }
        }
    }
}

/// Derived eligibility decision for the current form. Recomputed on every
/// change, never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EligibilityVerdict {
    /// Calculation is blocked: no physical hand-off point exists for a
    /// mandatory capability on at least one side.
    pub disabled: bool,
    pub warning: Option<WarningKind>,
    pub params: HashMap<&'static str, String>,
}

impl EligibilityVerdict {
    fn ok() -> Self {
        Self::default()
    }

    fn advisory(warning: WarningKind, params: HashMap<&'static str, String>) -> Self {
        Self {
            disabled: false,
            warning: Some(warning),
            params,
        }
    }

    /// Renders the warning through the localization catalog, if any.
    pub fn message(&self, messages: &Translations) -> Option<String> {
        self.warning
            .map(|kind| format_message(kind.template(messages), &self.params))
    }
}

/// Classifies which required capabilities the selected route is missing.
///
/// Returns [`InfraGap::None`] while any input is unset: an incomplete form is
/// not an error, there is just nothing to warn about yet.
pub fn classify(
    origin: Option<&City>,
    destination: Option<&City>,
    tariff: Option<TariffType>,
) -> InfraGap {
    let (Some(origin), Some(destination), Some(tariff)) = (origin, destination, tariff) else {
        return InfraGap::None;
    };

    let (origin_requirement, destination_requirement) = tariff.requirements();
    let origin_missing = endpoint_missing(origin, origin_requirement);
    let destination_missing = endpoint_missing(destination, destination_requirement);

    match (origin_missing, destination_missing) {
        (false, false) => InfraGap::None,
        (true, false) => match origin_requirement {
            EndpointRequirement::Office => InfraGap::OriginMissingOffice,
            EndpointRequirement::Locker => InfraGap::OriginMissingLocker,
            EndpointRequirement::Door => InfraGap::None,
        },
        (false, true) => match destination_requirement {
            EndpointRequirement::Office => InfraGap::DestinationMissingOffice,
            EndpointRequirement::Locker => InfraGap::DestinationMissingLocker,
            EndpointRequirement::Door => InfraGap::None,
        },
        (true, true) => match (origin_requirement, destination_requirement) {
            (EndpointRequirement::Office, EndpointRequirement::Office) => {
                InfraGap::BothMissingOffice
            }
            (EndpointRequirement::Locker, EndpointRequirement::Locker) => {
                InfraGap::BothMissingLocker
            }
            (EndpointRequirement::Office, EndpointRequirement::Locker) => {
                InfraGap::OriginOfficeAndDestinationLocker
            }
            // The tariff table never puts a locker on the origin leg, and a
            // door leg cannot be missing, so no other pairing can reach here.
            _ => InfraGap::None,
        },
    }
}

fn endpoint_missing(city: &City, requirement: EndpointRequirement) -> bool {
    match requirement {
        EndpointRequirement::Office => !city.has_office,
        EndpointRequirement::Locker => !city.has_locker,
        EndpointRequirement::Door => false,
    }
}

/// Maps a classified gap to the user-facing verdict.
///
/// Only the combined office+locker gap disables the calculation: with both
/// mandatory hand-off points absent the tariff cannot physically be
/// fulfilled. Every other gap degrades to an advisory because an alternate
/// leg type may still work even where the catalog flags are incomplete.
pub fn evaluate(gap: InfraGap, origin_name: &str, destination_name: &str) -> EligibilityVerdict {
    let city = |name: &str| HashMap::from([("city", name.to_string())]);

    match gap {
        InfraGap::None => EligibilityVerdict::ok(),
        InfraGap::OriginMissingOffice => {
            EligibilityVerdict::advisory(WarningKind::NoOriginWarehouse, city(origin_name))
        }
        InfraGap::DestinationMissingOffice => EligibilityVerdict::advisory(
            WarningKind::NoDestinationWarehouse,
            city(destination_name),
        ),
        InfraGap::BothMissingOffice => {
            EligibilityVerdict::advisory(WarningKind::NoWarehouses, HashMap::new())
        }
        InfraGap::OriginMissingLocker => {
            EligibilityVerdict::advisory(WarningKind::NoOriginLocker, city(origin_name))
        }
        InfraGap::DestinationMissingLocker => {
            EligibilityVerdict::advisory(WarningKind::NoDestinationLocker, city(destination_name))
        }
        InfraGap::BothMissingLocker => {
            EligibilityVerdict::advisory(WarningKind::NoLockers, HashMap::new())
        }
        InfraGap::OriginOfficeAndDestinationLocker => EligibilityVerdict {
            disabled: true,
            warning: Some(WarningKind::NoOriginWarehouseAndDestinationLocker),
            params: HashMap::from([
                ("originCity", origin_name.to_string()),
                ("destinationCity", destination_name.to_string()),
            ]),
        },
    }
}
