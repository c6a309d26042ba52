//! Resolves a match's recommended service codes into displayable service cards.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::knowledge::{MatchResult, ServiceRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCard {
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// The recommendation shown under the AI reply: the top scenario and its services.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prescription {
    pub name: String,
    pub services: Vec<ServiceCard>,
}

/// Cards for `codes` in their given order. Codes absent from `services` are dropped.
pub fn resolve_service_cards(
    codes: &[String],
    services: &BTreeMap<String, ServiceRecord>,
) -> Vec<ServiceCard> {
    codes
        .iter()
        .filter_map(|code| {
            services.get(code).map(|svc| ServiceCard {
                code: code.clone(),
                name: svc.name.clone(),
                description: svc.description.clone(),
                price: svc.price,
            })
        })
        .collect()
}

/// Builds the prescription for the best match, if there is one.
pub fn build_prescription(
    matches: &[MatchResult],
    services: &BTreeMap<String, ServiceRecord>,
) -> Option<Prescription> {
    let top = matches.first()?;
    Some(Prescription {
        name: top.name.clone(),
        services: resolve_service_cards(&top.record.recommend_services, services),
    })
}
