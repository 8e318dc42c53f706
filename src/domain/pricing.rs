//! Shipment pricing over the per-destination rate table.

use serde::{Deserialize, Serialize};

use super::entities::DestinationRate;

/// Coefficients applied when a destination has no entry in the rate table.
pub const FALLBACK_BASE_RATE: f64 = 20.0;
pub const FALLBACK_WEIGHT_RATE: f64 = 0.5;
pub const FALLBACK_VOLUME_RATE: f64 = 10.0;

/// Static destination → coefficients mapping, looked up by destination name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: Vec<DestinationRate>,
}

impl RateTable {
    pub fn new(rates: Vec<DestinationRate>) -> Self {
        Self { rates }
    }

    /// First entry whose destination name matches exactly.
    pub fn find(&self, destination: &str) -> Option<&DestinationRate> {
        self.rates.iter().find(|rate| rate.destination == destination)
    }

    pub fn rates(&self) -> &[DestinationRate] {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<Vec<DestinationRate>> for RateTable {
    fn from(rates: Vec<DestinationRate>) -> Self {
        Self::new(rates)
    }
}

/// Which rule produced a price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateSource {
    /// Priced from the rate table entry with this id.
    Table(String),
    /// Destination was not in the table; default coefficients were used.
    Fallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceQuote {
    pub destination: String,
    pub price: f64,
    pub source: RateSource,
}

impl PriceQuote {
    pub fn is_fallback(&self) -> bool {
        self.source == RateSource::Fallback
    }
}

/// Price of a shipment: `base + weight * weight_rate + volume * volume_rate`.
///
/// Unknown destinations silently use the fallback coefficients. Inputs are not
/// sanitised; negative weight or volume flows straight through the formula.
pub fn calculate_price(destination: &str, weight: f64, volume: f64, rates: &RateTable) -> f64 {
    quote(destination, weight, volume, rates).price
}

pub fn quote(destination: &str, weight: f64, volume: f64, rates: &RateTable) -> PriceQuote {
    let (price, source) = match rates.find(destination) {
        Some(rate) => (
            rate.base_rate + weight * rate.weight_rate + volume * rate.volume_rate,
            RateSource::Table(rate.id.clone()),
        ),
        None => {
            tracing::debug!(destination, "no rate table entry; using fallback pricing");
            (
                FALLBACK_BASE_RATE + weight * FALLBACK_WEIGHT_RATE + volume * FALLBACK_VOLUME_RATE,
                RateSource::Fallback,
            )
        }
    };

    PriceQuote {
        destination: destination.to_string(),
        price,
        source,
    }
}
