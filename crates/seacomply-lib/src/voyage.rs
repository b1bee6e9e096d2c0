//! Voyage classification and distance checks.
//!
//! The trading-scheme calculators take coverage coefficients as plain inputs.
//! This module derives those coefficients from the jurisdiction of the
//! departure and arrival ports.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Earth's mean radius in nautical miles.
const EARTH_RADIUS_NM: f64 = 3_440.065;

/// Largest relative difference between reported and great-circle distance
/// accepted as a plausible routing.
pub const MAX_DISTANCE_VARIANCE: f64 = 0.5;

/// Jurisdiction flags of a port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortFlags {
    #[serde(default)]
    pub is_eu: bool,
    #[serde(default)]
    pub is_uk: bool,
    /// EU outermost region.
    #[serde(default)]
    pub is_omr: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoyageType {
    UkDomestic,
    IntraEu,
    ExtraEu,
    Other,
}

/// Share of a voyage's emissions each trading scheme covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoyageCoverage {
    pub voyage_type: VoyageType,
    pub eu_coverage: f64,
    pub uk_coverage: f64,
}

/// Classify a voyage by its end points.
///
/// UK domestic voyages are checked first, so a port flagged both UK and EU
/// never makes a UK-to-UK voyage intra-EU.
pub fn classify_voyage(departure: PortFlags, arrival: PortFlags) -> VoyageCoverage {
    let (voyage_type, eu_coverage, uk_coverage) = if departure.is_uk && arrival.is_uk {
        (VoyageType::UkDomestic, 0.0, 1.0)
    } else if departure.is_eu && arrival.is_eu {
        (VoyageType::IntraEu, 1.0, 0.0)
    } else if departure.is_eu || arrival.is_eu {
        (VoyageType::ExtraEu, 0.5, 0.0)
    } else {
        (VoyageType::Other, 0.0, 0.0)
    };

    VoyageCoverage {
        voyage_type,
        eu_coverage,
        uk_coverage,
    }
}

/// One leg of a multi-port voyage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoyageSegment {
    pub start: PortFlags,
    pub end: PortFlags,
    pub distance_nm: f64,
    /// Both ends of the leg are EU ports.
    pub is_eu_waters: bool,
    pub eu_coverage: f64,
}

/// Split a voyage calling at `ports` (in order) into legs.
///
/// The reported distance is shared equally between legs. Each leg is
/// covered by the EU ETS in full when both ends are EU ports, by half when
/// one end is, and not at all otherwise.
pub fn voyage_segments(ports: &[PortFlags], total_nm: f64) -> Result<Vec<VoyageSegment>> {
    if ports.len() < 2 {
        return Err(Error::InvalidInput {
            message: format!(
                "a voyage needs at least 2 ports to form segments, got {}",
                ports.len()
            ),
        });
    }
    if !total_nm.is_finite() || total_nm < 0.0 {
        return Err(Error::InvalidInput {
            message: format!("total distance must be finite and non-negative, got {total_nm}"),
        });
    }

    let distance_nm = total_nm / (ports.len() - 1) as f64;
    Ok(ports
        .windows(2)
        .map(|leg| {
            let (start, end) = (leg[0], leg[1]);
            let is_eu_waters = start.is_eu && end.is_eu;
            let eu_coverage = if is_eu_waters {
                1.0
            } else if start.is_eu || end.is_eu {
                0.5
            } else {
                0.0
            };
            VoyageSegment {
                start,
                end,
                distance_nm,
                is_eu_waters,
                eu_coverage,
            }
        })
        .collect())
}

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Haversine distance between two positions in nautical miles.
pub fn great_circle_nm(from: Coordinates, to: Coordinates) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_phi = (to.lat - from.lat).to_radians();
    let d_lambda = (to.lon - from.lon).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceCheck {
    pub valid: bool,
    pub calculated_nm: f64,
    pub variance: f64,
}

/// Compare a reported voyage distance with the great-circle distance between
/// its end points.
pub fn validate_distance(
    reported_nm: f64,
    from: Coordinates,
    to: Coordinates,
) -> Result<DistanceCheck> {
    if !reported_nm.is_finite() || reported_nm < 0.0 {
        return Err(Error::InvalidInput {
            message: format!("reported distance must be finite and non-negative, got {reported_nm}"),
        });
    }

    let calculated_nm = great_circle_nm(from, to);
    if calculated_nm <= 0.0 {
        return Err(Error::InvalidInput {
            message: "departure and arrival positions coincide".to_string(),
        });
    }

    let variance = (reported_nm - calculated_nm).abs() / calculated_nm;
    Ok(DistanceCheck {
        valid: variance <= MAX_DISTANCE_VARIANCE,
        calculated_nm,
        variance,
    })
}
