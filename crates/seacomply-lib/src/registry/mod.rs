//! Time-versioned regulatory constants.
//!
//! The registry is built once from a list of [`RegulatoryConstant`]s and is
//! read-only afterwards. Every lookup is keyed by name and a date: the
//! constant whose `[effective_from, effective_to)` interval contains the date
//! wins. Intervals for the same key may not overlap, so a `(key, date)` pair
//! always resolves to the same constant.
//!
//! - [`value`] - Typed constant payloads (targets, GWP triples, price bands)
//! - [`keys`] - Names of the constants the calculators consume
//! - [`builtin`] - The constant table shipped with the library

pub mod builtin;
pub mod keys;
pub mod value;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use value::{ConstantValue, FuelEuTarget, GfiMilestone, GwpValues, PriceRange};

/// Regulatory regime a constant (or a calculation) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Framework {
    #[serde(rename = "FUELEU")]
    FuelEu,
    #[serde(rename = "EU_ETS")]
    EuEts,
    #[serde(rename = "IMO")]
    Imo,
    #[serde(rename = "UK_ETS")]
    UkEts,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::FuelEu,
        Framework::EuEts,
        Framework::Imo,
        Framework::UkEts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::FuelEu => "FUELEU",
            Framework::EuEts => "EU_ETS",
            Framework::Imo => "IMO",
            Framework::UkEts => "UK_ETS",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = Error;

    /// Accepts the canonical names plus dashed/lowercase spellings
    /// (`fuel-eu`, `eu-ets`, `uk_ets`, ...).
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "FUELEU" => Ok(Framework::FuelEu),
            "EUETS" => Ok(Framework::EuEts),
            "IMO" => Ok(Framework::Imo),
            "UKETS" => Ok(Framework::UkEts),
            _ => Err(Error::InvalidInput {
                message: format!("unknown framework '{s}'"),
            }),
        }
    }
}

/// A named, versioned regulatory parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryConstant {
    pub key: String,
    pub framework: Framework,
    pub value: ConstantValue,
    pub effective_from: NaiveDate,
    /// Exclusive end of the interval; `None` means open-ended.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    pub version: String,
    pub source_regulation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl RegulatoryConstant {
    /// Whether `date` falls inside `[effective_from, effective_to)`.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date < to)
    }
}

/// Immutable table of regulatory constants indexed by key and interval.
///
/// Safe to share between threads without synchronization once built.
#[derive(Debug, Clone)]
pub struct ConstantRegistry {
    entries: BTreeMap<String, Vec<RegulatoryConstant>>,
    fingerprint: String,
}

impl ConstantRegistry {
    /// Build a registry, rejecting empty or overlapping intervals.
    pub fn from_constants<I>(constants: I) -> Result<Self>
    where
        I: IntoIterator<Item = RegulatoryConstant>,
    {
        let mut entries: BTreeMap<String, Vec<RegulatoryConstant>> = BTreeMap::new();
        for constant in constants {
            if let Some(to) = constant.effective_to {
                if to <= constant.effective_from {
                    return Err(Error::InvalidConstantInterval {
                        key: constant.key,
                        from: constant.effective_from,
                        to,
                    });
                }
            }
            entries.entry(constant.key.clone()).or_default().push(constant);
        }

        for (key, versions) in entries.iter_mut() {
            versions.sort_by_key(|c| c.effective_from);
            for pair in versions.windows(2) {
                let (earlier, later) = (&pair[0], &pair[1]);
                let disjoint = earlier
                    .effective_to
                    .is_some_and(|to| to <= later.effective_from);
                if !disjoint {
                    return Err(Error::OverlappingConstants {
                        key: key.clone(),
                        first: earlier.effective_from,
                        second: later.effective_from,
                    });
                }
            }
        }

        let fingerprint = fingerprint_entries(&entries)?;
        Ok(Self {
            entries,
            fingerprint,
        })
    }

    /// Load a registry from a JSON array of constants.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let constants: Vec<RegulatoryConstant> = serde_json::from_reader(reader)?;
        Self::from_constants(constants)
    }

    /// Load a registry from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let registry = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            constants = registry.len(),
            fingerprint = %registry.fingerprint(),
            "loaded regulatory constants"
        );
        Ok(registry)
    }

    /// The constant for `key` in force on `as_of`, if any.
    pub fn resolve(&self, key: &str, as_of: NaiveDate) -> Option<&RegulatoryConstant> {
        self.entries
            .get(key)?
            .iter()
            .find(|c| c.is_effective_on(as_of))
    }

    /// Like [`resolve`](Self::resolve) but a miss is an error.
    pub fn require(&self, key: &str, as_of: NaiveDate) -> Result<&RegulatoryConstant> {
        let constant = self
            .resolve(key, as_of)
            .ok_or_else(|| Error::MissingConstant {
                key: key.to_string(),
                as_of,
            })?;
        debug!(
            key,
            %as_of,
            version = %constant.version,
            "resolved regulatory constant"
        );
        Ok(constant)
    }

    pub fn scalar(&self, key: &str, as_of: NaiveDate) -> Result<f64> {
        match &self.require(key, as_of)?.value {
            ConstantValue::Scalar(v) => Ok(*v),
            _ => Err(mismatch(key, "scalar")),
        }
    }

    pub fn text(&self, key: &str, as_of: NaiveDate) -> Result<&str> {
        match &self.require(key, as_of)?.value {
            ConstantValue::Text(v) => Ok(v.as_str()),
            _ => Err(mismatch(key, "text")),
        }
    }

    pub fn year_table(&self, key: &str, as_of: NaiveDate) -> Result<&BTreeMap<i32, f64>> {
        match &self.require(key, as_of)?.value {
            ConstantValue::YearTable(v) => Ok(v),
            _ => Err(mismatch(key, "year_table")),
        }
    }

    pub fn fuel_eu_targets(
        &self,
        key: &str,
        as_of: NaiveDate,
    ) -> Result<&BTreeMap<i32, FuelEuTarget>> {
        match &self.require(key, as_of)?.value {
            ConstantValue::FuelEuTargets(v) => Ok(v),
            _ => Err(mismatch(key, "fuel_eu_targets")),
        }
    }

    pub fn gfi_targets(&self, key: &str, as_of: NaiveDate) -> Result<&BTreeMap<i32, GfiMilestone>> {
        match &self.require(key, as_of)?.value {
            ConstantValue::GfiTargets(v) => Ok(v),
            _ => Err(mismatch(key, "gfi_targets")),
        }
    }

    pub fn gwp(&self, key: &str, as_of: NaiveDate) -> Result<GwpValues> {
        match &self.require(key, as_of)?.value {
            ConstantValue::Gwp(v) => Ok(*v),
            _ => Err(mismatch(key, "gwp")),
        }
    }

    pub fn price_range(&self, key: &str, as_of: NaiveDate) -> Result<PriceRange> {
        match &self.require(key, as_of)?.value {
            ConstantValue::PriceRange(v) => Ok(*v),
            _ => Err(mismatch(key, "price_range")),
        }
    }

    /// All versions of every constant owned by `framework`, ordered by key
    /// and then by effective date.
    pub fn list_by_framework(&self, framework: Framework) -> Vec<&RegulatoryConstant> {
        self.iter().filter(|c| c.framework == framework).collect()
    }

    /// Every constant in force on `date`, optionally limited to one framework.
    pub fn constants_as_of(
        &self,
        date: NaiveDate,
        framework: Option<Framework>,
    ) -> Vec<&RegulatoryConstant> {
        self.iter()
            .filter(|c| framework.is_none_or(|f| c.framework == f))
            .filter(|c| c.is_effective_on(date))
            .collect()
    }

    /// Iterate over all constants in key, then effective-date order.
    pub fn iter(&self) -> impl Iterator<Item = &RegulatoryConstant> {
        self.entries.values().flatten()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of constants (all versions).
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hex SHA-256 of the canonical JSON form of the table.
    ///
    /// Two registries with the same fingerprint resolve every `(key, date)`
    /// identically.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn mismatch(key: &str, expected: &'static str) -> Error {
    Error::ConstantTypeMismatch {
        key: key.to_string(),
        expected,
    }
}

fn fingerprint_entries(entries: &BTreeMap<String, Vec<RegulatoryConstant>>) -> Result<String> {
    let canonical = serde_json::to_vec(entries)?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}
