//! Fuel catalog loading and management.
//!
//! Catalogs are read from CSV. Column headers are matched loosely so that
//! exports from different bunker-reporting tools load without editing.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use crate::error::{Error, Result};

use super::{Fuel, FuelLookup};

const BUILTIN_FUELS_CSV: &str = include_str!("../../data/fuels.csv");

/// Mapping of canonical field name -> accepted header spellings.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("code", &["code", "fuel_code", "fuel", "fuel_id", "id"]),
    ("name", &["name", "fuel_name", "description"]),
    ("lcv_mj_kg", &["lcv_mj_kg", "lcv", "lower_calorific_value"]),
    (
        "ttw_gco2e_mj",
        &["ttw_gco2e_mj", "default_ttw_gco2e_mj", "ttw", "tank_to_wake"],
    ),
    (
        "wtt_gco2e_mj",
        &["wtt_gco2e_mj", "default_wtt_gco2e_mj", "wtt", "well_to_tank"],
    ),
    (
        "co2_factor_t",
        &["co2_factor_t", "default_co2_factor_t", "co2_factor", "cf_co2"],
    ),
    ("ch4_factor_t", &["ch4_factor_t", "ch4_factor", "cf_ch4"]),
    ("n2o_factor_t", &["n2o_factor_t", "n2o_factor", "cf_n2o"]),
];

const REQUIRED: &[&str] = &[
    "code",
    "lcv_mj_kg",
    "ttw_gco2e_mj",
    "wtt_gco2e_mj",
    "co2_factor_t",
];

/// Collection of fuel definitions keyed by case-insensitive code.
#[derive(Debug, Clone, Default)]
pub struct FuelCatalog {
    fuels: HashMap<String, Fuel>,
    source: Option<PathBuf>,
}

impl FuelCatalog {
    /// Catalog of the standard marine fuels bundled with the library.
    pub fn builtin() -> Result<Self> {
        Self::from_reader(BUILTIN_FUELS_CSV.as_bytes())
    }

    /// Build a catalog from already-constructed fuels.
    pub fn from_fuels<I>(fuels: I) -> Result<Self>
    where
        I: IntoIterator<Item = Fuel>,
    {
        let mut catalog = Self::default();
        for fuel in fuels {
            catalog.insert(fuel)?;
        }
        Ok(catalog)
    }

    /// Load a fuel catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        info!(path = %path.display(), fuels = catalog.len(), "loaded fuel catalog");
        Ok(catalog)
    }

    /// Load a fuel catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::FuelDataValidation {
                message: format!("failed to read fuel catalog headers: {err}"),
            })?
            .clone();

        let index_map = map_headers(&headers)?;
        let mut catalog = Self::default();

        let mut row_num: usize = 1; // header is line 1
        for result in csv_reader.records() {
            row_num += 1;
            let record = result.map_err(|e| Error::FuelDataValidation {
                message: e.to_string(),
            })?;

            let get = |field: &str| cell(&record, &index_map, field);
            let code = get("code").unwrap_or_default().to_string();
            let row = Row {
                code: &code,
                number: row_num,
            };

            let fuel = Fuel {
                name: get("name").unwrap_or(&code).to_string(),
                lcv_mj_kg: row.required(get("lcv_mj_kg"), "lcv_mj_kg")?,
                ttw_gco2e_mj: row.required(get("ttw_gco2e_mj"), "ttw_gco2e_mj")?,
                wtt_gco2e_mj: row.required(get("wtt_gco2e_mj"), "wtt_gco2e_mj")?,
                co2_factor_t: row.required(get("co2_factor_t"), "co2_factor_t")?,
                ch4_factor_t: row.optional(get("ch4_factor_t"), "ch4_factor_t")?,
                n2o_factor_t: row.optional(get("n2o_factor_t"), "n2o_factor_t")?,
                code: code.clone(),
            };

            catalog.insert(fuel)?;
        }

        Ok(catalog)
    }

    fn insert(&mut self, mut fuel: Fuel) -> Result<()> {
        fuel.code = fuel.code.trim().to_string();
        fuel.validate()?;

        let key = normalize_code(&fuel.code);
        if self.fuels.contains_key(&key) {
            return Err(Error::DuplicateFuelCode { code: key });
        }
        self.fuels.insert(key, fuel);
        Ok(())
    }

    /// Get a fuel by code (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&Fuel> {
        self.fuels.get(&normalize_code(code))
    }

    /// All fuels sorted by code.
    pub fn fuels_sorted(&self) -> Vec<&Fuel> {
        let mut fuels: Vec<&Fuel> = self.fuels.values().collect();
        fuels.sort_by(|a, b| a.code.cmp(&b.code));
        fuels
    }

    pub fn len(&self) -> usize {
        self.fuels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fuels.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl FuelLookup for FuelCatalog {
    fn fuel(&self, id: &str) -> Option<&Fuel> {
        self.get(id)
    }
}

/// Position of a CSV row, used to build error messages.
struct Row<'a> {
    code: &'a str,
    number: usize,
}

impl Row<'_> {
    fn required(&self, raw: Option<&str>, field: &str) -> Result<f64> {
        match raw {
            Some(raw) => self.parse(raw, field),
            None => Err(Error::FuelDataValidation {
                message: format!(
                    "missing {field} for fuel '{}' at row {}",
                    self.code, self.number
                ),
            }),
        }
    }

    /// Blank optional columns default to zero.
    fn optional(&self, raw: Option<&str>, field: &str) -> Result<f64> {
        raw.map_or(Ok(0.0), |raw| self.parse(raw, field))
    }

    fn parse(&self, raw: &str, field: &str) -> Result<f64> {
        raw.parse::<f64>().map_err(|e| Error::FuelDataValidation {
            message: format!(
                "invalid {field} for fuel '{}' at row {}: {e}",
                self.code, self.number
            ),
        })
    }
}

fn cell<'r>(
    record: &'r StringRecord,
    index_map: &BTreeMap<&'static str, usize>,
    field: &str,
) -> Option<&'r str> {
    index_map
        .get(field)
        .and_then(|&i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn map_headers(headers: &StringRecord) -> Result<BTreeMap<&'static str, usize>> {
    let normalized_headers: Vec<String> = headers.iter().map(normalize_header).collect();

    let mut index_map: BTreeMap<&'static str, usize> = BTreeMap::new();
    for (canon, alts) in SYNONYMS {
        let found = alts.iter().find_map(|alt| {
            let alt_n = normalize_header(alt);
            normalized_headers.iter().position(|h| *h == alt_n)
        });
        if let Some(i) = found {
            index_map.insert(*canon, i);
        }
    }

    let missing: Vec<&str> = REQUIRED
        .iter()
        .copied()
        .filter(|c| !index_map.contains_key(c))
        .collect();

    if !missing.is_empty() {
        return Err(Error::FuelDataValidation {
            message: format!(
                "fuel catalog missing required columns: {}. Available: {}",
                missing.join(", "),
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        });
    }

    Ok(index_map)
}

/// Lowercase and drop everything but ASCII letters and digits.
fn normalize_header(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Normalize a fuel code for case-insensitive lookup.
fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
