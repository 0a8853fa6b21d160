//! CSV import of the village registry: one row per village carrying identity,
//! population, staffing, the qualitative label, the latest water readings,
//! and tracked disease counts.

mod parser;

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::surveillance::villages::domain::{
    MeasurementSet, Village, VillageId, WaterQualityLabel, WaterReadings,
};
use crate::surveillance::villages::risk::{self, InvalidMeasurementError};

/// Diseases tracked as dedicated registry columns.
const TRACKED_DISEASES: [&str; 4] = ["diarrhea", "cholera", "typhoid", "hepatitis"];

#[derive(Debug, thiserror::Error)]
pub enum RegistryImportError {
    #[error("failed to read village registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid registry CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: duplicate village id '{id}'")]
    DuplicateVillage { row: usize, id: String },
    #[error("row {row}: unknown water quality label '{label}'")]
    UnknownLabel { row: usize, label: String },
    #[error("row {row}: population must be positive")]
    ZeroPopulation { row: usize },
    #[error("row {row}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: {source}")]
    Measurement {
        row: usize,
        source: InvalidMeasurementError,
    },
}

pub struct RegistryImporter;

impl RegistryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Village>, RegistryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Village>, RegistryImportError> {
        let mut villages = Vec::new();
        let mut seen = BTreeSet::new();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            // Data rows are 1-indexed after the header line.
            let row_number = index + 1;

            if !seen.insert(row.id.clone()) {
                return Err(RegistryImportError::DuplicateVillage {
                    row: row_number,
                    id: row.id,
                });
            }

            villages.push(village_from_row(row, row_number)?);
        }

        Ok(villages)
    }
}

fn village_from_row(
    row: parser::RegistryRow,
    row_number: usize,
) -> Result<Village, RegistryImportError> {
    if row.population == 0 {
        return Err(RegistryImportError::ZeroPopulation { row: row_number });
    }

    let water_quality = WaterQualityLabel::from_label(&row.water_quality).ok_or_else(|| {
        RegistryImportError::UnknownLabel {
            row: row_number,
            label: row.water_quality.clone(),
        }
    })?;

    let last_updated =
        NaiveDate::parse_from_str(row.updated_on.trim(), "%Y-%m-%d").map_err(|_| {
            RegistryImportError::InvalidDate {
                row: row_number,
                value: row.updated_on.clone(),
            }
        })?;

    let counts = [row.diarrhea, row.cholera, row.typhoid, row.hepatitis];
    let cases: BTreeMap<String, u32> = TRACKED_DISEASES
        .iter()
        .zip(counts)
        .map(|(disease, count)| (disease.to_string(), count))
        .collect();

    let measurements = MeasurementSet {
        water: WaterReadings {
            ph: row.ph,
            turbidity_ntu: row.turbidity_ntu,
            coliform_cfu: row.coliform_cfu,
            chlorine_mg_l: row.chlorine_mg_l,
        },
        cases,
    };

    risk::validate(&measurements)
        .map_err(|source| RegistryImportError::Measurement {
            row: row_number,
            source,
        })?;

    let water_sources = row.sources();

    Ok(Village {
        id: VillageId(row.id),
        name: row.name,
        population: row.population,
        asha_worker: row.asha_worker,
        water_sources,
        water_quality,
        measurements,
        last_updated,
    })
}
