//! Data export for backing up and transferring app data
//!
//! Supports two formats:
//! - JSON: full structured export, re-importable
//! - CSV: tabular diary and water logs for spreadsheets

use crate::error::{ClientError, ClientResult};
use crate::stores::{FitnessLedger, MessageStore, ProfileStore};
use chrono::{DateTime, Utc};
use fittrack_shared::models::{DiarySection, FitnessProfile, Message, Profile};
use serde::{Deserialize, Serialize};

/// Format version stamped into every export
pub const EXPORT_VERSION: &str = "1.0";

/// Complete app data export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataExport {
    pub export_version: String,
    pub exported_at: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub fitness: FitnessProfile,
    pub profile: Profile,
}

/// CSV export row for diary entries
#[derive(Debug, Clone, Serialize)]
pub struct DiaryCsvRow {
    pub section: String,
    pub name: String,
    pub calories: u32,
}

/// CSV export row for water log entries
#[derive(Debug, Clone, Serialize)]
pub struct WaterCsvRow {
    pub amount: f64,
    pub unit: String,
    pub amount_ml: f64,
}

/// Data export service
pub struct ExportService;

impl ExportService {
    /// Snapshot every store into one export document
    pub fn export(
        messages: &MessageStore,
        fitness: &FitnessLedger,
        profile: &ProfileStore,
    ) -> DataExport {
        DataExport {
            export_version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            messages: messages.messages().to_vec(),
            fitness: fitness.profile().clone(),
            profile: profile.get().clone(),
        }
    }

    /// Serialize an export as pretty-printed JSON
    pub fn to_json(export: &DataExport) -> ClientResult<String> {
        serde_json::to_string_pretty(export)
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("export serialization error: {}", e)))
    }

    /// Parse a JSON export, rejecting malformed files and unknown versions
    pub fn from_json(json: &str) -> ClientResult<DataExport> {
        let export: DataExport = serde_json::from_str(json)
            .map_err(|e| ClientError::Validation(format!("Export file is not valid JSON: {}", e)))?;

        if export.export_version != EXPORT_VERSION {
            return Err(ClientError::Validation(format!(
                "Unsupported export version: {}",
                export.export_version
            )));
        }

        Ok(export)
    }

    /// Export the food diary as CSV, one row per entry
    pub fn diary_csv(fitness: &FitnessLedger) -> ClientResult<String> {
        let diary = &fitness.profile().diary;
        let rows: Vec<DiaryCsvRow> = DiarySection::ALL
            .iter()
            .flat_map(|&section| {
                diary.section(section).iter().map(move |entry| DiaryCsvRow {
                    section: section.label().to_string(),
                    name: entry.name.clone(),
                    calories: entry.calories,
                })
            })
            .collect();

        Self::to_csv(&rows)
    }

    /// Export the water log as CSV, one row per entry
    pub fn water_csv(fitness: &FitnessLedger) -> ClientResult<String> {
        let rows: Vec<WaterCsvRow> = fitness
            .profile()
            .water_log
            .iter()
            .map(|entry| WaterCsvRow {
                amount: entry.amount,
                unit: entry.unit.abbreviation().to_string(),
                amount_ml: entry.amount_ml(),
            })
            .collect();

        Self::to_csv(&rows)
    }

    /// Convert data to CSV string
    fn to_csv<T: Serialize>(data: &[T]) -> ClientResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                ClientError::Internal(anyhow::anyhow!("CSV serialization error: {}", e))
            })?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}
