// SPDX-License-Identifier: MIT

//! CSV serialization of activity history.

use crate::error::{AppError, Result};
use crate::models::Activity;

/// Render activities as CSV in the order given.
///
/// Columns match the dashboard's export: date, description, category and
/// the emission with two decimals. Quoting is handled by the writer.
pub fn activities_to_csv(activities: &[Activity]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Date", "Description", "Category", "Emission (kg CO2)"])
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV write error: {}", e)))?;

    for activity in activities {
        writer
            .write_record([
                activity.activity_date.to_string(),
                activity.description.clone(),
                activity.category.to_string(),
                format!("{:.2}", activity.emission_kg),
            ])
            .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV write error: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(anyhow::anyhow!("CSV utf8: {}", e)))
}
