// SPDX-License-Identifier: MIT

//! Derived summary view models and their aggregation logic.
//!
//! Everything here is a pure function of an immutable snapshot of
//! activities, archived history and a caller-resolved "today". Summaries
//! are recomputed on every read and never persisted, so re-running any
//! of them on unchanged input yields identical output.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Activity, Category, DailyHistory};

/// Monday-first weekday abbreviations used by the weekly chart and heatmap.
const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Heatmap dimensions: a fixed 12-week grid ending on the current day.
pub const HEATMAP_WEEKS: u32 = 12;
pub const HEATMAP_DAYS: i64 = (HEATMAP_WEEKS as i64) * 7;

/// Round to one decimal place, the precision the charts display.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Today's logged activities and their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailySummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub total_emission: f64,
    pub activity_count: u32,
    pub activities: Vec<Activity>,
}

impl DailySummary {
    /// Compute the summary for `today` from the full activity snapshot.
    ///
    /// An empty day is a valid zero-state, not an error.
    pub fn compute(activities: &[Activity], today: NaiveDate) -> Self {
        let todays: Vec<Activity> = activities
            .iter()
            .filter(|a| a.activity_date == today)
            .cloned()
            .collect();

        Self {
            date: today,
            total_emission: todays.iter().map(|a| a.emission_kg).sum(),
            activity_count: todays.len() as u32,
            activities: todays,
        }
    }
}

/// One category's share of the weekly total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategorySlice {
    pub category: Category,
    pub total_emission: f64,
    pub percentage: f64,
}

/// One day of the trailing-week chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyEmission {
    /// Weekday abbreviation, Monday-first ("Mon".."Sun")
    pub day: String,
    /// Total for the date, rounded to one decimal
    pub emission: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
}

/// Rollup of the trailing 7 calendar days ending today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklySummary {
    pub total_emission_kg: f64,
    pub average_daily_emission_kg: f64,
    pub activity_count: u32,
    /// Per-category totals, descending; categories with no activity in the
    /// window are omitted rather than zero-filled.
    pub category_breakdown: Vec<CategorySlice>,
    /// Percentage delta vs. the archived total of the 7 preceding days.
    /// 0 when no prior history exists (zero-history policy, not "no change").
    pub comparison_to_prev_week: f64,
    /// Exactly 7 entries, oldest first, ending today.
    pub daily_data: Vec<DailyEmission>,
}

impl WeeklySummary {
    /// Compute the weekly rollup for the window `today - 6 ..= today`.
    ///
    /// `history` supplies the previous week's archived totals for the
    /// week-over-week comparison; activities outside the window are ignored.
    pub fn compute(activities: &[Activity], history: &[DailyHistory], today: NaiveDate) -> Self {
        let window_start = today - Duration::days(6);
        let in_window: Vec<&Activity> = activities
            .iter()
            .filter(|a| a.activity_date >= window_start && a.activity_date <= today)
            .collect();

        let total_emission_kg: f64 = in_window.iter().map(|a| a.emission_kg).sum();
        let activity_count = in_window.len() as u32;

        // Group window activities by category. BTreeMap keeps the pre-sort
        // order deterministic so repeated runs are identical.
        let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
        for activity in &in_window {
            *by_category.entry(activity.category).or_insert(0.0) += activity.emission_kg;
        }

        let mut category_breakdown: Vec<CategorySlice> = by_category
            .into_iter()
            .map(|(category, category_total)| CategorySlice {
                category,
                total_emission: category_total,
                // 0 for an empty window rather than dividing by zero
                percentage: if total_emission_kg > 0.0 {
                    category_total / total_emission_kg * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        category_breakdown.sort_by(|a, b| {
            b.total_emission
                .partial_cmp(&a.total_emission)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });

        // Chart series: one entry per day, oldest first.
        let mut daily_data = Vec::with_capacity(7);
        for offset in (0..7i64).rev() {
            let date = today - Duration::days(offset);
            let emission: f64 = activities
                .iter()
                .filter(|a| a.activity_date == date)
                .map(|a| a.emission_kg)
                .sum();
            daily_data.push(DailyEmission {
                day: DAY_LABELS[date.weekday().num_days_from_monday() as usize].to_string(),
                emission: round1(emission),
                date,
            });
        }

        // Previous window: the 7 days immediately preceding this one,
        // read from archived history rather than fine-grained activities.
        let prev_start = today - Duration::days(13);
        let prev_end = today - Duration::days(7);
        let prev_week_total: f64 = history
            .iter()
            .filter(|h| h.date >= prev_start && h.date <= prev_end)
            .map(|h| h.total_emission_kg)
            .sum();

        let comparison_to_prev_week = if prev_week_total > 0.0 {
            (total_emission_kg - prev_week_total) / prev_week_total * 100.0
        } else {
            0.0
        };

        Self {
            total_emission_kg,
            average_daily_emission_kg: total_emission_kg / 7.0,
            activity_count,
            category_breakdown,
            comparison_to_prev_week,
            daily_data,
        }
    }
}

/// One cell of the 12-week emission heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HeatmapCell {
    /// 0 = oldest week, 11 = the week ending today
    pub week: u32,
    /// Monday-first weekday index of `date` (0 = Mon .. 6 = Sun)
    pub day: u32,
    /// Total emission for the date, rounded to one decimal
    pub value: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
}

/// Build the fixed 84-cell heatmap grid for the dates `today - 83 ..= today`.
///
/// Each date's total prefers fine-grained activities, falls back to the
/// archived rollup, and is 0 when neither has data. A date without data
/// still produces a cell; the grid never has gaps.
pub fn heatmap(
    activities: &[Activity],
    history: &[DailyHistory],
    today: NaiveDate,
) -> Vec<HeatmapCell> {
    let mut recent: HashMap<NaiveDate, f64> = HashMap::new();
    for activity in activities {
        *recent.entry(activity.activity_date).or_insert(0.0) += activity.emission_kg;
    }
    let archived: HashMap<NaiveDate, f64> = history
        .iter()
        .map(|h| (h.date, h.total_emission_kg))
        .collect();

    (0..HEATMAP_DAYS)
        .map(|i| {
            let date = today - Duration::days(HEATMAP_DAYS - 1 - i);
            let value = recent
                .get(&date)
                .copied()
                .or_else(|| archived.get(&date).copied())
                .unwrap_or(0.0);
            HeatmapCell {
                week: (i / 7) as u32,
                day: date.weekday().num_days_from_monday(),
                value: round1(value),
                date,
            }
        })
        .collect()
}
