// SPDX-License-Identifier: MIT

//! Cross-cutting invariants of the aggregation pipeline, exercised
//! through the public API of the crate with classifier-produced data.

use carbonlog::models::summary::{heatmap, DailySummary, WeeklySummary};
use carbonlog::models::{Activity, DailyHistory};
use carbonlog::services::Classifier;
use chrono::{Duration, NaiveDate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build a week of activities by running real descriptions through the
/// classifier, spread across the trailing window.
fn classified_week(today: NaiveDate) -> Vec<Activity> {
    let classifier = Classifier::default();
    let descriptions = [
        "Drove 15km to college in petrol car",
        "Had a chicken sandwich for lunch",
        "Used AC for 4 hours",
        "Took bus to market and back",
        "Bought a new laptop",
        "ate a beef burger",
        "Walked to the store",
    ];

    descriptions
        .iter()
        .enumerate()
        .map(|(i, description)| {
            let result = classifier.classify(description);
            Activity {
                id: format!("a{}", i),
                user_id: "u1".to_string(),
                description: description.to_string(),
                category: result.category,
                emission_kg: result.emission_kg,
                activity_date: today - Duration::days((i % 7) as i64),
                created_at: "2025-06-10T08:00:00Z".to_string(),
            }
        })
        .collect()
}

#[test]
fn weekly_total_equals_breakdown_sum() {
    let today = date(2025, 6, 10);
    let activities = classified_week(today);

    let summary = WeeklySummary::compute(&activities, &[], today);

    let breakdown_sum: f64 = summary
        .category_breakdown
        .iter()
        .map(|s| s.total_emission)
        .sum();
    assert!((summary.total_emission_kg - breakdown_sum).abs() < 1e-9);
}

#[test]
fn percentages_sum_to_hundred_for_nonempty_week() {
    let today = date(2025, 6, 10);
    let activities = classified_week(today);

    let summary = WeeklySummary::compute(&activities, &[], today);

    assert!(summary.total_emission_kg > 0.0);
    let percentage_sum: f64 = summary.category_breakdown.iter().map(|s| s.percentage).sum();
    assert!((percentage_sum - 100.0).abs() < 1e-6);
}

#[test]
fn average_is_exactly_total_over_seven() {
    let today = date(2025, 6, 10);
    let activities = classified_week(today);

    let summary = WeeklySummary::compute(&activities, &[], today);

    assert_eq!(
        summary.average_daily_emission_kg,
        summary.total_emission_kg / 7.0
    );

    let empty = WeeklySummary::compute(&[], &[], today);
    assert_eq!(empty.average_daily_emission_kg, 0.0);
}

#[test]
fn daily_series_covers_each_window_date_once() {
    let today = date(2025, 6, 10);
    let activities = classified_week(today);

    let summary = WeeklySummary::compute(&activities, &[], today);

    let mut dates: Vec<NaiveDate> = summary.daily_data.iter().map(|d| d.date).collect();
    dates.dedup();
    assert_eq!(dates.len(), 7);
    assert_eq!(*dates.first().unwrap(), today - Duration::days(6));
    assert_eq!(*dates.last().unwrap(), today);
}

#[test]
fn heatmap_is_dense_over_sparse_data() {
    let today = date(2025, 6, 10);
    // A single archived day three weeks back is the only data point.
    let history = vec![DailyHistory {
        user_id: "u1".to_string(),
        date: today - Duration::days(21),
        total_emission_kg: 4.2,
        activity_count: 2,
    }];

    let cells = heatmap(&[], &history, today);

    assert_eq!(cells.len(), 84);
    let nonzero: Vec<_> = cells.iter().filter(|c| c.value > 0.0).collect();
    assert_eq!(nonzero.len(), 1);
    assert_eq!(nonzero[0].date, today - Duration::days(21));
    // Every other date is present with an explicit zero, not omitted.
    assert_eq!(cells.iter().filter(|c| c.value == 0.0).count(), 83);
}

#[test]
fn rerunning_aggregators_is_bit_identical() {
    let today = date(2025, 6, 10);
    let activities = classified_week(today);
    let history = vec![DailyHistory {
        user_id: "u1".to_string(),
        date: today - Duration::days(9),
        total_emission_kg: 11.0,
        activity_count: 3,
    }];

    let daily_a = DailySummary::compute(&activities, today);
    let daily_b = DailySummary::compute(&activities, today);
    assert_eq!(daily_a, daily_b);

    let weekly_a = WeeklySummary::compute(&activities, &history, today);
    let weekly_b = WeeklySummary::compute(&activities, &history, today);
    assert_eq!(weekly_a, weekly_b);

    let map_a = heatmap(&activities, &history, today);
    let map_b = heatmap(&activities, &history, today);
    assert_eq!(map_a, map_b);
}

#[test]
fn zero_history_comparison_is_zero_not_infinite() {
    let today = date(2025, 6, 10);
    let activities = classified_week(today);

    let summary = WeeklySummary::compute(&activities, &[], today);

    assert!(summary.total_emission_kg > 0.0);
    assert_eq!(summary.comparison_to_prev_week, 0.0);
    assert!(summary.comparison_to_prev_week.is_finite());
}
