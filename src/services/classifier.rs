// SPDX-License-Identifier: MIT

//! Keyword-based emission classifier.
//!
//! Maps a free-text activity description to a category and an estimated
//! CO2 emission using ordered, case-insensitive substring rules against a
//! static factor table. Deliberately simple and explainable: first match
//! wins, ambiguous text resolves by rule order, and anything unrecognized
//! degrades to the `other` fallback rather than failing. No I/O, no
//! randomness; the same input always yields the same output for a given
//! factor table.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::Category;

/// Matches `"15km"` or `"15 km"`; the captured number is the distance.
static DISTANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*km").expect("distance pattern"));

/// Matches `"4 hours"` or `"1hour"`; the captured number is the duration.
static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*hour").expect("hours pattern"));

/// Per-unit emission coefficients in kg CO2, loaded once at startup.
///
/// Transport factors are per km, food per meal, energy per hour, shopping
/// per item. The fallback distance and duration applied when the text
/// carries no explicit quantity live here too, so they can be tuned
/// without touching rule logic.
#[derive(Debug, Clone, Serialize)]
pub struct EmissionFactors {
    // transport, per km
    pub car_petrol: f64,
    pub car_diesel: f64,
    pub car_electric: f64,
    pub motorcycle: f64,
    pub bus: f64,
    pub train: f64,
    pub flight: f64,

    // food, per meal
    pub beef: f64,
    pub chicken: f64,
    pub vegetarian: f64,
    pub vegan: f64,
    pub fish: f64,
    pub food_default: f64,

    // energy, per hour
    pub electricity: f64,
    pub gas: f64,
    pub energy_default: f64,

    // shopping, per item
    pub clothing: f64,
    pub electronics: f64,
    pub shopping_default: f64,

    // flat fallbacks
    pub waste_default: f64,
    pub other_default: f64,

    /// Distance assumed when the text has no `<number> km`
    pub default_distance_km: f64,
    /// Duration assumed when the text has no `<number> hour`
    pub default_hours: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            car_petrol: 0.21,
            car_diesel: 0.27,
            car_electric: 0.05,
            motorcycle: 0.12,
            bus: 0.089,
            train: 0.041,
            flight: 0.255,
            beef: 27.0,
            chicken: 6.9,
            vegetarian: 2.0,
            vegan: 1.5,
            fish: 6.1,
            food_default: 4.0,
            electricity: 0.5,
            gas: 0.2,
            energy_default: 0.4,
            clothing: 10.0,
            electronics: 50.0,
            shopping_default: 5.0,
            waste_default: 0.5,
            other_default: 1.0,
            default_distance_km: 10.0,
            default_hours: 1.0,
        }
    }
}

/// Result of classifying one description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub emission_kg: f64,
}

/// Stateless classification service.
///
/// Held in shared app state and handed to callers explicitly; classification
/// is synchronous and total, so the HTTP layer can call it inline.
#[derive(Debug, Clone)]
pub struct Classifier {
    factors: EmissionFactors,
}

impl Classifier {
    pub fn new(factors: EmissionFactors) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// Classify a non-empty description.
    ///
    /// Callers reject empty/whitespace input before invoking; this function
    /// itself always returns a category and a non-negative estimate.
    pub fn classify(&self, description: &str) -> Classification {
        let f = &self.factors;
        let desc = description.to_lowercase();

        let distance = extract_number(&DISTANCE_RE, &desc).unwrap_or(f.default_distance_km);
        let hours = extract_number(&HOURS_RE, &desc).unwrap_or(f.default_hours);

        // Transport rules, highest priority.
        if contains_any(&desc, &["drove", "car", "drive"]) {
            let per_km = if desc.contains("electric") {
                f.car_electric
            } else if desc.contains("diesel") {
                f.car_diesel
            } else {
                f.car_petrol
            };
            return transport(distance * per_km);
        }
        if contains_any(&desc, &["motorcycle", "bike", "scooter"]) {
            // Cycling-specific wording is human-powered; "motorcycle" itself
            // contains "cycle", so it must not trip this branch.
            if desc.contains("cycle") && !desc.contains("motorcycle") {
                return transport(0.0);
            }
            return transport(distance * f.motorcycle);
        }
        if desc.contains("bus") {
            return transport(distance * f.bus);
        }
        if contains_any(&desc, &["train", "metro", "subway"]) {
            return transport(distance * f.train);
        }
        if contains_any(&desc, &["flight", "flew", "plane"]) {
            return transport(distance * f.flight);
        }
        if desc.contains("walk") {
            return transport(0.0);
        }

        // Food rules, flat per-meal estimates.
        if contains_any(&desc, &["beef", "steak", "burger"]) {
            return food(f.beef);
        }
        if desc.contains("chicken") {
            return food(f.chicken);
        }
        if contains_any(&desc, &["vegetarian", "veggie", "salad"]) {
            return food(f.vegetarian);
        }
        if desc.contains("vegan") {
            return food(f.vegan);
        }
        if contains_any(&desc, &["fish", "seafood"]) {
            return food(f.fish);
        }
        if contains_any(
            &desc,
            &["lunch", "dinner", "breakfast", "meal", "ate", "food", "pizza"],
        ) {
            return food(f.food_default);
        }

        // Energy: scaled by extracted duration.
        if contains_any(
            &desc,
            &["ac", "air condition", "heating", "electricity", "power"],
        ) {
            return Classification {
                category: Category::Energy,
                emission_kg: hours * f.electricity,
            };
        }

        // Shopping: flat per-item, sub-branched on what was bought.
        if contains_any(&desc, &["bought", "shopping", "purchased"]) {
            let emission_kg = if contains_any(&desc, &["cloth", "shirt", "pants", "dress"]) {
                f.clothing
            } else if contains_any(&desc, &["electronic", "phone", "laptop", "computer"]) {
                f.electronics
            } else {
                f.shopping_default
            };
            return Classification {
                category: Category::Shopping,
                emission_kg,
            };
        }

        // Fallback: always a value, never an error.
        Classification {
            category: Category::Other,
            emission_kg: f.other_default,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(EmissionFactors::default())
    }
}

fn contains_any(desc: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| desc.contains(k))
}

fn extract_number(pattern: &Regex, desc: &str) -> Option<f64> {
    pattern
        .captures(desc)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn transport(emission_kg: f64) -> Classification {
    Classification {
        category: Category::Transport,
        emission_kg,
    }
}

fn food(emission_kg: f64) -> Classification {
    Classification {
        category: Category::Food,
        emission_kg,
    }
}
