use crate::models::{AnalyticsResponse, DailyRecord};
use serde_json::Number;

const WATER_GOAL_GLASSES: i64 = 8;
const CALORIE_BURN_GOAL: i64 = 500;
const MEAL_GOAL: i64 = 3;
const SLEEP_GOAL_HOURS: f64 = 8.0;

/// Percentages and totals shown on the page, computed from one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub water: i64,
    pub activity: i64,
    pub nutrition: i64,
    pub habits: i64,
    pub sleep: i64,
    pub exercise_calories: Number,
    pub meal_calories: Number,
}

impl Progress {
    pub fn from_record(record: &DailyRecord) -> Self {
        Self {
            water: water_progress(record),
            activity: activity_progress(record),
            nutrition: nutrition_progress(record),
            habits: habit_completion(record),
            sleep: sleep_progress(record),
            exercise_calories: exercise_calories(record),
            meal_calories: meal_calories(record),
        }
    }
}

/// Not clamped: more than eight glasses reads above 100.
pub fn water_progress(record: &DailyRecord) -> i64 {
    saturate(i128::from(record.water_count) * 100 / i128::from(WATER_GOAL_GLASSES))
}

pub fn exercise_calories(record: &DailyRecord) -> Number {
    sum_numbers(record.exercises.iter().map(|exercise| &exercise.calories))
}

pub fn meal_calories(record: &DailyRecord) -> Number {
    sum_numbers(record.meals.iter().map(|meal| &meal.calories))
}

pub fn activity_progress(record: &DailyRecord) -> i64 {
    percent_of(&exercise_calories(record), CALORIE_BURN_GOAL).min(100)
}

pub fn nutrition_progress(record: &DailyRecord) -> i64 {
    saturate(record.meals.len() as i128 * 100 / i128::from(MEAL_GOAL)).min(100)
}

/// Adds JSON numbers. The total stays an integer while every term is one.
pub fn sum_numbers<'a>(values: impl Iterator<Item = &'a Number>) -> Number {
    let mut whole: i128 = 0;
    let mut fractional: Option<f64> = None;

    for value in values {
        match as_whole(value) {
            Some(n) => whole = whole.saturating_add(n),
            None => {
                let n = value.as_f64().unwrap_or(0.0);
                fractional = Some(fractional.unwrap_or(0.0) + n);
            }
        }
    }

    match fractional {
        None => i64::try_from(whole)
            .map(Number::from)
            .or_else(|_| u64::try_from(whole).map(Number::from))
            .unwrap_or_else(|_| float_number(whole as f64)),
        Some(fraction) => float_number(whole as f64 + fraction),
    }
}

/// `value / goal * 100`, truncated toward zero.
fn percent_of(value: &Number, goal: i64) -> i64 {
    match as_whole(value) {
        Some(n) => saturate(n * 100 / i128::from(goal)),
        None => (value.as_f64().unwrap_or(0.0) / goal as f64 * 100.0) as i64,
    }
}

fn as_whole(value: &Number) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

fn float_number(value: f64) -> Number {
    Number::from_f64(value).unwrap_or_else(|| Number::from(0))
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Share of completed habits, rounded half to even. Zero when nothing is tracked.
pub fn habit_completion(record: &DailyRecord) -> i64 {
    let total = record.habits.len();
    if total == 0 {
        return 0;
    }
    let completed = record.habits.values().filter(|done| **done).count();
    (completed as f64 / total as f64 * 100.0).round_ties_even() as i64
}

/// Hours slept, or `None` when nothing (or a zero-length entry) was logged.
pub fn sleep_hours(record: &DailyRecord) -> Option<f64> {
    record
        .sleep_data
        .as_ref()
        .map(|sleep| sleep.duration)
        .filter(|hours| *hours != 0.0)
}

pub fn sleep_progress(record: &DailyRecord) -> i64 {
    match sleep_hours(record) {
        Some(hours) => ((hours / SLEEP_GOAL_HOURS * 100.0) as i64).min(100),
        None => 0,
    }
}

pub fn build_analytics(record: &DailyRecord) -> AnalyticsResponse {
    AnalyticsResponse {
        weekly_water: record.water_count,
        weekly_exercise: u8::from(!record.exercises.is_empty()),
        habit_completion: habit_completion(record),
        total_calories: exercise_calories(record),
    }
}
