use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

pub const DEFAULT_HABITS: [&str; 5] = [
    "meditation",
    "exercise",
    "reading",
    "water_intake",
    "healthy_eating",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: String,
    pub items: String,
    pub calories: Number,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Minutes.
    pub duration: Number,
    pub calories: Number,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sleep {
    pub bedtime: String,
    pub wake_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<i64>,
    /// Hours, one decimal.
    pub duration: f64,
}

/// One session's tracked data for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub water_count: i64,
    pub habits: BTreeMap<String, bool>,
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
    pub sleep_data: Option<Sleep>,
    pub last_updated: NaiveDate,
}

impl DailyRecord {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            water_count: 0,
            habits: DEFAULT_HABITS
                .iter()
                .map(|name| (name.to_string(), false))
                .collect(),
            meals: Vec::new(),
            exercises: Vec::new(),
            sleep_data: None,
            last_updated: today,
        }
    }

    /// Clears the daily fields when `today` differs from the stored date.
    /// Habit names survive the reset; only their completion flags are cleared.
    pub fn reset_if_stale(&mut self, today: NaiveDate) -> bool {
        if self.last_updated == today {
            return false;
        }

        self.water_count = 0;
        self.habits.values_mut().for_each(|done| *done = false);
        self.meals.clear();
        self.exercises.clear();
        self.sleep_data = None;
        self.last_updated = today;
        true
    }
}

fn zero() -> Number {
    Number::from(0)
}

#[derive(Debug, Deserialize)]
pub struct WaterRequest {
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct MealRequest {
    #[serde(rename = "type", default)]
    pub meal_type: String,
    #[serde(default)]
    pub items: String,
    #[serde(default = "zero")]
    pub calories: Number,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default = "zero")]
    pub duration: Number,
    #[serde(default = "zero")]
    pub calories: Number,
}

#[derive(Debug, Deserialize)]
pub struct SleepRequest {
    pub bedtime: Option<String>,
    pub wake_time: Option<String>,
    pub quality: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WaterResponse {
    pub success: bool,
    pub water_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitsResponse {
    pub success: bool,
    pub habits: BTreeMap<String, bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MealsResponse {
    pub success: bool,
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExercisesResponse {
    pub success: bool,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SleepResponse {
    pub success: bool,
    pub sleep_data: Sleep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub weekly_water: i64,
    pub weekly_exercise: u8,
    pub habit_completion: i64,
    pub total_calories: Number,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn new_record_tracks_default_habits() {
        let record = DailyRecord::new(day(1));
        assert_eq!(record.habits.len(), 5);
        assert!(record.habits.values().all(|done| !done));
        assert!(record.habits.contains_key("water_intake"));
        assert_eq!(record.last_updated, day(1));
    }

    #[test]
    fn reset_keeps_habit_names() {
        let mut record = DailyRecord::new(day(1));
        record.water_count = 6;
        record.habits.insert("stretching".into(), true);
        record.habits.insert("reading".into(), true);

        assert!(record.reset_if_stale(day(2)));
        assert_eq!(record.water_count, 0);
        assert_eq!(record.habits.len(), 6);
        assert!(record.habits.values().all(|done| !done));
        assert_eq!(record.last_updated, day(2));
    }

    #[test]
    fn same_day_is_not_reset() {
        let mut record = DailyRecord::new(day(1));
        record.water_count = 3;
        assert!(!record.reset_if_stale(day(1)));
        assert_eq!(record.water_count, 3);
    }

    #[test]
    fn meal_serializes_type_field() {
        let meal = Meal {
            meal_type: "lunch".into(),
            items: "soup".into(),
            calories: Number::from(400),
            timestamp: "12:30".into(),
        };
        let value = serde_json::to_value(&meal).unwrap();
        assert_eq!(value["type"], "lunch");
        assert_eq!(value["calories"], 400);
    }

    #[test]
    fn requests_accept_fractional_numbers() {
        let meal: MealRequest =
            serde_json::from_str(r#"{"type":"lunch","items":"x","calories":350.5}"#).unwrap();
        assert_eq!(meal.calories.as_f64(), Some(350.5));

        let exercise: ExerciseRequest =
            serde_json::from_str(r#"{"name":"walk","duration":12.5}"#).unwrap();
        assert_eq!(exercise.duration.as_f64(), Some(12.5));
        assert_eq!(exercise.calories, Number::from(0));
    }
}
