use crate::clock::Clock;
use crate::models::{
    DailyRecord, Exercise, ExerciseRequest, Meal, MealRequest, Sleep, SleepRequest,
};
use crate::sleep::{parse_clock_time, sleep_duration_hours, SleepError};
use crate::storage::RecordStore;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Owns the load, day-reset, mutate and save cycle for every session's record.
#[derive(Clone)]
pub struct Tracker {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    write_lock: Arc<Mutex<()>>,
}

impl Tracker {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the session's record, creating it or clearing yesterday's data first.
    pub async fn record(&self, key: &str) -> DailyRecord {
        self.update(key, |record| record.clone()).await
    }

    pub async fn set_water(&self, key: &str, count: i64) -> i64 {
        self.update(key, |record| {
            record.water_count = count;
            record.water_count
        })
        .await
    }

    pub async fn merge_habits(
        &self,
        key: &str,
        habits: BTreeMap<String, bool>,
    ) -> BTreeMap<String, bool> {
        self.update(key, |record| {
            record.habits.extend(habits);
            record.habits.clone()
        })
        .await
    }

    /// Logs a meal, replacing any earlier meal of the same type today.
    pub async fn add_meal(&self, key: &str, input: MealRequest) -> Vec<Meal> {
        let meal = Meal {
            meal_type: input.meal_type,
            items: input.items,
            calories: input.calories,
            timestamp: self.clock.time_of_day(),
        };

        self.update(key, |record| {
            record.meals.retain(|existing| existing.meal_type != meal.meal_type);
            record.meals.push(meal);
            record.meals.clone()
        })
        .await
    }

    pub async fn add_exercise(&self, key: &str, input: ExerciseRequest) -> Vec<Exercise> {
        let exercise = Exercise {
            name: input.name,
            duration: input.duration,
            calories: input.calories,
            timestamp: self.clock.time_of_day(),
        };

        self.update(key, |record| {
            record.exercises.push(exercise);
            record.exercises.clone()
        })
        .await
    }

    /// Replaces the day's sleep entry. The record is left as-is when either
    /// time is missing or not a valid `HH:MM`.
    pub async fn log_sleep(&self, key: &str, input: SleepRequest) -> Result<Sleep, SleepError> {
        let bedtime = input.bedtime.ok_or(SleepError::Missing("bedtime"))?;
        let wake_time = input.wake_time.ok_or(SleepError::Missing("wake_time"))?;
        let duration = sleep_duration_hours(parse_clock_time(&bedtime)?, parse_clock_time(&wake_time)?);

        let sleep = Sleep {
            bedtime,
            wake_time,
            quality: input.quality,
            duration,
        };

        Ok(self
            .update(key, |record| {
                record.sleep_data = Some(sleep.clone());
                sleep
            })
            .await)
    }

    async fn update<T>(&self, key: &str, apply: impl FnOnce(&mut DailyRecord) -> T) -> T {
        let _guard = self.write_lock.lock().await;
        let today = self.clock.today();

        let mut record = match self.store.get(key).await {
            Some(record) => record,
            None => {
                debug!(session = key, %today, "creating daily record");
                DailyRecord::new(today)
            }
        };

        let previous = record.last_updated;
        if record.reset_if_stale(today) {
            info!(session = key, %previous, %today, "daily record reset");
        }

        let output = apply(&mut record);
        self.store.put(key, record).await;
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use crate::stats::{meal_calories, Progress};
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::Number;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn tracker() -> (Tracker, Arc<FixedClock>, Arc<MemoryStore>) {
        let clock = Arc::new(FixedClock::new(start()));
        let store = Arc::new(MemoryStore::new());
        let tracker = Tracker::new(store.clone(), clock.clone());
        (tracker, clock, store)
    }

    fn meal(kind: &str, items: &str, calories: i64) -> MealRequest {
        MealRequest {
            meal_type: kind.into(),
            items: items.into(),
            calories: Number::from(calories),
        }
    }

    fn exercise(name: &str) -> ExerciseRequest {
        ExerciseRequest {
            name: name.into(),
            duration: Number::from(20),
            calories: Number::from(150),
        }
    }

    fn sleep(bed: &str, wake: &str) -> SleepRequest {
        SleepRequest {
            bedtime: Some(bed.into()),
            wake_time: Some(wake.into()),
            quality: Some(8),
        }
    }

    #[tokio::test]
    async fn first_access_creates_record() {
        let (tracker, _, store) = tracker();
        let record = tracker.record("demo_user").await;
        assert_eq!(record.water_count, 0);
        assert_eq!(record.last_updated, start().date());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn water_count_is_stored_without_bounds() {
        let (tracker, _, _) = tracker();
        assert_eq!(tracker.set_water("a", 10).await, 10);
        assert_eq!(tracker.set_water("a", -2).await, -2);
        assert_eq!(tracker.record("a").await.water_count, -2);
        assert_eq!(tracker.record("b").await.water_count, 0);
    }

    #[tokio::test]
    async fn meal_of_same_type_replaces_previous() {
        let (tracker, _, _) = tracker();
        tracker.add_meal("a", meal("breakfast", "toast", 250)).await;
        tracker.add_meal("a", meal("lunch", "salad", 400)).await;
        let meals = tracker.add_meal("a", meal("breakfast", "oats", 300)).await;

        assert_eq!(meals.len(), 2);
        let breakfasts: Vec<_> = meals.iter().filter(|m| m.meal_type == "breakfast").collect();
        assert_eq!(breakfasts.len(), 1);
        assert_eq!(breakfasts[0].items, "oats");
        assert_eq!(breakfasts[0].timestamp, "09:15");
        assert_eq!(meals.last().map(|m| m.meal_type.as_str()), Some("breakfast"));
    }

    #[tokio::test]
    async fn fractional_calories_are_kept() {
        let (tracker, _, _) = tracker();
        let input = MealRequest {
            meal_type: "lunch".into(),
            items: "rice bowl".into(),
            calories: Number::from_f64(350.5).unwrap(),
        };
        let meals = tracker.add_meal("a", input).await;
        assert_eq!(meals[0].calories.as_f64(), Some(350.5));

        tracker.add_meal("a", meal("dinner", "soup", 200)).await;
        let record = tracker.record("a").await;
        assert_eq!(meal_calories(&record).as_f64(), Some(550.5));
        assert_eq!(Progress::from_record(&record).nutrition, 66);
    }

    #[tokio::test]
    async fn huge_water_count_still_renders_progress() {
        let (tracker, _, _) = tracker();
        tracker.set_water("a", i64::MAX / 10).await;
        let record = tracker.record("a").await;
        assert_eq!(Progress::from_record(&record).water, i64::MAX);
    }

    #[tokio::test]
    async fn exercises_are_never_deduplicated() {
        let (tracker, _, _) = tracker();
        for _ in 0..3 {
            tracker.add_exercise("a", exercise("run")).await;
        }
        assert_eq!(tracker.record("a").await.exercises.len(), 3);
    }

    #[tokio::test]
    async fn habits_merge_adds_and_overwrites() {
        let (tracker, _, _) = tracker();
        let habits = tracker
            .merge_habits(
                "a",
                BTreeMap::from([("reading".to_string(), true), ("yoga".to_string(), false)]),
            )
            .await;
        assert_eq!(habits.len(), 6);
        assert_eq!(habits.get("reading"), Some(&true));
        assert_eq!(habits.get("yoga"), Some(&false));
        assert_eq!(habits.get("meditation"), Some(&false));
    }

    #[tokio::test]
    async fn concurrent_disjoint_habit_merges_both_persist() {
        let (tracker, _, _) = tracker();
        let first = tracker.clone();
        let second = tracker.clone();
        let (_, _) = tokio::join!(
            tokio::spawn(async move {
                first
                    .merge_habits("a", BTreeMap::from([("swim".to_string(), true)]))
                    .await
            }),
            tokio::spawn(async move {
                second
                    .merge_habits("a", BTreeMap::from([("journal".to_string(), true)]))
                    .await
            }),
        );

        let habits = tracker.record("a").await.habits;
        assert_eq!(habits.get("swim"), Some(&true));
        assert_eq!(habits.get("journal"), Some(&true));
    }

    #[tokio::test]
    async fn sleep_overwrites_previous_entry() {
        let (tracker, _, _) = tracker();
        let first = tracker.log_sleep("a", sleep("23:00", "07:00")).await.unwrap();
        assert_eq!(first.duration, 8.0);

        let second = tracker.log_sleep("a", sleep("07:00", "08:00")).await.unwrap();
        assert_eq!(second.duration, 1.0);
        assert_eq!(tracker.record("a").await.sleep_data, Some(second));
    }

    #[tokio::test]
    async fn invalid_sleep_leaves_record_untouched() {
        let (tracker, _, _) = tracker();
        let logged = tracker.log_sleep("a", sleep("22:00", "06:30")).await.unwrap();

        let err = tracker.log_sleep("a", sleep("25:99", "07:00")).await.unwrap_err();
        assert!(matches!(err, SleepError::BadTime(_)));

        let missing = SleepRequest {
            bedtime: Some("22:00".into()),
            wake_time: None,
            quality: None,
        };
        assert_eq!(
            tracker.log_sleep("a", missing).await.unwrap_err(),
            SleepError::Missing("wake_time")
        );

        assert_eq!(tracker.record("a").await.sleep_data, Some(logged));
    }

    #[tokio::test]
    async fn new_day_resets_daily_fields() {
        let (tracker, clock, _) = tracker();
        tracker.set_water("a", 5).await;
        tracker
            .merge_habits("a", BTreeMap::from([("yoga".to_string(), true)]))
            .await;
        tracker.add_meal("a", meal("dinner", "pasta", 700)).await;
        tracker.add_exercise("a", exercise("bike")).await;
        tracker.log_sleep("a", sleep("23:30", "07:00")).await.unwrap();

        let same_day = tracker.record("a").await;
        assert_eq!(same_day.water_count, 5);
        assert_eq!(same_day.meals.len(), 1);

        clock.advance_days(1);
        let next_day = tracker.record("a").await;
        assert_eq!(next_day.water_count, 0);
        assert_eq!(next_day.habits.get("yoga"), Some(&false));
        assert!(next_day.habits.values().all(|done| !done));
        assert!(next_day.meals.is_empty());
        assert!(next_day.exercises.is_empty());
        assert!(next_day.sleep_data.is_none());
        assert_eq!(next_day.last_updated, clock.today());
    }
}
