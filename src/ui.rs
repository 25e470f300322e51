use crate::models::{DailyRecord, Exercise, Meal};
use crate::stats::{sleep_hours, Progress};
use std::collections::BTreeMap;
use std::fmt::Write;

const WATER_GLASSES: i64 = 8;

pub fn render_index(record: &DailyRecord, progress: &Progress) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &record.last_updated.format("%A, %B %-d").to_string())
        .replace("{{WATER_COUNT}}", &record.water_count.to_string())
        .replace("{{WATER_PROGRESS}}", &progress.water.to_string())
        .replace("{{WATER_GLASSES}}", &water_glasses(record.water_count))
        .replace("{{ACTIVITY_PROGRESS}}", &progress.activity.to_string())
        .replace("{{EXERCISE_CALORIES}}", &progress.exercise_calories.to_string())
        .replace("{{NUTRITION_PROGRESS}}", &progress.nutrition.to_string())
        .replace("{{MEAL_COUNT}}", &record.meals.len().to_string())
        .replace("{{MEAL_CALORIES}}", &progress.meal_calories.to_string())
        .replace("{{HABIT_COMPLETION}}", &progress.habits.to_string())
        .replace("{{SLEEP_PROGRESS}}", &progress.sleep.to_string())
        .replace("{{SLEEP_SUMMARY}}", &escape_html(&sleep_summary(record)))
        .replace("{{HABIT_ITEMS}}", &habit_items(&record.habits))
        .replace("{{MEAL_ITEMS}}", &meal_items(&record.meals))
        .replace("{{EXERCISE_ITEMS}}", &exercise_items(&record.exercises))
        .replace("{{EXERCISED_TODAY}}", if record.exercises.is_empty() { "0" } else { "1" })
        .replace("{{RECORD_JSON}}", &record_json(record))
}

fn water_glasses(count: i64) -> String {
    let mut out = String::new();
    for index in 0..WATER_GLASSES {
        let filled = if index < count { " filled" } else { "" };
        let _ = write!(
            out,
            r#"<button type="button" class="glass{filled}" data-index="{index}">{}</button>"#,
            index + 1
        );
    }
    out
}

fn habit_items(habits: &BTreeMap<String, bool>) -> String {
    if habits.is_empty() {
        return "<p class=\"empty\">No habits tracked yet. Add one below.</p>".to_string();
    }

    let mut out = String::new();
    for (name, done) in habits {
        let (checked, mark) = if *done { (" checked", "&#10003;") } else { ("", "") };
        let _ = write!(
            out,
            r#"<div class="habit"><span>{label}</span><button type="button" class="check{checked}" data-habit="{name}">{mark}</button></div>"#,
            label = escape_html(&title_case(name)),
            name = escape_html(name),
        );
    }
    out
}

fn meal_items(meals: &[Meal]) -> String {
    if meals.is_empty() {
        return "<p class=\"empty\">No meals logged today. Start by adding your first meal!</p>"
            .to_string();
    }

    let mut out = String::new();
    for meal in meals {
        let _ = write!(
            out,
            r#"<div class="entry"><h4>{} ({})</h4><p><strong>Items:</strong> {}</p><p><strong>Calories:</strong> {}</p></div>"#,
            escape_html(&title_case(&meal.meal_type)),
            escape_html(&meal.timestamp),
            escape_html(&meal.items),
            meal.calories,
        );
    }
    out
}

fn exercise_items(exercises: &[Exercise]) -> String {
    if exercises.is_empty() {
        return "<p class=\"empty\">No exercises logged today. Time to get moving!</p>".to_string();
    }

    let mut out = String::new();
    for exercise in exercises {
        let _ = write!(
            out,
            r#"<div class="entry"><h4>{} ({})</h4><p><strong>Duration:</strong> {} minutes</p><p><strong>Calories Burned:</strong> {}</p></div>"#,
            escape_html(&exercise.name),
            escape_html(&exercise.timestamp),
            exercise.duration,
            exercise.calories,
        );
    }
    out
}

fn sleep_summary(record: &DailyRecord) -> String {
    match (sleep_hours(record), record.sleep_data.as_ref()) {
        (Some(hours), Some(sleep)) => match sleep.quality {
            Some(quality) => format!("{hours:.1}h (Quality: {quality}/10)"),
            None => format!("{hours:.1}h"),
        },
        _ => "No data".to_string(),
    }
}

/// `water_intake` -> `Water Intake`
fn title_case(name: &str) -> String {
    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Record as a JS literal, safe to place inside a `<script>` element.
fn record_json(record: &DailyRecord) -> String {
    serde_json::to_string(record)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Wellness</title>
  <style>
    :root {
      --bg-1: #667eea;
      --bg-2: #764ba2;
      --ink: #2d2a32;
      --accent: #4caf50;
      --water: #3b9ae1;
      --card: rgba(255, 255, 255, 0.94);
      --shadow: 0 18px 48px rgba(30, 20, 60, 0.2);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      padding: 28px 16px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      text-align: center;
      color: #fff;
    }

    header h1 {
      margin: 0 0 4px;
      font-size: clamp(2rem, 4vw, 3rem);
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      justify-content: center;
      gap: 8px;
    }

    .tabs button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      background: rgba(255, 255, 255, 0.2);
      color: #fff;
      font: inherit;
      cursor: pointer;
    }

    .tabs button.active {
      background: #fff;
      color: var(--bg-2);
    }

    .view {
      display: none;
    }

    .view.active {
      display: grid;
      gap: 20px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 20px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 22px;
    }

    .card h3 {
      margin-top: 0;
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: #e6e3ee;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      max-width: 100%;
      background: var(--accent);
      transition: width 300ms ease;
    }

    .glasses {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 10px;
      margin: 14px 0;
    }

    .glass {
      height: 56px;
      border: 2px solid var(--water);
      border-radius: 0 0 14px 14px;
      background: #fff;
      color: var(--water);
      font: inherit;
      cursor: pointer;
    }

    .glass.filled {
      background: var(--water);
      color: #fff;
    }

    .habit {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 10px 0;
      border-bottom: 1px solid #eee;
    }

    .check {
      width: 30px;
      height: 30px;
      border: 2px solid var(--accent);
      border-radius: 8px;
      background: #fff;
      color: #fff;
      cursor: pointer;
    }

    .check.checked {
      background: var(--accent);
    }

    .entry {
      border-left: 4px solid var(--accent);
      padding: 6px 12px;
      margin-bottom: 12px;
    }

    .entry h4,
    .entry p {
      margin: 4px 0;
    }

    label {
      display: block;
      margin: 10px 0 4px;
      font-weight: 600;
    }

    input,
    select {
      width: 100%;
      padding: 9px 10px;
      border: 1px solid #d4d0dc;
      border-radius: 10px;
      font: inherit;
    }

    .btn {
      margin-top: 14px;
      border: none;
      border-radius: 12px;
      padding: 11px 20px;
      background: var(--bg-2);
      color: #fff;
      font: inherit;
      cursor: pointer;
    }

    .stat {
      text-align: center;
    }

    .stat strong {
      display: block;
      font-size: 2.4rem;
      color: var(--bg-2);
    }

    .empty {
      color: #777;
    }

    .toast {
      position: fixed;
      right: 20px;
      bottom: 20px;
      padding: 14px 20px;
      border-radius: 12px;
      background: var(--accent);
      color: #fff;
      opacity: 0;
      transform: translateY(20px);
      transition: all 250ms ease;
      pointer-events: none;
    }

    .toast.error {
      background: #e53935;
    }

    .toast.show {
      opacity: 1;
      transform: translateY(0);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Daily Wellness</h1>
      <p>{{DATE}}</p>
    </header>

    <nav class="tabs">
      <button type="button" class="active" data-tab="dashboard">Dashboard</button>
      <button type="button" data-tab="habits">Habits</button>
      <button type="button" data-tab="nutrition">Nutrition</button>
      <button type="button" data-tab="exercise">Exercise</button>
      <button type="button" data-tab="sleep">Sleep</button>
      <button type="button" data-tab="analytics">Analytics</button>
    </nav>

    <section id="dashboard" class="view active">
      <div class="grid">
        <div class="card">
          <h3>Water</h3>
          <p><span id="water-count">{{WATER_COUNT}}</span> / 8 glasses</p>
          <div class="glasses">{{WATER_GLASSES}}</div>
          <div class="bar"><span id="water-progress" style="width: {{WATER_PROGRESS}}%"></span></div>
        </div>
        <div class="card">
          <h3>Activity</h3>
          <p>{{EXERCISE_CALORIES}} calories burned</p>
          <div class="bar"><span style="width: {{ACTIVITY_PROGRESS}}%"></span></div>
        </div>
        <div class="card">
          <h3>Nutrition</h3>
          <p>{{MEAL_COUNT}} meals, {{MEAL_CALORIES}} calories</p>
          <div class="bar"><span style="width: {{NUTRITION_PROGRESS}}%"></span></div>
        </div>
        <div class="card">
          <h3>Sleep</h3>
          <p>{{SLEEP_SUMMARY}}</p>
          <div class="bar"><span style="width: {{SLEEP_PROGRESS}}%"></span></div>
        </div>
        <div class="card">
          <h3>Habits</h3>
          <p>{{HABIT_COMPLETION}}% complete</p>
          <div class="bar"><span style="width: {{HABIT_COMPLETION}}%"></span></div>
        </div>
      </div>
    </section>

    <section id="habits" class="view">
      <div class="card">
        <h3>Daily Habits</h3>
        <div id="habit-list">{{HABIT_ITEMS}}</div>
        <label for="new-habit">New habit</label>
        <input type="text" id="new-habit" placeholder="e.g. stretching" />
        <button type="button" class="btn" id="add-habit">Add Habit</button>
      </div>
    </section>

    <section id="nutrition" class="view">
      <div class="grid">
        <div class="card">
          <h3>Log a Meal</h3>
          <label for="meal-type">Meal</label>
          <select id="meal-type">
            <option value="breakfast">Breakfast</option>
            <option value="lunch">Lunch</option>
            <option value="dinner">Dinner</option>
            <option value="snack">Snack</option>
          </select>
          <label for="meal-items">Items</label>
          <input type="text" id="meal-items" placeholder="What did you eat?" />
          <label for="meal-calories">Calories</label>
          <input type="number" id="meal-calories" min="0" />
          <button type="button" class="btn" id="log-meal">Log Meal</button>
        </div>
        <div class="card">
          <h3>Today's Meals</h3>
          {{MEAL_ITEMS}}
        </div>
      </div>
    </section>

    <section id="exercise" class="view">
      <div class="grid">
        <div class="card">
          <h3>Log Exercise</h3>
          <label for="exercise-name">Exercise</label>
          <input type="text" id="exercise-name" placeholder="e.g. Running" />
          <label for="exercise-duration">Duration (minutes)</label>
          <input type="number" id="exercise-duration" min="0" />
          <label for="exercise-calories">Calories burned</label>
          <input type="number" id="exercise-calories" min="0" />
          <button type="button" class="btn" id="log-exercise">Log Exercise</button>
        </div>
        <div class="card">
          <h3>Today's Exercise</h3>
          {{EXERCISE_ITEMS}}
        </div>
      </div>
    </section>

    <section id="sleep" class="view">
      <div class="grid">
        <div class="card">
          <h3>Log Sleep</h3>
          <label for="bedtime">Bedtime</label>
          <input type="time" id="bedtime" />
          <label for="wake-time">Wake time</label>
          <input type="time" id="wake-time" />
          <label for="sleep-quality">Quality (1-10): <span id="quality-value">7</span></label>
          <input type="range" id="sleep-quality" min="1" max="10" value="7" />
          <button type="button" class="btn" id="log-sleep">Log Sleep</button>
        </div>
        <div class="card">
          <h3>Last Night</h3>
          <p id="last-sleep">{{SLEEP_SUMMARY}}</p>
          <div class="bar"><span style="width: {{SLEEP_PROGRESS}}%"></span></div>
        </div>
      </div>
    </section>

    <section id="analytics" class="view">
      <div class="grid">
        <div class="card stat"><strong>{{WATER_COUNT}}</strong>Daily water (glasses)</div>
        <div class="card stat"><strong>{{EXERCISED_TODAY}}</strong>Exercised today</div>
        <div class="card stat"><strong>{{HABIT_COMPLETION}}%</strong>Habit completion</div>
        <div class="card stat"><strong>{{EXERCISE_CALORIES}}</strong>Calories burned</div>
      </div>
    </section>
  </main>

  <div class="toast" id="toast"></div>

  <script>
    const record = {{RECORD_JSON}};
    const toast = document.getElementById('toast');

    const notify = (message, kind = 'ok') => {
      toast.textContent = message;
      toast.className = 'toast show' + (kind === 'error' ? ' error' : '');
      setTimeout(() => toast.classList.remove('show'), 3000);
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      const data = await res.json().catch(() => ({}));
      if (!res.ok || !data.success) {
        throw new Error(data.error || 'Request failed');
      }
      return data;
    };

    document.querySelectorAll('.tabs button').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('.tabs button').forEach((b) => b.classList.remove('active'));
        document.querySelectorAll('.view').forEach((v) => v.classList.remove('active'));
        button.classList.add('active');
        document.getElementById(button.dataset.tab).classList.add('active');
      });
    });

    const renderWater = () => {
      document.getElementById('water-count').textContent = record.water_count;
      document.getElementById('water-progress').style.width =
        Math.trunc(record.water_count / 8 * 100) + '%';
      document.querySelectorAll('.glass').forEach((glass, index) => {
        glass.classList.toggle('filled', index < record.water_count);
      });
    };

    document.querySelectorAll('.glass').forEach((glass) => {
      glass.addEventListener('click', () => {
        const index = Number(glass.dataset.index);
        record.water_count = index < record.water_count ? index : index + 1;
        renderWater();
        post('/api/water', { count: record.water_count })
          .then(() => {
            if (record.water_count >= 8) {
              notify('Daily water goal reached!');
            }
          })
          .catch((err) => notify(err.message, 'error'));
      });
    });

    document.querySelectorAll('.check').forEach((check) => {
      check.addEventListener('click', () => {
        const name = check.dataset.habit;
        record.habits[name] = !record.habits[name];
        check.classList.toggle('checked', record.habits[name]);
        check.innerHTML = record.habits[name] ? '&#10003;' : '';
        post('/api/habits', { [name]: record.habits[name] })
          .then(() => location.reload())
          .catch((err) => notify(err.message, 'error'));
      });
    });

    document.getElementById('add-habit').addEventListener('click', () => {
      const input = document.getElementById('new-habit');
      const name = input.value.trim().toLowerCase().replace(/\s+/g, '_');
      if (!name) {
        return;
      }
      if (name in record.habits) {
        notify('Habit already exists!', 'error');
        return;
      }
      post('/api/habits', { [name]: false })
        .then(() => location.reload())
        .catch((err) => notify(err.message, 'error'));
    });

    document.getElementById('log-meal').addEventListener('click', () => {
      const type = document.getElementById('meal-type').value;
      const items = document.getElementById('meal-items').value.trim();
      const calories = parseInt(document.getElementById('meal-calories').value, 10);
      if (!items || !calories) {
        notify('Please fill in all meal information', 'error');
        return;
      }
      post('/api/meals', { type, items, calories })
        .then(() => location.reload())
        .catch((err) => notify(err.message, 'error'));
    });

    document.getElementById('log-exercise').addEventListener('click', () => {
      const name = document.getElementById('exercise-name').value.trim();
      const duration = parseInt(document.getElementById('exercise-duration').value, 10);
      const calories = parseInt(document.getElementById('exercise-calories').value, 10);
      if (!name || !duration || !calories) {
        notify('Please fill in all exercise information', 'error');
        return;
      }
      post('/api/exercises', { name, duration, calories })
        .then(() => location.reload())
        .catch((err) => notify(err.message, 'error'));
    });

    const quality = document.getElementById('sleep-quality');
    quality.addEventListener('input', () => {
      document.getElementById('quality-value').textContent = quality.value;
    });

    document.getElementById('log-sleep').addEventListener('click', () => {
      const bedtime = document.getElementById('bedtime').value;
      const wake_time = document.getElementById('wake-time').value;
      if (!bedtime || !wake_time) {
        notify('Please enter both bedtime and wake time', 'error');
        return;
      }
      post('/api/sleep', { bedtime, wake_time, quality: parseInt(quality.value, 10) })
        .then(() => location.reload())
        .catch((err) => notify(err.message, 'error'));
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sleep;
    use chrono::NaiveDate;

    fn record() -> DailyRecord {
        DailyRecord::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
    }

    #[test]
    fn title_case_splits_underscores() {
        assert_eq!(title_case("water_intake"), "Water Intake");
        assert_eq!(title_case("BREAKFAST"), "Breakfast");
    }

    #[test]
    fn glasses_fill_up_to_count() {
        let html = water_glasses(3);
        assert_eq!(html.matches("glass filled").count(), 3);
        assert_eq!(html.matches("<button").count(), 8);
    }

    #[test]
    fn page_fills_every_placeholder() {
        let mut record = record();
        record.water_count = 4;
        let html = render_index(&record, &Progress::from_record(&record));
        assert!(!html.contains("{{"));
        assert!(html.contains("No meals logged today"));
        assert!(html.contains("Healthy Eating"));
        assert!(html.contains("width: 50%"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut record = record();
        record.habits.insert("<b>x</b>".into(), false);
        record.meals.push(Meal {
            meal_type: "snack".into(),
            items: "</script><script>alert(1)</script>".into(),
            calories: serde_json::Number::from(10),
            timestamp: "10:00".into(),
        });
        let html = render_index(&record, &Progress::from_record(&record));
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn fractional_calories_are_shown_as_sent() {
        let mut record = record();
        record.meals.push(Meal {
            meal_type: "lunch".into(),
            items: "salad".into(),
            calories: serde_json::Number::from_f64(350.5).unwrap(),
            timestamp: "12:10".into(),
        });
        let html = render_index(&record, &Progress::from_record(&record));
        assert!(html.contains("<strong>Calories:</strong> 350.5"));
        assert!(html.contains("1 meals, 350.5 calories"));
    }

    #[test]
    fn sleep_summary_formats_duration() {
        let mut record = record();
        assert_eq!(sleep_summary(&record), "No data");
        record.sleep_data = Some(Sleep {
            bedtime: "23:00".into(),
            wake_time: "07:00".into(),
            quality: Some(8),
            duration: 8.0,
        });
        assert_eq!(sleep_summary(&record), "8.0h (Quality: 8/10)");
    }
}
