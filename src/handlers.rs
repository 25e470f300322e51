use crate::errors::AppError;
use crate::models::{
    AnalyticsResponse, ExerciseRequest, ExercisesResponse, HabitsResponse, MealRequest,
    MealsResponse, SleepRequest, SleepResponse, WaterRequest, WaterResponse,
};
use crate::session::Session;
use crate::state::AppState;
use crate::stats::{build_analytics, Progress};
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use axum_extra::extract::cookie::CookieJar;
use std::collections::BTreeMap;

pub async fn index(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let record = state.tracker.record(&session.key).await;
    let progress = Progress::from_record(&record);
    (session.remember(jar), Html(render_index(&record, &progress)))
}

pub async fn set_water(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<WaterRequest>,
) -> Json<WaterResponse> {
    let water_count = state.tracker.set_water(&session.key, payload.count).await;
    Json(WaterResponse {
        success: true,
        water_count,
    })
}

pub async fn set_habits(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BTreeMap<String, bool>>,
) -> Json<HabitsResponse> {
    let habits = state.tracker.merge_habits(&session.key, payload).await;
    Json(HabitsResponse {
        success: true,
        habits,
    })
}

pub async fn add_meal(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<MealRequest>,
) -> Json<MealsResponse> {
    let meals = state.tracker.add_meal(&session.key, payload).await;
    Json(MealsResponse {
        success: true,
        meals,
    })
}

pub async fn add_exercise(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ExerciseRequest>,
) -> Json<ExercisesResponse> {
    let exercises = state.tracker.add_exercise(&session.key, payload).await;
    Json(ExercisesResponse {
        success: true,
        exercises,
    })
}

pub async fn log_sleep(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SleepRequest>,
) -> Result<Json<SleepResponse>, AppError> {
    let sleep_data = state.tracker.log_sleep(&session.key, payload).await?;
    Ok(Json(SleepResponse {
        success: true,
        sleep_data,
    }))
}

pub async fn get_analytics(
    State(state): State<AppState>,
    session: Session,
) -> Json<AnalyticsResponse> {
    let record = state.tracker.record(&session.key).await;
    Json(build_analytics(&record))
}
