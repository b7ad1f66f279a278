use crate::errors::AppError;
use crate::models::{
    DraftEditRequest, GestureInput, HistoryResponse, LogRequest, OrbitalConfig, RitualSnapshot,
    SettingsResponse, TodayResponse, ViewInput, WeeklyTable,
};
use crate::state::AppState;
use crate::stats::{build_history, build_today, build_weekly};
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let controller = state.controller.lock().await;
    let today = build_today(controller.logs());
    Html(render_index(&today.date, today.completed, today.total))
}

pub async fn get_ritual(State(state): State<AppState>) -> Json<RitualSnapshot> {
    let mut controller = state.controller.lock().await;
    Json(controller.snapshot())
}

pub async fn gesture(
    State(state): State<AppState>,
    Json(input): Json<GestureInput>,
) -> Result<Json<RitualSnapshot>, AppError> {
    let mut controller = state.controller.lock().await;
    let effects = controller.handle_gesture(input)?;
    state.apply(&controller, effects).await?;
    Ok(Json(controller.snapshot()))
}

pub async fn view(
    State(state): State<AppState>,
    Json(input): Json<ViewInput>,
) -> Result<Json<RitualSnapshot>, AppError> {
    let mut controller = state.controller.lock().await;
    controller.handle_view(input)?;
    Ok(Json(controller.snapshot()))
}

pub async fn log_activity(
    State(state): State<AppState>,
    Json(payload): Json<LogRequest>,
) -> Result<Json<RitualSnapshot>, AppError> {
    let mut controller = state.controller.lock().await;
    let effects = controller.log_orbital(payload.category.trim(), payload.orbital.trim())?;
    state.apply(&controller, effects).await?;
    Ok(Json(controller.snapshot()))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let controller = state.controller.lock().await;
    Json(build_today(controller.logs()))
}

pub async fn get_weekly(State(state): State<AppState>) -> Json<WeeklyTable> {
    let controller = state.controller.lock().await;
    Json(build_weekly(controller.logs()))
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let controller = state.controller.lock().await;
    Json(build_history(controller.logs()))
}

pub async fn get_orbitals(State(state): State<AppState>) -> Json<OrbitalConfig> {
    let controller = state.controller.lock().await;
    Json(controller.orbitals().clone())
}

pub async fn put_orbitals(
    State(state): State<AppState>,
    Json(config): Json<OrbitalConfig>,
) -> Result<Json<OrbitalConfig>, AppError> {
    let mut controller = state.controller.lock().await;
    let effects = controller.replace_orbital_config(config)?;
    state.apply(&controller, effects).await?;
    Ok(Json(controller.orbitals().clone()))
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let controller = state.controller.lock().await;
    Json(controller.settings_view())
}

pub async fn open_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let mut controller = state.controller.lock().await;
    controller.open_settings();
    Json(controller.settings_view())
}

pub async fn close_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let mut controller = state.controller.lock().await;
    controller.close_settings();
    Json(controller.settings_view())
}

pub async fn edit_draft(
    State(state): State<AppState>,
    Json(edit): Json<DraftEditRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let mut controller = state.controller.lock().await;
    controller.rename_draft(&edit.category, edit.index, &edit.name)?;
    Ok(Json(controller.settings_view()))
}

pub async fn save_settings(State(state): State<AppState>) -> Result<Json<SettingsResponse>, AppError> {
    let mut controller = state.controller.lock().await;
    let effects = controller.save_settings()?;
    state.apply(&controller, effects).await?;
    Ok(Json(controller.settings_view()))
}

pub async fn request_clear(State(state): State<AppState>) -> Result<Json<SettingsResponse>, AppError> {
    let mut controller = state.controller.lock().await;
    controller.request_clear()?;
    Ok(Json(controller.settings_view()))
}

pub async fn cancel_clear(State(state): State<AppState>) -> Json<SettingsResponse> {
    let mut controller = state.controller.lock().await;
    controller.cancel_clear();
    Json(controller.settings_view())
}

pub async fn confirm_clear(State(state): State<AppState>) -> Result<Json<SettingsResponse>, AppError> {
    let mut controller = state.controller.lock().await;
    let effects = controller.confirm_clear()?;
    state.apply(&controller, effects).await?;
    Ok(Json(controller.settings_view()))
}
