//! Tauri commands consumed by the web frontend. Every mutating command
//! returns the collection snapshot the view should re-render.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tauri::{AppHandle, Manager, State};
use tauri_plugin_opener::OpenerExt;

use crate::applications::{DashboardSummary, MonthlyCount, StatusCounts, StatusSlice};
use crate::config::resolve_data_dir;
use crate::model::{
    Application, ApplicationStatus, ApplicationUpdate, CategoryFilter, NewApplication,
    NewOpportunity, Opportunity, OpportunityUpdate,
};
use crate::util::clamp_string;
use crate::Stores;

const MAX_ID_LEN: usize = 128;

pub struct AppState {
    stores: Mutex<Stores>,
}

impl AppState {
    pub fn new(stores: Stores) -> Self {
        Self {
            stores: Mutex::new(stores),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Stores>, String> {
        self.stores
            .lock()
            .map_err(|_| "Store lock poisoned.".to_string())
    }
}

#[derive(Serialize)]
pub struct StorageInfoResult {
    ok: bool,
    path_label: String,
}

#[derive(Deserialize)]
pub struct OpenExternalRequest {
    url: String,
}

#[derive(Deserialize)]
pub struct RecordIdRequest {
    id: String,
}

#[derive(Deserialize)]
pub struct ApplicationStatusRequest {
    id: String,
    status: ApplicationStatus,
}

#[derive(Deserialize)]
pub struct ApplicationUpdateRequest {
    id: String,
    fields: ApplicationUpdate,
}

#[derive(Deserialize)]
pub struct OpportunityUpdateRequest {
    id: String,
    fields: OpportunityUpdate,
}

#[derive(Deserialize)]
pub struct OpportunityFilterRequest {
    #[serde(default)]
    search: String,
    #[serde(default = "default_category_filter")]
    category: String,
}

fn default_category_filter() -> String {
    CategoryFilter::ALL_SENTINEL.to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    counts: StatusCounts,
    breakdown: Vec<StatusSlice>,
    monthly: Vec<MonthlyCount>,
    summary: DashboardSummary,
}

fn clean_id(id: &str) -> String {
    clamp_string(id, MAX_ID_LEN, true)
}

/// `<app data>/InternTrack` for this installation.
pub fn storage_root_dir(app: &AppHandle) -> Result<PathBuf, String> {
    let base = app.path().app_data_dir().map_err(|err| err.to_string())?;
    resolve_data_dir(base.as_path()).map_err(|err| err.to_string())
}

#[tauri::command]
pub fn app_version(app: AppHandle) -> String {
    app.package_info().version.to_string()
}

#[tauri::command]
pub fn platform_name() -> String {
    match std::env::consts::OS {
        "windows" => "win32",
        "macos" => "darwin",
        "android" => "android",
        _ => "linux",
    }
    .to_string()
}

#[tauri::command]
pub fn storage_info(state: State<'_, AppState>) -> Result<StorageInfoResult, String> {
    let stores = state.lock()?;
    Ok(StorageInfoResult {
        ok: true,
        path_label: stores.location(),
    })
}

#[tauri::command]
pub fn open_external(app: AppHandle, payload: OpenExternalRequest) -> Result<bool, String> {
    app.opener()
        .open_url(payload.url, Option::<String>::None)
        .map_err(|err: tauri_plugin_opener::Error| err.to_string())?;
    Ok(true)
}

#[tauri::command]
pub fn applications_get(state: State<'_, AppState>) -> Result<Vec<Application>, String> {
    let stores = state.lock()?;
    Ok(stores.applications.snapshot().to_vec())
}

#[tauri::command]
pub fn applications_add(
    state: State<'_, AppState>,
    payload: NewApplication,
) -> Result<Vec<Application>, String> {
    let mut stores = state.lock()?;
    let snapshot = stores
        .applications
        .add(payload)
        .map_err(|err| err.to_string())?;
    Ok(snapshot.to_vec())
}

#[tauri::command]
pub fn applications_update(
    state: State<'_, AppState>,
    payload: ApplicationUpdateRequest,
) -> Result<Vec<Application>, String> {
    let mut stores = state.lock()?;
    let id = clean_id(payload.id.as_str());
    let snapshot = stores
        .applications
        .update(id.as_str(), payload.fields)
        .map_err(|err| err.to_string())?;
    Ok(snapshot.to_vec())
}

#[tauri::command]
pub fn applications_update_status(
    state: State<'_, AppState>,
    payload: ApplicationStatusRequest,
) -> Result<Vec<Application>, String> {
    let mut stores = state.lock()?;
    let id = clean_id(payload.id.as_str());
    let snapshot = stores
        .applications
        .update_status(id.as_str(), payload.status)
        .map_err(|err| err.to_string())?;
    Ok(snapshot.to_vec())
}

#[tauri::command]
pub fn applications_remove(
    state: State<'_, AppState>,
    payload: RecordIdRequest,
) -> Result<Vec<Application>, String> {
    let mut stores = state.lock()?;
    let id = clean_id(payload.id.as_str());
    let snapshot = stores
        .applications
        .remove(id.as_str())
        .map_err(|err| err.to_string())?;
    Ok(snapshot.to_vec())
}

#[tauri::command]
pub fn applications_stats(state: State<'_, AppState>) -> Result<ApplicationStats, String> {
    let stores = state.lock()?;
    let service = &stores.applications;
    Ok(ApplicationStats {
        counts: service.status_counts(),
        breakdown: service.status_breakdown(),
        monthly: service.monthly_series(),
        summary: service.summary(),
    })
}

#[tauri::command]
pub fn opportunities_get(state: State<'_, AppState>) -> Result<Vec<Opportunity>, String> {
    let stores = state.lock()?;
    Ok(stores.opportunities.snapshot().to_vec())
}

#[tauri::command]
pub fn opportunities_add(
    state: State<'_, AppState>,
    payload: NewOpportunity,
) -> Result<Vec<Opportunity>, String> {
    let mut stores = state.lock()?;
    let snapshot = stores
        .opportunities
        .add(payload)
        .map_err(|err| err.to_string())?;
    Ok(snapshot.to_vec())
}

#[tauri::command]
pub fn opportunities_update(
    state: State<'_, AppState>,
    payload: OpportunityUpdateRequest,
) -> Result<Vec<Opportunity>, String> {
    let mut stores = state.lock()?;
    let id = clean_id(payload.id.as_str());
    let snapshot = stores
        .opportunities
        .update(id.as_str(), payload.fields)
        .map_err(|err| err.to_string())?;
    Ok(snapshot.to_vec())
}

#[tauri::command]
pub fn opportunities_remove(
    state: State<'_, AppState>,
    payload: RecordIdRequest,
) -> Result<Vec<Opportunity>, String> {
    let mut stores = state.lock()?;
    let id = clean_id(payload.id.as_str());
    let snapshot = stores
        .opportunities
        .remove(id.as_str())
        .map_err(|err| err.to_string())?;
    Ok(snapshot.to_vec())
}

#[tauri::command]
pub fn opportunities_filter(
    state: State<'_, AppState>,
    payload: OpportunityFilterRequest,
) -> Result<Vec<Opportunity>, String> {
    let filter: CategoryFilter = payload
        .category
        .parse()
        .map_err(|err: crate::StoreError| err.to_string())?;
    let stores = state.lock()?;
    Ok(stores
        .opportunities
        .filter(payload.search.as_str(), filter)
        .into_iter()
        .cloned()
        .collect())
}
