#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use interntrack::commands::{self, AppState};
use interntrack::logging::init_logging;
use interntrack::{StoreConfig, Stores};
use tauri::Manager;
use tracing::info;

fn main() {
    init_logging();
    info!("InternTrack v{} starting", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let data_dir = commands::storage_root_dir(app.handle())?;
            let config = StoreConfig::load(data_dir);
            app.manage(AppState::new(Stores::open(&config)));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::app_version,
            commands::platform_name,
            commands::storage_info,
            commands::open_external,
            commands::applications_get,
            commands::applications_add,
            commands::applications_update,
            commands::applications_update_status,
            commands::applications_remove,
            commands::applications_stats,
            commands::opportunities_get,
            commands::opportunities_add,
            commands::opportunities_update,
            commands::opportunities_remove,
            commands::opportunities_filter
        ])
        .run(tauri::generate_context!())
        .expect("failed to run InternTrack");
}
