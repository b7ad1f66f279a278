pub mod app;
pub mod categories;
pub mod config;
pub mod controller;
pub mod dates;
pub mod errors;
pub mod gesture;
pub mod handlers;
pub mod models;
pub mod settings;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod views;

pub use app::router;
pub use config::AppConfig;
pub use controller::RitualController;
pub use state::AppState;
pub use storage::Storage;
