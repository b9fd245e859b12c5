//! HTTP API handlers for aidet-server

pub mod detect;
pub mod health;
pub mod ui;

pub use detect::detect_routes;
pub use health::health_routes;
pub use ui::ui_routes;
