//! HTTP API handlers for cardiorisk-web

pub mod buildinfo;
pub mod health;
pub mod predict;
pub mod schema;
pub mod ui;

pub use health::health_routes;
pub use predict::predict_routes;
pub use schema::schema_routes;
pub use ui::ui_routes;
