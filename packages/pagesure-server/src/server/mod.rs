pub mod app;
pub mod routes;

pub use app::{build_app, build_state, open_store, AppState, SharedResolver};
