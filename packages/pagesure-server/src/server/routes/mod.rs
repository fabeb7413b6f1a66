mod health;
mod pages;

pub use health::health_handler;
pub use pages::{page_handler, resolve_handler, ApiError, PageResponse, ResolveBody};
