pub mod animator;
pub mod app;
pub mod backend;
pub mod calendar;
pub mod config;
pub mod donation;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod page;
pub mod signup;
pub mod state;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use app::router;
pub use backend::{Backend, HttpBackend};
pub use config::Config;
pub use page::{Document, Page};
pub use state::AppState;
