//! Terminal front end for the `arbor` collapsible tree renderer.

pub mod app;
pub mod buffer;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod paths;
pub mod rect;
pub mod spinner;
pub mod terminal;
pub mod text;

pub use app::App;
pub use config::AppConfig;
pub use controller::{Controller, LoadState, Message, Status};
pub use error::{Error, Result};
