//! UI layer for the desktop shell.

pub mod app;

pub use app::WallApp;
