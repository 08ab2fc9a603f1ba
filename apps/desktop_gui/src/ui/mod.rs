//! UI layer for the desktop shell: app state, navigation and page bodies.

pub mod app;
pub mod pages;

pub use app::LawDeskApp;
