//! UI layer for the desktop GUI: the app shell and its two screens.

pub mod app;

pub use app::OrderDeskApp;
