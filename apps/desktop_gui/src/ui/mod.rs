//! UI layer for the desktop game: app shell, board state and card faces.

pub mod app;
pub mod board;
pub mod faces;

pub use app::DesktopGuiApp;
