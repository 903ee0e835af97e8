//! Maud-based page templates for the web UI.

pub mod board;

pub use board::{render_board_page, BoardPageParams};
