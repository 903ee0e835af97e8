//! Forum board library.
//!
//! A small discussion board: posts with an optional attachment, listed newest
//! first, each with a like counter. The whole collection lives in one
//! persisted storage slot and is rewritten after every change.

pub mod board;
pub mod components;
pub mod config;
pub mod constants;
pub mod draft;
pub mod media;
pub mod store;
pub mod web;
