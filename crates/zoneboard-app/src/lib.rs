#![forbid(unsafe_code)]

//! The zoneboard application: model, message routing, view composition,
//! and CLI parsing.

pub mod app;
pub mod cli;
pub mod theme;
pub mod view;

pub use app::{AppModel, AppOptions, Msg};
