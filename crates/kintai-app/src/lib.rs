//! HTTP application for the attendance reports: salvo routing, depot-injected
//! configuration and presence state, and the background roster refresh task.

pub mod app;
pub mod config;
pub mod error;
pub mod refresh;
pub mod state;
