pub mod app;
pub mod cli;
pub mod config;
pub mod desk;
pub mod error;
pub mod render;
