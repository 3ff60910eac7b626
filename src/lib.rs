pub mod api;
pub mod config;
pub mod discovery;
pub mod humanize;
pub mod observability;
