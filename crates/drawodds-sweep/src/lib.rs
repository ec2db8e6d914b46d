pub mod cache;
pub mod config;
pub mod logging;
pub mod plot;
pub mod runner;
pub mod surface;
pub mod verify;
