pub mod config;
pub mod logging;

pub mod archive;
pub mod auth;
pub mod fetch;
pub mod manifest;
pub mod session;
