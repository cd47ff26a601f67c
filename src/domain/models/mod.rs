pub mod appointment;
pub mod auth;
pub mod service;
pub mod tenant;
pub mod user;
