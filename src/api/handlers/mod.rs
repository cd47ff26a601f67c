pub mod appointment;
pub mod auth;
pub mod health;
pub mod service;
pub mod tenant;
