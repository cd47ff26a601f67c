pub mod factory;
pub mod namespace;
pub mod provisioning;
pub mod repositories;
