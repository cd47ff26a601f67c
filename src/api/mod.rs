pub mod dtos;
pub mod extractors;
pub mod handlers;
pub mod policy;
pub mod router;
