//! Domain models

pub mod enums;
pub mod equipment;
pub mod log;
pub mod request;
pub mod team;
pub mod user;
