//! Infrastructure layer - storage adapters, the user service and logging

pub mod logging;
pub mod storage;
pub mod user;
