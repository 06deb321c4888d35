// emsx/src/utils/mod.rs
pub mod auth;
pub mod rbac;
pub mod role_config;
pub mod stats;
pub mod structs;
pub mod visibility;
