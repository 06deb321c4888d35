// emsx/src/models/mod.rs
pub mod dataset;
pub mod employee;
pub mod project;
pub mod review;
pub mod role;
pub mod user;
pub mod work_log;
