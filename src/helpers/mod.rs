// emsx/src/helpers/mod.rs
pub mod downloads;
