// emsx/src/configs/mod.rs
pub mod initializer;
