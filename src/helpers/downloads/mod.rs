// emsx/src/helpers/downloads/mod.rs
pub mod csv_download;
