pub mod entry;
pub mod stock;
