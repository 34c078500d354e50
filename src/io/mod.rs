pub mod config_io;
pub mod input;
pub mod selector;
pub mod store_io;
