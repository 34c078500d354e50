pub mod entry_parser;

pub use entry_parser::{ParseError, parse_entry};
