pub mod date;
pub mod tags;

pub use date::{DateParseError, parse_day, parse_due, parse_due_filter};
pub use tags::{canonical_tag, parse_tags};
