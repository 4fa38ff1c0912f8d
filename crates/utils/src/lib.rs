pub mod datetime;
mod path;

pub use datetime::{format_timestamp, system_time_to_timestamp};
pub use path::is_hidden;
