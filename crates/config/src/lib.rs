mod settings;

pub use settings::{DEFAULT_MAX_DEPTH, Settings};
