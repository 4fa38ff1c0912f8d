pub mod cli;

pub use folderstat_config as config;
pub use folderstat_core as engine;
pub use folderstat_models as models;
pub use folderstat_utils as utils;
