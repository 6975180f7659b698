pub mod environment;
pub mod timestamps;

pub use environment::{DATA_PATH_ENV, get_default_store_path};
pub use timestamps::{format_instant, from_epoch_seconds};
