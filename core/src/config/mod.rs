//! Configuration is split into:
//! - `types.rs` (data structures + defaults)
//! - `load.rs`  (IO: file discovery, env overrides, validation)

mod load;
mod types;

pub use load::{load, load_pipeline, parse_str, DEFAULT_CONFIG_FILE};
pub use types::*;
