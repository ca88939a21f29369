pub mod config;
pub mod error;
pub mod money;
pub mod types;

pub use config::NyumbaConfig;
pub use error::{NyumbaError, Result};
pub use money::{format_ksh, group_thousands};
pub use types::*;
