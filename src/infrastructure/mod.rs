pub mod duckdb_storage;
pub mod filesystem;
pub mod hooks;
pub mod logging;
pub mod plugins;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

pub use duckdb_storage::*;
pub use filesystem::*;
pub use hooks::*;
pub use logging::*;
pub use plugins::*;
pub use storage::*;
