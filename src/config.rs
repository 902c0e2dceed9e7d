//! Settings: the TOML/env schema and its loader.

mod load;
mod schema;

pub use load::config_dir;
pub use schema::*;

#[cfg(test)]
mod tests;
