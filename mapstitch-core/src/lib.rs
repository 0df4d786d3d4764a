pub mod assemble;
pub mod batch;
pub mod convert;
pub mod error;
pub mod store;
pub mod tileset;

#[cfg(test)]
mod testutil;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
