/* src/cli/core/src/build/mod.rs */

pub mod batch;
pub mod concat;
pub mod context;
pub mod header;
pub mod locales;
pub mod pipeline;
pub mod relocate;
pub mod run;
pub mod staging;
pub mod transpile;
pub mod types;
pub mod verify;

#[cfg(test)]
pub mod testing;
