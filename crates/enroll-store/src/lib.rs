// ABOUTME: Persistence layer for enroll, owning the on-disk configuration file.
// ABOUTME: Provides load, atomic save and default initialisation of EnrollConfig.

pub mod file;

pub use file::{ConfigStore, StoreError};
