/// `StyleConfig` and its JSON loading.
pub mod config;
