/// Font resolution and parley-backed shaping.
pub mod font;
/// Text width providers.
pub mod metrics;
/// Greedy word wrap.
pub mod wrap;
