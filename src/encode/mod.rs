/// Lossless PNG output and default file naming.
pub mod png;
