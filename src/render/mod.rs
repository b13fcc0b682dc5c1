/// Premultiplied source-over blending.
pub mod composite;
/// Cover resize and center crop.
pub mod fit;
/// Shape and text layers rasterized with `vello_cpu`.
pub mod layer;
