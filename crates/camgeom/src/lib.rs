#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use camgeom_calib3d as calib3d;

#[doc(inline)]
pub use camgeom_filter as filter;

#[doc(inline)]
pub use camgeom_stereo as stereo;
