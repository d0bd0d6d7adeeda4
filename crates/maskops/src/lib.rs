//! Standalone mask algebra for Overpaint.
//!
//! This crate operates on *encoded masks* - base64 PNG data URIs, the unit
//! exchanged with the job-submission side - rather than on a live editing
//! surface, so its operations can run outside any editing session (e.g.
//! combining two previously saved masks before resubmitting a job).
//!
//! - [`codec`] - conversions between RGBA images, PNG bytes, and data URIs
//! - [`ops`] - grayscale/invert/resize/combine/blur over encoded masks
//!
//! All operations in [`ops`] are asynchronous at the decode boundary and
//! fail with [`MaskOpError`] when a payload cannot be decoded as an image.

pub mod codec;
pub mod error;
pub mod ops;

pub use error::MaskOpError;
pub use ops::*;
