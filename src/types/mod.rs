// ABOUTME: Validated domain types shared across the crate.
// ABOUTME: Service names and container image references.

mod image_ref;
mod service_name;

pub use image_ref::{ImageRef, ParseImageRefError};
pub use service_name::{ServiceName, ServiceNameError};
