// ABOUTME: Type-safe identifiers and validated value types.
// ABOUTME: Uses phantom types to prevent id confusion at compile time.

mod id;
mod image_name;
mod port_mapping;

pub use id::{ContainerId, Id, ImageId, VolumeName};
pub use image_name::{ImageName, ImageNameError};
pub use port_mapping::{PortMapping, PortMappingError};
