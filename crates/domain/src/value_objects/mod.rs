//! Value objects for the Location entity.

mod image_url;
mod names;

pub use image_url::{ImageUrl, MAX_IMAGE_URL_LENGTH};
pub use names::{LocationCode, LocationName, MAX_CODE_LENGTH, MAX_NAME_LENGTH};
