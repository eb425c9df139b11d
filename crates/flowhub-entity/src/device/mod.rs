//! Remote device entities.

pub mod model;

pub use model::{Device, DeviceGroup};
