pub mod regions;
pub mod settings;

pub use regions::{RegionConfig, get_default_regions};
