mod errors;
mod registry;
mod stats;

pub use errors::RegistryError;
pub use registry::BatchRegistry;
pub use stats::BatchStatistics;
