pub mod fetch_properties;
pub mod registry;
pub mod traits;

pub use fetch_properties::FetchPropertiesTool;
pub use registry::ToolRegistry;
