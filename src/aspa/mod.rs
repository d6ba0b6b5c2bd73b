pub mod loader;
pub mod registry;
pub mod store;

pub use registry::AspaRegistry;
pub use store::{AspaStore, AspaStoreBuilder, Authorization};
