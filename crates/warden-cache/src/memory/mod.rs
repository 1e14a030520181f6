//! In-memory session store provider.

pub mod store;

pub use store::MemoryCacheProvider;
