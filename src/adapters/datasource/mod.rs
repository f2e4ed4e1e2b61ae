//! Built-in connection sources
//!
//! Both factories only describe their connection source; the engine opens
//! connections later, on demand.

pub mod pooled;
pub mod unpooled;

pub use pooled::{PoolSettings, PooledDataSource, PooledDataSourceFactory};
pub use unpooled::{product_name_from_url, UnpooledDataSource, UnpooledDataSourceFactory};
