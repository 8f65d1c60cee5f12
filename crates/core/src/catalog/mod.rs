mod error;
mod traits;

pub use error::{CatalogError, Result};
pub use traits::EventCatalog;
