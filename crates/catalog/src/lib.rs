mod flatten;
mod host;
mod hosts;
mod types;

pub use flatten::flatten;
pub use host::{Host, TITLE_SEPARATOR};
pub use hosts::{HostId, Hosts};
pub use types::{Catalog, CatalogNode, Category, Leaf};
