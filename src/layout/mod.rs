//! Disconnected layout resolution.
//!
//! # Data Flow
//! ```text
//! (path, language?)
//!     → filter.rs (static asset / system route fast path)
//!     → key.rs (language normalization, RouteKey derivation)
//!     → store.rs (load `<data_dir>/<key>.json`)
//!     → on miss: store.rs (load `<data_dir>/<language>.json`)
//!     → on total miss: synthetic "not found" LayoutDocument
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; a missing page is a document with `route: null`
//! - Keys are validated before they reach the filesystem
//! - The store is read-only at request time, so resolvers are shared without locks

pub mod filter;
pub mod key;
pub mod resolver;
pub mod store;
pub mod types;

pub use filter::StaticAssetFilter;
pub use key::{KeyError, Language, RouteKey};
pub use resolver::{LayoutResolver, Resolution, Resolved, ResolverSettings};
pub use store::{FileRouteStore, RouteDataStore, StoreError};
pub use types::{LayoutContext, LayoutDocument, SiteInfo, SitecoreData};
