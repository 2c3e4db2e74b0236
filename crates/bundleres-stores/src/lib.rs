//! App store listing lookups for bundleres
//!
//! This crate turns store identifiers into listing metadata (name,
//! publisher, canonical URL).
//!
//! ## Supported Stores
//!
//! - **Apple**: numeric App Store IDs via the public iTunes lookup API, with
//!   storefront-country retries for region-locked listings
//! - **Google Play**: package names via the listing page, with a search-based
//!   recovery for mis-cased package names
//!
//! ## Usage
//!
//! ```ignore
//! use bundleres_stores::{Resolver, StoreRegistry};
//!
//! let registry = StoreRegistry::standard(&http, apple_config, play_config)?;
//! let resolution = registry.resolve("com.example.app").await;
//! ```

pub mod detect;
pub mod error;
pub mod http;
pub mod registry;
pub mod traits;
pub mod types;

pub mod apple;
pub mod google_play;

pub use detect::detect_platform;
pub use error::{ErrorKind, ResolveError};
pub use http::{HttpResponse, HttpSettings, HttpTransport, ReqwestTransport};
pub use registry::StoreRegistry;
pub use traits::{Resolver, StoreLookup};
pub use types::*;

pub use apple::{AppStoreConfig, AppStoreLookup};
pub use google_play::{GooglePlayConfig, GooglePlayLookup};
