//! Resolution traits

use crate::types::{Platform, Resolution};

/// Resolves a raw input token to app metadata.
///
/// This is the seam the line processor depends on, so tests can substitute a
/// deterministic implementation without network access.
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve a trimmed, non-empty token
    async fn resolve(&self, token: &str) -> Resolution;
}

/// Trait for a single store's lookup
///
/// Implementations receive identifiers already classified for their
/// platform and apply their own fallback paths.
#[async_trait::async_trait]
pub trait StoreLookup: Send + Sync {
    /// Get the store name
    fn name(&self) -> &str;

    /// Platform served by this store
    fn platform(&self) -> Platform;

    /// Canonical listing URL for an identifier
    fn canonical_url(&self, id: &str) -> String;

    /// Look up metadata for an identifier
    async fn lookup(&self, id: &str) -> Resolution;
}
