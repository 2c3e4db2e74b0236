//! Store registry and platform dispatch

use std::sync::Arc;

use tracing::debug;

use crate::apple::{AppStoreConfig, AppStoreLookup};
use crate::detect::detect_platform;
use crate::error::{ResolveError, Result};
use crate::google_play::{GooglePlayConfig, GooglePlayLookup};
use crate::http::{HttpSettings, HttpTransport, ReqwestTransport};
use crate::traits::{Resolver, StoreLookup};
use crate::types::{AppRecord, Platform, Resolution};

/// Registry of store lookups, one per platform.
///
/// Implements [`Resolver`] by classifying the token and dispatching to the
/// matching store. Unrecognized tokens fail without any network call.
pub struct StoreRegistry {
    stores: Vec<Arc<dyn StoreLookup>>,
}

impl StoreRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { stores: Vec::new() }
    }

    /// Registry with the App Store and Google Play lookups sharing one
    /// HTTP client
    pub fn standard(
        http: &HttpSettings,
        apple: AppStoreConfig,
        google_play: GooglePlayConfig,
    ) -> Result<Self> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(http)?);
        Self::with_transport(transport, apple, google_play)
    }

    /// Registry with both stores over a caller-supplied transport
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        apple: AppStoreConfig,
        google_play: GooglePlayConfig,
    ) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(AppStoreLookup::new(apple, transport.clone()));
        registry.register(GooglePlayLookup::new(google_play, transport)?);
        debug!(stores = ?registry.names(), "store registry ready");
        Ok(registry)
    }

    /// Register a store lookup, replacing any store for the same platform
    pub fn register<S: StoreLookup + 'static>(&mut self, store: S) {
        self.register_arc(Arc::new(store));
    }

    /// Register a pre-built store lookup
    pub fn register_arc(&mut self, store: Arc<dyn StoreLookup>) {
        let platform = store.platform();
        self.stores.retain(|s| s.platform() != platform);
        self.stores.push(store);
    }

    /// Get the store serving a platform
    pub fn get(&self, platform: Platform) -> Option<Arc<dyn StoreLookup>> {
        let result = self.stores.iter().find(|s| s.platform() == platform).cloned();
        debug!(platform = %platform, found = result.is_some(), "Looking up store");
        result
    }

    /// Get names of all registered stores
    pub fn names(&self) -> Vec<String> {
        self.stores.iter().map(|s| s.name().to_string()).collect()
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Resolver for StoreRegistry {
    async fn resolve(&self, token: &str) -> Resolution {
        let Some(platform) = detect_platform(token) else {
            return Resolution::failed(
                AppRecord::default(),
                ResolveError::UnrecognizedPlatform(token.to_string()),
            );
        };

        match self.get(platform) {
            Some(store) => store.lookup(token).await,
            None => Resolution::failed(
                AppRecord::default(),
                ResolveError::Configuration(format!("no store registered for {}", platform)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockStore {
        platform: Platform,
        calls: AtomicUsize,
    }

    impl MockStore {
        fn new(platform: Platform) -> Self {
            Self {
                platform,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl StoreLookup for MockStore {
        fn name(&self) -> &str {
            match self.platform {
                Platform::Ios => "mock-ios",
                Platform::Android => "mock-android",
            }
        }

        fn platform(&self) -> Platform {
            self.platform
        }

        fn canonical_url(&self, id: &str) -> String {
            format!("https://example.com/{}", id)
        }

        async fn lookup(&self, id: &str) -> Resolution {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Resolution::resolved(AppRecord {
                bundle: id.to_string(),
                name: self.name().to_string(),
                publisher: String::new(),
                url: self.canonical_url(id),
            })
        }
    }

    fn registry() -> (StoreRegistry, Arc<MockStore>, Arc<MockStore>) {
        let ios = Arc::new(MockStore::new(Platform::Ios));
        let android = Arc::new(MockStore::new(Platform::Android));
        let mut registry = StoreRegistry::new();
        registry.register_arc(ios.clone());
        registry.register_arc(android.clone());
        (registry, ios, android)
    }

    #[test]
    fn test_empty_registry() {
        let registry = StoreRegistry::new();
        assert!(registry.names().is_empty());
        assert!(registry.get(Platform::Ios).is_none());
    }

    #[test]
    fn test_register_replaces_same_platform() {
        let mut registry = StoreRegistry::new();
        registry.register(MockStore::new(Platform::Ios));
        registry.register(MockStore::new(Platform::Ios));
        assert_eq!(registry.names(), vec!["mock-ios".to_string()]);
    }

    #[tokio::test]
    async fn test_dispatch_by_platform() {
        let (registry, ios, android) = registry();

        let resolution = registry.resolve("123456789").await;
        assert_eq!(resolution.record.name, "mock-ios");

        let resolution = registry.resolve("com.example.app").await;
        assert_eq!(resolution.record.name, "mock-android");

        assert_eq!(ios.calls.load(Ordering::SeqCst), 1);
        assert_eq!(android.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_makes_no_lookup() {
        let (registry, ios, android) = registry();

        let resolution = registry.resolve("not an id!").await;
        assert!(matches!(
            resolution.error,
            Some(ResolveError::UnrecognizedPlatform(_))
        ));
        assert_eq!(resolution.record, AppRecord::default());
        assert_eq!(ios.calls.load(Ordering::SeqCst), 0);
        assert_eq!(android.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_with_transport_wires_both_stores() {
        use crate::http::testing::CannedTransport;

        let transport = Arc::new(CannedTransport::new().with(
            "https://itunes.apple.com/lookup?id=1",
            200,
            r#"{"resultCount":1,"results":[{"trackName":"One","sellerName":"Seller"}]}"#,
        ));
        let registry = StoreRegistry::with_transport(
            transport,
            AppStoreConfig::default(),
            GooglePlayConfig::default(),
        )
        .unwrap();

        assert_eq!(
            registry.names(),
            vec!["app-store".to_string(), "google-play".to_string()]
        );
        let resolution = registry.resolve("1").await;
        assert_eq!(resolution.record.name, "One");
        assert_eq!(resolution.record.url, "https://apps.apple.com/app/id1");
    }

    #[tokio::test]
    async fn test_missing_store() {
        let mut registry = StoreRegistry::new();
        registry.register(MockStore::new(Platform::Ios));
        let resolution = registry.resolve("com.example.app").await;
        assert!(matches!(resolution.error, Some(ResolveError::Configuration(_))));
    }
}
