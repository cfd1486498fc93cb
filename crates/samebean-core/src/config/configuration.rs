use std::sync::Arc;

use super::registry::{FnAdapter, TypeAdapter, TypeRegistry};
use super::skip::{SkipPredicate, SkipPredicates};
use crate::errors::{Result, SameBeanError};
use crate::model::Value;

/// Default cap on recorded divergences per comparison.
pub const DEFAULT_MAX_DIVERGENCES: usize = 16;

#[derive(Debug)]
struct Inner {
    registry: TypeRegistry,
    skips: SkipPredicates,
    max_divergences: usize,
}

/// Immutable comparison settings.
///
/// Cheap to clone and safe to share between threads; a comparison reads it
/// but never changes it.
#[derive(Debug, Clone)]
pub struct Configuration {
    inner: Arc<Inner>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: TypeRegistry::new(),
                skips: SkipPredicates::new(),
                max_divergences: DEFAULT_MAX_DIVERGENCES,
            }),
        }
    }
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.inner.registry
    }

    pub fn skips(&self) -> &SkipPredicates {
        &self.inner.skips
    }

    pub fn max_divergences(&self) -> usize {
        self.inner.max_divergences
    }

    /// Start a builder seeded with this configuration's entries.
    pub fn to_builder(&self) -> ConfigurationBuilder {
        ConfigurationBuilder {
            registry: self.inner.registry.clone(),
            skips: self.inner.skips.clone(),
            max_divergences: self.inner.max_divergences,
            error: None,
        }
    }

    /// Copy of this configuration with one more skip predicate.
    ///
    /// Cannot fail: the source configuration was already validated.
    pub(crate) fn with_skip(&self, predicate: SkipPredicate) -> Configuration {
        let mut skips = self.inner.skips.clone();
        skips.add_shared(predicate);
        Configuration {
            inner: Arc::new(Inner {
                registry: self.inner.registry.clone(),
                skips,
                max_divergences: self.inner.max_divergences,
            }),
        }
    }
}

/// Builder for [`Configuration`].
///
/// Registration errors are held until [`ConfigurationBuilder::build`] so the
/// builder can be chained.
#[derive(Debug)]
pub struct ConfigurationBuilder {
    registry: TypeRegistry,
    skips: SkipPredicates,
    max_divergences: usize,
    error: Option<SameBeanError>,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self {
            registry: TypeRegistry::new(),
            skips: SkipPredicates::new(),
            max_divergences: DEFAULT_MAX_DIVERGENCES,
            error: None,
        }
    }
}

impl ConfigurationBuilder {
    /// Register a type adapter.
    pub fn register_adapter(
        mut self,
        type_name: impl Into<String>,
        adapter: Arc<dyn TypeAdapter>,
    ) -> Self {
        if let Err(err) = self.registry.register(type_name, adapter) {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Register an encoder closure as a type adapter.
    pub fn register_fn<F>(self, type_name: impl Into<String>, encode: F) -> Self
    where
        F: Fn(&Value) -> serde_json::Value + Send + Sync + 'static,
    {
        self.register_adapter(type_name, Arc::new(FnAdapter::new(encode)))
    }

    /// Exempt nodes matching `predicate` from cycle tracking.
    ///
    /// See [`crate::config::skip`] for the contract this implies.
    pub fn skip_circular_reference_check<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.skips.add(predicate);
        self
    }

    /// Stop recording after this many divergences.
    pub fn max_divergences(mut self, max: usize) -> Self {
        self.max_divergences = max;
        self
    }

    /// Freeze the builder into a [`Configuration`].
    ///
    /// # Errors
    ///
    /// - `InvalidTypeName`: an adapter was registered under an empty name
    /// - `InvalidConfiguration`: `max_divergences` is zero
    pub fn build(self) -> Result<Configuration> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.max_divergences == 0 {
            return Err(SameBeanError::InvalidConfiguration {
                reason: "max_divergences must be at least 1".to_string(),
            });
        }
        Ok(Configuration {
            inner: Arc::new(Inner {
                registry: self.registry,
                skips: self.skips,
                max_divergences: self.max_divergences,
            }),
        })
    }
}
