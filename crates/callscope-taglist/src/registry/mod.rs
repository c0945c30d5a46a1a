//! Language-keyed registry of tag scripts.
//!
//! The [`ScriptRegistry`] asks its [`ScriptLoader`] for a language's script
//! the first time that language is requested and remembers the answer,
//! including "no script". Entries are dropped with
//! [`ScriptRegistry::invalidate`] or [`ScriptRegistry::clear`] when scripts
//! change on disk.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::TaglistError;
use crate::script::{IniTagScript, TagScript};

/// Tracing target for script registry operations.
const REGISTRY_TARGET: &str = "callscope_taglist::registry";

/// Shared handle to a loaded script.
pub type SharedScript = Arc<dyn TagScript>;

/// Source of tag scripts, consulted once per language.
pub trait ScriptLoader: Send + Sync {
    /// Loads the script for `language`, or `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`TaglistError::ScriptLoad`] if a script exists but cannot be
    /// loaded.
    fn load(&self, language: &str) -> Result<Option<SharedScript>, TaglistError>;
}

/// Loader for the scripts compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinScripts;

impl ScriptLoader for BuiltinScripts {
    fn load(&self, language: &str) -> Result<Option<SharedScript>, TaglistError> {
        let script: Option<SharedScript> = match language {
            "ini" => Some(Arc::new(IniTagScript)),
            _ => None,
        };
        Ok(script)
    }
}

/// Lazily populated cache of tag scripts keyed by language.
pub struct ScriptRegistry {
    loader: Box<dyn ScriptLoader>,
    cache: Mutex<HashMap<String, Option<SharedScript>>>,
}

impl fmt::Debug for ScriptRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRegistry")
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::new(BuiltinScripts)
    }
}

impl ScriptRegistry {
    /// Creates an empty registry backed by `loader`.
    #[must_use]
    pub fn new(loader: impl ScriptLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the script for `language`, loading it on first request.
    ///
    /// Language names are compared case-insensitively. A failed load is not
    /// cached, so the next request retries.
    ///
    /// # Errors
    ///
    /// Returns [`TaglistError::LockPoisoned`] if the cache lock is poisoned,
    /// or the loader's error.
    pub fn get(&self, language: &str) -> Result<Option<SharedScript>, TaglistError> {
        let key = language.to_ascii_lowercase();
        let mut cache = self.lock()?;
        if let Some(cached) = cache.get(&key) {
            return Ok(cached.clone());
        }
        let loaded = self.loader.load(&key)?;
        debug!(
            target: REGISTRY_TARGET,
            language = %key,
            found = loaded.is_some(),
            "loaded tag script"
        );
        cache.insert(key, loaded.clone());
        Ok(loaded)
    }

    /// Forgets the cached answer for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`TaglistError::LockPoisoned`] if the cache lock is poisoned.
    pub fn invalidate(&self, language: &str) -> Result<(), TaglistError> {
        self.lock()?.remove(&language.to_ascii_lowercase());
        Ok(())
    }

    /// Forgets every cached answer.
    ///
    /// # Errors
    ///
    /// Returns [`TaglistError::LockPoisoned`] if the cache lock is poisoned.
    pub fn clear(&self) -> Result<(), TaglistError> {
        self.lock()?.clear();
        Ok(())
    }

    /// Returns the number of languages with a cached answer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().map_or(0, |cache| cache.len())
    }

    /// Returns `true` when nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Option<SharedScript>>>, TaglistError> {
        self.cache.lock().map_err(|_| TaglistError::LockPoisoned)
    }
}
