//! Checker registry.
//!
//! Holds named checkers and named checker makers behind a single lock, so
//! registration and lookup can happen from any thread while validations
//! run. Parameterized checkers produced by a maker are cached under their
//! full segment text (`"min:3"`), so each distinct invocation is built once.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace, warn};

use crate::error::{CheckError, Failure};
use crate::value::Value;

/// A predicate over a value.
pub type Checker = Arc<dyn Fn(&Value<'_>) -> Result<(), CheckError> + Send + Sync>;

/// A factory that builds a [`Checker`] from an argument string.
pub type CheckerMaker = Arc<dyn Fn(&str) -> Result<Checker, CheckError> + Send + Sync>;

#[derive(Default)]
struct Tables {
    checkers: HashMap<String, Checker>,
    makers: HashMap<String, CheckerMaker>,
}

/// Thread-safe store of checkers and checker makers.
///
/// Registering under an existing name replaces the previous entry.
#[derive(Default)]
pub struct CheckerRegistry {
    tables: RwLock<Tables>,
}

impl CheckerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a checker under `name`.
    pub fn register_checker<F>(&self, name: impl Into<String>, checker: F)
    where
        F: Fn(&Value<'_>) -> Result<(), CheckError> + Send + Sync + 'static,
    {
        self.register_shared_checker(name, Arc::new(checker));
    }

    /// Register an already shared checker under `name`.
    pub fn register_shared_checker(&self, name: impl Into<String>, checker: Checker) {
        let name = name.into();
        trace!(checker = %name, "registering checker");
        self.write().checkers.insert(name, checker);
    }

    /// Register a checker maker under `name`.
    pub fn register_checker_maker<F>(&self, name: impl Into<String>, maker: F)
    where
        F: Fn(&str) -> Result<Checker, CheckError> + Send + Sync + 'static,
    {
        let name = name.into();
        trace!(maker = %name, "registering checker maker");
        self.write().makers.insert(name, Arc::new(maker));
    }

    /// Look up a checker by name.
    pub fn checker(&self, name: &str) -> Option<Checker> {
        self.read().checkers.get(name).cloned()
    }

    /// Look up a checker maker by name.
    pub fn checker_maker(&self, name: &str) -> Option<CheckerMaker> {
        self.read().makers.get(name).cloned()
    }

    pub fn contains_checker(&self, name: &str) -> bool {
        self.read().checkers.contains_key(name)
    }

    pub fn contains_checker_maker(&self, name: &str) -> bool {
        self.read().makers.contains_key(name)
    }

    /// Names of all registered checkers, sorted.
    pub fn checker_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().checkers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Names of all registered checker makers, sorted.
    pub fn checker_maker_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().makers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered checkers, including cached invocations.
    pub fn len(&self) -> usize {
        self.read().checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        let tables = self.read();
        tables.checkers.is_empty() && tables.makers.is_empty()
    }

    /// Build (or fetch from cache) the checker for a parameterized segment.
    ///
    /// `segment` is the full invocation text, used as the cache key and in
    /// error messages. The maker runs outside the lock.
    pub fn materialize(
        &self,
        segment: &str,
        maker_name: &str,
        argument: &str,
    ) -> Result<Checker, Failure> {
        if let Some(cached) = self.checker(segment) {
            trace!(segment, "using cached checker");
            return Ok(cached);
        }

        let maker = self
            .checker_maker(maker_name)
            .ok_or_else(|| Failure::UnknownChecker {
                segment: segment.to_string(),
            })?;

        let checker = maker(argument).map_err(|cause| {
            warn!(segment, error = %cause, "checker maker rejected argument");
            Failure::MakerRejected {
                segment: segment.to_string(),
                cause,
            }
        })?;

        debug!(segment, maker = maker_name, "caching parameterized checker");
        self.register_shared_checker(segment, Arc::clone(&checker));
        Ok(checker)
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("checkers", &self.checker_names())
            .field("makers", &self.checker_maker_names())
            .finish()
    }
}
