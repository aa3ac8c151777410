// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Driver registry
//!
//! Maps driver names to [`Driver`] implementations. The built-in registry
//! knows the MySQL family; callers can register more before a run starts.

use std::collections::HashMap;
use std::sync::Arc;

use sqlforge_ir::Dialect;

use crate::error::{CatalogError, CatalogResult};
use crate::live_mysql::MySqlDriver;
use crate::r#trait::Driver;

/// Driver lookup by name
#[derive(Clone, Default)]
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn Driver>>,
}

impl DriverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in drivers
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for dialect in [Dialect::MySQL, Dialect::MariaDB, Dialect::TiDB] {
            registry.register(Arc::new(MySqlDriver::with_dialect(dialect)));
        }
        registry
    }

    /// Register a driver under its own name, replacing any previous one
    pub fn register(&mut self, driver: Arc<dyn Driver>) {
        self.drivers.insert(driver.name().to_string(), driver);
    }

    /// Look up a driver by name
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownDriver` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> CatalogResult<Arc<dyn Driver>> {
        self.drivers
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownDriver(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.names())
            .finish()
    }
}
