// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::collections::HashMap;
use std::sync::Arc;

use crate::builtin;
use crate::directive::Directive;

/// Creates a fresh, uninitialized directive
pub type DirectiveFactory = Arc<dyn Fn() -> Box<dyn Directive> + Send + Sync>;

/// Directive factories keyed by tag name
///
/// The registry is populated before any template is parsed and is only read
/// afterwards. Registering a tag a second time replaces the earlier factory.
#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    factories: HashMap<String, DirectiveFactory>,
}

impl DirectiveRegistry {
    /// Create an empty registry
    ///
    /// Text content still parses; any element fails as an unknown directive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the builtin directives loaded
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use sqlforge_directive::DirectiveRegistry;
    ///
    /// let registry = DirectiveRegistry::with_builtins();
    /// assert!(registry.contains("replace"));
    /// ```
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Register a factory under one or more tags
    pub fn register<F>(&mut self, factory: F, tags: &[&str])
    where
        F: Fn() -> Box<dyn Directive> + Send + Sync + 'static,
    {
        let factory: DirectiveFactory = Arc::new(factory);
        for tag in tags {
            self.factories.insert(tag.to_string(), Arc::clone(&factory));
        }
    }

    /// Create a directive for a tag, `None` if nothing is registered
    pub fn create(&self, tag: &str) -> Option<Box<dyn Directive>> {
        self.factories.get(tag).map(|factory| factory())
    }

    /// Check whether a tag is registered
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl std::fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::Literal;

    #[test]
    fn test_builtins() {
        let registry = DirectiveRegistry::with_builtins();
        assert_eq!(registry.tags(), vec!["arg", "replace", "wc"]);
        assert!(registry.create("replace").is_some());
        assert!(registry.create("bogus").is_none());
    }

    #[test]
    fn test_registries_are_isolated() {
        let mut a = DirectiveRegistry::new();
        let b = DirectiveRegistry::new();
        a.register(|| Box::new(Literal::default()), &["raw"]);
        assert!(a.contains("raw"));
        assert!(!b.contains("raw"));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = DirectiveRegistry::with_builtins();
        registry.register(|| Box::new(Literal::new("overridden")), &["replace", "raw"]);

        let directive = registry.create("replace").unwrap();
        assert_eq!(directive.generate().unwrap(), "overridden");
        assert!(registry.contains("raw"));
    }
}
