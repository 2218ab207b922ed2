//=========================================================================
// Dependency Registry
//=========================================================================
//
// Name-keyed registry mapping string tokens to constructible providers.
//
// Pattern: bind(token, factory) → resolve::<T>(token) → Option<T>
//
// Resolution is optional by contract: an unbound token yields `None`
// rather than an error. Later bindings under the same token silently
// overwrite earlier ones — documented, not defended against.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::collections::HashMap;

//=== External Crates =====================================================

use log::{debug, warn};

//=== ProviderDescriptor ==================================================

type ProviderFactory = Box<dyn Fn() -> Box<dyn Any>>;

/// One named provider binding supplied at module bootstrap.
pub struct ProviderDescriptor {
    name: String,
    factory: ProviderFactory,
}

impl ProviderDescriptor {
    /// Creates a provider binding `name` to the given constructor.
    pub fn new<T: Any>(name: impl Into<String>, constructor: impl Fn() -> T + 'static) -> Self {
        Self {
            name: name.into(),
            factory: Box::new(move || Box::new(constructor())),
        }
    }

    /// The token this provider binds.
    pub fn name(&self) -> &str {
        &self.name
    }
}

//=== DependencyRegistry ==================================================

/// Token → provider registry with optional resolution.
pub struct DependencyRegistry {
    bindings: HashMap<String, ProviderFactory>,
}

impl DependencyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    //--- Binding ----------------------------------------------------------

    /// Installs one provider. A duplicate token overwrites the previous
    /// binding.
    pub fn bind(&mut self, provider: ProviderDescriptor) {
        let ProviderDescriptor { name, factory } = provider;
        if self.bindings.insert(name.clone(), factory).is_some() {
            debug!(target: "registry", "provider '{}' rebound", name);
        }
    }

    /// Installs every provider from a module's declaration.
    pub fn populate(&mut self, providers: Vec<ProviderDescriptor>) {
        for provider in providers {
            self.bind(provider);
        }
    }

    //--- Resolution -------------------------------------------------------

    /// Constructs the provider bound to `token`.
    ///
    /// Returns `None` when the token is unbound, or when the bound
    /// provider constructs a different type than `T` (logged).
    pub fn resolve<T: Any>(&self, token: &str) -> Option<T> {
        let factory = self.bindings.get(token)?;
        match factory().downcast::<T>() {
            Ok(value) => Some(*value),
            Err(_) => {
                warn!(target: "registry", "provider '{}' resolved to a different type", token);
                None
            }
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns true when `token` has a binding.
    pub fn contains(&self, token: &str) -> bool {
        self.bindings.contains_key(token)
    }

    /// Returns the number of installed bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true when no bindings are installed.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for DependencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct ScoreKeeper {
        score: u32,
    }

    #[test]
    fn bound_provider_resolves_to_a_fresh_value() {
        let mut registry = DependencyRegistry::new();
        registry.bind(ProviderDescriptor::new("score", || ScoreKeeper { score: 0 }));

        let keeper = registry.resolve::<ScoreKeeper>("score");
        assert_eq!(keeper, Some(ScoreKeeper { score: 0 }));
    }

    #[test]
    fn unbound_token_resolves_to_none() {
        let registry = DependencyRegistry::new();
        assert_eq!(registry.resolve::<ScoreKeeper>("missing"), None);
    }

    #[test]
    fn type_mismatch_resolves_to_none() {
        let mut registry = DependencyRegistry::new();
        registry.bind(ProviderDescriptor::new("score", || ScoreKeeper { score: 0 }));

        assert_eq!(registry.resolve::<String>("score"), None);
    }

    #[test]
    fn duplicate_token_overwrites() {
        let mut registry = DependencyRegistry::new();
        registry.populate(vec![
            ProviderDescriptor::new("score", || ScoreKeeper { score: 1 }),
            ProviderDescriptor::new("score", || ScoreKeeper { score: 2 }),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve::<ScoreKeeper>("score"), Some(ScoreKeeper { score: 2 }));
    }
}
