//! Behavior name resolution

use crate::behavior::Behavior;
use crate::behaviors::{Animation, SpriteRenderer, TextRenderer, Transform};
use std::collections::BTreeMap;

/// Namespace that qualifies the built-in behaviors, e.g. `ember::Transform`
pub const BUILTIN_NAMESPACE: &str = "ember";

/// Creates a behavior with its declared defaults
pub type BehaviorFactory = fn() -> Box<dyn Behavior>;

/// Maps behavior names used in scene text to constructors.
///
/// A name is resolved by trying, in order, the exact fully qualified name
/// (`ember::Transform`, `game::Player`), the built-in table, and finally the
/// table of behaviors registered under the user namespace.
#[derive(Clone)]
pub struct BehaviorRegistry {
    user_namespace: String,
    qualified: BTreeMap<String, BehaviorFactory>,
    builtin: BTreeMap<String, BehaviorFactory>,
    user: BTreeMap<String, BehaviorFactory>,
}

impl BehaviorRegistry {
    /// An empty registry; see [`BehaviorRegistry::with_builtins`]
    pub fn new(user_namespace: impl Into<String>) -> Self {
        Self {
            user_namespace: user_namespace.into(),
            qualified: BTreeMap::new(),
            builtin: BTreeMap::new(),
            user: BTreeMap::new(),
        }
    }

    /// A registry holding the engine's built-in behaviors
    pub fn with_builtins(user_namespace: impl Into<String>) -> Self {
        let mut registry = Self::new(user_namespace);
        registry.register_builtin("Transform", || Box::new(Transform::default()));
        registry.register_builtin("SpriteRenderer", || Box::new(SpriteRenderer::default()));
        registry.register_builtin("TextRenderer", || Box::new(TextRenderer::default()));
        registry.register_builtin("Animation", || Box::new(Animation::default()));
        registry
    }

    pub fn user_namespace(&self) -> &str {
        &self.user_namespace
    }

    fn register_builtin(&mut self, name: &str, factory: BehaviorFactory) {
        self.qualified
            .insert(format!("{}::{}", BUILTIN_NAMESPACE, name), factory);
        self.builtin.insert(name.to_string(), factory);
    }

    /// Register a host-defined behavior under the user namespace
    pub fn register(&mut self, name: impl Into<String>, factory: BehaviorFactory) {
        let name = name.into();
        self.qualified
            .insert(format!("{}::{}", self.user_namespace, name), factory);
        self.user.insert(name, factory);
    }

    pub fn resolve(&self, name: &str) -> Option<BehaviorFactory> {
        self.qualified
            .get(name)
            .or_else(|| self.builtin.get(name))
            .or_else(|| self.user.get(name))
            .copied()
    }

    /// Instantiate the behavior `name` resolves to, with default fields
    pub fn create(&self, name: &str) -> Option<Box<dyn Behavior>> {
        self.resolve(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Qualified names of every registered behavior, sorted
    pub fn qualified_names(&self) -> Vec<&str> {
        self.qualified.keys().map(String::as_str).collect()
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::with_builtins("game")
    }
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("user_namespace", &self.user_namespace)
            .field("behaviors", &self.qualified_names())
            .finish()
    }
}
