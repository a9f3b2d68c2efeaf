//! Dependency tracking between conditional fields.
//!
//! The graph maps each field name referenced by a condition to the fields
//! whose condition references it. When a referenced field changes, every one
//! of its dependents is re-evaluated from current binding state. Recomputing
//! the whole list is idempotent, so call order and repeated notifications do
//! not matter.
//!
//! Propagation is not transitive: a dependent whose enabled state flips does
//! not notify its own dependents. Only value changes drive recomputation.

use super::condition::evaluate;
use crate::binding::{BindingRegistry, FieldBinding};
use crate::schema::{App, Field, Item};
use std::collections::BTreeMap;

/// Referenced field name → indices (into `App::items`) of dependent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    dependents: BTreeMap<String, Vec<usize>>,
}

impl DependencyGraph {
    /// Collect dependencies from the app's conditions.
    ///
    /// Referenced names without a binding are dropped: nothing can ever
    /// notify them, and their dependents evaluate fail-open.
    pub fn build<B: FieldBinding>(app: &App, registry: &BindingRegistry<B>) -> Self {
        let mut dependents: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (index, item) in app.items.iter().enumerate() {
            let Item::Field(field) = item else {
                continue;
            };
            let Some(condition) = &field.condition else {
                continue;
            };
            dependents
                .entry(condition.field.clone())
                .or_default()
                .push(index);
        }

        dependents.retain(|name, _| registry.contains(name));

        tracing::debug!(watched = dependents.len(), "built dependency graph");
        Self { dependents }
    }

    /// Build the graph and apply the initial enabled state of every dependent.
    pub fn attach<B: FieldBinding>(app: &App, registry: &mut BindingRegistry<B>) -> Self {
        let graph = Self::build(app, registry);
        graph.refresh_all(app, registry);
        graph
    }

    /// Item indices of the fields depending on `name`.
    pub fn dependents_of(&self, name: &str) -> &[usize] {
        self.dependents.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Recompute every dependent of `name`.
    ///
    /// Returns the number of fields recomputed. Unknown names are a no-op.
    pub fn on_field_changed<B: FieldBinding>(
        &self,
        name: &str,
        app: &App,
        registry: &mut BindingRegistry<B>,
    ) -> usize {
        let indices = self.dependents_of(name);
        for &index in indices {
            if let Some(field) = app.items.get(index).and_then(Item::as_field) {
                apply_enabled(field, app, registry);
            }
        }
        if !indices.is_empty() {
            tracing::debug!(field = name, recomputed = indices.len(), "recomputed dependents");
        }
        indices.len()
    }

    /// Recompute every dependent of every watched field.
    pub fn refresh_all<B: FieldBinding>(&self, app: &App, registry: &mut BindingRegistry<B>) {
        for name in self.dependents.keys() {
            self.on_field_changed(name, app, registry);
        }
    }
}

/// Evaluate `field`'s condition and push the result into its binding,
/// including any auxiliary controls.
pub fn apply_enabled<B: FieldBinding>(field: &Field, app: &App, registry: &mut BindingRegistry<B>) {
    let enabled = evaluate(field, app, registry);
    let Some(binding) = registry.get_mut(&field.name) else {
        return;
    };
    binding.set_enabled(enabled);
    for aux in binding.auxiliaries() {
        aux.set_enabled(enabled);
    }
}
