//! A live form: one app, its bindings and the dependency graph between them.
//!
//! `Form` is the single entry point the presentation layer talks to. Value
//! edits go through [`Form::edit`] (or [`Form::set_value`]) so that
//! dependents are re-evaluated right after the binding changes.

use crate::binding::{BindingRegistry, BoundValue, FieldBinding, MemoryBinding};
use crate::error::{SubmitError, ValidationError};
use crate::rules::{self, DependencyGraph, QuoteStyle};
use crate::runner::{ProcessRunner, RunOutcome, RunRequest};
use crate::schema::{App, ExecMode};

pub struct Form<B = MemoryBinding> {
    app: App,
    registry: BindingRegistry<B>,
    graph: DependencyGraph,
}

impl Form<MemoryBinding> {
    /// Create a form with in-memory bindings seeded from field defaults.
    pub fn new(app: App) -> Self {
        let registry = BindingRegistry::for_app(&app);
        Self::with_registry(app, registry)
    }

    /// Replace a field's value and re-evaluate its dependents.
    ///
    /// Returns `false` when the field has no binding.
    pub fn set_value(&mut self, name: &str, value: BoundValue) -> bool {
        self.edit(name, |binding| binding.set(value))
    }
}

impl<B: FieldBinding> Form<B> {
    /// Create a form over externally constructed bindings.
    ///
    /// The dependency graph is built here and the initial enabled state of
    /// every conditional field is applied before this returns.
    pub fn with_registry(app: App, mut registry: BindingRegistry<B>) -> Self {
        let graph = DependencyGraph::attach(&app, &mut registry);
        Self {
            app,
            registry,
            graph,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn binding(&self, name: &str) -> Option<&B> {
        self.registry.get(name)
    }

    /// Mutate a binding, then notify the dependency graph.
    pub fn edit(&mut self, name: &str, f: impl FnOnce(&mut B)) -> bool {
        let Some(binding) = self.registry.get_mut(name) else {
            return false;
        };
        f(binding);
        self.on_field_changed(name);
        true
    }

    /// Change notification entry point for bindings mutated elsewhere.
    pub fn on_field_changed(&mut self, name: &str) -> usize {
        self.graph
            .on_field_changed(name, &self.app, &mut self.registry)
    }

    /// Whether the field is currently enabled. Unknown fields report `false`.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.registry.get(name).is_some_and(|b| b.is_enabled())
    }

    /// Current normalized value of a field.
    pub fn value(&self, name: &str) -> Option<String> {
        let field = self.app.field(name)?;
        let binding = self.registry.get(name)?;
        Some(rules::extract_value(field, binding))
    }

    pub fn build_args(&self) -> Vec<String> {
        rules::build_args(&self.app, &self.registry)
    }

    /// Preview of the command line using the platform's quoting.
    pub fn command_line(&self) -> String {
        rules::render_command_line(
            &self.app.command.path,
            &self.build_args(),
            QuoteStyle::native(),
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        rules::validate(&self.app, &self.registry)
    }

    /// Validate, build arguments and hand the request to `runner`.
    ///
    /// Nothing is started when validation fails. Visible commands skip
    /// validation and field arguments and are launched detached with their
    /// static arguments only.
    pub fn submit<R: ProcessRunner>(&self, runner: &mut R) -> Result<RunOutcome, SubmitError> {
        let command = &self.app.command;
        let request = match command.mode {
            ExecMode::Visible => RunRequest::from_command(command, command.args.clone()),
            ExecMode::Hidden => {
                if let Err(err) = self.validate() {
                    tracing::info!(error = %err, "submit rejected by validation");
                    return Err(err.into());
                }
                RunRequest::from_command(command, self.build_args())
            }
        };
        Ok(runner.run(&request)?)
    }
}
