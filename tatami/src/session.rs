use std::collections::BTreeMap;

use thiserror::Error;

use crate::backend::{Backend, OUTPUT_INTERFACE};
use crate::command::Command;
use crate::engine::{self, LayoutDemand};
use crate::output::{OutputContext, OutputId};
use crate::params::{ParamKey, Parameters, WireValue};

pub const DEFAULT_NAMESPACE: &str = "tile";

#[derive(Debug, Clone)]
pub struct Config {
    /// Layout namespace announced to the compositor for every output.
    pub namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Wayland compositor does not support {0}")]
    MissingCapability(&'static str),
    #[error("namespace '{namespace}' already in use on {output}")]
    NamespaceInUse { output: OutputId, namespace: String },
    #[error("connection to the compositor lost before negotiation completed")]
    ConnectionLost,
    #[error("protocol error: {0}")]
    Protocol(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stop {
    Disconnected,
    Failed(SessionError),
}

/// Client-side state of one layout generator connection.
///
/// Owns every output context and the backend. Events are fed in from the
/// event loop one at a time; requests go out through the backend.
pub struct Session<B: Backend> {
    backend: B,
    config: Config,
    outputs: BTreeMap<OutputId, OutputContext<B>>,
    synced: bool,
    negotiated: bool,
    stop: Option<Stop>,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: B, config: Config) -> Self {
        Self {
            backend,
            config,
            outputs: BTreeMap::new(),
            synced: false,
            negotiated: false,
            stop: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_none()
    }

    /// Whether the initial globals were received and all capabilities found.
    pub fn negotiated(&self) -> bool {
        self.negotiated
    }

    pub fn output(&self, id: OutputId) -> Option<&OutputContext<B>> {
        self.outputs.get(&id)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &OutputContext<B>> {
        self.outputs.values()
    }

    fn fail(&mut self, err: SessionError) {
        if self.stop.is_none() {
            tracing::error!("{}", err);
            self.stop = Some(Stop::Failed(err));
        }
    }

    fn capabilities_bound(&self) -> bool {
        self.backend.has_layout_manager()
            && (B::OPTIONS_MANAGER.is_none() || self.backend.has_options_manager())
    }

    pub fn global(&mut self, name: u32, interface: &str, version: u32) {
        if interface == B::LAYOUT_MANAGER {
            if self.backend.has_layout_manager() {
                tracing::debug!("Ignoring additional {} global {}", interface, name);
                return;
            }
            self.backend.bind_layout_manager(name, version);
            tracing::info!("Bound {} v{}", interface, version);
        } else if B::OPTIONS_MANAGER == Some(interface) {
            if self.backend.has_options_manager() {
                tracing::debug!("Ignoring additional {} global {}", interface, name);
                return;
            }
            self.backend.bind_options_manager(name, version);
            tracing::info!("Bound {} v{}", interface, version);
        } else if interface == OUTPUT_INTERFACE {
            self.create_output(name, version);
        }
    }

    fn create_output(&mut self, name: u32, version: u32) {
        let id = OutputId(name);
        let output = self.backend.bind_output(name, version);
        let mut context = OutputContext::new(id, output);
        if self.capabilities_bound() {
            context.configure(&mut self.backend, &self.config.namespace);
        }
        tracing::info!("New output {}", id);

        if let Some(previous) = self.outputs.insert(id, context) {
            previous.destroy(&mut self.backend);
        }
    }

    pub fn global_remove(&mut self, name: u32) {
        if let Some(context) = self.outputs.remove(&OutputId(name)) {
            tracing::info!("Output {} removed", context.id);
            context.destroy(&mut self.backend);
        }
    }

    /// Called once the compositor has advertised its initial globals.
    pub fn sync_done(&mut self) {
        if self.synced {
            return;
        }
        self.synced = true;

        if !self.backend.has_layout_manager() {
            self.fail(SessionError::MissingCapability(B::LAYOUT_MANAGER));
            return;
        }
        if let Some(options_manager) = B::OPTIONS_MANAGER {
            if !self.backend.has_options_manager() {
                self.fail(SessionError::MissingCapability(options_manager));
                return;
            }
            // No-op on the compositor side if another client declared them first.
            for key in ParamKey::ALL {
                self.backend
                    .declare_option(key, Parameters::default_value(key));
            }
        }

        for context in self.outputs.values_mut() {
            if !context.configured() {
                context.configure(&mut self.backend, &self.config.namespace);
            }
        }

        self.negotiated = true;
        tracing::debug!("Negotiation complete, {} output(s)", self.outputs.len());
    }

    pub fn layout_demand(&mut self, id: OutputId, demand: LayoutDemand) {
        let Some(context) = self.outputs.get(&id) else {
            tracing::warn!("Layout demand for unknown {}", id);
            return;
        };
        let Some(layout) = context.layout() else {
            tracing::warn!("Layout demand for unconfigured {}", id);
            return;
        };

        let views = engine::tile(&demand, &context.params);
        tracing::debug!(
            "Layout demand on {}: {} view(s) in {}x{}, tags {:#x}, serial {}",
            id,
            demand.view_count,
            demand.width,
            demand.height,
            demand.tags,
            demand.serial
        );

        for view in &views {
            tracing::trace!("  {:?}", view);
            self.backend
                .push_view_dimensions(layout, demand.serial, view);
        }
        let status = engine::status(&context.params, demand.view_count);
        self.backend.commit(layout, demand.serial, &status);
    }

    pub fn namespace_in_use(&mut self, id: OutputId) {
        let namespace = self.config.namespace.clone();
        self.fail(SessionError::NamespaceInUse {
            output: id,
            namespace,
        });
    }

    /// A value pushed into one of the option handles of `id`.
    pub fn option_value(&mut self, id: OutputId, key: ParamKey, value: WireValue) {
        let Some(context) = self.outputs.get_mut(&id) else {
            return;
        };
        if !context.params.accept_option(key, &value) {
            tracing::trace!("Dropping {:?} for option {} on {}", value, key.option_name(), id);
            return;
        }

        tracing::debug!("{} on {} is now {:?}", key.option_name(), id, context.params.get(key));
        if let Some(layout) = context.layout() {
            self.backend.parameters_changed(layout);
        }
    }

    pub fn set_int_value(&mut self, id: OutputId, name: &str, value: i32) {
        self.update(id, name, |params| params.set_int(name, value));
    }

    pub fn mod_int_value(&mut self, id: OutputId, name: &str, delta: i32) {
        self.update(id, name, |params| params.mod_int(name, delta));
    }

    pub fn set_fixed_value(&mut self, id: OutputId, name: &str, value: f64) {
        self.update(id, name, |params| params.set_fixed(name, value));
    }

    pub fn mod_fixed_value(&mut self, id: OutputId, name: &str, delta: f64) {
        self.update(id, name, |params| params.mod_fixed(name, delta));
    }

    fn update(&mut self, id: OutputId, name: &str, apply: impl FnOnce(&mut Parameters) -> bool) {
        let Some(context) = self.outputs.get_mut(&id) else {
            return;
        };
        if apply(&mut context.params) {
            tracing::debug!("{} on {} updated: {:?}", name, id, context.params);
        } else {
            tracing::trace!("Ignoring value for '{}' on {}", name, id);
        }
    }

    pub fn user_command(&mut self, id: OutputId, command: &str) {
        let Some(context) = self.outputs.get_mut(&id) else {
            return;
        };
        match Command::parse(command) {
            Ok(cmd) => {
                cmd.apply(&mut context.params);
                tracing::debug!("Command '{}' on {}: {:?}", command.trim(), id, context.params);
            }
            Err(err) => tracing::warn!("Invalid command on {}: {}", id, err),
        }
    }

    /// The event pump ended because the connection closed.
    pub fn disconnected(&mut self) {
        if self.negotiated {
            if self.stop.is_none() {
                tracing::info!("Compositor closed the connection");
                self.stop = Some(Stop::Disconnected);
            }
        } else {
            self.fail(SessionError::ConnectionLost);
        }
    }

    pub fn protocol_error(&mut self, message: impl Into<String>) {
        self.fail(SessionError::Protocol(message.into()));
    }

    fn teardown(&mut self) {
        let outputs = std::mem::take(&mut self.outputs);
        for context in outputs.into_values() {
            context.destroy(&mut self.backend);
        }
        self.backend.destroy_managers();
    }

    fn outcome(&self) -> Result<(), SessionError> {
        match &self.stop {
            Some(Stop::Failed(err)) => Err(err.clone()),
            Some(Stop::Disconnected) => Ok(()),
            None if self.negotiated => Ok(()),
            None => Err(SessionError::ConnectionLost),
        }
    }

    /// Tears down every output and the managers, whatever state negotiation
    /// reached, and reports how the session ended.
    pub fn finish(mut self) -> Result<(), SessionError> {
        self.teardown();
        self.outcome()
    }
}
