use std::fmt;

use crate::backend::Backend;
use crate::params::Parameters;

/// Registry name of the `wl_output` global an output context belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputId(pub u32);

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output-{}", self.0)
    }
}

pub struct OutputContext<B: Backend> {
    pub id: OutputId,
    output: B::Output,
    layout: Option<B::Layout>,
    options: Option<B::Options>,
    pub params: Parameters,
}

impl<B: Backend> OutputContext<B> {
    pub fn new(id: OutputId, output: B::Output) -> Self {
        Self {
            id,
            output,
            layout: None,
            options: None,
            params: Parameters::default(),
        }
    }

    pub fn configured(&self) -> bool {
        self.layout.is_some()
    }

    pub fn layout(&self) -> Option<&B::Layout> {
        self.layout.as_ref()
    }

    pub fn configure(&mut self, backend: &mut B, namespace: &str) {
        if self.configured() {
            return;
        }

        self.layout = backend.get_layout(&self.output, self.id, namespace);
        if B::OPTIONS_MANAGER.is_some() {
            self.options = backend.get_options(&self.output, self.id);
        }
        if self.configured() {
            tracing::info!("Configured {} with namespace '{}'", self.id, namespace);
        }
    }

    pub fn destroy(self, backend: &mut B) {
        if let Some(layout) = self.layout {
            backend.destroy_layout(layout);
        }
        if let Some(options) = self.options {
            backend.destroy_options(options);
        }
        backend.release_output(self.output);
        tracing::debug!("Destroyed {}", self.id);
    }
}
