use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use bs_core::{ArgToken, BsValue, ScriptError};

use crate::event::TriggerEvent;
use crate::host::HostServices;
use crate::resolver::ArgumentBinding;
use crate::scope::VariableScope;
use crate::services::EngineServices;
use crate::task::TaskId;

pub type ContinuationSetup = Box<dyn FnOnce(&mut VariableScope)>;

/// One queued run of a block body.
#[derive(Default)]
pub struct Continuation {
    setup: Option<ContinuationSetup>,
}

impl Continuation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_setup<F>(setup: F) -> Self
    where
        F: FnOnce(&mut VariableScope) + 'static,
    {
        Self {
            setup: Some(Box::new(setup)),
        }
    }

    pub(crate) fn apply(self, scope: &mut VariableScope) {
        if let Some(setup) = self.setup {
            setup(scope);
        }
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("has_setup", &self.setup.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowRequest {
    #[default]
    Continue,
    Stop,
    Suspend {
        ticks: u64,
    },
}

/// Requests an effect leaves for the task once it returns.
#[derive(Debug, Default)]
pub struct TaskControl {
    pub continuations: VecDeque<Continuation>,
    pub flow: FlowRequest,
}

/// State handed to one action invocation.
pub struct ActionContext<'a> {
    binding: ArgumentBinding,
    scope: &'a mut VariableScope,
    event: Option<&'a mut TriggerEvent>,
    services: &'a EngineServices,
    script: &'a str,
    task: TaskId,
    control: TaskControl,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        scope: &'a mut VariableScope,
        event: Option<&'a mut TriggerEvent>,
        services: &'a EngineServices,
        script: &'a str,
        task: TaskId,
    ) -> Self {
        Self {
            binding: ArgumentBinding::default(),
            scope,
            event,
            services,
            script,
            task,
            control: TaskControl::default(),
        }
    }

    pub fn install_binding(&mut self, binding: ArgumentBinding) {
        self.binding = binding;
    }

    pub fn binding(&self) -> &ArgumentBinding {
        &self.binding
    }

    pub fn has(&self, parameter: &str) -> bool {
        self.binding.contains(parameter)
    }

    fn token(&self, parameter: &str) -> Result<&ArgToken, ScriptError> {
        self.binding.first(parameter).ok_or_else(|| {
            ScriptError::new(
                "ACTION_MISSING_ARGUMENT",
                format!("Argument \"{}\" is not bound.", parameter),
            )
        })
    }

    fn read_token(&self, token: &ArgToken) -> BsValue {
        match token {
            ArgToken::Variable(name) => self.scope.read(name),
            ArgToken::Event(key) => self
                .event
                .as_deref()
                .map(|event| event.value(key))
                .unwrap_or_default(),
            literal => literal.literal().unwrap_or_default(),
        }
    }

    /// Value of the first token bound to `parameter`.
    pub fn value(&self, parameter: &str) -> Result<BsValue, ScriptError> {
        Ok(self.read_token(self.token(parameter)?))
    }

    pub fn optional_value(&self, parameter: &str) -> Option<BsValue> {
        self.binding
            .first(parameter)
            .map(|token| self.read_token(token))
    }

    /// Values of every token bound to a plural parameter. Empty when unbound.
    pub fn values(&self, parameter: &str) -> Vec<BsValue> {
        self.binding
            .get(parameter)
            .unwrap_or_default()
            .iter()
            .map(|token| self.read_token(token))
            .collect()
    }

    pub fn number(&self, parameter: &str) -> Result<f64, ScriptError> {
        self.value(parameter)?.as_number()
    }

    pub fn text(&self, parameter: &str) -> Result<String, ScriptError> {
        Ok(self.value(parameter)?.as_text())
    }

    pub fn list(&self, parameter: &str) -> Result<Vec<BsValue>, ScriptError> {
        self.value(parameter)?.as_list()
    }

    pub fn dictionary(&self, parameter: &str) -> Result<BTreeMap<String, BsValue>, ScriptError> {
        self.value(parameter)?.as_dictionary()
    }

    /// Name of the variable bound to `parameter`.
    pub fn variable(&self, parameter: &str) -> Result<String, ScriptError> {
        match self.token(parameter)? {
            ArgToken::Variable(name) => Ok(name.clone()),
            _ => Err(ScriptError::new(
                "ACTION_NOT_VARIABLE",
                format!("Argument \"{}\" must be a variable.", parameter),
            )),
        }
    }

    pub fn assign(&mut self, parameter: &str, value: BsValue) -> Result<(), ScriptError> {
        let name = self.variable(parameter)?;
        self.scope.set(&name, value);
        Ok(())
    }

    pub fn scope(&self) -> &VariableScope {
        self.scope
    }

    pub fn scope_mut(&mut self) -> &mut VariableScope {
        self.scope
    }

    /// Queues one run of the following block body.
    pub fn schedule_inner(&mut self) {
        self.control.continuations.push_back(Continuation::new());
    }

    /// Queues one run of the following block body, preceded by `setup`.
    pub fn schedule_inner_with<F>(&mut self, setup: F)
    where
        F: FnOnce(&mut VariableScope) + 'static,
    {
        self.control
            .continuations
            .push_back(Continuation::with_setup(setup));
    }

    pub fn stop(&mut self) {
        self.control.flow = FlowRequest::Stop;
    }

    pub fn suspend(&mut self, ticks: u64) {
        if self.control.flow != FlowRequest::Stop {
            self.control.flow = FlowRequest::Suspend { ticks };
        }
    }

    pub fn event(&self) -> Option<&TriggerEvent> {
        self.event.as_deref()
    }

    pub fn event_mut(&mut self) -> Option<&mut TriggerEvent> {
        self.event.as_deref_mut()
    }

    pub fn host(&self) -> &dyn HostServices {
        self.services.host.as_ref()
    }

    pub fn services(&self) -> &EngineServices {
        self.services
    }

    pub fn script_name(&self) -> &str {
        self.script
    }

    pub fn task_id(&self) -> TaskId {
        self.task
    }

    pub fn into_control(self) -> TaskControl {
        self.control
    }
}
