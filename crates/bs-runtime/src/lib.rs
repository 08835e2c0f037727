pub mod actions;
pub mod catalog;
pub mod context;
pub mod definition;
pub mod dispatch;
pub mod engine;
pub mod event;
pub mod files;
pub mod host;
pub mod resolver;
mod rng;
pub mod scheduler;
pub mod scope;
pub mod services;
pub mod sounds;
pub mod task;

#[cfg(test)]
mod engine_tests;
#[cfg(test)]
mod test_support;

pub use catalog::ActionCatalog;
pub use context::{ActionContext, Continuation, ContinuationSetup, FlowRequest, TaskControl};
pub use definition::{
    ActionCategory, ActionDefinition, ActionDefinitionBuilder, ActionEffect, Parameter,
};
pub use dispatch::dispatch;
pub use engine::{EngineOptions, ScriptEngine, ScriptIssue, TaskReport, DEFAULT_RANDOM_SEED};
pub use event::TriggerEvent;
pub use files::ScriptFiles;
pub use host::{Diagnostic, HostServices, MessageTarget, NullHost, TitleDisplay};
pub use resolver::{resolve, resolve_parameters, ArgumentBinding};
pub use scheduler::{ScheduledCallback, Scheduler, TickScheduler};
pub use scope::VariableScope;
pub use services::EngineServices;
pub use sounds::SoundRegistry;
pub use task::{RunEnv, StopReason, Task, TaskId, TaskStatus};
