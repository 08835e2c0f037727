use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use bs_core::{CompiledScript, Program, ScriptError};
use tracing::info;

use crate::catalog::ActionCatalog;
use crate::event::TriggerEvent;
use crate::files::ScriptFiles;
use crate::host::{HostServices, NullHost};
use crate::scheduler::{Scheduler, TickScheduler};
use crate::scope::VariableScope;
use crate::services::EngineServices;
use crate::task::{RunEnv, StopReason, Task, TaskId, TaskStatus};

pub const DEFAULT_RANDOM_SEED: u32 = 1;

#[derive(Default)]
pub struct EngineOptions {
    pub catalog: Option<Arc<ActionCatalog>>,
    pub host: Option<Rc<dyn HostServices>>,
    pub scheduler: Option<Box<dyn Scheduler>>,
    pub files_dir: Option<PathBuf>,
    pub random_seed: Option<u32>,
    /// Instructions one synchronous run may dispatch. Unlimited when unset.
    pub step_limit: Option<usize>,
}

/// Outcome of a task that has stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub id: TaskId,
    pub script: String,
    pub event: String,
    pub reason: StopReason,
    pub variables: VariableScope,
}

/// One invalid line found by a static check.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptIssue {
    pub script: String,
    pub event: String,
    pub action: String,
    pub error: ScriptError,
}

pub struct ScriptEngine {
    catalog: Arc<ActionCatalog>,
    services: EngineServices,
    scheduler: Box<dyn Scheduler>,
    scripts: BTreeMap<String, Vec<Rc<Program>>>,
    tasks: BTreeMap<TaskId, Task>,
    wakeups: Rc<RefCell<VecDeque<TaskId>>>,
    finished: Vec<TaskReport>,
    next_task_id: u64,
    step_limit: Option<usize>,
}

impl ScriptEngine {
    pub fn new(options: EngineOptions) -> Self {
        let host = options.host.unwrap_or_else(|| Rc::new(NullHost));
        let services = EngineServices::new(
            host,
            ScriptFiles::new(options.files_dir),
            options.random_seed.unwrap_or(DEFAULT_RANDOM_SEED),
        );
        Self {
            catalog: options.catalog.unwrap_or_else(ActionCatalog::builtin),
            services,
            scheduler: options
                .scheduler
                .unwrap_or_else(|| Box::new(TickScheduler::new())),
            scripts: BTreeMap::new(),
            tasks: BTreeMap::new(),
            wakeups: Rc::new(RefCell::new(VecDeque::new())),
            finished: Vec::new(),
            next_task_id: 1,
            step_limit: options.step_limit.map(|limit| limit.max(1)),
        }
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn script_names(&self) -> Vec<String> {
        self.scripts.keys().cloned().collect()
    }

    /// Installs `script`, replacing and discarding any same-named one.
    pub fn load_script(&mut self, script: CompiledScript) -> Result<(), ScriptError> {
        for program in &script.handlers {
            for (line, instruction) in program.instructions.iter().enumerate() {
                if self.catalog.get(&instruction.action).is_none() {
                    return Err(ScriptError::at_line(
                        "ENGINE_UNKNOWN_ACTION",
                        format!(
                            "Script \"{}\" uses unknown action \"{}\".",
                            script.name, instruction.action
                        ),
                        line,
                    ));
                }
            }
        }

        if self.scripts.contains_key(&script.name) {
            self.discard_script_tasks(&script.name);
        }
        info!(script = %script.name, handlers = script.handlers.len(), "script loaded");
        let handlers = script.handlers.into_iter().map(Rc::new).collect();
        self.scripts.insert(script.name, handlers);
        Ok(())
    }

    pub fn unload_script(&mut self, name: &str) -> bool {
        if self.scripts.remove(name).is_none() {
            return false;
        }
        self.discard_script_tasks(name);
        true
    }

    /// Starts one task per handler bound to the event's name.
    pub fn fire_event(&mut self, event: &mut TriggerEvent) -> Vec<TaskId> {
        let programs = self
            .scripts
            .values()
            .flatten()
            .filter(|program| program.event == event.name)
            .cloned()
            .collect::<Vec<_>>();

        let mut started = Vec::with_capacity(programs.len());
        for program in programs {
            let id = TaskId(self.next_task_id);
            self.next_task_id += 1;
            info!(task = %id, script = %program.script, event = %program.event, "task started");
            started.push(id);
            self.run_task(Task::new(id, program), Some(&mut *event));
        }
        started
    }

    /// Advances the clock one tick and resumes every task woken by it.
    pub fn tick(&mut self) {
        self.scheduler.advance();
        loop {
            let next = self.wakeups.borrow_mut().pop_front();
            let Some(id) = next else {
                break;
            };
            if let Some(task) = self.tasks.remove(&id) {
                self.run_task(task, None);
            }
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.scheduler.current_tick()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn task_status(&self, id: TaskId) -> Option<TaskStatus> {
        if let Some(task) = self.tasks.get(&id) {
            return Some(task.status());
        }
        self.finished
            .iter()
            .find(|report| report.id == id)
            .map(|report| TaskStatus::Stopped(report.reason))
    }

    pub fn live_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn discard_task(&mut self, id: TaskId) -> bool {
        match self.tasks.remove(&id) {
            Some(task) => {
                self.finish(task, StopReason::Discarded);
                true
            }
            None => false,
        }
    }

    pub fn drain_finished(&mut self) -> Vec<TaskReport> {
        std::mem::take(&mut self.finished)
    }

    /// Lines of `script` whose arguments would fail to resolve.
    pub fn check_script(&self, script: &CompiledScript) -> Vec<ScriptIssue> {
        script
            .handlers
            .iter()
            .flat_map(|program| {
                self.catalog
                    .check_program(program)
                    .into_iter()
                    .map(move |error| ScriptIssue {
                        script: program.script.clone(),
                        event: program.event.clone(),
                        action: error
                            .line
                            .and_then(|line| program.instructions.get(line))
                            .map(|instruction| instruction.action.clone())
                            .unwrap_or_default(),
                        error,
                    })
            })
            .collect()
    }

    fn run_task(&mut self, mut task: Task, event: Option<&mut TriggerEvent>) {
        let now = self.scheduler.current_tick();
        let env = RunEnv {
            catalog: &self.catalog,
            services: &self.services,
            now,
            step_limit: self.step_limit,
        };
        match task.run(&env, event) {
            TaskStatus::Suspended { until_tick } => {
                let id = task.id();
                let wakeups = Rc::clone(&self.wakeups);
                self.scheduler.schedule_at(
                    until_tick.saturating_sub(now),
                    Box::new(move || wakeups.borrow_mut().push_back(id)),
                );
                self.tasks.insert(id, task);
            }
            TaskStatus::Stopped(reason) => self.finish(task, reason),
            TaskStatus::Running => {
                self.tasks.insert(task.id(), task);
            }
        }
    }

    fn finish(&mut self, mut task: Task, reason: StopReason) {
        task.stop(reason);
        info!(task = %task.id(), script = %task.script(), %reason, "task finished");
        self.finished.push(TaskReport {
            id: task.id(),
            script: task.script().to_string(),
            event: task.event().to_string(),
            reason,
            variables: task.into_scope(),
        });
    }

    fn discard_script_tasks(&mut self, script: &str) {
        let ids = self
            .tasks
            .iter()
            .filter(|(_, task)| task.script() == script)
            .map(|(id, _)| *id)
            .collect::<Vec<_>>();
        for id in ids {
            self.discard_task(id);
        }
    }
}
