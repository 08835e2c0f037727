use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use bs_core::{Program, ScriptError};
use tracing::info;

use crate::catalog::ActionCatalog;
use crate::context::{ActionContext, Continuation, FlowRequest};
use crate::dispatch::dispatch;
use crate::event::TriggerEvent;
use crate::host::Diagnostic;
use crate::scope::VariableScope;
use crate::services::EngineServices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Exhausted,
    Explicit,
    Discarded,
    StepLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exhausted => "exhausted",
            Self::Explicit => "stopped",
            Self::Discarded => "discarded",
            Self::StepLimit => "step-limit",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Suspended { until_tick: u64 },
    Stopped(StopReason),
}

/// An opened block whose body still has queued runs.
#[derive(Debug)]
struct BlockFrame {
    opener: usize,
    end: usize,
    pending: VecDeque<Continuation>,
}

/// Everything a task borrows from its engine for one synchronous run.
pub struct RunEnv<'a> {
    pub catalog: &'a ActionCatalog,
    pub services: &'a EngineServices,
    pub now: u64,
    pub step_limit: Option<usize>,
}

/// One live execution of a handler program.
#[derive(Debug)]
pub struct Task {
    id: TaskId,
    program: Rc<Program>,
    position: usize,
    blocks: Vec<BlockFrame>,
    scope: VariableScope,
    status: TaskStatus,
}

impl Task {
    pub fn new(id: TaskId, program: Rc<Program>) -> Self {
        Self {
            id,
            program,
            position: 0,
            blocks: Vec::new(),
            scope: VariableScope::new(),
            status: TaskStatus::Running,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn script(&self) -> &str {
        &self.program.script
    }

    pub fn event(&self) -> &str {
        &self.program.event
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn scope(&self) -> &VariableScope {
        &self.scope
    }

    pub fn into_scope(self) -> VariableScope {
        self.scope
    }

    pub(crate) fn stop(&mut self, reason: StopReason) {
        self.blocks.clear();
        self.status = TaskStatus::Stopped(reason);
    }

    /// Advances synchronously until the task suspends or stops.
    pub fn run(&mut self, env: &RunEnv<'_>, mut event: Option<&mut TriggerEvent>) -> TaskStatus {
        if let TaskStatus::Stopped(_) = self.status {
            return self.status;
        }
        self.status = TaskStatus::Running;
        let program = Rc::clone(&self.program);
        let mut steps = 0usize;

        loop {
            if self.leave_finished_block() {
                continue;
            }
            let Some(instruction) = program.instructions.get(self.position) else {
                self.stop(StopReason::Exhausted);
                break;
            };
            if let Some(limit) = env.step_limit.filter(|limit| steps >= *limit) {
                env.services.report(Diagnostic {
                    task: self.id,
                    script: program.script.clone(),
                    action: instruction.action.clone(),
                    line: self.position,
                    error: ScriptError::at_line(
                        "ENGINE_STEP_LIMIT",
                        format!(
                            "Task exceeded {} steps without waiting and was stopped.",
                            limit
                        ),
                        self.position,
                    ),
                });
                self.stop(StopReason::StepLimit);
                break;
            }
            steps += 1;

            let Some(definition) = env.catalog.get(&instruction.action) else {
                env.services.report(Diagnostic {
                    task: self.id,
                    script: program.script.clone(),
                    action: instruction.action.clone(),
                    line: self.position,
                    error: ScriptError::at_line(
                        "ENGINE_UNKNOWN_ACTION",
                        format!("Unknown action \"{}\".", instruction.action),
                        self.position,
                    ),
                });
                self.position += 1;
                continue;
            };

            let mut context = ActionContext::new(
                &mut self.scope,
                event.as_deref_mut(),
                env.services,
                &program.script,
                self.id,
            );
            let result = dispatch(definition, &instruction.arguments, self.position, &mut context);
            let control = context.into_control();

            if result.is_err() {
                self.position = instruction
                    .block_end
                    .map_or(self.position + 1, |end| end + 1);
                continue;
            }

            match control.flow {
                FlowRequest::Stop => {
                    self.stop(StopReason::Explicit);
                    break;
                }
                FlowRequest::Suspend { ticks } => {
                    self.position += 1;
                    self.status = TaskStatus::Suspended {
                        until_tick: env.now.saturating_add(ticks),
                    };
                    info!(task = %self.id, ticks, resume_at = self.position, "task suspended");
                    break;
                }
                FlowRequest::Continue => match instruction.block_end {
                    Some(end) => self.enter_block(end, control.continuations),
                    None => self.position += 1,
                },
            }
        }
        self.status
    }

    fn enter_block(&mut self, end: usize, mut pending: VecDeque<Continuation>) {
        let opener = self.position;
        match pending.pop_front() {
            Some(first) => {
                first.apply(&mut self.scope);
                self.blocks.push(BlockFrame {
                    opener,
                    end,
                    pending,
                });
                self.position = opener + 1;
            }
            None => self.position = end + 1,
        }
    }

    /// Handles reaching the closer of the innermost open block.
    fn leave_finished_block(&mut self) -> bool {
        let Some(frame) = self.blocks.last_mut() else {
            return false;
        };
        if self.position != frame.end {
            return false;
        }
        match frame.pending.pop_front() {
            Some(next) => {
                next.apply(&mut self.scope);
                self.position = frame.opener + 1;
            }
            None => {
                self.position = frame.end + 1;
                self.blocks.pop();
            }
        }
        true
    }
}
