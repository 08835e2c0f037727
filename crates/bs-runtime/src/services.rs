use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::files::ScriptFiles;
use crate::host::{Diagnostic, HostServices};
use crate::rng::{next_random_u32, next_random_unit};
use crate::sounds::SoundRegistry;

/// Collaborators shared by every task of one engine.
pub struct EngineServices {
    pub host: Rc<dyn HostServices>,
    pub sounds: SoundRegistry,
    pub files: ScriptFiles,
    random_state: RefCell<u32>,
}

impl EngineServices {
    pub fn new(host: Rc<dyn HostServices>, files: ScriptFiles, random_seed: u32) -> Self {
        let sounds = SoundRegistry::new(host.sound_names());
        Self {
            host,
            sounds,
            files,
            random_state: RefCell::new(random_seed),
        }
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        warn!(
            task = %diagnostic.task,
            script = %diagnostic.script,
            line = diagnostic.line,
            action = %diagnostic.action,
            code = %diagnostic.error.code,
            "{}",
            diagnostic.error.message
        );
        self.host.report_error(&diagnostic);
    }

    pub fn next_random_u32(&self) -> u32 {
        next_random_u32(&mut self.random_state.borrow_mut())
    }

    pub fn next_random_unit(&self) -> f64 {
        next_random_unit(&mut self.random_state.borrow_mut())
    }
}
