use std::cell::RefCell;
use std::rc::Rc;

use bs_compiler::{compile_script, parse_script_document};
use bs_core::{BsValue, CompiledScript, ScriptError};

use crate::catalog::ActionCatalog;
use crate::engine::{EngineOptions, ScriptEngine};
use crate::host::{Diagnostic, HostServices, MessageTarget, TitleDisplay};

#[derive(Debug, Default)]
pub(crate) struct HostLog {
    pub(crate) messages: Vec<(MessageTarget, String)>,
    pub(crate) chats: Vec<String>,
    pub(crate) titles: Vec<TitleDisplay>,
    pub(crate) clipboard: Vec<String>,
    pub(crate) commands: Vec<String>,
    pub(crate) sounds: Vec<(String, f64, f64)>,
    pub(crate) items: Vec<(Option<u32>, BsValue)>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingHost {
    pub(crate) log: Rc<RefCell<HostLog>>,
    pub(crate) creative: bool,
    pub(crate) screen_open: bool,
    pub(crate) sound_names: Vec<String>,
}

impl RecordingHost {
    pub(crate) fn chat(&self) -> Vec<String> {
        self.log
            .borrow()
            .messages
            .iter()
            .filter(|(target, _)| *target == MessageTarget::Chat)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub(crate) fn error_codes(&self) -> Vec<String> {
        self.log
            .borrow()
            .diagnostics
            .iter()
            .map(|diagnostic| diagnostic.error.code.clone())
            .collect()
    }
}

impl HostServices for RecordingHost {
    fn show_message(&self, target: MessageTarget, text: &str) {
        self.log
            .borrow_mut()
            .messages
            .push((target, text.to_string()));
    }

    fn send_chat(&self, text: &str) {
        self.log.borrow_mut().chats.push(text.to_string());
    }

    fn show_title(&self, title: &TitleDisplay) {
        self.log.borrow_mut().titles.push(title.clone());
    }

    fn copy_to_clipboard(&self, text: &str) {
        self.log.borrow_mut().clipboard.push(text.to_string());
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * 6.0
    }

    fn is_screen_open(&self) -> bool {
        self.screen_open
    }

    fn is_creative(&self) -> bool {
        self.creative
    }

    fn give_item(&self, item: &BsValue) -> Result<(), ScriptError> {
        self.log.borrow_mut().items.push((None, item.clone()));
        Ok(())
    }

    fn set_hotbar_item(&self, slot: u32, item: &BsValue) -> Result<(), ScriptError> {
        self.log.borrow_mut().items.push((Some(slot), item.clone()));
        Ok(())
    }

    fn register_command(&self, command: &str) {
        self.log.borrow_mut().commands.push(command.to_string());
    }

    fn sound_names(&self) -> Vec<String> {
        self.sound_names.clone()
    }

    fn play_sound(&self, sound: &str, volume: f64, pitch: f64) {
        self.log
            .borrow_mut()
            .sounds
            .push((sound.to_string(), volume, pitch));
    }

    fn report_error(&self, diagnostic: &Diagnostic) {
        self.log.borrow_mut().diagnostics.push(diagnostic.clone());
    }
}

/// Compiles one script from its JSON document.
pub(crate) fn compile(source: &str) -> CompiledScript {
    let document = parse_script_document(source).expect("document should parse");
    compile_script(document, "test", ActionCatalog::builtin().as_ref())
        .expect("compile should pass")
}

/// Wraps an `actions` array into a `start` handler of script `test`.
pub(crate) fn start_script(actions: &str) -> CompiledScript {
    compile(&format!(
        r#"{{"handlers":[{{"event":"start","actions":{}}}]}}"#,
        actions
    ))
}

pub(crate) fn engine_with(host: &RecordingHost, options: EngineOptions) -> ScriptEngine {
    ScriptEngine::new(EngineOptions {
        host: Some(Rc::new(host.clone())),
        ..options
    })
}
