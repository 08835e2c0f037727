use std::fmt;

use bs_core::{BsValue, ScriptError};

use crate::task::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    Chat,
    ActionBar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleDisplay {
    pub title: String,
    pub subtitle: String,
    pub fade_in: u32,
    pub stay: u32,
    pub fade_out: u32,
}

/// Failure surfaced on the user-visible error channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub task: TaskId,
    pub script: String,
    pub action: String,
    pub line: usize,
    pub error: ScriptError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{} {}: {}",
            self.task, self.script, self.line, self.action, self.error.message
        )
    }
}

/// Side-effect sinks an embedding application provides to actions.
///
/// Every method is called with already-resolved arguments on the engine's
/// single thread. None of them may call back into the engine.
pub trait HostServices {
    fn show_message(&self, target: MessageTarget, text: &str);
    fn send_chat(&self, text: &str);
    fn show_title(&self, title: &TitleDisplay);
    fn copy_to_clipboard(&self, text: &str);
    fn measure_text(&self, text: &str) -> f64;
    fn is_screen_open(&self) -> bool;
    fn is_creative(&self) -> bool;
    fn give_item(&self, item: &BsValue) -> Result<(), ScriptError>;
    fn set_hotbar_item(&self, slot: u32, item: &BsValue) -> Result<(), ScriptError>;
    fn register_command(&self, command: &str);
    fn sound_names(&self) -> Vec<String>;
    fn play_sound(&self, sound: &str, volume: f64, pitch: f64);
    fn report_error(&self, diagnostic: &Diagnostic);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl HostServices for NullHost {
    fn show_message(&self, _target: MessageTarget, _text: &str) {}

    fn send_chat(&self, _text: &str) {}

    fn show_title(&self, _title: &TitleDisplay) {}

    fn copy_to_clipboard(&self, _text: &str) {}

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64
    }

    fn is_screen_open(&self) -> bool {
        false
    }

    fn is_creative(&self) -> bool {
        false
    }

    fn give_item(&self, _item: &BsValue) -> Result<(), ScriptError> {
        Ok(())
    }

    fn set_hotbar_item(&self, _slot: u32, _item: &BsValue) -> Result<(), ScriptError> {
        Ok(())
    }

    fn register_command(&self, _command: &str) {}

    fn sound_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn play_sound(&self, _sound: &str, _volume: f64, _pitch: f64) {}

    fn report_error(&self, _diagnostic: &Diagnostic) {}
}
