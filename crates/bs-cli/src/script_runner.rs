use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use bs_core::{BlockRole, BsValue, ScriptError};
use bs_runtime::{
    ActionCatalog, EngineOptions, HostServices, ScriptEngine, TaskId, TaskReport, TriggerEvent,
    VariableScope,
};
use tracing::info;

use crate::console_host::ConsoleHost;
use crate::{json_text, load_scripts_from_dir, map_cli_event_data, CheckArgs, RunArgs};

pub(crate) fn run_scripts(args: RunArgs) -> Result<i32, ScriptError> {
    let catalog = ActionCatalog::builtin();
    let scripts = load_scripts_from_dir(&args.scripts_dir, catalog.as_ref())?;
    let mut event = build_event(&args.event, args.cancellable, &args.data)?;

    let host = Rc::new(ConsoleHost::new(
        args.creative,
        args.screen_open,
        args.sounds.clone(),
    ));
    let mut engine = ScriptEngine::new(EngineOptions {
        catalog: Some(Arc::clone(&catalog)),
        host: Some(Rc::clone(&host) as Rc<dyn HostServices>),
        files_dir: args.files_dir.map(PathBuf::from),
        random_seed: args.seed,
        step_limit: args.step_limit,
        ..EngineOptions::default()
    });
    for script in scripts.into_values() {
        engine.load_script(script)?;
    }

    let started = engine.fire_event(&mut event);
    let mut ticks = 0;
    while engine.live_tasks() > 0 && ticks < args.ticks {
        engine.tick();
        ticks += 1;
    }
    info!(event = %event.name, tasks = started.len(), ticks, "run settled");

    println!("RESULT:OK");
    println!("EVENT:{}", event.name);
    for line in host.take_lines() {
        println!("{}", line);
    }
    if event.cancellable {
        println!("EVENT_CANCELLED:{}", event.is_cancelled());
    }
    println!("TICKS:{}", engine.current_tick());
    let reports = engine.drain_finished();
    emit_tasks(&engine, &started, &reports);
    Ok(0)
}

fn emit_tasks(engine: &ScriptEngine, started: &[TaskId], reports: &[TaskReport]) {
    for id in started {
        if let Some(report) = reports.iter().find(|report| report.id == *id) {
            println!("TASK:{}:{}:{}", id.0, report.script, report.reason);
            println!("VARIABLES_JSON:{}|{}", id.0, scope_json(&report.variables));
        } else if let Some(task) = engine.task(*id) {
            println!("TASK:{}:{}:suspended", id.0, task.script());
            println!("VARIABLES_JSON:{}|{}", id.0, scope_json(task.scope()));
        }
    }
}

fn scope_json(scope: &VariableScope) -> String {
    serde_json::to_string(scope).unwrap_or_else(|_| "{}".to_string())
}

/// Builds the fired event from `key=value` entries.
pub(crate) fn build_event(
    name: &str,
    cancellable: bool,
    data: &[String],
) -> Result<TriggerEvent, ScriptError> {
    let mut event = if cancellable {
        TriggerEvent::cancellable(name)
    } else {
        TriggerEvent::new(name)
    };
    for entry in data {
        let Some((key, raw)) = entry.split_once('=') else {
            return Err(map_cli_event_data(entry));
        };
        if key.trim().is_empty() {
            return Err(map_cli_event_data(entry));
        }
        let value = serde_json::from_str::<BsValue>(raw).unwrap_or_else(|_| BsValue::text(raw));
        event = event.with_data(key.trim(), value);
    }
    Ok(event)
}

pub(crate) fn check_scripts(args: CheckArgs) -> Result<i32, ScriptError> {
    let catalog = ActionCatalog::builtin();
    let scripts = load_scripts_from_dir(&args.scripts_dir, catalog.as_ref())?;
    let engine = ScriptEngine::new(EngineOptions {
        catalog: Some(catalog),
        ..EngineOptions::default()
    });
    let issues = scripts
        .values()
        .flat_map(|script| engine.check_script(script))
        .collect::<Vec<_>>();

    println!(
        "{}",
        if issues.is_empty() {
            "RESULT:OK"
        } else {
            "RESULT:ISSUES"
        }
    );
    println!("SCRIPTS:{}", scripts.len());
    for issue in &issues {
        println!(
            "ISSUE:{}:{}:{}:{}|{}",
            issue.script,
            issue.event,
            issue.error.line.unwrap_or_default(),
            issue.action,
            json_text(&issue.error.message)
        );
    }
    println!("ISSUE_COUNT:{}", issues.len());
    Ok(if issues.is_empty() { 0 } else { 1 })
}

pub(crate) fn list_actions() -> Result<i32, ScriptError> {
    let catalog = ActionCatalog::builtin();
    println!("RESULT:OK");
    for definition in catalog.iter() {
        let role = match definition.block_role() {
            BlockRole::Plain => "plain",
            BlockRole::Opener => "opens",
            BlockRole::Closer => "closes",
        };
        println!(
            "ACTION:{}|{}|{}|{}|{}",
            definition.id,
            json_text(&definition.name),
            definition.category,
            role,
            definition.signature()
        );
    }
    println!("ACTION_COUNT:{}", catalog.len());
    Ok(0)
}
