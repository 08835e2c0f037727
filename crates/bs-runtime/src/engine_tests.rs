use bs_core::{BsValue, CompiledScript, Instruction, Program};

use crate::engine::{EngineOptions, ScriptEngine};
use crate::event::TriggerEvent;
use crate::scope::VariableScope;
use crate::task::{StopReason, TaskId, TaskStatus};
use crate::test_support::{compile, engine_with, start_script, RecordingHost};

fn start(engine: &mut ScriptEngine) -> Vec<TaskId> {
    engine.fire_event(&mut TriggerEvent::new("start"))
}

fn run_once(host: &RecordingHost, actions: &str) -> ScriptEngine {
    let mut engine = engine_with(host, EngineOptions::default());
    engine
        .load_script(start_script(actions))
        .expect("load should pass");
    let started = start(&mut engine);
    assert_eq!(started.len(), 1);
    engine
}

fn only_report_variables(engine: &mut ScriptEngine) -> VariableScope {
    let mut reports = engine.drain_finished();
    assert_eq!(reports.len(), 1, "exactly one task should finish");
    reports.remove(0).variables
}

fn numbers(values: &[f64]) -> BsValue {
    BsValue::List(values.iter().copied().map(BsValue::Number).collect())
}

#[test]
fn repeat_runs_body_in_counting_order() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"create_list","args":[{"variable":"l"}]},
            {"action":"repeat_multiple","args":[{"number":3},{"variable":"i"}]},
            {"action":"append_value","args":[{"variable":"l"},{"variable":"i"}]},
            {"action":"close_bracket"}
        ]"#,
    );
    let variables = only_report_variables(&mut engine);
    assert_eq!(variables.read("l"), numbers(&[1.0, 2.0, 3.0]));
    assert!(host.error_codes().is_empty());
}

#[test]
fn repeat_without_counter_still_repeats() {
    let host = RecordingHost::default();
    run_once(
        &host,
        r#"[
            {"action":"Repeat Multiple","args":[{"number":2}]},
            {"action":"display_chat","args":[{"text":"hi"}]},
            {"action":"close_bracket"}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["hi", "hi"]);
}

#[test]
fn for_each_visits_elements_in_order() {
    let host = RecordingHost::default();
    run_once(
        &host,
        r#"[
            {"action":"for_each_in_list","args":[{"variable":"x"},{"list":["a","b","c"]}]},
            {"action":"display_chat","args":[{"variable":"x"}]},
            {"action":"close_bracket"},
            {"action":"display_chat","args":[{"text":"done"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["a", "b", "c", "done"]);
}

#[test]
fn false_conditional_skips_body_in_same_step() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"if_equals","args":[{"number":1},{"number":2}]},
            {"action":"display_chat","args":[{"text":"inside"}]},
            {"action":"close_bracket"},
            {"action":"display_chat","args":[{"text":"after"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["after"]);
    assert_eq!(engine.current_tick(), 0);
    let reports = engine.drain_finished();
    assert_eq!(reports[0].reason, StopReason::Exhausted);
}

#[test]
fn true_conditional_runs_body_once() {
    let host = RecordingHost::default();
    run_once(
        &host,
        r#"[
            {"action":"if_equals","args":[{"number":2},{"text":"2"}]},
            {"action":"display_chat","args":[{"text":"inside"}]},
            {"action":"close_bracket"},
            {"action":"display_chat","args":[{"text":"after"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["inside", "after"]);
}

#[test]
fn nested_blocks_complete_inner_runs_first() {
    let host = RecordingHost::default();
    run_once(
        &host,
        r#"[
            {"action":"repeat_multiple","args":[{"number":2},{"variable":"i"}]},
            {"action":"repeat_multiple","args":[{"number":2},{"variable":"j"}]},
            {"action":"join_text","args":[{"variable":"r"},{"variable":"i"},{"variable":"j"}]},
            {"action":"display_chat","args":[{"variable":"r"}]},
            {"action":"close_bracket"},
            {"action":"close_bracket"}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["11", "12", "21", "22"]);
}

#[test]
fn wait_suspends_and_resumes_after_the_delay() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"display_chat","args":[{"text":"before"}]},
            {"action":"wait","args":[{"number":2}]},
            {"action":"display_chat","args":[{"text":"after"}]}
        ]"#,
    );
    let id = TaskId(1);
    assert_eq!(host.chat(), vec!["before"]);
    assert_eq!(
        engine.task_status(id),
        Some(TaskStatus::Suspended { until_tick: 2 })
    );
    assert_eq!(engine.task(id).map(|task| task.position()), Some(2));

    engine.tick();
    assert_eq!(host.chat(), vec!["before"]);
    engine.tick();
    assert_eq!(host.chat(), vec!["before", "after"]);
    assert_eq!(
        engine.task_status(id),
        Some(TaskStatus::Stopped(StopReason::Exhausted))
    );

    engine.tick();
    assert_eq!(host.chat(), vec!["before", "after"]);
}

#[test]
fn wait_zero_resumes_on_next_tick() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"wait","args":[{"number":0}]},
            {"action":"display_chat","args":[{"text":"resumed"}]}
        ]"#,
    );
    assert!(host.chat().is_empty());
    engine.tick();
    assert_eq!(host.chat(), vec!["resumed"]);
}

#[test]
fn wait_inside_a_loop_keeps_remaining_iterations() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"repeat_multiple","args":[{"number":2},{"variable":"i"}]},
            {"action":"display_chat","args":[{"variable":"i"}]},
            {"action":"wait","args":[{"number":1}]},
            {"action":"close_bracket"},
            {"action":"display_chat","args":[{"text":"done"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["1"]);
    engine.tick();
    assert_eq!(host.chat(), vec!["1", "2"]);
    engine.tick();
    assert_eq!(host.chat(), vec!["1", "2", "done"]);
}

#[test]
fn stop_discards_pending_runs() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"repeat_multiple","args":[{"number":3},{"variable":"i"}]},
            {"action":"display_chat","args":[{"variable":"i"}]},
            {"action":"stop"},
            {"action":"close_bracket"},
            {"action":"display_chat","args":[{"text":"after"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["1"]);
    let reports = engine.drain_finished();
    assert_eq!(reports[0].reason, StopReason::Explicit);
}

#[test]
fn stop_discards_enclosing_block_runs() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"repeat_multiple","args":[{"number":2},{"variable":"i"}]},
            {"action":"repeat_multiple","args":[{"number":2},{"variable":"j"}]},
            {"action":"display_chat","args":[{"variable":"i"}]},
            {"action":"display_chat","args":[{"variable":"j"}]},
            {"action":"stop"},
            {"action":"close_bracket"},
            {"action":"display_chat","args":[{"text":"inner done"}]},
            {"action":"close_bracket"},
            {"action":"display_chat","args":[{"text":"after"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["1", "1"]);
    let reports = engine.drain_finished();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].reason, StopReason::Explicit);
    assert_eq!(reports[0].variables.read("j"), BsValue::Number(1.0));
}

#[test]
fn invalid_arguments_are_reported_and_skipped() {
    let host = RecordingHost::default();
    run_once(
        &host,
        r#"[
            {"action":"wait","args":[{"text":"soon"}]},
            {"action":"display_chat","args":[{"text":"still running"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["still running"]);
    let log = host.log.borrow();
    assert_eq!(log.diagnostics.len(), 1);
    assert_eq!(log.diagnostics[0].error.code, "RESOLVE_INVALID_ARGUMENTS");
    assert_eq!(log.diagnostics[0].error.message, "Invalid arguments for Wait.");
    assert_eq!(log.diagnostics[0].line, 0);
}

#[test]
fn failing_opener_skips_its_body() {
    let host = RecordingHost::default();
    run_once(
        &host,
        r#"[
            {"action":"set_variable","args":[{"variable":"x"},{"text":"abc"}]},
            {"action":"if_greater","args":[{"variable":"x"},{"number":1}]},
            {"action":"display_chat","args":[{"text":"inside"}]},
            {"action":"close_bracket"},
            {"action":"display_chat","args":[{"text":"after"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["after"]);
    assert_eq!(host.error_codes(), vec!["VALUE_NOT_NUMBER"]);
}

#[test]
fn event_data_is_readable_and_cancellable() {
    let host = RecordingHost::default();
    let mut engine = engine_with(&host, EngineOptions::default());
    engine
        .load_script(compile(
            r#"{"name":"filter","handlers":[{"event":"chat","actions":[
                {"action":"if_text_contains","args":[{"event":"message"},{"text":"spam"}]},
                {"action":"cancel_event"},
                {"action":"close_bracket"},
                {"action":"display_chat","args":[{"event":"message"}]}
            ]}]}"#,
        ))
        .expect("load should pass");

    let mut spam =
        TriggerEvent::cancellable("chat").with_data("message", BsValue::text("buy spam"));
    engine.fire_event(&mut spam);
    assert!(spam.is_cancelled());

    let mut plain = TriggerEvent::new("chat").with_data("message", BsValue::text("spam too"));
    engine.fire_event(&mut plain);
    assert!(!plain.is_cancelled());

    assert_eq!(host.chat(), vec!["buy spam", "spam too"]);
}

#[test]
fn event_is_not_visible_after_resuming() {
    let host = RecordingHost::default();
    let mut engine = engine_with(&host, EngineOptions::default());
    engine
        .load_script(compile(
            r#"{"handlers":[{"event":"chat","actions":[
                {"action":"display_chat","args":[{"event":"message"}]},
                {"action":"wait","args":[{"number":1}]},
                {"action":"display_chat","args":[{"event":"message"}]}
            ]}]}"#,
        ))
        .expect("load should pass");
    engine.fire_event(&mut TriggerEvent::new("chat").with_data("message", BsValue::text("hello")));
    engine.tick();
    assert_eq!(host.chat(), vec!["hello", "unknown"]);
}

#[test]
fn discarded_tasks_never_resume() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"wait","args":[{"number":1}]},
            {"action":"display_chat","args":[{"text":"late"}]}
        ]"#,
    );
    assert!(engine.discard_task(TaskId(1)));
    assert!(!engine.discard_task(TaskId(1)));
    engine.tick();
    assert!(host.chat().is_empty());
    let reports = engine.drain_finished();
    assert_eq!(reports[0].reason, StopReason::Discarded);
    assert_eq!(engine.task_status(TaskId(1)), None);
}

#[test]
fn reloading_a_script_discards_its_tasks() {
    let host = RecordingHost::default();
    let actions = r#"[
        {"action":"wait","args":[{"number":1}]},
        {"action":"display_chat","args":[{"text":"late"}]}
    ]"#;
    let mut engine = run_once(&host, actions);
    engine
        .load_script(start_script(actions))
        .expect("reload should pass");
    assert_eq!(engine.live_tasks(), 0);
    engine.tick();
    assert!(host.chat().is_empty());

    start(&mut engine);
    assert!(engine.unload_script("test"));
    assert!(!engine.unload_script("test"));
    assert!(start(&mut engine).is_empty());
    let reasons = engine
        .drain_finished()
        .into_iter()
        .map(|report| report.reason)
        .collect::<Vec<_>>();
    assert_eq!(reasons, vec![StopReason::Discarded, StopReason::Discarded]);
}

#[test]
fn unknown_actions_are_rejected_at_load() {
    let mut engine = ScriptEngine::new(EngineOptions::default());
    let script = CompiledScript {
        name: "broken".to_string(),
        handlers: vec![Program {
            script: "broken".to_string(),
            event: "start".to_string(),
            instructions: vec![Instruction {
                action: "explode".to_string(),
                arguments: Vec::new(),
                block_end: None,
            }],
        }],
    };
    let error = engine.load_script(script).expect_err("load should fail");
    assert_eq!(error.code, "ENGINE_UNKNOWN_ACTION");
    assert!(engine.script_names().is_empty());
}

#[test]
fn step_limit_stops_runaway_tasks() {
    let host = RecordingHost::default();
    let mut engine = engine_with(
        &host,
        EngineOptions {
            step_limit: Some(5),
            ..EngineOptions::default()
        },
    );
    engine
        .load_script(start_script(
            r#"[
                {"action":"set_variable","args":[{"variable":"n"},{"number":0}]},
                {"action":"repeat_multiple","args":[{"number":10}]},
                {"action":"increment","args":[{"variable":"n"},{"number":1}]},
                {"action":"close_bracket"}
            ]"#,
        ))
        .expect("load should pass");
    start(&mut engine);
    let variables = only_report_variables(&mut engine);
    assert_eq!(variables.read("n"), BsValue::Number(3.0));
    assert_eq!(host.error_codes(), vec!["ENGINE_STEP_LIMIT"]);
}

#[test]
fn large_repeats_run_to_completion_without_a_step_limit() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"set_variable","args":[{"variable":"n"},{"number":0}]},
            {"action":"repeat_multiple","args":[{"number":150000}]},
            {"action":"increment","args":[{"variable":"n"},{"number":1}]},
            {"action":"close_bracket"}
        ]"#,
    );
    let mut reports = engine.drain_finished();
    assert_eq!(reports.len(), 1);
    let report = reports.remove(0);
    assert_eq!(report.reason, StopReason::Exhausted);
    assert_eq!(report.variables.read("n"), BsValue::Number(150000.0));
    assert!(host.error_codes().is_empty());
}

#[test]
fn arithmetic_folds_left_to_right() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"subtract","args":[{"variable":"a"},{"number":10},{"number":3},{"number":2}]},
            {"action":"divide","args":[{"variable":"b"},{"number":12},{"number":2},{"number":3}]},
            {"action":"multiply","args":[{"variable":"c"},{"number":2},{"number":4}]},
            {"action":"modulo","args":[{"variable":"d"},{"number":7},{"number":3}]},
            {"action":"set_variable","args":[{"variable":"e"},{"number":1.5}]},
            {"action":"increment","args":[{"variable":"e"},{"number":1},{"number":2}]},
            {"action":"round_number","args":[{"variable":"f"},{"number":2.5}]},
            {"action":"parse_number","args":[{"variable":"g"},{"text":"abc"}]},
            {"action":"parse_number","args":[{"variable":"h"},{"text":" 4.25 "}]}
        ]"#,
    );
    let variables = only_report_variables(&mut engine);
    assert_eq!(variables.read("a"), BsValue::Number(5.0));
    assert_eq!(variables.read("b"), BsValue::Number(2.0));
    assert_eq!(variables.read("c"), BsValue::Number(8.0));
    assert_eq!(variables.read("d"), BsValue::Number(1.0));
    assert_eq!(variables.read("e"), BsValue::Number(4.5));
    assert_eq!(variables.read("f"), BsValue::Number(3.0));
    assert_eq!(variables.read("g"), BsValue::Unknown);
    assert_eq!(variables.read("h"), BsValue::Number(4.25));
}

#[test]
fn random_numbers_are_seeded_and_bounded() {
    let actions = r#"[
        {"action":"random_number","args":[{"variable":"r"},{"number":5},{"number":10}]}
    ]"#;
    let sample = |seed: u32| {
        let host = RecordingHost::default();
        let mut engine = engine_with(
            &host,
            EngineOptions {
                random_seed: Some(seed),
                ..EngineOptions::default()
            },
        );
        engine
            .load_script(start_script(actions))
            .expect("load should pass");
        start(&mut engine);
        only_report_variables(&mut engine)
            .read("r")
            .as_number()
            .expect("result should be a number")
    };
    let first = sample(42);
    assert_eq!(first, sample(42));
    assert!((5.0..10.0).contains(&first));
}

#[test]
fn list_and_dictionary_actions_compose() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"create_list","args":[{"variable":"l"},{"text":"a"},{"text":"b"},{"text":"a"}]},
            {"action":"remove_list_value","args":[{"variable":"l"},{"text":"a"}]},
            {"action":"append_list_values","args":[{"variable":"l"},{"list":["c","d"]}]},
            {"action":"set_list_value","args":[{"variable":"l"},{"number":1},{"text":"B"}]},
            {"action":"remove_list_value_at","args":[{"variable":"l"},{"number":3}]},
            {"action":"get_list_value","args":[{"variable":"second"},{"variable":"l"},{"number":2}]},
            {"action":"get_list_value","args":[{"variable":"missing"},{"variable":"l"},{"number":9}]},
            {"action":"list_length","args":[{"variable":"len"},{"variable":"l"}]},
            {"action":"join_list_to_text","args":[{"variable":"joined"},{"variable":"l"}]},
            {"action":"create_dictionary","args":[{"variable":"d"},{"list":["b","a","z"]},{"list":[2,1]}]},
            {"action":"set_dictionary_value","args":[{"variable":"d"},{"text":"c"},{"number":3}]},
            {"action":"remove_dictionary_entry","args":[{"variable":"d"},{"text":"b"}]},
            {"action":"get_dictionary_size","args":[{"variable":"size"},{"variable":"d"}]},
            {"action":"get_dictionary_value","args":[{"variable":"a"},{"variable":"d"},{"text":"a"}]},
            {"action":"create_list","args":[{"variable":"keys"}]},
            {"action":"for_each_in_dictionary","args":[{"variable":"k"},{"variable":"v"},{"variable":"d"}]},
            {"action":"append_value","args":[{"variable":"keys"},{"variable":"k"}]},
            {"action":"close_bracket"}
        ]"#,
    );
    let variables = only_report_variables(&mut engine);
    assert_eq!(
        variables.read("l"),
        BsValue::List(vec![BsValue::text("B"), BsValue::text("c")])
    );
    assert_eq!(variables.read("second"), BsValue::text("c"));
    assert_eq!(variables.read("missing"), BsValue::Unknown);
    assert_eq!(variables.read("len"), BsValue::Number(2.0));
    assert_eq!(variables.read("joined"), BsValue::text("B, c"));
    assert_eq!(variables.read("size"), BsValue::Number(2.0));
    assert_eq!(variables.read("a"), BsValue::Number(1.0));
    assert_eq!(
        variables.read("keys"),
        BsValue::List(vec![BsValue::text("a"), BsValue::text("c")])
    );
    assert!(host.error_codes().is_empty());
}

#[test]
fn text_actions_update_variables() {
    let host = RecordingHost::default();
    let mut engine = run_once(
        &host,
        r#"[
            {"action":"split_text","args":[{"variable":"parts"},{"text":"a-b-c"},{"text":"-"}]},
            {"action":"text_index_of","args":[{"variable":"at"},{"text":"hello"},{"text":"l"}]},
            {"action":"get_subtext","args":[{"variable":"sub"},{"text":"hello"},{"number":1},{"number":3}]},
            {"action":"measure_text","args":[{"variable":"width"},{"text":"abc"}]},
            {"action":"if_matches_regex","args":[{"text":"abc123"},{"text":"[a-z]+[0-9]+"}]},
            {"action":"set_variable","args":[{"variable":"matched"},{"number":1}]},
            {"action":"close_bracket"},
            {"action":"if_starts_with","args":[{"text":"hello"},{"text":"x"}]},
            {"action":"set_variable","args":[{"variable":"starts"},{"number":1}]},
            {"action":"close_bracket"}
        ]"#,
    );
    let variables = only_report_variables(&mut engine);
    assert_eq!(
        variables.read("parts"),
        BsValue::List(vec![BsValue::text("a"), BsValue::text("b"), BsValue::text("c")])
    );
    assert_eq!(variables.read("at"), BsValue::Number(2.0));
    assert_eq!(variables.read("sub"), BsValue::text("ell"));
    assert_eq!(variables.read("width"), BsValue::Number(18.0));
    assert_eq!(variables.read("matched"), BsValue::Number(1.0));
    assert!(!variables.contains("starts"));
}

#[test]
fn host_actions_reach_the_host() {
    let host = RecordingHost {
        creative: true,
        screen_open: true,
        sound_names: vec!["minecraft:entity.player.levelup".to_string()],
        ..RecordingHost::default()
    };
    run_once(
        &host,
        r#"[
            {"action":"action_bar","args":[{"text":"hp"},{"number":20}]},
            {"action":"send_chat","args":[{"text":"hello"},{"text":"world"}]},
            {"action":"display_title","args":[{"text":"Title"},{"number":5}]},
            {"action":"copy_text","args":[{"text":"copied"}]},
            {"action":"register_command","args":[{"text":"warp home"},{"text":"warp spawn"}]},
            {"action":"play_sound","args":[{"text":"entity.player.levelup"},{"number":0.5}]},
            {"action":"give_item","args":[{"dictionary":{"id":"stone"}}]},
            {"action":"set_hotbar_item","args":[{"number":2},{"dictionary":{"id":"dirt"}}]},
            {"action":"if_gui_open"},
            {"action":"display_chat","args":[{"text":"gui"}]},
            {"action":"close_bracket"}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["gui"]);
    let log = host.log.borrow();
    assert_eq!(log.messages.len(), 2);
    assert_eq!(log.messages[0].1, "hp 20");
    assert_eq!(log.chats, vec!["hello world"]);
    assert_eq!(log.titles[0].title, "Title");
    assert_eq!(log.titles[0].subtitle, "");
    // A lone trailing number binds the last optional parameter.
    assert_eq!(log.titles[0].fade_in, 20);
    assert_eq!(log.titles[0].stay, 60);
    assert_eq!(log.titles[0].fade_out, 5);
    assert_eq!(log.clipboard, vec!["copied"]);
    assert_eq!(log.commands, vec!["warp home", "warp spawn"]);
    assert_eq!(
        log.sounds,
        vec![("minecraft:entity.player.levelup".to_string(), 1.0, 0.5)]
    );
    assert_eq!(log.items.len(), 2);
    assert_eq!(log.items[1].0, Some(2));
    assert!(log.diagnostics.is_empty());
}

#[test]
fn host_preconditions_surface_as_diagnostics() {
    let host = RecordingHost {
        sound_names: vec![
            "minecraft:block.note_block.bell".to_string(),
            "minecraft:block.note_block.harp".to_string(),
        ],
        ..RecordingHost::default()
    };
    run_once(
        &host,
        r#"[
            {"action":"give_item","args":[{"dictionary":{"id":"stone"}}]},
            {"action":"play_sound","args":[{"text":"note block"}]},
            {"action":"display_chat","args":[{"text":"continued"}]}
        ]"#,
    );
    assert_eq!(host.chat(), vec!["continued"]);
    assert_eq!(
        host.error_codes(),
        vec!["HOST_NOT_CREATIVE", "HOST_UNKNOWN_SOUND"]
    );
    let log = host.log.borrow();
    assert_eq!(
        log.diagnostics[1].error.message,
        "Unknown sound: note block. Did you mean: Block Note Block Bell, Block Note Block Harp"
    );
    assert!(log.items.is_empty());
}

#[test]
fn file_actions_use_the_script_sandbox() {
    let root =
        std::env::temp_dir().join(format!("bs-runtime-engine-files-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    let host = RecordingHost::default();
    let mut engine = engine_with(
        &host,
        EngineOptions {
            files_dir: Some(root.clone()),
            ..EngineOptions::default()
        },
    );
    engine
        .load_script(start_script(
            r#"[
                {"action":"if_file_exists","args":[{"text":"score.json"}]},
                {"action":"set_variable","args":[{"variable":"existed"},{"number":1}]},
                {"action":"close_bracket"},
                {"action":"write_file","args":[{"text":"score.json"},{"list":[1,"two"]}]},
                {"action":"read_file","args":[{"variable":"score"},{"text":"score.json"}]},
                {"action":"write_file","args":[{"text":"../escape"},{"number":1}]}
            ]"#,
        ))
        .expect("load should pass");
    start(&mut engine);

    let variables = only_report_variables(&mut engine);
    assert!(!variables.contains("existed"));
    assert_eq!(
        variables.read("score"),
        BsValue::List(vec![BsValue::Number(1.0), BsValue::text("two")])
    );
    assert!(root.join("test-files").join("score.json").is_file());
    assert_eq!(host.error_codes(), vec!["FILE_ILLEGAL_NAME"]);
}

#[test]
fn script_name_cannot_escape_the_files_directory() {
    let base = std::env::temp_dir().join(format!(
        "bs-runtime-engine-escape-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&base);
    let root = base.join("sandbox");
    let host = RecordingHost::default();
    let mut engine = engine_with(
        &host,
        EngineOptions {
            files_dir: Some(root.clone()),
            ..EngineOptions::default()
        },
    );
    engine
        .load_script(compile(
            r#"{"name":"../outside","handlers":[{"event":"start","actions":[
                {"action":"write_file","args":[{"text":"pwned.json"},{"number":1}]},
                {"action":"if_file_exists","args":[{"text":"pwned.json"}]},
                {"action":"set_variable","args":[{"variable":"existed"},{"number":1}]},
                {"action":"close_bracket"}
            ]}]}"#,
        ))
        .expect("load should pass");
    start(&mut engine);

    let variables = only_report_variables(&mut engine);
    assert!(!variables.contains("existed"));
    assert_eq!(
        host.error_codes(),
        vec!["FILE_ILLEGAL_NAME", "FILE_ILLEGAL_NAME"]
    );
    assert!(!base.join("outside-files").exists());
    assert!(!root.exists());
}

#[test]
fn every_matching_handler_gets_its_own_task() {
    let host = RecordingHost::default();
    let mut engine = engine_with(&host, EngineOptions::default());
    for name in ["one", "two"] {
        engine
            .load_script(compile(&format!(
                r#"{{"name":"{name}","handlers":[{{"event":"start","actions":[
                    {{"action":"display_chat","args":[{{"text":"{name}"}}]}}
                ]}},{{"event":"other","actions":[]}}]}}"#
            )))
            .expect("load should pass");
    }
    let started = start(&mut engine);
    assert_eq!(started, vec![TaskId(1), TaskId(2)]);
    assert_eq!(host.chat(), vec!["one", "two"]);
    assert!(engine
        .fire_event(&mut TriggerEvent::new("missing"))
        .is_empty());
}

#[test]
fn check_script_lists_unresolvable_lines() {
    let engine = ScriptEngine::new(EngineOptions::default());
    let script = start_script(
        r#"[
            {"action":"display_chat","args":[{"text":"ok"}]},
            {"action":"modulo","args":[{"variable":"r"},{"number":1}]},
            {"action":"set_variable","args":[{"text":"x"},{"number":1}]}
        ]"#,
    );
    let issues = engine.check_script(&script);
    let lines = issues
        .iter()
        .map(|issue| (issue.action.as_str(), issue.error.line))
        .collect::<Vec<_>>();
    assert_eq!(lines, vec![("modulo", Some(1)), ("set_variable", Some(2))]);
    assert_eq!(issues[0].error.message, "Invalid arguments for Modulo.");
}
