//! End-to-end generation tests over whole documents.

use recombine_core::{Engine, ScriptedPrompter};
use recombine_model::{EngineOptions, SetOrder, TemplateError, Warning};

fn run(text: &str) -> String {
    run_with(text, EngineOptions::default(), &[])
}

fn run_with(text: &str, options: EngineOptions, answers: &[&str]) -> String {
    let engine = Engine::load(text, options).expect("document loads");
    let mut prompter = ScriptedPrompter::new(answers.iter().copied());
    let (output, _) = engine
        .generate_to_string(&mut prompter)
        .expect("generation succeeds");
    output
}

const PLAYLIST: &str = "\
Playlist for
%
 the weekend
%
#mode
mono, pro, mono
%
#speed
slow, fast
%%
0.strip s 1.strip n
@ - #mode.caps at #speed.title @
~.caps rate it ~.strip n
2.strip
";

#[test]
fn hello_world_scenario() {
    assert_eq!(run("Hello\n%\nWorld\n%%\n0.strip s 1.strip\n"), "Hello World");
}

#[test]
fn trim_option_makes_plain_indices_clean() {
    let options = EngineOptions::default().with_trim_trailing_newlines(true);
    assert_eq!(
        run_with("Hello\n%\nWorld\n%%\n0 s 1\n", options, &[]),
        "Hello World"
    );
}

#[test]
fn trim_option_drops_padding_around_blocks() {
    let options = EngineOptions::default().with_trim_trailing_newlines(true);
    assert_eq!(
        run_with("Hello \n%\n  World \n%%\n0 s 1\n", options, &[]),
        "Hello World"
    );
}

#[test]
fn full_document_snapshot() {
    let output = run_with(PLAYLIST, EngineOptions::default(), &[" five stars "]);
    insta::assert_snapshot!(output, @r"
    Playlist for the weekend
    - MONO at Fast
    - PRO at Fast
    - MONO at Slow
    - PRO at Slow
    five stars
    #mode
    mono, pro, mono
    ");
}

#[test]
fn generation_is_repeatable() {
    let engine = Engine::load(PLAYLIST, EngineOptions::default()).unwrap();
    let mut first = ScriptedPrompter::new(["x"]);
    let mut second = ScriptedPrompter::new(["x"]);
    let (a, _) = engine.generate_to_string(&mut first).unwrap();
    let (b, _) = engine.generate_to_string(&mut second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn literal_tokens_round_trip() {
    let text = "alpha\n%\nbeta\n%%\nx 0 s y.caps 1 z\n";
    for _ in 0..3 {
        assert_eq!(run(text), "xalpha\n Ybeta\nz");
    }
}

#[test]
fn set_blocks_stay_addressable_as_data() {
    assert_eq!(run("#c\nb, a\n%%\n0\n"), "#c\nb, a\n");
}

#[test]
fn sets_by_index_and_truncation() {
    let text = "intro\n%\n#letters\nc, b, a, d\n%%\n@ #1.2 @\n";
    assert_eq!(run(text), "a\nb\n");
}

#[test]
fn closed_reference_form_is_accepted() {
    let text = "#size\nS, L\n%%\n@ size: #size#.lower @\n";
    assert_eq!(run(text), "size: l\nsize: s\n");
}

#[test]
fn empty_set_produces_no_lines() {
    let text = "#none\n\n%\n#c\nx\n%%\na @ #none #c @ b\n";
    assert_eq!(run(text), "ab");
}

#[test]
fn template_without_references_writes_nothing() {
    assert_eq!(run("%%\n@ just text @\n"), "");
    assert_eq!(run("%%\na @ just text @ b\n"), "ab");
}

#[test]
fn seeded_random_order_changes_only_order() {
    let text = "#n\n1, 2, 3, 4, 5, 6\n%%\n@ #n @\n";
    let options = EngineOptions::default()
        .with_set_order(SetOrder::Random)
        .with_seed(Some(3));
    let output = run_with(text, options.clone(), &[]);
    assert_eq!(output, run_with(text, options, &[]));

    let mut lines: Vec<&str> = output.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn unknown_set_aborts_generation() {
    let engine = Engine::load("%%\n@ #missing @\n", EngineOptions::default()).unwrap();
    let mut prompter = ScriptedPrompter::default();
    let error = engine.generate_to_string(&mut prompter).unwrap_err();
    assert!(matches!(error, TemplateError::UnknownSet { .. }));
}

#[test]
fn malformed_set_fails_to_load() {
    let error = Engine::load("x\n%\n#broken", EngineOptions::default())
        .err()
        .expect("load fails");
    assert!(matches!(error, TemplateError::MalformedSet { index: 1 }));
}

#[test]
fn per_token_problems_are_collected() {
    let engine = Engine::load("only\n%%\n0 5 text.foo\n", EngineOptions::default()).unwrap();
    let mut prompter = ScriptedPrompter::default();
    let (output, summary) = engine.generate_to_string(&mut prompter).unwrap();

    assert_eq!(output, "only\ntext");
    assert_eq!(
        summary.warnings,
        vec![
            Warning::IndexOutOfRange {
                index: "5".to_string(),
                len: 1
            },
            Warning::UnknownFunction {
                name: "foo".to_string()
            },
        ]
    );
    assert_eq!(summary.bytes_written, output.len());
}
