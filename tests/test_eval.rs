// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::{env, fs, path::PathBuf, process};

use gcrun::ast::{Axis, Letter};
use gcrun::config::{Config, UnknownCodes};
use gcrun::eval::{self, Call, ErrKind, Evaluator, Position, Recorder, SpindleDir, State};
use gcrun::files::{self, FileError};
use gcrun::parse;

fn calls_with(body: &str, config: &Config) -> (Vec<Call>, State) {
    let prog = parse::parse(&format!("%\n{}\n%\n", body), config).unwrap();
    let mut machine = Recorder::new();
    let state = eval::run(&prog, &mut machine, config).unwrap();
    (machine.calls, state)
}

fn calls(body: &str) -> Vec<Call> {
    calls_with(body, &Config::default()).0
}

#[test]
fn test_two_axis_move() {
    assert_eq!(calls("N10G1X10Y20"), [Call::MoveTo(10., 20., 0.)]);
    assert_eq!(calls("G0 Z5\nN10G1X10Y20"), [
        Call::MoveAxis(Axis::Z, 5.),
        Call::MoveTo(10., 20., 5.),
    ]);
}

#[test]
fn test_single_axis_move() {
    assert_eq!(calls("G1X5"), [Call::MoveAxis(Axis::X, 5.)]);
    // the same axis twice is still a single axis, the last word wins
    assert_eq!(calls("G1 Y1 Y2"), [Call::MoveAxis(Axis::Y, 2.)]);
}

#[test]
fn test_no_axis_move() {
    assert_eq!(calls("G0\nG1 F100"), [Call::FeedRate(100.)]);
    // axis words without G0/G1 don't move
    let (calls, state) = calls_with("X5 Y5", &Config::default());
    assert!(calls.is_empty());
    assert_eq!(state.position, Position::default());
}

#[test]
fn test_position_is_carried() {
    let (calls, state) = calls_with("G1 X1 Y2 Z3\nG1 X4\nG0 Y5 Z6", &Config::default());
    assert_eq!(calls, [
        Call::MoveTo(1., 2., 3.),
        Call::MoveAxis(Axis::X, 4.),
        Call::MoveTo(4., 5., 6.),
    ]);
    assert_eq!(state.position, Position::new(4., 5., 6.));
}

#[test]
fn test_home_before_move() {
    let (calls, state) = calls_with("G1 X1 Y2 Z3\nG1 X5 G28", &Config::default());
    assert_eq!(calls, [
        Call::MoveTo(1., 2., 3.),
        Call::Home,
        Call::MoveAxis(Axis::X, 5.),
    ]);
    assert_eq!(state.position, Position::new(5., 0., 0.));

    let (_, state) = calls_with("G1 X1 Y2 Z3\nG28", &Config::default());
    assert_eq!(state.position, Position::default());
}

#[test]
fn test_tool_change() {
    // selection alone does nothing
    let (sel_calls, state) = calls_with("T3", &Config::default());
    assert!(sel_calls.is_empty());
    assert_eq!(state.tool, "3");

    assert_eq!(calls("T3\nG0 X1\nM6"), [
        Call::MoveAxis(Axis::X, 1.),
        Call::ChangeTool("3".into()),
    ]);
    // M6 before T on the line still gets the new tool
    assert_eq!(calls("M6 Tmill"), [Call::ChangeTool("mill".into())]);
    // nothing staged yet
    assert_eq!(calls("M6"), [Call::ChangeTool("".into())]);
}

#[test]
fn test_spindle_and_coolant() {
    assert_eq!(calls("M3 S1200 M8\nM4\nM5 M9\nM7"), [
        Call::SpindleSpeed(1200),
        Call::SpindleOn(SpindleDir::Cw),
        Call::CoolantOn,
        Call::SpindleOn(SpindleDir::Ccw),
        Call::SpindleOff,
        Call::CoolantOff,
        Call::CoolantOn,
    ]);
}

#[test]
fn test_line_order() {
    assert_eq!(calls("G1 X10 Y10 M8 M6 T2 F300 S900 G28 M30"), [
        Call::FeedRate(300.),
        Call::SpindleSpeed(900),
        Call::ChangeTool("2".into()),
        Call::CoolantOn,
        Call::Home,
        Call::MoveTo(10., 10., 0.),
    ]);
}

#[test]
fn test_modal_codes() {
    let reject = Config { unknown_codes: UnknownCodes::Reject, ..Config::default() };
    let (calls, _) = calls_with("G17 G21 G40 G49 G80 G90 G94\nG91\nM30\nM6", &reject);
    assert_eq!(calls, [Call::ChangeTool("".into())]);
}

#[test]
fn test_unknown_codes() {
    let body = "G2 X1\nM100\nG1 X2";
    assert_eq!(calls(body), [Call::MoveAxis(Axis::X, 2.)]);

    let warn = Config { unknown_codes: UnknownCodes::Warn, ..Config::default() };
    assert_eq!(calls_with(body, &warn).0, [Call::MoveAxis(Axis::X, 2.)]);

    let reject = Config { unknown_codes: UnknownCodes::Reject, ..Config::default() };
    let prog = parse::parse(&format!("%\n{}\n%\n", body), &reject).unwrap();
    let mut machine = Recorder::new();
    let err = eval::run(&prog, &mut machine, &reject).unwrap_err();
    assert_eq!(err.lineno, 2);
    assert_eq!(err.kind, ErrKind::UnrecognizedCode(Letter::G, 2));
    assert!(machine.calls.is_empty());
}

#[test]
fn test_program_end_continues() {
    assert_eq!(calls("M30\nG1 X1"), [Call::MoveAxis(Axis::X, 1.)]);
}

#[test]
fn test_fresh_state_per_run() {
    let src = "%\nT7 M6\nG1 X1 Y2\nG1 Z-3 F50\nG28\nG0 X4\n%\n";
    let prog = parse::parse(src, &Config::default()).unwrap();

    let mut first = Recorder::new();
    let mut second = Recorder::new();
    let s1 = eval::run(&prog, &mut first, &Config::default()).unwrap();
    let s2 = eval::run(&prog, &mut second, &Config::default()).unwrap();
    assert_eq!(first.calls, second.calls);
    assert_eq!(s1, s2);
    assert_eq!(first.calls.len(), 6);
}

#[test]
fn test_step_by_block() {
    let prog = parse::parse("%\nT5\nG1 X1 Y1\n%\n", &Config::default()).unwrap();
    let mut machine = Recorder::new();
    let mut evaluator = Evaluator::new(&mut machine, &Config::default());
    assert_eq!(evaluator.state(), &State::default());

    evaluator.eval_block(&prog.blocks[0]).unwrap();
    assert_eq!(evaluator.state().tool, "5");
    evaluator.eval_block(&prog.blocks[1]).unwrap();
    assert_eq!(evaluator.state().position, Position::new(1., 1., 0.));
    drop(evaluator);

    assert_eq!(machine.calls, [Call::MoveTo(1., 1., 0.)]);
}

#[test]
fn test_one_move_per_block() {
    assert_eq!(calls("G0 G1 X1 Y2"), [Call::MoveTo(1., 2., 0.)]);
    assert_eq!(calls("G1 Z4 G0"), [Call::MoveAxis(Axis::Z, 4.)]);
}

fn temp_file(name: &str, text: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("gcrun-{}-{}", process::id(), name));
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_files_run_independently() {
    let first = temp_file("first.ngc", "%\nT1 M6\nG1 X1\n%\n");
    let missing = env::temp_dir().join(format!("gcrun-{}-missing.ngc", process::id()));
    let broken = temp_file("broken.ngc", "%\nG1 X1.2.3\n%\n");
    let last = temp_file("last.ngc", "%\nG1 X2 Y3\n%\n");

    let paths = [&first, &missing, &broken, &last];
    let results = files::run_files(&paths, &Config::default(), Recorder::new);
    for path in &[&first, &broken, &last] {
        fs::remove_file(path).unwrap();
    }

    assert_eq!(results.len(), 4);
    match &results[0] {
        Ok(machine) => assert_eq!(machine.calls, [
            Call::ChangeTool("1".into()),
            Call::MoveAxis(Axis::X, 1.),
        ]),
        Err(e) => panic!("{}", e),
    }
    match &results[1] {
        Err(e @ FileError::Io { .. }) => assert_eq!(e.path(), missing.as_path()),
        other => panic!("expected read failure, got {:?}", other.as_ref().map(|m| &m.calls)),
    }
    match &results[2] {
        Err(FileError::Parse { source, .. }) => assert_eq!(source.lineno, 2),
        other => panic!("expected parse failure, got {:?}", other.as_ref().map(|m| &m.calls)),
    }
    match &results[3] {
        Ok(machine) => assert_eq!(machine.calls, [Call::MoveTo(2., 3., 0.)]),
        Err(e) => panic!("{}", e),
    }
    assert_eq!(files::exit_code(&results), 1);
    assert_eq!(files::exit_code(&results[3..]), 0);
    assert_eq!(files::exit_code::<Recorder>(&[]), 0);
}

#[test]
fn test_rejected_code_fails_file() {
    let path = temp_file("reject.ngc", "%\nG1 X1\nG2\nG1 X3\n%\n");
    let reject = Config { unknown_codes: UnknownCodes::Reject, ..Config::default() };
    let mut machine = Recorder::new();
    let result = files::run_file(&path, &mut machine, &reject);
    fs::remove_file(&path).unwrap();

    match result {
        Err(FileError::Eval { source, .. }) => assert_eq!(source.lineno, 3),
        other => panic!("expected evaluation failure, got {:?}", other.map(|s| s.position)),
    }
    assert_eq!(machine.calls, [Call::MoveAxis(Axis::X, 1.)]);
}
