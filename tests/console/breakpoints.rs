use crate::common::{pane, run_session, Call, FakeDebugger, Workspace};
use dlvview::debugger::BreakpointRequest;
use dlvview::ui::state::StateStore;
use std::collections::BTreeMap;

#[test]
fn test_break_at_current_file_line() {
    let ws = Workspace::new();
    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42);

    let session = run_session(&ws, &mut dbg, &["break 50"]);
    assert_eq!(
        dbg.calls,
        vec![Call::CreateBreakpoint(BreakpointRequest::Line {
            file: ws.main_go_str(),
            line: 50,
        })]
    );

    let state = StateStore::new(ws.state_file()).load();
    assert_eq!(
        state.breakpoints,
        BTreeMap::from([(ws.main_go_str(), vec![50])])
    );

    let frames = session.frames();
    assert_eq!(pane(frames[1], "Breakpoints"), vec!["1  main.go:50 (main.main)"]);
}

#[test]
fn test_break_aliases_and_targets() {
    let ws = Workspace::new();
    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42);

    let session = run_session(
        &ws,
        &mut dbg,
        &["b 7", "b util.go:12", "break /abs/other.go:3", "break main.helper"],
    );

    let dir = ws.main_go().parent().unwrap().to_path_buf();
    assert_eq!(
        dbg.calls,
        vec![
            Call::CreateBreakpoint(BreakpointRequest::Line {
                file: ws.main_go_str(),
                line: 7,
            }),
            Call::CreateBreakpoint(BreakpointRequest::Line {
                file: dir.join("util.go").to_string_lossy().into_owned(),
                line: 12,
            }),
            Call::CreateBreakpoint(BreakpointRequest::Line {
                file: "/abs/other.go".to_string(),
                line: 3,
            }),
            Call::CreateBreakpoint(BreakpointRequest::Function("main.helper".to_string())),
        ]
    );

    let frames = session.frames();
    assert_eq!(
        pane(frames[4], "Breakpoints"),
        vec![
            "1  main.go:7 (main.main)",
            "2  util.go:12 (main.main)",
            "3  other.go:3 (main.main)",
            "4  lib.go:21 (main.helper)",
        ]
    );

    let state = StateStore::new(ws.state_file()).load();
    assert_eq!(state.breakpoints.len(), 4);
    assert_eq!(state.breakpoints["/src/app/lib.go"], vec![21]);
}

#[test]
fn test_break_and_clear() {
    let ws = Workspace::new();
    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42);

    let session = run_session(&ws, &mut dbg, &["break 50", "break 51", "c 1", "clear 7"]);
    assert_eq!(dbg.calls[2], Call::ClearBreakpoint(1));
    assert_eq!(dbg.calls[3], Call::ClearBreakpoint(7));

    let frames = session.frames();
    assert_eq!(pane(frames[3], "Breakpoints"), vec!["2  main.go:51 (main.main)"]);

    let state = StateStore::new(ws.state_file()).load();
    assert_eq!(
        state.breakpoints,
        BTreeMap::from([(ws.main_go_str(), vec![51])])
    );
}

#[test]
fn test_rejected_breakpoint() {
    let ws = Workspace::new();
    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42);

    let session = run_session(&ws, &mut dbg, &["break 0", "break x.go:y", "clear abc"]);
    assert_eq!(
        dbg.calls,
        vec![Call::CreateBreakpoint(BreakpointRequest::Line {
            file: ws.main_go_str(),
            line: 0,
        })]
    );
    assert_eq!(session.frames().len(), 4);
    assert!(StateStore::new(ws.state_file()).load().breakpoints.is_empty());
}

#[test]
fn test_breakpoints_restored_on_start() {
    let ws = Workspace::new();

    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42);
    run_session(&ws, &mut dbg, &["break 44", "break 12"]);

    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42);
    let session = run_session(&ws, &mut dbg, &[]);
    assert_eq!(
        dbg.calls,
        vec![
            Call::CreateBreakpoint(BreakpointRequest::Line {
                file: ws.main_go_str(),
                line: 12,
            }),
            Call::CreateBreakpoint(BreakpointRequest::Line {
                file: ws.main_go_str(),
                line: 44,
            }),
        ]
    );
    assert_eq!(
        pane(session.frames()[0], "Breakpoints"),
        vec!["1  main.go:12 (main.main)", "2  main.go:44 (main.main)"]
    );

    let state = StateStore::new(ws.state_file()).load();
    assert_eq!(
        state.breakpoints,
        BTreeMap::from([(ws.main_go_str(), vec![12, 44])])
    );
}
