use crate::common::{pane, run_session, FakeDebugger, Workspace};
use dlvview::ui::state::StateStore;

#[test]
fn test_watch_and_unwatch() {
    let ws = Workspace::new();
    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42)
        .with_value("x", "1")
        .with_value("y", "\"text\"");

    let session = run_session(
        &ws,
        &mut dbg,
        &["watch x", "w y", "watch x", "unwatch 1", "uw x", "unwatch 5"],
    );
    let frames = session.frames();

    assert_eq!(pane(frames[3], "Watch"), vec!["1 x = 1", "2 y = \"text\"", "3 x = 1"]);
    assert_eq!(pane(frames[4], "Watch"), vec!["1 y = \"text\"", "2 x = 1"]);
    assert_eq!(pane(frames[5], "Watch"), vec!["1 y = \"text\""]);
    assert_eq!(pane(frames[6], "Watch"), vec!["1 y = \"text\""]);

    let state = StateStore::new(ws.state_file()).load();
    assert_eq!(state.watch, vec!["y"]);
}

#[test]
fn test_unwatch_removes_duplicates() {
    let ws = Workspace::new();
    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42);

    run_session(&ws, &mut dbg, &["watch a", "watch b", "watch a", "unwatch a"]);
    let state = StateStore::new(ws.state_file()).load();
    assert_eq!(state.watch, vec!["b"]);
}

#[test]
fn test_failed_watch_expression() {
    let ws = Workspace::new();
    let mut dbg = FakeDebugger::stopped_at(&ws.main_go(), 42).with_value("ok", "true");

    let session = run_session(&ws, &mut dbg, &["watch nosuchvar", "watch ok"]);
    let frames = session.frames();
    assert_eq!(pane(frames[2], "Watch"), vec!["1 nosuchvar = ", "2 ok = true"]);
}
