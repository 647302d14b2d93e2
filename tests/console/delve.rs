use crate::common::{pane, ScriptedInput, Workspace, CLEAR_SCREEN};
use dlvview::debugger::delve::DelveClient;
use dlvview::debugger::{DebugFacade, Scope};
use dlvview::ui::command::interpreter::Termination;
use dlvview::ui::console::AppBuilder;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Serve delve requests with results produced by `answer` until the client disconnects.
/// Return names of called methods.
fn serve(
    answer: impl Fn(&str, &Value) -> Value + Send + 'static,
) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut writer = stream.try_clone().unwrap();
        let mut methods = vec![];
        for line in BufReader::new(stream).lines() {
            let Ok(line) = line else { break };
            let request: Value = serde_json::from_str(&line).unwrap();
            let method = request["method"]
                .as_str()
                .unwrap()
                .trim_start_matches("RPCServer.")
                .to_string();
            let response = json!({
                "id": request["id"],
                "result": answer(&method, &request["params"][0]),
                "error": null,
            });
            writeln!(writer, "{response}").unwrap();
            methods.push(method);
        }
        methods
    });
    (addr, handle)
}

fn stopped_state(file: &str, line: i64) -> Value {
    json!({"State": {
        "currentThread": {"id": 1, "pc": 4849680, "file": file, "line": line, "goroutineID": 1},
        "Threads": [{"id": 1, "pc": 4849680, "file": file, "line": line, "goroutineID": 1}],
        "exited": false
    }})
}

#[test]
fn test_connect_and_query() {
    let (addr, server) = serve(|method, params| match method {
        "SetApiVersion" => {
            assert_eq!(params["APIVersion"], 2);
            json!({})
        }
        "State" => stopped_state("/src/app/main.go", 12),
        "Eval" => json!({"Variable": {
            "name": params["Expr"], "type": "string", "kind": 24, "value": "hello", "len": 5
        }}),
        other => panic!("unexpected method {other}"),
    });

    let mut client = DelveClient::connect(addr.as_str()).unwrap();
    let stop = client.current_stop().unwrap();
    assert_eq!(stop.file, "/src/app/main.go");
    assert_eq!(stop.line, 12);
    assert_eq!(stop.goroutine_id, 1);

    let var = client.evaluate(Scope::goroutine(stop.goroutine_id), "greeting").unwrap();
    assert_eq!(var.name, "greeting");
    assert_eq!(var.value, "\"hello\"");

    drop(client);
    assert_eq!(server.join().unwrap(), vec!["SetApiVersion", "State", "Eval"]);
}

#[test]
fn test_session_over_tcp() {
    let ws = Workspace::new();
    let main_go = ws.main_go_str();

    let file = main_go.clone();
    let (addr, server) = serve(move |method, params| match method {
        "SetApiVersion" => json!({}),
        "State" => stopped_state(&file, 20),
        "ListBreakpoints" => json!({"Breakpoints": null}),
        "ListFunctionArgs" => json!({"Args": [{"name": "n", "kind": 2, "value": "3"}]}),
        "ListLocalVars" => json!({"Variables": []}),
        "Disassemble" => {
            assert_eq!(params["StartPC"], 4849680);
            json!({"Disassemble": [{
                "Loc": {"pc": 4849680, "file": file, "line": 20},
                "Text": "NOPL",
                "Bytes": "kA==",
                "AtPC": true
            }]})
        }
        "Command" => {
            assert_eq!(params["name"], "next");
            stopped_state(&file, 21)
        }
        other => panic!("unexpected method {other}"),
    });

    let client = DelveClient::connect(addr.as_str()).unwrap();
    let mut output = Vec::new();
    let termination = AppBuilder::new()
        .width(60)
        .colored(false)
        .build(client, ScriptedInput::new(&["next", "q"]), &mut output)
        .and_then(|app| app.run())
        .unwrap();
    assert_eq!(termination, Termination::Quit);

    let methods = server.join().unwrap();
    assert_eq!(methods.iter().filter(|m| *m == "Command").count(), 1);
    assert_eq!(methods.iter().filter(|m| *m == "State").count(), 2);

    let output = String::from_utf8(output).unwrap();
    let frame = output
        .split(CLEAR_SCREEN)
        .nth(1)
        .unwrap()
        .trim_start_matches("\x1b[1;1H");
    assert_eq!(pane(frame, "Variables"), vec!["fun n = 3"]);
    assert!(pane(frame, "Assembly")[0].starts_with("0x4a0010  90  NOPL"));
    assert!(pane(frame, "Source")[4].starts_with(" 20 "));
}
