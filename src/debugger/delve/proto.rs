//! Wire types of the delve API (version 2).
//!
//! Only fields that the front-end reads are declared, delve ignores absent input fields and
//! serde ignores unknown output fields.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Debug)]
pub struct Request<'a, T: Serialize> {
    pub method: String,
    pub params: [&'a T; 1],
    pub id: u64,
}

#[derive(Deserialize, Debug)]
pub struct Response {
    pub id: u64,
    #[serde(default)]
    pub result: serde_json::Value,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct EvalScope {
    #[serde(rename = "GoroutineID")]
    pub goroutine_id: i64,
    #[serde(rename = "Frame")]
    pub frame: i64,
    #[serde(rename = "DeferredCall")]
    pub deferred_call: i64,
}

#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "PascalCase")]
pub struct LoadConfig {
    pub follow_pointers: bool,
    pub max_variable_recurse: i64,
    pub max_string_len: i64,
    pub max_array_values: i64,
    pub max_struct_fields: i64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            follow_pointers: true,
            max_variable_recurse: 1,
            max_string_len: 64,
            max_array_values: 64,
            max_struct_fields: -1,
        }
    }
}

/// Go assembly syntax.
pub const GO_FLAVOUR: i64 = 2;

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct SetApiVersionIn {
    #[serde(rename = "APIVersion")]
    pub api_version: i64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct StateIn {
    pub non_blocking: bool,
}

#[derive(Deserialize, Debug)]
pub struct StateOut {
    #[serde(rename = "State")]
    pub state: Option<DebuggerState>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DebuggerState {
    #[serde(rename = "currentThread", default)]
    pub current_thread: Option<Thread>,
    #[serde(rename = "Threads", default, deserialize_with = "null_as_default")]
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub exited: bool,
    #[serde(rename = "exitStatus", default)]
    pub exit_status: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct Thread {
    #[serde(default)]
    pub pc: u64,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: i64,
    #[serde(rename = "goroutineID", default)]
    pub goroutine_id: i64,
    #[serde(rename = "breakPoint", default)]
    pub breakpoint: Option<Breakpoint>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Breakpoint {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub line: i64,
    #[serde(rename = "functionName", default, skip_serializing_if = "String::is_empty")]
    pub function_name: String,
    #[serde(rename = "continue", default, skip_serializing)]
    pub tracepoint: bool,
    #[serde(rename = "traceReturn", default, skip_serializing)]
    pub trace_return: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBreakpointIn {
    pub breakpoint: Breakpoint,
}

#[derive(Deserialize, Debug)]
pub struct BreakpointOut {
    #[serde(rename = "Breakpoint")]
    pub breakpoint: Option<Breakpoint>,
}

#[derive(Serialize, Debug)]
pub struct ClearBreakpointIn {
    #[serde(rename = "Id")]
    pub id: i64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListBreakpointsIn {
    pub all: bool,
}

#[derive(Deserialize, Debug)]
pub struct ListBreakpointsOut {
    #[serde(rename = "Breakpoints", default, deserialize_with = "null_as_default")]
    pub breakpoints: Vec<Breakpoint>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListVarsIn {
    pub scope: EvalScope,
    pub cfg: LoadConfig,
}

#[derive(Deserialize, Debug)]
pub struct ListLocalVarsOut {
    #[serde(rename = "Variables", default, deserialize_with = "null_as_default")]
    pub variables: Vec<Variable>,
}

#[derive(Deserialize, Debug)]
pub struct ListFunctionArgsOut {
    #[serde(rename = "Args", default, deserialize_with = "null_as_default")]
    pub args: Vec<Variable>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct EvalIn<'a> {
    pub scope: EvalScope,
    pub expr: &'a str,
    pub cfg: LoadConfig,
}

#[derive(Deserialize, Debug)]
pub struct EvalOut {
    #[serde(rename = "Variable")]
    pub variable: Option<Variable>,
}

#[derive(Serialize, Debug)]
pub struct DisassembleIn {
    #[serde(rename = "Scope")]
    pub scope: EvalScope,
    #[serde(rename = "StartPC")]
    pub start_pc: u64,
    #[serde(rename = "EndPC")]
    pub end_pc: u64,
    #[serde(rename = "Flavour")]
    pub flavour: i64,
}

#[derive(Deserialize, Debug)]
pub struct DisassembleOut {
    #[serde(rename = "Disassemble", default, deserialize_with = "null_as_default")]
    pub instructions: Vec<AsmInstruction>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Location {
    #[serde(default)]
    pub pc: u64,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct AsmInstruction {
    #[serde(rename = "Loc", default)]
    pub loc: Location,
    #[serde(rename = "Text", default)]
    pub text: String,
    /// Base64, as go encodes byte slices.
    #[serde(rename = "Bytes", default)]
    pub bytes: Option<String>,
    #[serde(rename = "Breakpoint", default)]
    pub breakpoint: bool,
    #[serde(rename = "AtPC", default)]
    pub at_pc: bool,
}

#[derive(Serialize, Debug)]
pub struct DebuggerCommand {
    pub name: &'static str,
}

#[derive(Deserialize, Debug)]
pub struct CommandOut {
    #[serde(rename = "State", default)]
    pub state: DebuggerState,
}

/// Go `reflect.Kind` of a variable.
pub mod kind {
    pub const INVALID: u64 = 0;
    pub const ARRAY: u64 = 17;
    pub const CHAN: u64 = 18;
    pub const FUNC: u64 = 19;
    pub const INTERFACE: u64 = 20;
    pub const MAP: u64 = 21;
    pub const PTR: u64 = 22;
    pub const SLICE: u64 = 23;
    pub const STRING: u64 = 24;
    pub const STRUCT: u64 = 25;
    pub const UNSAFE_POINTER: u64 = 26;
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Variable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub addr: u64,
    #[serde(rename = "onlyAddr", default)]
    pub only_addr: bool,
    #[serde(rename = "type", default)]
    pub r#type: String,
    #[serde(default)]
    pub kind: u64,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub len: i64,
    #[serde(default)]
    pub cap: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Variable>,
    #[serde(default)]
    pub unreadable: String,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// Go encodes nil slices as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
