use crate::debugger::{
    AsmInstruction, Breakpoint, DebugFacade, Error, Scope, StopLocation, Variable,
};
use log::debug;

/// Everything a single frame shows, queried from the debugger at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopSnapshot {
    pub location: StopLocation,
    /// Breakpoints ordered by id.
    pub breakpoints: Vec<Breakpoint>,
    pub arguments: Vec<Variable>,
    pub locals: Vec<Variable>,
    pub assembly: Vec<AsmInstruction>,
    /// One entry per watch expression, in the same order.
    pub watches: Vec<Variable>,
}

impl StopSnapshot {
    /// Query the debugger state.
    ///
    /// Variables and assembly require a selected goroutine, without it they stay empty and
    /// watch expressions are shown unevaluated. A watch expression that fails to evaluate gets
    /// an empty value, any other failure is returned.
    pub fn capture(dbg: &mut impl DebugFacade, watch: &[String]) -> Result<Self, Error> {
        let location = dbg.current_stop()?;
        let mut breakpoints = dbg.breakpoints()?;
        breakpoints.sort_by_key(|brkpt| brkpt.id);

        if location.goroutine_id == 0 {
            return Ok(Self {
                location,
                breakpoints,
                watches: watch.iter().map(Variable::placeholder).collect(),
                ..Default::default()
            });
        }

        let scope = Scope::goroutine(location.goroutine_id);
        let arguments = dbg.function_arguments(scope)?;
        let locals = dbg.local_variables(scope)?;
        let assembly = dbg.disassemble(scope, location.pc)?;

        let mut watches = Vec::with_capacity(watch.len());
        for expr in watch {
            let var = match dbg.evaluate(scope, expr) {
                Ok(var) => Variable::new(expr, var.value),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    debug!(target: "dlvview", "evaluate `{expr}`: {e:#}");
                    Variable::placeholder(expr)
                }
            };
            watches.push(var);
        }

        Ok(Self {
            location,
            breakpoints,
            arguments,
            locals,
            assembly,
            watches,
        })
    }
}
