use crate::debugger::{DebugFacade, Error, StepKind};

pub struct Handler<'a, D: DebugFacade> {
    dbg: &'a mut D,
}

impl<'a, D: DebugFacade> Handler<'a, D> {
    pub fn new(debugger: &'a mut D) -> Self {
        Self { dbg: debugger }
    }

    pub fn handle(&mut self, kind: StepKind) -> Result<(), Error> {
        self.dbg.step(kind)
    }
}
