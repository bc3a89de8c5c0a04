use super::runner::{CommandSpec, ProcessExit, ProcessRunner};
use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

type SideEffect = Box<dyn Fn(&CommandSpec) + Send + Sync>;

/// Scripted outcome for one process invocation.
pub struct MockRun {
    outcome: Result<ProcessExit, io::ErrorKind>,
    effect: Option<SideEffect>,
}

impl MockRun {
    pub fn success() -> Self {
        Self {
            outcome: Ok(ProcessExit::success()),
            effect: None,
        }
    }

    pub fn exit_code(code: i32) -> Self {
        Self {
            outcome: Ok(ProcessExit::code(code)),
            effect: None,
        }
    }

    pub fn signal() -> Self {
        Self {
            outcome: Ok(ProcessExit { code: None }),
            effect: None,
        }
    }

    pub fn spawn_error(kind: io::ErrorKind) -> Self {
        Self {
            outcome: Err(kind),
            effect: None,
        }
    }

    /// Run `effect` when the invocation happens, e.g. to write the artifact
    /// the real tool would have produced.
    pub fn with_effect(mut self, effect: impl Fn(&CommandSpec) + Send + Sync + 'static) -> Self {
        self.effect = Some(Box::new(effect));
        self
    }
}

/// Process runner that records every command and replays scripted outcomes.
///
/// Invocations beyond the scripted ones succeed without side effects.
pub struct MockProcessRunner {
    runs: Mutex<VecDeque<MockRun>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self {
            runs: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn add_run(&self, run: MockRun) {
        self.runs.lock().unwrap().push_back(run);
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for MockProcessRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<ProcessExit> {
        self.calls.lock().unwrap().push(spec.clone());

        let run = self
            .runs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(MockRun::success);

        if let Some(effect) = &run.effect {
            effect(spec);
        }

        run.outcome
            .map_err(|kind| io::Error::new(kind, format!("mock spawn failure: {:?}", kind)))
    }
}
