//! This module defines the `TuringMachine` struct, the step-execution engine of a deterministic
//! single-tape Turing Machine. It owns the run state (tape, head, current state, step counter)
//! and drives it through the immutable `MachineConfig`.

use crate::analyzer::analyze;
use crate::tape::Tape;
use crate::trace::{LogTrace, TraceEvent, TraceSink};
use crate::types::{
    HaltReason, MachineConfig, State, Step, Symbol, TuringMachineError, INITIAL_STATE,
    MAX_TAPE_GAP,
};

/// A single-tape Turing Machine.
///
/// The configuration is fixed at construction. Everything else is run state, reset by
/// [`TuringMachine::run`] and [`TuringMachine::reset`]. Both take `&mut self`, so one instance
/// runs at most one computation at a time.
pub struct TuringMachine<S: TraceSink = LogTrace> {
    config: MachineConfig,
    tape: Tape,
    head: i64,
    state: State,
    halted: Option<HaltReason>,
    step_count: u64,
    sink: S,
}

impl TuringMachine<LogTrace> {
    /// Creates a permissive machine that traces through the `log` facade.
    pub fn new(config: MachineConfig) -> Self {
        Self::with_sink(config, LogTrace)
    }

    /// Creates a machine after checking that the configuration is self-consistent.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` if [`analyze`] finds no problems.
    /// * `Err(TuringMachineError::ValidationError)` describing the first problem found.
    pub fn strict(config: MachineConfig) -> Result<Self, TuringMachineError> {
        analyze(&config)?;
        Ok(Self::new(config))
    }
}

impl<S: TraceSink> TuringMachine<S> {
    /// Creates a permissive machine that reports its trace to `sink`.
    pub fn with_sink(config: MachineConfig, sink: S) -> Self {
        Self {
            config,
            tape: Tape::default(),
            head: 0,
            state: INITIAL_STATE.to_string(),
            halted: None,
            step_count: 0,
            sink,
        }
    }

    /// Resets the run state for a fresh computation on `input`.
    pub fn reset(&mut self, input: Vec<Symbol>) {
        self.tape = Tape::new(input);
        self.head = 0;
        self.state = INITIAL_STATE.to_string();
        self.halted = None;
        self.step_count = 0;
    }

    /// Executes a single transition.
    ///
    /// The pre-step snapshot is traced first. The symbol under the head is then read (growing
    /// the tape with blanks if the head is past its end) and looked up together with the current
    /// state. A missing transition halts without touching anything else. Otherwise the symbol is
    /// written at the position just read, the state changes and the head moves; a move that
    /// leaves the head negative, or more than [`MAX_TAPE_GAP`] cells past the end of the tape,
    /// halts the machine with the write and state change kept.
    ///
    /// Calling this on a halted machine does nothing and returns the recorded halt.
    pub fn step(&mut self) -> Step {
        if let Some(reason) = &self.halted {
            return Step::Halt(reason.clone());
        }

        self.step_count += 1;
        self.sink.record(TraceEvent::Step {
            step: self.step_count,
            state: &self.state,
            head: self.head,
            tape: self.tape.cells(),
        });

        // Only a halting move can make the head negative, and halted machines return above.
        let position = self.head as usize;
        let symbol = self.tape.read(position).to_string();

        let Some(action) = self.config.action(&self.state, &symbol) else {
            return self.halt(HaltReason::UndefinedTransition {
                state: self.state.clone(),
                symbol,
            });
        };

        self.tape.write(position, action.write.clone());
        self.state = action.next_state.clone();
        self.head = self.head.saturating_add(action.movement);

        if self.head < 0 {
            return self.halt(HaltReason::LeftBoundary { head: self.head });
        }

        let limit = (self.tape.len() as i64).saturating_add(MAX_TAPE_GAP);
        if self.head > limit {
            return self.halt(HaltReason::HeadOutOfRange { head: self.head });
        }

        Step::Continue
    }

    /// Runs the machine on `input` until it halts and returns its output.
    ///
    /// There is no step limit: a table that never reaches an undefined transition or the left
    /// boundary runs forever. Callers that need a bound should [`reset`](Self::reset) and drive
    /// [`step`](Self::step) themselves.
    ///
    /// The output is the longest prefix of the final tape made of external symbols; the first
    /// symbol outside the external alphabet ends it.
    pub fn run(&mut self, input: Vec<Symbol>) -> Vec<Symbol> {
        self.reset(input);

        while !self.is_halted() {
            self.step();
        }

        self.finish()
    }

    /// Records the run summary and returns the output.
    ///
    /// [`run`](Self::run) calls this once the machine halts. Callers driving
    /// [`step`](Self::step) themselves call it when they stop.
    pub fn finish(&mut self) -> Vec<Symbol> {
        self.sink.record(TraceEvent::Finished {
            steps: self.step_count,
        });

        let output = self.output();
        self.sink.record(TraceEvent::Output(&output));
        output
    }

    /// Reads the output off the current tape.
    pub fn output(&self) -> Vec<Symbol> {
        self.tape
            .cells()
            .iter()
            .take_while(|symbol| self.config.is_external(symbol))
            .cloned()
            .collect()
    }

    fn halt(&mut self, reason: HaltReason) -> Step {
        self.sink.record(TraceEvent::Halted(&reason));
        self.halted = Some(reason.clone());
        Step::Halt(reason)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the head position. Negative only after a left-boundary halt.
    pub fn head(&self) -> i64 {
        self.head
    }

    pub fn tape(&self) -> &[Symbol] {
        self.tape.cells()
    }

    /// Returns the number of steps executed since the last reset.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn halt_reason(&self) -> Option<&HaltReason> {
        self.halted.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
