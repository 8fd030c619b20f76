//! This crate provides a deterministic single-tape Turing Machine simulator.
//! It includes the step-execution engine, pluggable step tracing, opt-in strict validation of
//! machine configurations, and loading of machine definitions from JSON.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the loader types.
pub use loader::{MachineDefinition, ProgramLoader};
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the trace sinks.
pub use trace::{LogTrace, MemoryTrace, NullTrace, TraceEvent, TraceSink, WriterTrace};
/// Re-exports the data model and error types from the types module.
pub use types::{
    Action, HaltReason, MachineConfig, Movement, State, Step, Symbol, TransitionTable,
    TuringMachineError, BLANK_SYMBOL, INITIAL_STATE, MAX_TAPE_GAP,
};
