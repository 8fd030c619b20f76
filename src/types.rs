//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including the machine configuration, transitions, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// An atomic tape character.
pub type Symbol = String;
/// A named configuration of the control unit.
pub type State = String;
/// Signed head displacement applied after a write.
pub type Movement = i64;

/// The blank symbol. The tape is conceptually filled with it to the right.
pub const BLANK_SYMBOL: &str = "";
/// The designated initial state.
pub const INITIAL_STATE: &str = "q0";
/// Description given to the initial state when the caller does not declare it.
pub const INITIAL_STATE_DESCRIPTION: &str = "initial state";

/// How far past the end of the tape a single move may put the head. Walking right one cell at
/// a time is never limited; a move that jumps further halts with [`HaltReason::HeadOutOfRange`].
pub const MAX_TAPE_GAP: i64 = 1 << 20;

/// The `(state, symbol)` pair a transition is looked up by.
pub type TransitionKey = (State, Symbol);

/// The right-hand side of a transition: what the machine does once a key matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The state the machine moves into.
    pub next_state: State,
    /// The symbol written at the head position that was read.
    pub write: Symbol,
    /// Head displacement, applied after the write.
    pub movement: Movement,
}

impl Action {
    pub fn new(next_state: impl Into<State>, write: impl Into<Symbol>, movement: Movement) -> Self {
        Self {
            next_state: next_state.into(),
            write: write.into(),
            movement,
        }
    }
}

/// Deterministic rule set mapping `(state, symbol)` to an [`Action`].
pub type TransitionTable = HashMap<TransitionKey, Action>;

/// The immutable description of a machine.
///
/// Built once through [`MachineConfig::new`], which inserts the initial state `q0` and the
/// blank symbol when the caller omitted them. Nothing else is checked here: transitions that
/// reference undeclared states or symbols are kept as given.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineConfig {
    alphabet: Vec<Symbol>,
    external_alphabet: Vec<Symbol>,
    states: HashMap<State, String>,
    transitions: TransitionTable,
}

impl MachineConfig {
    pub fn new(
        mut alphabet: Vec<Symbol>,
        external_alphabet: Vec<Symbol>,
        mut states: HashMap<State, String>,
        transitions: TransitionTable,
    ) -> Self {
        states
            .entry(INITIAL_STATE.to_string())
            .or_insert_with(|| INITIAL_STATE_DESCRIPTION.to_string());

        if !alphabet.iter().any(|s| s == BLANK_SYMBOL) {
            alphabet.push(BLANK_SYMBOL.to_string());
        }

        Self {
            alphabet,
            external_alphabet,
            states,
            transitions,
        }
    }

    /// The working alphabet, always containing the blank symbol.
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// Symbols considered valid machine output.
    pub fn external_alphabet(&self) -> &[Symbol] {
        &self.external_alphabet
    }

    /// Declared states and their descriptions, always containing `q0`.
    pub fn states(&self) -> &HashMap<State, String> {
        &self.states
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Looks up the action for `(state, symbol)`.
    pub fn action(&self, state: &str, symbol: &str) -> Option<&Action> {
        // The table is keyed by owned pairs, so borrowed lookups need a temporary key.
        self.transitions
            .get(&(state.to_string(), symbol.to_string()))
    }

    pub fn is_external(&self, symbol: &str) -> bool {
        self.external_alphabet.iter().any(|s| s == symbol)
    }
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine performed a transition and can keep going.
    Continue,
    /// The machine has halted.
    Halt(HaltReason),
}

/// Why a machine stopped. Every variant is normal termination, not an error.
///
/// Once a machine has halted, further calls to
/// [`TuringMachine::step`](crate::TuringMachine::step) return the same reason and change
/// nothing until the machine is reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// No transition is defined for the current state and the symbol under the head.
    UndefinedTransition { state: State, symbol: Symbol },
    /// A move took the head left of cell 0. The triggering write and state change were applied.
    LeftBoundary { head: i64 },
    /// A move put the head more than [`MAX_TAPE_GAP`] cells past the end of the tape. A move
    /// that overflows `i64` saturates to `i64::MAX` first. The triggering write and state
    /// change were applied.
    HeadOutOfRange { head: i64 },
}

/// Represents various errors that can occur while loading or validating a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Indicates an error during strict validation of a machine configuration.
    #[error("Machine validation error: {0}")]
    ValidationError(String),
    /// Indicates that a machine definition could not be decoded.
    #[error("Machine definition error: {0}")]
    DefinitionError(String),
    /// Indicates an error related to file system operations, such as reading definition files.
    #[error("File error: {0}")]
    FileError(String),
}
