//! This module provides the opt-in strict validation of a `MachineConfig`. Machines built with
//! [`TuringMachine::new`](crate::TuringMachine::new) skip it entirely and tolerate any table;
//! [`TuringMachine::strict`](crate::TuringMachine::strict) runs [`analyze`] first.

use crate::types::{MachineConfig, TuringMachineError};
use std::collections::HashSet;

/// Represents the problems strict validation can find in a machine configuration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Transitions that start from states not declared in the state set.
    UndeclaredSourceStates(Vec<String>),
    /// Transitions that lead to states not declared in the state set.
    UndeclaredNextStates(Vec<String>),
    /// Symbols read or written by transitions that are not in the working alphabet.
    UnknownSymbols(Vec<String>),
    /// Output symbols that are not in the working alphabet.
    ExternalNotInAlphabet(Vec<String>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::UndeclaredSourceStates(states) => TuringMachineError::ValidationError(
                format!("Transitions start from undeclared states: {:?}", states),
            ),
            AnalysisError::UndeclaredNextStates(states) => TuringMachineError::ValidationError(
                format!("Transitions lead to undeclared states: {:?}", states),
            ),
            AnalysisError::UnknownSymbols(symbols) => TuringMachineError::ValidationError(
                format!("Transitions use symbols outside the alphabet: {:?}", symbols),
            ),
            AnalysisError::ExternalNotInAlphabet(symbols) => {
                TuringMachineError::ValidationError(format!(
                    "External alphabet contains symbols outside the alphabet: {:?}",
                    symbols
                ))
            }
        }
    }
}

/// Analyzes a `MachineConfig` for references outside its declared states and alphabets.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` for the first check that fails.
pub fn analyze(config: &MachineConfig) -> Result<(), TuringMachineError> {
    let errors = [
        check_source_states,
        check_next_states,
        check_symbols,
        check_external_alphabet,
    ]
    .iter()
    .filter_map(|f| f(config).err())
    .collect::<Vec<_>>();

    if let Some(first_error) = errors.into_iter().next() {
        log::warn!("Strict validation failed: {:?}", first_error);
        return Err(first_error.into());
    }

    Ok(())
}

/// Sorts and deduplicates offending names so that error messages are deterministic.
fn sorted(items: HashSet<String>) -> Vec<String> {
    let mut items: Vec<String> = items.into_iter().collect();
    items.sort();
    items
}

fn check_source_states(config: &MachineConfig) -> Result<(), AnalysisError> {
    let undeclared: HashSet<String> = config
        .transitions()
        .keys()
        .map(|(state, _)| state)
        .filter(|state| !config.states().contains_key(*state))
        .cloned()
        .collect();

    if undeclared.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::UndeclaredSourceStates(sorted(undeclared)))
    }
}

fn check_next_states(config: &MachineConfig) -> Result<(), AnalysisError> {
    let undeclared: HashSet<String> = config
        .transitions()
        .values()
        .map(|action| &action.next_state)
        .filter(|state| !config.states().contains_key(*state))
        .cloned()
        .collect();

    if undeclared.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::UndeclaredNextStates(sorted(undeclared)))
    }
}

/// Checks both the symbols transitions read and the symbols they write.
fn check_symbols(config: &MachineConfig) -> Result<(), AnalysisError> {
    let alphabet: HashSet<&str> = config.alphabet().iter().map(String::as_str).collect();

    let unknown: HashSet<String> = config
        .transitions()
        .iter()
        .flat_map(|((_, read), action)| [read, &action.write])
        .filter(|symbol| !alphabet.contains(symbol.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::UnknownSymbols(sorted(unknown)))
    }
}

fn check_external_alphabet(config: &MachineConfig) -> Result<(), AnalysisError> {
    let outside: HashSet<String> = config
        .external_alphabet()
        .iter()
        .filter(|symbol| !config.alphabet().contains(symbol))
        .cloned()
        .collect();

    if outside.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::ExternalNotInAlphabet(sorted(outside)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, TransitionTable};
    use std::collections::HashMap;

    fn symbols(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    fn config(external: &[&str], rules: &[(&str, &str, &str, &str, i64)]) -> MachineConfig {
        let mut states = HashMap::new();
        states.insert("qf".to_string(), String::new());

        let transitions: TransitionTable = rules
            .iter()
            .map(|&(state, read, next, write, movement)| {
                (
                    (state.to_string(), read.to_string()),
                    Action::new(next, write, movement),
                )
            })
            .collect();

        MachineConfig::new(symbols(&["0", "1"]), symbols(external), states, transitions)
    }

    #[test]
    fn test_valid_config() {
        let config = config(&["0", "1"], &[("q0", "1", "qf", "0", 1), ("qf", "", "q0", "1", -1)]);
        assert!(analyze(&config).is_ok());
    }

    #[test]
    fn test_empty_table_is_valid() {
        assert!(analyze(&config(&[], &[])).is_ok());
    }

    #[test]
    fn test_undeclared_source_states() {
        let config = config(&["1"], &[("qz", "1", "qf", "1", 1), ("qa", "0", "qf", "1", 1)]);
        assert_eq!(
            check_source_states(&config),
            Err(AnalysisError::UndeclaredSourceStates(symbols(&["qa", "qz"])))
        );
    }

    #[test]
    fn test_undeclared_next_states() {
        let config = config(&["1"], &[("q0", "1", "qx", "1", 1)]);
        assert_eq!(
            check_next_states(&config),
            Err(AnalysisError::UndeclaredNextStates(symbols(&["qx"])))
        );

        let result = analyze(&config);
        assert!(matches!(
            result,
            Err(TuringMachineError::ValidationError(msg)) if msg.contains("qx")
        ));
    }

    #[test]
    fn test_unknown_symbols_read_and_written() {
        let config = config(&["1"], &[("q0", "a", "qf", "b", 1), ("qf", "1", "qf", "1", 0)]);
        assert_eq!(
            check_symbols(&config),
            Err(AnalysisError::UnknownSymbols(symbols(&["a", "b"])))
        );
    }

    #[test]
    fn test_external_alphabet_outside_alphabet() {
        let config = config(&["1", "x"], &[]);
        assert_eq!(
            check_external_alphabet(&config),
            Err(AnalysisError::ExternalNotInAlphabet(symbols(&["x"])))
        );
    }

    #[test]
    fn test_blank_is_always_a_known_symbol() {
        let config = config(&[""], &[("q0", "", "qf", "", 1)]);
        assert!(analyze(&config).is_ok());
    }
}
