//! This module provides the `ProgramLoader` struct, responsible for loading machine definitions
//! written as JSON from files and strings, and the `MachineDefinition` they decode into.

use crate::types::{
    Action, MachineConfig, Movement, State, Symbol, TransitionTable, TuringMachineError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of machine definition files.
pub const DEFINITION_EXTENSION: &str = "json";

/// One transition as written in a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The state the rule applies in.
    pub state: State,
    /// The symbol under the head the rule applies to. Omit for the blank.
    #[serde(default)]
    pub read: Symbol,
    /// The state to move into.
    pub next: State,
    /// The symbol to write. Omit for the blank.
    #[serde(default)]
    pub write: Symbol,
    /// Head displacement, any signed integer.
    #[serde(rename = "move", default)]
    pub movement: Movement,
}

/// A machine as stored on disk.
///
/// Transitions are a list rather than a map because JSON object keys cannot be
/// `(state, symbol)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDefinition {
    #[serde(default)]
    pub name: String,
    pub alphabet: Vec<Symbol>,
    pub external_alphabet: Vec<Symbol>,
    #[serde(default)]
    pub states: HashMap<State, String>,
    #[serde(default)]
    pub transitions: Vec<Rule>,
    /// Default input tape, used when the caller supplies none.
    #[serde(default)]
    pub input: Vec<Symbol>,
    /// Requests strict validation before running.
    #[serde(default)]
    pub strict: bool,
}

impl MachineDefinition {
    /// Builds the transition table. A later rule for the same `(state, read)` pair replaces an
    /// earlier one.
    pub fn transition_table(&self) -> TransitionTable {
        let mut table = TransitionTable::new();
        for rule in &self.transitions {
            let key = (rule.state.clone(), rule.read.clone());
            let action = Action::new(rule.next.clone(), rule.write.clone(), rule.movement);
            if table.insert(key, action).is_some() {
                log::warn!(
                    "Definition '{}' has duplicate rule for ({}, {:?}); keeping the last one",
                    self.name,
                    rule.state,
                    rule.read
                );
            }
        }
        table
    }

    /// Converts the definition into a `MachineConfig`, applying its construction-time
    /// normalisation.
    pub fn into_config(self) -> MachineConfig {
        let transitions = self.transition_table();
        MachineConfig::new(
            self.alphabet,
            self.external_alphabet,
            self.states,
            transitions,
        )
    }
}

/// `ProgramLoader` is a utility struct for loading machine definitions.
/// It provides methods to load definitions from individual files, from string content,
/// and to discover and load all `.json` files within a specified directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single machine definition from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` if the file is read and decoded.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::DefinitionError)` if the content is not a valid definition.
    pub fn load_definition(path: &Path) -> Result<MachineDefinition, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        log::debug!("Loaded definition file {}", path.display());
        Self::load_definition_from_string(&content)
    }

    /// Decodes a machine definition from JSON text.
    pub fn load_definition_from_string(
        content: &str,
    ) -> Result<MachineDefinition, TuringMachineError> {
        serde_json::from_str(content)
            .map_err(|e| TuringMachineError::DefinitionError(e.to_string()))
    }

    /// Loads all definition files (`.json` extension) from a given directory.
    ///
    /// Directories and files with other extensions are skipped. Each entry in the result is
    /// either the path and its definition, or the error that file produced.
    pub fn load_definitions(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDefinition), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(DEFINITION_EXTENSION)
            })
            .map(|path| Self::load_definition(&path).map(|definition| (path, definition)))
            .collect();

        // Directory order is platform dependent.
        results.sort_by_key(|result| result.as_ref().ok().map(|(path, _)| path.clone()));
        results
    }
}
