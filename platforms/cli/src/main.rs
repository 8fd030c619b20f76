use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tmsim::{
    analyze, LogTrace, MachineDefinition, ProgramLoader, Symbol, TraceSink, TuringMachine,
    TuringMachineError, WriterTrace, BLANK_SYMBOL,
};

/// Input symbol standing for the blank on the command line.
const INPUT_BLANK_SYMBOL: &str = "_";

/// Runs a single-tape Turing machine described by a JSON definition.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tmsim --program unary.json --input 1,1
  cat unary.json | tmsim --trace")]
struct Cli {
    /// The machine definition file. Read from stdin when omitted.
    #[clap(short, long)]
    program: Option<PathBuf>,

    /// Comma-separated input symbols, `_` for the blank. Defaults to the definition's input.
    #[clap(short, long, value_delimiter = ',')]
    input: Option<Vec<String>>,

    /// Print each step of the execution to stdout
    #[clap(short, long)]
    trace: bool,

    /// Validate the machine before running it
    #[clap(short, long)]
    strict: bool,

    /// Give up after this many steps
    #[clap(short, long)]
    max_steps: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(Some(output)) => {
            println!("{}", output.join(","));
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("Machine did not halt within the step limit.");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Option<Vec<Symbol>>, TuringMachineError> {
    let definition = load(cli.program.as_deref())?;

    let input: Vec<Symbol> = match cli.input {
        Some(symbols) => symbols
            .into_iter()
            .map(|s| {
                if s == INPUT_BLANK_SYMBOL {
                    BLANK_SYMBOL.to_string()
                } else {
                    s
                }
            })
            .collect(),
        None => definition.input.clone(),
    };

    let strict = cli.strict || definition.strict;
    log::info!("Running machine '{}' on {:?}", definition.name, input);
    let config = definition.into_config();
    if strict {
        analyze(&config)?;
    }

    let sink: Box<dyn TraceSink> = if cli.trace {
        Box::new(WriterTrace::new(io::stdout()))
    } else {
        Box::new(LogTrace)
    };
    let mut machine = TuringMachine::with_sink(config, sink);

    let Some(limit) = cli.max_steps else {
        return Ok(Some(machine.run(input)));
    };

    machine.reset(input);
    while !machine.is_halted() && machine.step_count() < limit {
        machine.step();
    }

    if machine.is_halted() {
        Ok(Some(machine.finish()))
    } else {
        log::warn!("Stopped after {} steps in state {}", limit, machine.state());
        Ok(None)
    }
}

fn load(path: Option<&std::path::Path>) -> Result<MachineDefinition, TuringMachineError> {
    match path {
        Some(path) => ProgramLoader::load_definition(path),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| TuringMachineError::FileError(format!("Failed to read stdin: {}", e)))?;
            ProgramLoader::load_definition_from_string(&content)
        }
        None => Err(TuringMachineError::FileError(
            "No program given; pass --program or pipe a definition on stdin".to_string(),
        )),
    }
}
