//! Step tracing. The engine reports what it does through a [`TraceSink`]; where the records end
//! up (the `log` facade, a writer, memory, nowhere) never changes how the machine runs.

use std::fmt;
use std::io::Write;

use crate::types::{HaltReason, Symbol};

/// A single trace record, borrowing from the machine that emitted it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent<'a> {
    /// Snapshot taken before a transition is applied.
    Step {
        step: u64,
        state: &'a str,
        head: i64,
        tape: &'a [Symbol],
    },
    /// The machine stopped during the step just recorded.
    Halted(&'a HaltReason),
    /// Emitted once per run, after halting.
    Finished { steps: u64 },
    /// The output read off the final tape.
    Output(&'a [Symbol]),
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Step {
                step,
                state,
                head,
                tape,
            } => write!(f, "step {step}: state={state} head={head} tape={tape:?}"),
            TraceEvent::Halted(HaltReason::UndefinedTransition { state, symbol }) => write!(
                f,
                "transition undefined for ({state}, {symbol:?}), machine halts"
            ),
            TraceEvent::Halted(HaltReason::LeftBoundary { head }) => write!(
                f,
                "head moved past the left boundary to {head}, machine halts"
            ),
            TraceEvent::Halted(HaltReason::HeadOutOfRange { head }) => write!(
                f,
                "head moved out of range to {head}, machine halts"
            ),
            TraceEvent::Finished { steps } => write!(f, "machine halted after {steps} steps"),
            TraceEvent::Output(output) => write!(f, "output: {output:?}"),
        }
    }
}

/// Destination for trace records.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent<'_>);
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, event: TraceEvent<'_>) {
        (**self).record(event);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn record(&mut self, event: TraceEvent<'_>) {
        (**self).record(event);
    }
}

/// Routes records through the `log` facade: step snapshots at `debug`, everything else at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn record(&mut self, event: TraceEvent<'_>) {
        match event {
            TraceEvent::Step { .. } => log::debug!("{event}"),
            _ => log::info!("{event}"),
        }
    }
}

/// Writes one line per record to any `io::Write`, e.g. stdout.
#[derive(Debug)]
pub struct WriterTrace<W: Write> {
    writer: W,
}

impl<W: Write> WriterTrace<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn record(&mut self, event: TraceEvent<'_>) {
        // A broken trace writer must not stop the machine.
        if let Err(e) = writeln!(self.writer, "{event}") {
            log::warn!("Failed to write trace record: {e}");
        }
    }
}

/// Keeps rendered records in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryTrace {
    lines: Vec<String>,
}

impl MemoryTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl TraceSink for MemoryTrace {
    fn record(&mut self, event: TraceEvent<'_>) {
        self.lines.push(event.to_string());
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _event: TraceEvent<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_record_lists_step_state_head_tape_in_order() {
        let tape = vec!["1".to_string(), String::new()];
        let event = TraceEvent::Step {
            step: 2,
            state: "qf",
            head: 1,
            tape: &tape,
        };

        assert_eq!(
            event.to_string(),
            r#"step 2: state=qf head=1 tape=["1", ""]"#
        );
    }

    #[test]
    fn test_halt_records() {
        let undefined = HaltReason::UndefinedTransition {
            state: "qf".to_string(),
            symbol: String::new(),
        };
        assert_eq!(
            TraceEvent::Halted(&undefined).to_string(),
            r#"transition undefined for (qf, ""), machine halts"#
        );

        let boundary = HaltReason::LeftBoundary { head: -1 };
        assert!(TraceEvent::Halted(&boundary)
            .to_string()
            .contains("left boundary"));

        let out_of_range = HaltReason::HeadOutOfRange { head: i64::MAX };
        assert_eq!(
            TraceEvent::Halted(&out_of_range).to_string(),
            format!("head moved out of range to {}, machine halts", i64::MAX)
        );
    }

    #[test]
    fn test_memory_trace_collects_lines() {
        let mut sink = MemoryTrace::new();
        sink.record(TraceEvent::Finished { steps: 7 });
        sink.record(TraceEvent::Output(&[]));

        assert_eq!(
            sink.lines(),
            &["machine halted after 7 steps".to_string(), "output: []".to_string()][..]
        );
    }

    #[test]
    fn test_writer_trace_writes_one_line_per_record() {
        let mut sink = WriterTrace::new(Vec::new());
        sink.record(TraceEvent::Finished { steps: 1 });
        sink.record(TraceEvent::Finished { steps: 2 });

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            written,
            "machine halted after 1 steps\nmachine halted after 2 steps\n"
        );
    }

    #[test]
    fn test_borrowed_sink_forwards() {
        fn finish(mut sink: impl TraceSink) {
            sink.record(TraceEvent::Finished { steps: 3 });
        }

        let mut inner = MemoryTrace::new();
        finish(&mut inner);
        finish(Box::new(&mut inner) as Box<dyn TraceSink + '_>);
        assert_eq!(inner.lines().len(), 2);
    }
}
