// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The fire-and-forget diagnostic sink.
//!
//! Diagnostics are an explicit collaborator handed to nodes rather than an
//! ambient logging call buried in business logic, so tests can assert exact
//! counter sequences without a real logging backend. Calls never block and
//! never fail the event path.

use std::sync::Mutex;

use crate::observability::messages::node::{
    ScriptEvalRequested, ScriptEvalResponded, ScriptOutputEmitted,
};
use crate::observability::messages::StructuredLog;

/// Observer for node diagnostic events.
pub trait Diagnostics: Send + Sync {
    /// A script evaluation is about to be submitted.
    fn script_eval_requested(&self, node_id: &str);

    /// A script evaluation completed (success or failure). Always emitted
    /// before the relay call, so the requested/responded pair brackets the
    /// relay outcome.
    fn script_eval_responded(&self, node_id: &str);

    /// A derived diagnostic line produced by a node (side channel only;
    /// never merged into the msg).
    fn emit(&self, node_id: &str, line: &str);
}

/// Default sink: routes everything through the observability message types.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn script_eval_requested(&self, node_id: &str) {
        ScriptEvalRequested { node_id }.log();
    }

    fn script_eval_responded(&self, node_id: &str) {
        ScriptEvalResponded { node_id }.log();
    }

    fn emit(&self, node_id: &str, line: &str) {
        ScriptOutputEmitted {
            node_id,
            output: line,
        }
        .log();
    }
}

/// One recorded diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    EvalRequested { node_id: String },
    EvalResponded { node_id: String },
    Emitted { node_id: String, line: String },
}

/// Sink that records every event in call order, for assertions in tests and
/// demo summaries.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events seen so far, in call order.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().unwrap().clone()
    }

    /// All emitted lines, in call order.
    pub fn emitted_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Emitted { line, .. } => Some(line),
                _ => None,
            })
            .collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn script_eval_requested(&self, node_id: &str) {
        self.events
            .lock()
            .unwrap()
            .push(DiagnosticEvent::EvalRequested {
                node_id: node_id.to_string(),
            });
    }

    fn script_eval_responded(&self, node_id: &str) {
        self.events
            .lock()
            .unwrap()
            .push(DiagnosticEvent::EvalResponded {
                node_id: node_id.to_string(),
            });
    }

    fn emit(&self, node_id: &str, line: &str) {
        self.events.lock().unwrap().push(DiagnosticEvent::Emitted {
            node_id: node_id.to_string(),
            line: line.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_preserves_call_order() {
        let sink = RecordingDiagnostics::new();
        sink.script_eval_requested("n1");
        sink.script_eval_responded("n1");
        sink.emit("n1", "temperature = 20");

        assert_eq!(
            sink.events(),
            vec![
                DiagnosticEvent::EvalRequested {
                    node_id: "n1".into()
                },
                DiagnosticEvent::EvalResponded {
                    node_id: "n1".into()
                },
                DiagnosticEvent::Emitted {
                    node_id: "n1".into(),
                    line: "temperature = 20".into()
                },
            ]
        );
        assert_eq!(sink.emitted_lines(), vec!["temperature = 20".to_string()]);
    }
}
