use crate::AgentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub type EventData = HashMap<String, Value>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ToolCallStart,
    ToolCallEnd,
    Warning,
    Error,
}

/// One observable step of the write pipeline, delivered to the host so it
/// can drive previews or logs without the core depending on any UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub kind: EventKind,
    pub session_id: String,
    pub data: EventData,
}

impl SessionEvent {
    pub fn tool_call_start(
        session_id: String,
        tool_name: String,
        call_id: String,
        arguments: Option<Value>,
    ) -> Self {
        let mut data = EventData::new();
        data.insert("tool_name".to_string(), Value::String(tool_name));
        data.insert("call_id".to_string(), Value::String(call_id));
        if let Some(arguments) = arguments {
            data.insert("arguments".to_string(), arguments);
        }
        Self {
            kind: EventKind::ToolCallStart,
            session_id,
            data,
        }
    }

    pub fn tool_call_end(
        session_id: String,
        call_id: String,
        output: Option<String>,
        error: Option<String>,
        duration_ms: u128,
        is_error: bool,
    ) -> Self {
        let mut data = EventData::new();
        data.insert("call_id".to_string(), Value::String(call_id));
        if let Some(output) = output {
            data.insert("output".to_string(), Value::String(output));
        }
        if let Some(error) = error {
            data.insert("error".to_string(), Value::String(error));
        }
        data.insert("duration_ms".to_string(), Value::from(duration_ms as u64));
        data.insert("is_error".to_string(), Value::Bool(is_error));
        Self {
            kind: EventKind::ToolCallEnd,
            session_id,
            data,
        }
    }

    pub fn warning(session_id: String, message: String) -> Self {
        let mut data = EventData::new();
        data.insert("message".to_string(), Value::String(message));
        Self {
            kind: EventKind::Warning,
            session_id,
            data,
        }
    }

    pub fn error(session_id: String, message: String) -> Self {
        let mut data = EventData::new();
        data.insert("message".to_string(), Value::String(message));
        Self {
            kind: EventKind::Error,
            session_id,
            data,
        }
    }
}

pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: SessionEvent) -> Result<(), AgentError>;
}

#[derive(Default)]
pub struct NoopEventEmitter;

impl EventEmitter for NoopEventEmitter {
    fn emit(&self, _event: SessionEvent) -> Result<(), AgentError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct BufferedEventEmitter {
    inner: Arc<Mutex<Vec<SessionEvent>>>,
}

impl BufferedEventEmitter {
    pub fn snapshot(&self) -> Vec<SessionEvent> {
        let guard = self.inner.lock().expect("buffered emitter mutex poisoned");
        guard.clone()
    }
}

impl EventEmitter for BufferedEventEmitter {
    fn emit(&self, event: SessionEvent) -> Result<(), AgentError> {
        let mut guard = self.inner.lock().expect("buffered emitter mutex poisoned");
        guard.push(event);
        Ok(())
    }
}
