use crate::sink::LogSink;
use std::collections::BTreeMap;
use std::fmt;

/// Severity attached to a logged line or error. Descriptive only: nothing
/// escalates or branches on it, operators filter log lines by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Categorization of structured errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Runtime,
    System,
    External,
    Database,
    Network,
}

/// Numeric error codes. Informative, not protocol-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Unknown = 0,
    ValidationFailed = 1000,
    RuntimeFailed = 2000,
    SystemFailed = 3000,
    DatabaseFailed = 4000,
    NetworkFailed = 5000,
}

/// Free-form diagnostic annotations. Ordered map so formatted output is
/// deterministic; insertion order carries no meaning.
pub type Details = BTreeMap<String, String>;

/// Structured operational error. Kind, code and severity are fixed at
/// construction; stack frames may be appended by a catching context
/// before the error is re-raised.
///
/// The factory constructors are the only way to build one, and each
/// emits exactly one formatted line to the sink it is given. The log
/// stream captures every exceptional event even if a caller swallows
/// the error.
#[derive(Debug, Clone)]
pub struct ServiceError {
    message: String,
    kind: ErrorKind,
    code: ErrorCode,
    severity: Severity,
    details: Details,
    stack: Vec<String>,
}

impl ServiceError {
    fn new<M: Into<String>>(
        message: M,
        kind: ErrorKind,
        code: ErrorCode,
        severity: Severity,
        details: Details,
    ) -> Self {
        Self {
            message: message.into(),
            kind,
            code,
            severity,
            details,
            stack: Vec::new(),
        }
    }

    /// Caller-detected invalid input. Never process-ending.
    pub fn validation<M: Into<String>>(sink: &LogSink, message: M, details: Details) -> Self {
        Self::new(
            message,
            ErrorKind::Validation,
            ErrorCode::ValidationFailed,
            Severity::Warning,
            details,
        )
        .emit(sink)
    }

    /// Recoverable operational failure.
    pub fn runtime<M: Into<String>>(sink: &LogSink, message: M, details: Details) -> Self {
        Self::new(
            message,
            ErrorKind::Runtime,
            ErrorCode::RuntimeFailed,
            Severity::Error,
            details,
        )
        .emit(sink)
    }

    /// Failure the caller cannot recover from locally. The code follows
    /// the kind: Database, Network and System map to their own codes,
    /// anything else to Unknown.
    pub fn critical<M: Into<String>>(
        sink: &LogSink,
        message: M,
        kind: ErrorKind,
        details: Details,
    ) -> Self {
        let code = match kind {
            ErrorKind::Database => ErrorCode::DatabaseFailed,
            ErrorKind::Network => ErrorCode::NetworkFailed,
            ErrorKind::System => ErrorCode::SystemFailed,
            _ => ErrorCode::Unknown,
        };
        Self::new(message, kind, code, Severity::Critical, details).emit(sink)
    }

    fn emit(self, sink: &LogSink) -> Self {
        sink.log(&self.full_message(), self.severity);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn stack_trace(&self) -> &[String] {
        &self.stack
    }

    /// Annotate with a call-path frame. Mutates in place; does not log
    /// again.
    pub fn add_stack_frame<F: Into<String>>(&mut self, frame: F) {
        self.stack.push(frame.into());
    }

    /// Canonical rendering, stable so log output can be diffed:
    /// `[<SEVERITY>][Code: <numeric>] <message>`, a ` Details: { k: v; }`
    /// block when details exist, and a trailing `Stack trace:` block
    /// listing frames in append order.
    pub fn full_message(&self) -> String {
        let mut out = format!("[{}][Code: {}] {}", self.severity, self.code as i32, self.message);

        if !self.details.is_empty() {
            out.push_str(" Details: {");
            for (key, value) in &self.details {
                out.push_str(&format!(" {key}: {value};"));
            }
            out.push_str(" }");
        }

        if !self.stack.is_empty() {
            out.push_str("\nStack trace:\n");
            for frame in &self.stack {
                out.push_str(&format!("  {frame}\n"));
            }
        }

        out
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_message())
    }
}

impl std::error::Error for ServiceError {}
