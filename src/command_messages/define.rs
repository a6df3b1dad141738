use std::fmt;

/// The `level` field shared by NetConnection `_result`/`_error` replies (legacy RTMP spec,
/// 7.2.1.1) and NetStream `onStatus` events (7.2.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResultLevel {
    Warning,
    Status,
    Error,
}

impl CommandResultLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Status => "status",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CommandResultLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
