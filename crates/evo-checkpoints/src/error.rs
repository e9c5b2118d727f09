use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    MalformedInput,
    Conflict,
    NoCheckpoints,

    SourceRead,
    SourceParse,
    Encode,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedInput => "CHECKPOINT_ERR_MALFORMED_INPUT",
            ErrorCode::Conflict => "CHECKPOINT_ERR_CONFLICT",
            ErrorCode::NoCheckpoints => "CHECKPOINT_ERR_NO_CHECKPOINTS",

            ErrorCode::SourceRead => "CHECKPOINT_ERR_SOURCE_READ",
            ErrorCode::SourceParse => "CHECKPOINT_ERR_SOURCE_PARSE",
            ErrorCode::Encode => "CHECKPOINT_ERR_ENCODE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckpointError {
    pub code: ErrorCode,
    pub msg: String,
}

impl CheckpointError {
    pub fn new(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }

    /// A pinned height was offered a different hash.
    pub fn conflict(height: u64, existing: &[u8; 32], offered: &[u8; 32]) -> Self {
        Self::new(
            ErrorCode::Conflict,
            format!(
                "checkpoint at height {height} already exists with hash {}, refusing {}",
                hex::encode(existing),
                hex::encode(offered)
            ),
        )
    }
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.msg.is_empty() {
            write!(f, "{}", self.code.as_str())
        } else {
            write!(f, "{}: {}", self.code.as_str(), self.msg)
        }
    }
}

impl std::error::Error for CheckpointError {}
