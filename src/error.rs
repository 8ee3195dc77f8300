#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("unsupported instruction `{mnemonic}`")]
    UnsupportedInstruction { mnemonic: String },
    #[error("unknown register `{name}`")]
    UnknownRegister { name: String },
    #[error("malformed literal `{text}`")]
    MalformedLiteral { text: String },
    #[error("`{mnemonic}` is missing operand {index}")]
    MissingOperand { mnemonic: String, index: usize },
    #[error("malformed memory operand `{text}`, expected offset(register)")]
    MalformedMemoryOperand { text: String },
    #[error("program exceeds capacity of {capacity} instructions")]
    CapacityExceeded { capacity: usize },
}

/// A fatal [`AsmError`] tagged with the 1-based input line it came from.
/// The message already carries the cause, so no `source()` is exposed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct LineError {
    pub line: usize,
    pub kind: AsmError,
}
