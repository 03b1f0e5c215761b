use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("hardware error: {0}")]
    Hardware(#[from] HardwareError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// 記憶體匯流排錯誤；CB 指令本身不會產生其他錯誤
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    #[error("memory read fault at {0:#06X}")]
    MemoryRead(u16),
    #[error("memory write fault at {0:#06X}")]
    MemoryWrite(u16),
}

impl Error {
    /// 若為硬體錯誤則取出內部型別，測試與 CLI 回報用
    pub fn hardware(&self) -> Option<HardwareError> {
        match self {
            Error::Hardware(err) => Some(*err),
            _ => None,
        }
    }
}
