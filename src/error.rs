pub type PapergenResult<T> = Result<T, PapergenError>;

#[derive(thiserror::Error, Debug)]
pub enum PapergenError {
    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("metadata error: {0}")]
    Metadata(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PapergenError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}
