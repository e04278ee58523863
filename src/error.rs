pub type EmberfarmResult<T> = Result<T, EmberfarmError>;

#[derive(thiserror::Error, Debug)]
pub enum EmberfarmError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("calendar error: {0}")]
    Calendar(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmberfarmError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn calendar(msg: impl Into<String>) -> Self {
        Self::Calendar(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            EmberfarmError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            EmberfarmError::calendar("x")
                .to_string()
                .contains("calendar error:")
        );
        assert!(
            EmberfarmError::fetch("x")
                .to_string()
                .contains("fetch error:")
        );
        assert!(
            EmberfarmError::asset("x")
                .to_string()
                .contains("asset error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = EmberfarmError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
