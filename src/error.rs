//! Error type for the fallible surfaces: persisted-signal parsing and configuration

#[derive(Debug)]
pub enum MoodError {
    Serialization(serde_json::Error),
    InvalidConfig(String),
}

impl From<serde_json::Error> for MoodError {
    fn from(err: serde_json::Error) -> Self {
        MoodError::Serialization(err)
    }
}

impl std::fmt::Display for MoodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoodError::Serialization(e) => write!(f, "Serialization error: {}", e),
            MoodError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for MoodError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoodError::Serialization(e) => Some(e),
            MoodError::InvalidConfig(_) => None,
        }
    }
}
