use crate::model::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No response came back at all.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("HTTP error: {status}")]
    Http { status: u16, body: String },

    /// The server answered with `isSuccess: false`.
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 401 {
            FetchError::Unauthorized
        } else {
            FetchError::Http { status, body }
        }
    }

    /// The caller should send the user back to the login page.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            FetchError::Unauthorized | FetchError::Http { status: 403, .. }
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Could not encode stored value")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ToggleError {
    /// The server call failed and the local state was put back to
    /// `reverted_to`.
    #[error("Toggling {id} failed, reverted to {reverted_to}")]
    Remote {
        id: ItemId,
        reverted_to: bool,
        #[source]
        source: FetchError,
    },
}

impl ToggleError {
    pub fn fetch_error(&self) -> &FetchError {
        match self {
            ToggleError::Remote { source, .. } => source,
        }
    }

    pub fn requires_login(&self) -> bool {
        self.fetch_error().requires_login()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("Page size must be positive")]
    InvalidPageSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_is_unauthorized() {
        assert_eq!(
            FetchError::from_status(401, String::new()),
            FetchError::Unauthorized
        );
        assert!(FetchError::from_status(401, String::new()).requires_login());
    }

    #[test]
    fn forbidden_also_requires_login() {
        let e = FetchError::from_status(403, "forbidden".to_string());
        assert!(matches!(e, FetchError::Http { status: 403, .. }));
        assert!(e.requires_login());
        assert!(!FetchError::from_status(500, String::new()).requires_login());
        assert!(!FetchError::Network("offline".to_string()).requires_login());
    }
}
