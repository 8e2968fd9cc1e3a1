use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: Option<T>,
    pub(crate) error: Option<String>,
}

impl<T> Envelope<T> {
    pub(crate) fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub(crate) fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}
