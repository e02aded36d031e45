use serde::Serialize;

/// What a job entrypoint hands back to whatever triggered it: an HTTP-ish
/// status code plus a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub status_code: u16,
    pub body: String,
}

impl JobOutcome {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: body.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status_code >= 400
    }
}
