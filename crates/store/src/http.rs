//! Response helpers shared by the REST store clients.

use catalog_core::error::StoreError;

pub(crate) fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

/// Pass a success response through; turn anything else into
/// [`StoreError::Backend`] carrying the raw body text.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(StoreError::Backend {
        status: status.as_u16(),
        body: body_text(response).await,
    })
}

pub(crate) async fn body_text(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string())
}
