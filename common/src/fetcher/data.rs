use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Response, header};
use url::Url;

/// Data which can be extracted from a [`Response`].
#[async_trait(?Send)]
pub trait Data: Sized {
    async fn from_response(response: Response) -> Result<Self, reqwest::Error>;
}

/// BLOB data, along with the metadata the transport reported for it.
#[derive(Clone, Debug)]
pub struct Payload {
    /// The final URL, after following redirects
    pub url: Url,
    /// The value of the `Content-Type` header, if present and readable
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[async_trait(?Send)]
impl Data for Payload {
    async fn from_response(response: Response) -> Result<Self, reqwest::Error> {
        let response = response.error_for_status()?;

        let url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        Ok(Self {
            url,
            content_type,
            data: response.bytes().await?,
        })
    }
}
