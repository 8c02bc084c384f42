/// Error when acquiring credentials for sending
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("OpenID error: {0}")]
    OpenId(#[from] openid::error::Error),
    #[error("token expired and cannot be refreshed")]
    Expired,
}
