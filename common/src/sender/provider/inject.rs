use super::TokenProvider;
use tracing::instrument;

/// Allows injecting tokens.
pub trait TokenInjector: Sized {
    fn inject_token(self, token_provider: &dyn TokenProvider) -> Self;
}

/// Injects tokens into a request by setting the authorization header to a "bearer" token.
///
/// Without a current token, the request is left untouched. The server is expected to reject it.
impl TokenInjector for reqwest::RequestBuilder {
    #[instrument(level = "trace", skip_all)]
    fn inject_token(self, token_provider: &dyn TokenProvider) -> Self {
        match token_provider.current() {
            Some(token) => self.bearer_auth(token.access_token),
            None => {
                log::debug!("No token available, sending request without authorization");
                self
            }
        }
    }
}
