use crate::config::ApiConfig;
use crate::endpoints::Endpoint;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verb {
    Get,
    Post,
    Delete,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RequestError {
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Request error: {0:?}")]
    Fetch(fetch_happen::Error),
}

pub(crate) async fn hit_api(
    config: &ApiConfig,
    verb: Verb,
    endpoint: &Endpoint,
) -> Result<fetch_happen::Response, RequestError> {
    let client = fetch_happen::Client;
    let url = endpoint.url(config)?.to_string();
    let request = match verb {
        Verb::Get => client.get(url),
        Verb::Post => client.post(url),
        Verb::Delete => client.delete(url),
    };
    let request = match &config.access_token {
        Some(token) => request.header("Authorization", format!("Bearer {token}")),
        None => request,
    };
    request.send().await.map_err(RequestError::Fetch)
}
