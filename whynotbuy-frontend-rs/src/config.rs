#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

const PRODUCTION_URL: &str = "https://api-whynotbuy.store";
const LOCAL_URL: &str = "http://localhost:8080";

/// Where the API lives and who is asking. Handed over from JS once per page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

fn default_base_url() -> String {
    if cfg!(feature = "local-backend") {
        LOCAL_URL.to_string()
    } else {
        PRODUCTION_URL.to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
        }
    }
}

impl ApiConfig {
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Absolute URL for an API path such as `/api/v1/menus`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn default_api_config() -> ApiConfig {
    ApiConfig::default()
}
