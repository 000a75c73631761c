//! Configuration types for the Vapi client.

/// Configuration for connecting to the Vapi API.
#[derive(Clone)]
pub struct VapiConfig {
    /// Base URL of the API (e.g., "https://api.vapi.ai").
    pub base_url: String,
    /// Bearer token for authentication.
    pub api_key: String,
    /// Provider-side id of the phone number calls are placed from.
    pub phone_number_id: String,
    /// Optional pre-configured assistant id for calls that don't supply an
    /// inline assistant definition.
    pub assistant_id: Option<String>,
}

impl VapiConfig {
    /// Create a new configuration with the default base URL.
    pub fn new(api_key: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.vapi.ai".to_string(),
            api_key: api_key.into(),
            phone_number_id: phone_number_id.into(),
            assistant_id: None,
        }
    }

    /// Override the base URL (useful for pointing tests at a stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a pre-configured assistant id.
    pub fn with_assistant_id(mut self, assistant_id: impl Into<String>) -> Self {
        self.assistant_id = Some(assistant_id.into());
        self
    }

    /// Get the call-creation endpoint URL.
    pub fn call_phone_url(&self) -> String {
        format!("{}/call/phone", self.base_url)
    }

    /// Get the URL for a specific call.
    pub fn call_url(&self, call_id: &str) -> String {
        format!("{}/call/{}", self.base_url, call_id)
    }

    /// Get the call-listing endpoint URL.
    pub fn calls_url(&self) -> String {
        format!("{}/call", self.base_url)
    }
}

impl std::fmt::Debug for VapiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("phone_number_id", &self.phone_number_id)
            .field("assistant_id", &self.assistant_id)
            .finish()
    }
}
