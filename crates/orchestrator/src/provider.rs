//! Call provider trait and implementations.

use async_trait::async_trait;

use vapi_client::{Call, CallContext, CallPrompt, CallStatus, VapiClient, VapiError};

/// Trait for placing and inspecting outbound calls.
///
/// Abstracted so the orchestrator can be driven against a mock provider
/// in tests.
#[async_trait]
pub trait CallProvider: Send + Sync {
    /// Place an outbound call; returns the provider-assigned call id.
    async fn create_call(
        &self,
        customer_number: &str,
        prompt: &CallPrompt,
        context: &CallContext,
    ) -> Result<String, VapiError>;

    /// Fetch the current status of a call.
    async fn call_status(&self, call_id: &str) -> Result<CallStatus, VapiError>;

    /// Fetch the full call record.
    async fn get_call(&self, call_id: &str) -> Result<Call, VapiError>;
}

#[async_trait]
impl<T: CallProvider + ?Sized> CallProvider for std::sync::Arc<T> {
    async fn create_call(
        &self,
        customer_number: &str,
        prompt: &CallPrompt,
        context: &CallContext,
    ) -> Result<String, VapiError> {
        (**self).create_call(customer_number, prompt, context).await
    }

    async fn call_status(&self, call_id: &str) -> Result<CallStatus, VapiError> {
        (**self).call_status(call_id).await
    }

    async fn get_call(&self, call_id: &str) -> Result<Call, VapiError> {
        (**self).get_call(call_id).await
    }
}

#[async_trait]
impl CallProvider for VapiClient {
    async fn create_call(
        &self,
        customer_number: &str,
        prompt: &CallPrompt,
        context: &CallContext,
    ) -> Result<String, VapiError> {
        VapiClient::create_call(self, customer_number, prompt, context).await
    }

    async fn call_status(&self, call_id: &str) -> Result<CallStatus, VapiError> {
        VapiClient::call_status(self, call_id).await
    }

    async fn get_call(&self, call_id: &str) -> Result<Call, VapiError> {
        VapiClient::get_call(self, call_id).await
    }
}
