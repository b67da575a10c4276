// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tollgate pay-per-request gateway.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Tollgate workspace. The workflow engine
//! consumes language models, wallets, and agents exclusively through the
//! traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TollgateError;
pub use types::{ModelReply, PrecomputedResult, TokenUsage, WalletHandle};

// Re-export collaborator traits at crate root.
pub use traits::{AgentExecutor, ModelClient, WalletClient};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoModel;

    #[async_trait]
    impl ModelClient for EchoModel {
        async fn generate(&self, prompt: &str) -> Result<ModelReply, TollgateError> {
            Ok(ModelReply {
                content: prompt.to_string(),
                usage: TokenUsage {
                    prompt_tokens: 1,
                    completion_tokens: 1,
                },
            })
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn model_client_is_object_safe() {
        // The workflow holds `Arc<dyn ModelClient>`; verify trait objects work.
        let model: Box<dyn ModelClient> = Box::new(EchoModel);
        let reply = model.generate("hello").await.unwrap();
        assert_eq!(reply.content, "hello");
        assert_eq!(reply.usage.total(), 2);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_model_client<T: ModelClient>() {}
        fn _assert_wallet_client<T: WalletClient>() {}
        fn _assert_agent_executor<T: AgentExecutor>() {}
    }
}
