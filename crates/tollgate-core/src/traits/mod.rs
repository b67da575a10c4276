// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the workflow core.
//!
//! Each external capability (language model, wallet, agent) is reached
//! through one narrow async trait with exactly one implementation selected
//! at startup. The workflow never branches on provider names.

pub mod agent;
pub mod model;
pub mod wallet;

pub use agent::AgentExecutor;
pub use model::ModelClient;
pub use wallet::WalletClient;
