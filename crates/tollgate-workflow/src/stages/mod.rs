// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The five pipeline stages.
//!
//! Each stage reads and extends the shared [`RequestContext`] by mutable
//! reference; the engine decides which stage runs next.
//!
//! [`RequestContext`]: crate::context::RequestContext

pub mod consumer;
pub mod deliver;
pub mod failure;
pub mod provider;
pub mod verify;

pub use consumer::ConsumerStage;
pub use deliver::{DeliveryStage, QueryOutcome};
pub use failure::FailureStage;
pub use provider::ProviderStage;
pub use verify::PaymentVerificationStage;
