// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment verification stage.

use tollgate_metrics::RequestStatus;
use tracing::info;

use crate::context::{FailureKind, RequestContext};

/// Confirms that a transaction reference exists.
///
/// Verification depth is a policy knob that belongs to the wallet
/// collaborator; this stage only gates on reference presence.
pub struct PaymentVerificationStage;

impl PaymentVerificationStage {
    pub fn run(&self, ctx: &mut RequestContext) {
        match &ctx.tx_reference {
            Some(tx_reference) => {
                ctx.payment_verified = Some(true);
                ctx.metrics.advance(RequestStatus::Verified);
                info!(tx_reference = %tx_reference, "payment verified");
            }
            None => {
                ctx.payment_verified = Some(false);
                // Keeps an earlier failure (e.g. a rejected transfer) as
                // the run's error; this message only fills the gap.
                ctx.fail(FailureKind::Verification, "missing transaction reference");
            }
        }
    }
}
