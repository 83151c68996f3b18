// Payment decision capability used when a reservation is confirmed.
// The simulator stands in for a remote gateway: it waits a little, then
// approves a fixed share of charges at random.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

// Share of simulated charges that are approved
pub const DEFAULT_SUCCESS_RATE: f64 = 0.90;

// Artificial latency of one simulated charge
pub const DEFAULT_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved,
    Declined,
}

impl PaymentOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentOutcome::Approved)
    }
}

// Payment gateway trait. Every call is an independent trial: no retries and
// no idempotency keys.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn decide(&self, amount: f64) -> PaymentOutcome;
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub success_rate: f64,
    pub delay_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            success_rate: DEFAULT_SUCCESS_RATE,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedPayment {
    success_rate: f64,
    delay: Duration,
}

impl SimulatedPayment {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            success_rate: config.success_rate.clamp(0.0, 1.0),
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

impl Default for SimulatedPayment {
    fn default() -> Self {
        Self::new(&PaymentConfig::default())
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPayment {
    async fn decide(&self, amount: f64) -> PaymentOutcome {
        info!(amount, "simulating payment");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let outcome = if rand::random::<f64>() < self.success_rate {
            PaymentOutcome::Approved
        } else {
            PaymentOutcome::Declined
        };

        info!(?outcome, "payment finished");
        outcome
    }
}

// Deterministic gateways for tests and demos
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, Copy)]
    pub struct FixedPayment(PaymentOutcome);

    impl FixedPayment {
        pub fn approve_all() -> Self {
            Self(PaymentOutcome::Approved)
        }

        pub fn decline_all() -> Self {
            Self(PaymentOutcome::Declined)
        }
    }

    #[async_trait]
    impl PaymentGateway for FixedPayment {
        async fn decide(&self, _amount: f64) -> PaymentOutcome {
            self.0
        }
    }

    /// Replays queued outcomes in order and records every amount it was asked
    /// to charge. Once the queue is empty it falls back to `default`.
    #[derive(Debug)]
    pub struct ScriptedPayment {
        outcomes: Mutex<VecDeque<PaymentOutcome>>,
        charged: Mutex<Vec<f64>>,
        default: PaymentOutcome,
    }

    impl ScriptedPayment {
        pub fn new(outcomes: Vec<PaymentOutcome>, default: PaymentOutcome) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                charged: Mutex::new(Vec::new()),
                default,
            }
        }

        pub fn charged(&self) -> Vec<f64> {
            self.charged.lock().clone()
        }

        pub fn calls(&self) -> usize {
            self.charged.lock().len()
        }
    }

    #[async_trait]
    impl PaymentGateway for ScriptedPayment {
        async fn decide(&self, amount: f64) -> PaymentOutcome {
            self.charged.lock().push(amount);
            self.outcomes.lock().pop_front().unwrap_or(self.default)
        }
    }
}
