use serde::Serialize;

/// Checkout progress for a single category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutState {
    Idle,
    Preparing,
    Ready,
    Rejected,
    Submitting,
    Committed,
    Failed,
}

/// Tracks the checkout lifecycle of one category cart:
/// Idle -> Preparing -> {Ready | Rejected} -> Submitting -> {Committed | Failed}.
/// A failed submission returns to Ready with the cart intact so the customer
/// can retry; Committed is terminal.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self {
            state: CheckoutState::Idle,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Transition: Idle/Rejected -> Preparing (a rejected attempt may be
    /// re-prepared with a fresh coordinate or cart).
    pub fn start_preparing(&mut self) -> Result<(), FlowError> {
        match self.state {
            CheckoutState::Idle | CheckoutState::Rejected => {
                self.state = CheckoutState::Preparing;
                Ok(())
            }
            _ => Err(self.invalid("PREPARING")),
        }
    }

    /// Transition: Preparing -> Ready (validation passed, request frozen).
    pub fn mark_ready(&mut self) -> Result<(), FlowError> {
        match self.state {
            CheckoutState::Preparing => {
                self.state = CheckoutState::Ready;
                Ok(())
            }
            _ => Err(self.invalid("READY")),
        }
    }

    /// Transition: Preparing -> Rejected (empty cart, out of zone, or below
    /// the minimum order).
    pub fn mark_rejected(&mut self) -> Result<(), FlowError> {
        match self.state {
            CheckoutState::Preparing => {
                self.state = CheckoutState::Rejected;
                Ok(())
            }
            _ => Err(self.invalid("REJECTED")),
        }
    }

    /// Transition: Ready -> Submitting (request handed to the placement
    /// collaborator).
    pub fn start_submitting(&mut self) -> Result<(), FlowError> {
        match self.state {
            CheckoutState::Ready => {
                self.state = CheckoutState::Submitting;
                Ok(())
            }
            _ => Err(self.invalid("SUBMITTING")),
        }
    }

    /// Transition: Submitting -> Committed (terminal; the cart is cleared).
    pub fn mark_committed(&mut self) -> Result<(), FlowError> {
        match self.state {
            CheckoutState::Submitting => {
                self.state = CheckoutState::Committed;
                Ok(())
            }
            _ => Err(self.invalid("COMMITTED")),
        }
    }

    /// Transition: Submitting -> Failed. The cart is untouched on this path.
    pub fn mark_failed(&mut self) -> Result<(), FlowError> {
        match self.state {
            CheckoutState::Submitting => {
                self.state = CheckoutState::Failed;
                Ok(())
            }
            _ => Err(self.invalid("FAILED")),
        }
    }

    /// Transition: Failed -> Ready, allowing resubmission of the same
    /// request without re-adding items.
    pub fn retry(&mut self) -> Result<(), FlowError> {
        match self.state {
            CheckoutState::Failed => {
                self.state = CheckoutState::Ready;
                Ok(())
            }
            _ => Err(self.invalid("READY")),
        }
    }

    fn invalid(&self, to: &str) -> FlowError {
        FlowError::InvalidTransition {
            from: format!("{:?}", self.state),
            to: to.to_string(),
        }
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
