//! Mock payment flow backing the checkout screen. The flow never talks to a
//! payment processor; its only job is to gate the real checkout behind a
//! simulated confirmation.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    MobilePay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved,
    Declined,
}

/// `Review -> Qr -> Processing -> Result -> Success`. `Success` is reached
/// only from an approved result, at which point the caller performs the real
/// checkout and clears the basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStep {
    Review,
    Qr,
    Processing(PaymentOutcome),
    Result(PaymentOutcome),
    Success,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentFlowError {
    #[error("cannot {action} from the {step} step")]
    InvalidTransition {
        step: &'static str,
        action: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct PaymentFlow {
    method: PaymentMethod,
    step: PaymentStep,
}

impl PaymentFlow {
    pub fn new() -> Self {
        Self {
            method: PaymentMethod::Card,
            step: PaymentStep::Review,
        }
    }

    pub fn step(&self) -> PaymentStep {
        self.step
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    fn step_name(&self) -> &'static str {
        match self.step {
            PaymentStep::Review => "review",
            PaymentStep::Qr => "qr",
            PaymentStep::Processing(_) => "processing",
            PaymentStep::Result(_) => "result",
            PaymentStep::Success => "success",
        }
    }

    fn invalid(&self, action: &'static str) -> PaymentFlowError {
        PaymentFlowError::InvalidTransition {
            step: self.step_name(),
            action,
        }
    }

    /// Picking a payment method has no persisted effect and is only allowed
    /// while reviewing.
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<(), PaymentFlowError> {
        if self.step != PaymentStep::Review {
            return Err(self.invalid("select a payment method"));
        }
        self.method = method;
        Ok(())
    }

    pub fn proceed_to_qr(&mut self) -> Result<(), PaymentFlowError> {
        if self.step != PaymentStep::Review {
            return Err(self.invalid("show the payment code"));
        }
        self.step = PaymentStep::Qr;
        Ok(())
    }

    /// The user simulates an outcome while the placeholder code is shown.
    pub fn simulate(&mut self, outcome: PaymentOutcome) -> Result<(), PaymentFlowError> {
        if self.step != PaymentStep::Qr {
            return Err(self.invalid("simulate a payment"));
        }
        self.step = PaymentStep::Processing(outcome);
        Ok(())
    }

    /// Called after the fixed processing delay elapses.
    pub fn finish_processing(&mut self) -> Result<PaymentOutcome, PaymentFlowError> {
        match self.step {
            PaymentStep::Processing(outcome) => {
                self.step = PaymentStep::Result(outcome);
                Ok(outcome)
            }
            _ => Err(self.invalid("finish processing")),
        }
    }

    /// Confirms an approved result. The caller then runs the real checkout.
    pub fn finalize(&mut self) -> Result<(), PaymentFlowError> {
        match self.step {
            PaymentStep::Result(PaymentOutcome::Approved) => {
                self.step = PaymentStep::Success;
                Ok(())
            }
            _ => Err(self.invalid("finalize the payment")),
        }
    }

    /// Retrying from a result (approved or declined) goes back to the code.
    pub fn retry(&mut self) -> Result<(), PaymentFlowError> {
        match self.step {
            PaymentStep::Result(_) => {
                self.step = PaymentStep::Qr;
                Ok(())
            }
            _ => Err(self.invalid("retry the payment")),
        }
    }

    /// A declined result can go back to method selection.
    pub fn change_method(&mut self) -> Result<(), PaymentFlowError> {
        match self.step {
            PaymentStep::Result(PaymentOutcome::Declined) => {
                self.step = PaymentStep::Review;
                Ok(())
            }
            _ => Err(self.invalid("change the payment method")),
        }
    }
}

impl Default for PaymentFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow_at_result(outcome: PaymentOutcome) -> PaymentFlow {
        let mut flow = PaymentFlow::new();
        flow.proceed_to_qr().unwrap();
        flow.simulate(outcome).unwrap();
        assert_eq!(flow.finish_processing().unwrap(), outcome);
        flow
    }

    #[test]
    fn happy_path_reaches_success() {
        let mut flow = flow_at_result(PaymentOutcome::Approved);
        flow.finalize().unwrap();
        assert_eq!(flow.step(), PaymentStep::Success);
    }

    #[test]
    fn method_selection_only_in_review() {
        let mut flow = PaymentFlow::new();
        flow.select_method(PaymentMethod::MobilePay).unwrap();
        assert_eq!(flow.method(), PaymentMethod::MobilePay);

        flow.proceed_to_qr().unwrap();
        assert!(flow.select_method(PaymentMethod::Card).is_err());
        assert_eq!(flow.method(), PaymentMethod::MobilePay);
    }

    #[test]
    fn declined_result_cannot_finalize() {
        let mut flow = flow_at_result(PaymentOutcome::Declined);
        let err = flow.finalize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot finalize the payment from the result step"
        );
        assert_eq!(flow.step(), PaymentStep::Result(PaymentOutcome::Declined));
    }

    #[test]
    fn declined_result_offers_retry_and_change_method() {
        let mut retry = flow_at_result(PaymentOutcome::Declined);
        retry.retry().unwrap();
        assert_eq!(retry.step(), PaymentStep::Qr);

        let mut change = flow_at_result(PaymentOutcome::Declined);
        change.change_method().unwrap();
        assert_eq!(change.step(), PaymentStep::Review);
    }

    #[test]
    fn approved_result_can_retry_instead_of_finalizing() {
        let mut flow = flow_at_result(PaymentOutcome::Approved);
        flow.retry().unwrap();
        assert_eq!(flow.step(), PaymentStep::Qr);
    }

    #[test]
    fn change_method_requires_a_declined_result() {
        let mut flow = flow_at_result(PaymentOutcome::Approved);
        assert!(flow.change_method().is_err());
    }

    #[test]
    fn simulating_requires_the_qr_step() {
        let mut flow = PaymentFlow::new();
        let err = flow.simulate(PaymentOutcome::Approved).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot simulate a payment from the review step"
        );
    }

    #[test]
    fn processing_must_finish_before_finalizing() {
        let mut flow = PaymentFlow::new();
        flow.proceed_to_qr().unwrap();
        flow.simulate(PaymentOutcome::Approved).unwrap();
        assert!(flow.finalize().is_err());
        assert_eq!(
            flow.step(),
            PaymentStep::Processing(PaymentOutcome::Approved)
        );
    }

    #[test]
    fn success_is_terminal() {
        let mut flow = flow_at_result(PaymentOutcome::Approved);
        flow.finalize().unwrap();
        assert!(flow.retry().is_err());
        assert!(flow.proceed_to_qr().is_err());
        assert!(flow.simulate(PaymentOutcome::Declined).is_err());
    }
}
