//! Stateful convenience wrapper around the pure evaluator.
//!
//! [`Estimator`] keeps user inputs, length limit, and translator across
//! evaluations, caches the last result, and re-evaluates the current
//! password whenever its configuration changes. Mutations serialize
//! through one mutex; the evaluation itself is the pure function.

use crate::error::Result;
use crate::feedback::{self, Translate};
use crate::types::Estimate;
use crate::{estimate_with_options, EstimateOptions, DEFAULT_MAX_LENGTH};
use parking_lot::Mutex;

struct Inner {
    user_inputs: Vec<String>,
    max_length: usize,
    translator: Translate,
    password: Option<String>,
    last_result: Option<Estimate>,
}

/// A reusable, thread-safe password estimator.
pub struct Estimator {
    inner: Mutex<Inner>,
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator {
    pub fn new() -> Self {
        Estimator {
            inner: Mutex::new(Inner {
                user_inputs: Vec::new(),
                max_length: DEFAULT_MAX_LENGTH,
                translator: feedback::identity,
                password: None,
                last_result: None,
            }),
        }
    }

    pub fn with_user_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let estimator = Self::new();
        estimator.inner.lock().user_inputs = inputs.into_iter().map(Into::into).collect();
        estimator
    }

    /// Set the password and evaluate it, caching the result.
    pub fn set_password(&self, password: &str) -> Result<Estimate> {
        let mut inner = self.inner.lock();
        inner.password = Some(password.to_string());
        Self::evaluate(&mut inner)
    }

    /// The last evaluation result, if a password has been set.
    pub fn last_result(&self) -> Option<Estimate> {
        self.inner.lock().last_result.clone()
    }

    /// The current password, if one has been set.
    pub fn password(&self) -> Option<String> {
        self.inner.lock().password.clone()
    }

    /// Replace the user inputs and re-evaluate the current password.
    pub fn set_user_inputs<I, S>(&self, inputs: I) -> Result<Option<Estimate>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner = self.inner.lock();
        inner.user_inputs = inputs.into_iter().map(Into::into).collect();
        Self::reevaluate(&mut inner)
    }

    /// Replace the translator and re-evaluate the current password.
    ///
    /// Setting the same translator again is a no-op.
    pub fn set_translator(&self, translator: Translate) -> Result<Option<Estimate>> {
        let mut inner = self.inner.lock();
        if std::ptr::fn_addr_eq(inner.translator, translator) {
            return Ok(inner.last_result.clone());
        }
        inner.translator = translator;
        Self::reevaluate(&mut inner)
    }

    /// Change the maximum evaluated length and re-evaluate.
    pub fn set_max_length(&self, max_length: usize) -> Result<Option<Estimate>> {
        let mut inner = self.inner.lock();
        inner.max_length = max_length;
        Self::reevaluate(&mut inner)
    }

    fn reevaluate(inner: &mut Inner) -> Result<Option<Estimate>> {
        if inner.password.is_none() {
            return Ok(None);
        }
        Self::evaluate(inner).map(Some)
    }

    fn evaluate(inner: &mut Inner) -> Result<Estimate> {
        let opts = EstimateOptions::new()
            .with_user_inputs(inner.user_inputs.iter().cloned())
            .with_max_length(inner.max_length)
            .with_translator(inner.translator);
        let password = inner.password.clone().unwrap_or_default();
        let result = estimate_with_options(&password, &opts)?;
        inner.last_result = Some(result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_password_caches_result() {
        let estimator = Estimator::new();
        assert!(estimator.last_result().is_none());
        let result = estimator.set_password("horse").unwrap();
        let cached = estimator.last_result().unwrap();
        assert_eq!(result.guesses, cached.guesses);
        assert_eq!(estimator.password().as_deref(), Some("horse"));
    }

    #[test]
    fn test_user_inputs_change_reevaluates() {
        let estimator = Estimator::new();
        let before = estimator.set_password("wombat42x").unwrap();
        let after = estimator
            .set_user_inputs(["wombat42x"])
            .unwrap()
            .expect("password is set, so a new result is returned");
        assert!(after.guesses < before.guesses);
    }

    #[test]
    fn test_user_inputs_change_without_password() {
        let estimator = Estimator::new();
        assert!(estimator.set_user_inputs(["alice"]).unwrap().is_none());
    }

    #[test]
    fn test_max_length_change_reevaluates() {
        let estimator = Estimator::new();
        let long: String = "x$".repeat(50);
        let before = estimator.set_password(&long).unwrap();
        assert_eq!(before.password.chars().count(), crate::DEFAULT_MAX_LENGTH);

        let after = estimator
            .set_max_length(8)
            .unwrap()
            .expect("password is set, so a new result is returned");
        assert_eq!(after.password, "x$x$x$x$");
        assert!(after.guesses < before.guesses);
        assert_eq!(
            estimator.last_result().unwrap().password,
            after.password
        );
    }

    #[test]
    fn test_same_translator_is_noop() {
        let estimator = Estimator::new();
        estimator.set_password("horse").unwrap();
        let result = estimator.set_translator(crate::feedback::identity).unwrap();
        assert!(result.is_some());
    }

    #[test]
    fn test_translator_change_reevaluates() {
        fn shout(msg_id: &str) -> String {
            msg_id.to_uppercase()
        }
        let estimator = Estimator::new();
        let before = estimator.set_password("password").unwrap();
        let after = estimator.set_translator(shout).unwrap().unwrap();
        assert_eq!(after.feedback.warning, before.feedback.warning.to_uppercase());
    }

    #[test]
    fn test_estimator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Estimator>();
    }
}
