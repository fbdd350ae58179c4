// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Inference session collaborator.
//!
//! The pipeline treats the model as an opaque function from named input
//! tensors to named `f32` outputs. Anything that can do that, an ONNX
//! Runtime session or a test double, implements [`InferenceSession`].

use crate::SessionError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tensor_core::InputTensor;

/// Input name → tensor fed to the model.
pub type SessionInputs<'a> = HashMap<&'a str, &'a InputTensor>;

/// Output name → flattened `f32` values returned by the model.
pub type SessionOutputs = HashMap<String, Vec<f32>>;

/// A loaded model that can be run on input tensors.
///
/// Implementations are shared across calls (and threads) and must handle
/// their own synchronisation if the backend needs exclusive access.
pub trait InferenceSession: Send + Sync {
    /// Declared input names, in model order.
    fn input_names(&self) -> &[String];

    /// Declared output names, in model order.
    fn output_names(&self) -> &[String];

    /// Runs the model once.
    fn run(&self, feeds: SessionInputs<'_>) -> Result<SessionOutputs, SessionError>;

    /// Runs the model once and reports how long the model itself took.
    ///
    /// The default times the whole [`run`](Self::run) call. Backends that
    /// copy inputs or wait on a lock before executing should override this
    /// and time only the execution.
    fn run_timed(
        &self,
        feeds: SessionInputs<'_>,
    ) -> Result<(SessionOutputs, Duration), SessionError> {
        let start = Instant::now();
        let outputs = self.run(feeds)?;
        Ok((outputs, start.elapsed()))
    }
}

impl<T: InferenceSession + ?Sized> InferenceSession for Box<T> {
    fn input_names(&self) -> &[String] {
        (**self).input_names()
    }

    fn output_names(&self) -> &[String] {
        (**self).output_names()
    }

    fn run(&self, feeds: SessionInputs<'_>) -> Result<SessionOutputs, SessionError> {
        (**self).run(feeds)
    }

    fn run_timed(
        &self,
        feeds: SessionInputs<'_>,
    ) -> Result<(SessionOutputs, Duration), SessionError> {
        (**self).run_timed(feeds)
    }
}

impl<T: InferenceSession + ?Sized> InferenceSession for Arc<T> {
    fn input_names(&self) -> &[String] {
        (**self).input_names()
    }

    fn output_names(&self) -> &[String] {
        (**self).output_names()
    }

    fn run(&self, feeds: SessionInputs<'_>) -> Result<SessionOutputs, SessionError> {
        (**self).run(feeds)
    }

    fn run_timed(
        &self,
        feeds: SessionInputs<'_>,
    ) -> Result<(SessionOutputs, Duration), SessionError> {
        (**self).run_timed(feeds)
    }
}

/// The input and output a classifier talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIo {
    pub input: String,
    pub output: String,
}

impl SessionIo {
    /// Picks the input/output names to use.
    ///
    /// A configured name must be declared by the session; without one the
    /// first declared name is used.
    pub fn resolve(
        session: &dyn InferenceSession,
        input: Option<&str>,
        output: Option<&str>,
    ) -> Result<Self, SessionError> {
        let input = match input {
            Some(name) => {
                if !session.input_names().iter().any(|n| n == name) {
                    return Err(SessionError::UnknownInput {
                        name: name.to_string(),
                        available: session.input_names().to_vec(),
                    });
                }
                name.to_string()
            }
            None => session
                .input_names()
                .first()
                .cloned()
                .ok_or(SessionError::NoInputs)?,
        };

        let output = match output {
            Some(name) => {
                if !session.output_names().iter().any(|n| n == name) {
                    return Err(SessionError::UnknownOutput {
                        name: name.to_string(),
                        available: session.output_names().to_vec(),
                    });
                }
                name.to_string()
            }
            None => session
                .output_names()
                .first()
                .cloned()
                .ok_or(SessionError::NoOutputs)?,
        };

        Ok(Self { input, output })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Names {
        inputs: Vec<String>,
        outputs: Vec<String>,
    }

    impl InferenceSession for Names {
        fn input_names(&self) -> &[String] {
            &self.inputs
        }
        fn output_names(&self) -> &[String] {
            &self.outputs
        }
        fn run(&self, _feeds: SessionInputs<'_>) -> Result<SessionOutputs, SessionError> {
            Ok(SessionOutputs::new())
        }
    }

    fn names(inputs: &[&str], outputs: &[&str]) -> Names {
        Names {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_defaults_to_first_names() {
        let s = names(&["pixel_values", "mask"], &["logits", "features"]);
        let io = SessionIo::resolve(&s, None, None).unwrap();
        assert_eq!(io.input, "pixel_values");
        assert_eq!(io.output, "logits");
    }

    #[test]
    fn test_configured_names() {
        let s = names(&["a", "b"], &["x", "y"]);
        let io = SessionIo::resolve(&s, Some("b"), Some("y")).unwrap();
        assert_eq!(io, SessionIo { input: "b".into(), output: "y".into() });
    }

    #[test]
    fn test_unknown_names() {
        let s = names(&["a"], &["x"]);
        assert!(matches!(
            SessionIo::resolve(&s, Some("nope"), None),
            Err(SessionError::UnknownInput { .. })
        ));
        assert!(matches!(
            SessionIo::resolve(&s, None, Some("nope")),
            Err(SessionError::UnknownOutput { .. })
        ));
    }

    #[test]
    fn test_default_run_timed_forwards_outputs() {
        let s: Box<dyn InferenceSession> = Box::new(names(&["a"], &["x"]));
        let (out, took) = s.run_timed(SessionInputs::new()).unwrap();
        assert!(out.is_empty());
        assert!(took < Duration::from_secs(1));
    }

    #[test]
    fn test_missing_io() {
        assert!(matches!(
            SessionIo::resolve(&names(&[], &["x"]), None, None),
            Err(SessionError::NoInputs)
        ));
        assert!(matches!(
            SessionIo::resolve(&names(&["a"], &[]), None, None),
            Err(SessionError::NoOutputs)
        ));
    }
}
