// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ONNX Runtime backed [`InferenceSession`].

use crate::session::{InferenceSession, SessionInputs, SessionOutputs};
use crate::SessionError;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// An ONNX model loaded into an ONNX Runtime session.
///
/// `ort` needs `&mut Session` to run, so calls are serialised through a
/// mutex. Name lists are cached at load time.
pub struct OnnxSession {
    session: Mutex<Session>,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl OnnxSession {
    /// Loads `path` with full graph optimisation.
    ///
    /// `threads` sets the intra-op thread count; `None` leaves the
    /// ONNX Runtime default.
    pub fn from_file(path: &Path, threads: Option<usize>) -> Result<Self, SessionError> {
        let create = |e: ort::Error| SessionError::Create {
            path: path.to_path_buf(),
            source: Box::new(e),
        };

        let mut builder = Session::builder()
            .map_err(create)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(create)?;
        if let Some(n) = threads {
            builder = builder.with_intra_threads(n).map_err(create)?;
        }
        let session = builder.commit_from_file(path).map_err(create)?;

        let inputs: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        let outputs: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        tracing::info!(
            "loaded ONNX model '{}' (inputs: {inputs:?}, outputs: {outputs:?})",
            path.display(),
        );

        Ok(Self {
            session: Mutex::new(session),
            inputs,
            outputs,
        })
    }
}

impl InferenceSession for OnnxSession {
    fn input_names(&self) -> &[String] {
        &self.inputs
    }

    fn output_names(&self) -> &[String] {
        &self.outputs
    }

    fn run(&self, feeds: SessionInputs<'_>) -> Result<SessionOutputs, SessionError> {
        self.run_timed(feeds).map(|(outputs, _)| outputs)
    }

    /// Times only the ONNX Runtime execution. Copying inputs into `ort`
    /// values and waiting on the session lock are excluded.
    fn run_timed(
        &self,
        feeds: SessionInputs<'_>,
    ) -> Result<(SessionOutputs, Duration), SessionError> {
        let run_err = |e: ort::Error| SessionError::Run(Box::new(e));

        let mut values: Vec<(Cow<'_, str>, SessionInputValue<'_>)> =
            Vec::with_capacity(feeds.len());
        for (name, tensor) in feeds {
            let shape = tensor.shape().dims_i64().to_vec();
            let value = Tensor::from_array((shape, tensor.as_slice().to_vec())).map_err(run_err)?;
            values.push((Cow::Borrowed(name), value.into()));
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| SessionError::Run("session mutex poisoned".into()))?;
        let start = Instant::now();
        let outputs = session.run(values).map_err(run_err)?;
        let took = start.elapsed();

        let mut result = SessionOutputs::with_capacity(self.outputs.len());
        for name in &self.outputs {
            let Some(value) = outputs.get(name.as_str()) else {
                continue;
            };
            match value.try_extract_tensor::<f32>() {
                Ok((_, data)) => {
                    result.insert(name.clone(), data.to_vec());
                }
                Err(e) => tracing::debug!("skipping non-f32 output '{name}': {e}"),
            }
        }
        Ok((result, took))
    }
}

impl std::fmt::Debug for OnnxSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxSession")
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish()
    }
}
