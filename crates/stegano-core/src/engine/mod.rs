//! Runs encode and decode requests on a small, fixed pool of worker threads.
//!
//! Every request is a task that owns its carrier and payload, nothing is shared between
//! tasks. The steps of one task run strictly in order:
//! validate, seal or parse, check capacity, embed or extract, report.

mod pipeline;
mod progress;
mod task;

use std::sync::Arc;

use futures::executor::ThreadPool;
use futures::task::SpawnExt;
use log::{debug, error};

pub use pipeline::{
    capacity, decode, decode_text, encode, CarrierSource, EncodeOptions, EncodeOutcome,
};
pub use progress::ProgressSink;
pub use task::TaskHandle;

use crate::algorithms::Algorithm;
use crate::api::shared::Password;
use crate::cancel::CancellationToken;
use crate::error::SteganoError;
use crate::media::{validate_carrier, MIN_CARRIER_SIDE};
use crate::result::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub workers: usize,
    /// carriers with a shorter side are turned down before any work is done
    pub min_carrier_side: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            min_carrier_side: MIN_CARRIER_SIDE,
        }
    }
}

pub struct EncodeRequest {
    pub carrier: CarrierSource,
    pub message: Vec<u8>,
    pub options: EncodeOptions,
    pub progress: Option<Arc<dyn ProgressSink>>,
}

impl EncodeRequest {
    pub fn new(carrier: impl Into<CarrierSource>, message: impl Into<Vec<u8>>) -> Self {
        Self {
            carrier: carrier.into(),
            message: message.into(),
            options: EncodeOptions::default(),
            progress: None,
        }
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Arc::new(sink));
        self
    }
}

pub struct DecodeRequest {
    pub carrier: CarrierSource,
    pub password: Password,
    pub algorithm: Algorithm,
    pub progress: Option<Arc<dyn ProgressSink>>,
}

impl DecodeRequest {
    pub fn new(carrier: impl Into<CarrierSource>) -> Self {
        Self {
            carrier: carrier.into(),
            password: Password::default(),
            algorithm: Algorithm::default(),
            progress: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<Password>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Arc::new(sink));
        self
    }
}

pub struct SteganoEngine {
    pool: ThreadPool,
    config: EngineConfig,
}

impl SteganoEngine {
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let pool = ThreadPool::builder()
            .pool_size(config.workers.max(1))
            .name_prefix("stegano-worker-")
            .create()
            .map_err(SteganoError::WorkerPool)?;
        debug!("engine started with {} worker(s)", config.workers.max(1));

        Ok(Self { pool, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn encode(&self, request: EncodeRequest) -> Result<TaskHandle<EncodeOutcome>> {
        let min_side = self.config.min_carrier_side;
        self.spawn("encode", move |cancel| {
            let carrier = request.carrier.load()?;
            validate_carrier(&carrier, min_side)?;
            pipeline::encode_with(
                &carrier,
                &request.message,
                &request.options,
                request.progress.as_deref(),
                cancel,
            )
        })
    }

    pub fn decode(&self, request: DecodeRequest) -> Result<TaskHandle<Vec<u8>>> {
        self.spawn("decode", move |cancel| {
            let carrier = request.carrier.load()?;
            cancel.check()?;
            pipeline::decode_with(
                &carrier,
                request.password.as_str(),
                &request.algorithm,
                request.progress.as_deref(),
            )
        })
    }

    fn spawn<T, F>(&self, name: &'static str, job: F) -> Result<TaskHandle<T>>
    where
        T: Send + 'static,
        F: FnOnce(&CancellationToken) -> Result<T> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = self
            .pool
            .spawn_with_handle(async move {
                let result = job(&token);
                if let Err(e) = &result {
                    error!("{name} task failed: {e}");
                }
                result
            })
            .map_err(|e| SteganoError::WorkerPool(std::io::Error::other(e)))?;

        Ok(TaskHandle::new(handle, cancel))
    }
}
