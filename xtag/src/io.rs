// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use aws_sdk_cloudwatch::types::{MetricDatum, StandardUnit};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

pub type FileReaderResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
pub mod file_reader;
pub mod model_loader;

pub use file_reader::*;
pub use model_loader::*;

use crate::inference::EventTimings;

/// CloudWatch datums describing one processed event.
pub fn timing_datums(timings: &EventTimings) -> Vec<MetricDatum> {
    vec![
        MetricDatum::builder()
            .metric_name("AssemblyTime")
            .value(timings.assembly_micros as f64)
            .unit(StandardUnit::Microseconds)
            .build(),
        MetricDatum::builder()
            .metric_name("InferenceTime")
            .value(timings.inference_micros as f64)
            .unit(StandardUnit::Microseconds)
            .build(),
        MetricDatum::builder()
            .metric_name("JetCount")
            .value(timings.jet_count as f64)
            .unit(StandardUnit::Count)
            .build(),
    ]
}

/// Buffers event timings from the producer workers and flushes them to CloudWatch once
/// `buffer_capacity` datums have accumulated.
pub async fn event_metrics_sidecar(
    buffer_capacity: usize,
    cloudwatch_client: Arc<aws_sdk_cloudwatch::Client>,
    namespace: &'static str,
    receiver: Arc<Mutex<mpsc::Receiver<EventTimings>>>,
    worker_id: usize,
) {
    info!(worker_id, "metrics worker starting");
    let mut metric_buffer = Vec::with_capacity(buffer_capacity);
    loop {
        let received = {
            let mut receiver_lock = receiver.lock().await;
            receiver_lock.recv().await
        };
        match received {
            Some(timings) => {
                metric_buffer.extend(timing_datums(&timings));
                if metric_buffer.len() >= buffer_capacity {
                    let metrics_to_send = std::mem::take(&mut metric_buffer);
                    if let Err(e) = cloudwatch_client
                        .put_metric_data()
                        .namespace(namespace)
                        .set_metric_data(Some(metrics_to_send))
                        .send()
                        .await
                    {
                        warn!(worker_id, error = %e, "failed to publish event metrics");
                    }
                }
            }
            None => {
                info!(worker_id, "metrics channel closed, shutting down");
                break;
            }
        }
    }
}
