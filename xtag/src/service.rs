// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! gRPC front of the tagger.
//!
//! The handler converts a request into tag-info records and queues it as a [`TagJob`].
//! Producer workers, each owning its own producer and inference session, pull jobs from the
//! shared queue one at a time and answer on the job's reply channel.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};
use tonic::{Request, Response, Status};
use tracing::{debug, error, info};
use xtag_proto::xtag::{tagger_server::Tagger, TagEventRequest, TagEventResponse};

use crate::error::InferenceError;
use crate::features::TagInfo;
use crate::inference::{EventOutput, EventProducer, EventTimings};

pub mod convert;

/// One event waiting for a producer worker.
#[derive(Debug)]
pub struct TagJob {
    pub event_id: String,
    pub tag_infos: Vec<TagInfo>,
    pub reply: oneshot::Sender<Result<EventOutput, InferenceError>>,
}

/// Processes queued events with an exclusively owned producer until the queue closes.
///
/// Timings of successful events are offered to the metrics channel without waiting;
/// they are dropped when the channel is full.
pub async fn producer_worker<P: EventProducer>(
    mut producer: P,
    receiver: Arc<Mutex<mpsc::Receiver<TagJob>>>,
    metrics_sender: Option<mpsc::Sender<EventTimings>>,
    worker_id: usize,
) {
    info!(worker_id, labels = ?producer.output_labels(), "producer worker starting");
    loop {
        let job = {
            let mut receiver_lock = receiver.lock().await;
            receiver_lock.recv().await
        };
        let Some(job) = job else {
            info!(worker_id, "job channel closed, shutting down");
            break;
        };

        let result = producer.process_event(&job.tag_infos);
        match &result {
            Ok(output) => {
                debug!(
                    worker_id,
                    event_id = %job.event_id,
                    jets = output.timings.jet_count,
                    "event tagged"
                );
                if let Some(sender) = &metrics_sender {
                    let _ = sender.try_send(output.timings);
                }
            }
            Err(e) => error!(worker_id, event_id = %job.event_id, error = %e, "event failed"),
        }
        if job.reply.send(result).is_err() {
            debug!(worker_id, event_id = %job.event_id, "caller went away before the reply");
        }
    }
}

#[derive(Debug)]
pub struct XTagService {
    job_sender: mpsc::Sender<TagJob>,
    model_id: String,
}

impl XTagService {
    pub fn new(job_sender: mpsc::Sender<TagJob>, model_id: &str) -> Self {
        XTagService {
            job_sender,
            model_id: model_id.to_string(),
        }
    }
}

#[tonic::async_trait]
impl Tagger for XTagService {
    async fn tag_event(
        &self,
        request: Request<TagEventRequest>,
    ) -> Result<Response<TagEventResponse>, Status> {
        let tag_request = request.into_inner();
        let event_id = tag_request.event_id;
        let tag_infos = tag_request
            .tag_infos
            .into_iter()
            .enumerate()
            .map(|(index, tag_info)| convert::tag_info_from_proto(index, tag_info))
            .collect::<Result<Vec<TagInfo>, _>>()
            .map_err(|e| Status::invalid_argument(e.to_string()))?;

        let (reply, reply_receiver) = oneshot::channel();
        self.job_sender
            .send(TagJob {
                event_id: event_id.clone(),
                tag_infos,
                reply,
            })
            .await
            .map_err(|_| Status::unavailable("no producer worker is running"))?;

        let output = reply_receiver
            .await
            .map_err(|_| Status::internal("producer worker dropped the event"))?
            .map_err(|e| {
                Status::internal(format!(
                    "model {} failed on event {}: {}",
                    self.model_id, event_id, e
                ))
            })?;

        Ok(Response::new(TagEventResponse {
            event_id,
            collections: output.collections.into_iter().map(Into::into).collect(),
        }))
    }
}
