// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xtag::config::XTagServiceConfig;
use xtag::inference::{EventTimings, XTagProducer};
use xtag::io::{self, FileReader, LocalReader, S3Reader};
use xtag::service::{self, TagJob, XTagService};
use xtag_proto::xtag::tagger_server::TaggerServer;

fn cli_arg<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str, String> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("CLI argument ({}) {} is missing", index, what))
}

pub fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_thread_names(true)
        .init();

    let args: Vec<String> = env::args().collect();
    let ip_address: Ipv4Addr = cli_arg(&args, 1, "IP address")?.parse()?;
    let service_config_path = cli_arg(&args, 2, "service configuration path")?.to_string();
    let met_thread_cnt: usize = cli_arg(&args, 3, "metrics thread count")?.parse()?;
    let worker_cnt: usize = cli_arg(&args, 4, "producer worker count")?.parse()?;
    if worker_cnt == 0 {
        return Err("at least one producer worker is required".into());
    }

    let config_runtime = tokio::runtime::Builder::new_current_thread()
        .thread_name("xtag-config-loader")
        .enable_all()
        .build()?;

    // every worker gets its own session over its own copy of the graph
    let (service_config, producers, cloudwatch_client) = config_runtime.block_on(async {
        let aws_config = aws_config::load_from_env().await;
        let local_reader = LocalReader::new();
        let s3_reader = S3Reader::new(aws_sdk_s3::Client::new(&aws_config));
        let cloudwatch_client = Arc::new(aws_sdk_cloudwatch::Client::new(&aws_config));

        let service_config = XTagServiceConfig::from_json(
            &io::select_reader(&service_config_path, &local_reader, &s3_reader)
                .read_string(&service_config_path)
                .await?,
        )?;
        let graph_path = &service_config.producer.graph_path;
        let graph_bytes = io::select_reader(graph_path, &local_reader, &s3_reader)
            .read_bytes(graph_path)
            .await?;

        let mut producers = Vec::with_capacity(worker_cnt);
        for _ in 0..worker_cnt {
            let session = io::load_graph(&graph_bytes)?;
            producers.push(XTagProducer::initialize(&service_config.producer, session)?);
        }

        Ok::<_, Box<dyn std::error::Error + Send + Sync>>((
            service_config,
            producers,
            cloudwatch_client,
        ))
    })?;

    config_runtime.shutdown_background();

    let server_runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("xtag-server-worker")
        .enable_all()
        .build()?;

    let producer_runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_cnt)
        .thread_name("xtag-producer-worker")
        .enable_all()
        .build()?;

    let metrics_runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(met_thread_cnt.max(1))
        .thread_name("xtag-metrics-worker")
        .enable_all()
        .build()?;

    let (metrics_sender, metrics_receiver) = tokio::sync::mpsc::channel::<EventTimings>(200);
    let (job_sender, job_receiver) =
        tokio::sync::mpsc::channel::<TagJob>(service_config.job_queue_capacity);

    let shared_metrics_receiver = Arc::new(tokio::sync::Mutex::new(metrics_receiver));
    let shared_job_receiver = Arc::new(tokio::sync::Mutex::new(job_receiver));
    for worker_id in 0..met_thread_cnt {
        metrics_runtime.spawn(io::event_metrics_sidecar(
            500,
            Arc::clone(&cloudwatch_client),
            "XTagService",
            Arc::clone(&shared_metrics_receiver),
            worker_id,
        ));
    }
    let metrics_sender = (met_thread_cnt > 0).then_some(metrics_sender);
    for (worker_id, producer) in producers.into_iter().enumerate() {
        producer_runtime.spawn(service::producer_worker(
            producer,
            Arc::clone(&shared_job_receiver),
            metrics_sender.clone(),
            worker_id,
        ));
    }

    let server_addr = SocketAddr::from((ip_address, service_config.port_number));
    let connection_concurrency = service_config.connection_concurrency as usize;
    let xtag_service = XTagService::new(job_sender, &service_config.model_id);
    info!(
        address = %server_addr,
        model_id = %service_config.model_id,
        workers = worker_cnt,
        "XTag service listening"
    );
    server_runtime.block_on(async {
        Server::builder()
            .concurrency_limit_per_connection(connection_concurrency)
            .tcp_keepalive(Some(std::time::Duration::from_secs(30)))
            .tcp_nodelay(true)
            .add_service(TaggerServer::new(xtag_service))
            .serve(server_addr)
            .await
    })?;

    producer_runtime.shutdown_background();
    metrics_runtime.shutdown_background();
    server_runtime.shutdown_background();

    Ok(())
}
