use super::test_support::{StaticFetcher, TimeoutFetcher, run_async_test, run_multi_thread_test};
use super::*;
use crate::args::PositiveUsize;
use crate::data::{AmmoSet, ReferenceDataset};
use crate::error::TransportError;
use crate::metrics::{Outcome, StatSnapshot};
use crate::model::{Ammo, ContentId, MediaItem};
use crate::runner::RunContext;
use crate::validate::{EndpointKind, EndpointMap};
use reqwest::Url;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const MEDIA_METHOD: &str = "/api/v1/media_items";

fn positive_usize(value: usize) -> Result<PositiveUsize, String> {
    PositiveUsize::try_from(value).map_err(|err| err.to_string())
}

fn media_ammo() -> Ammo {
    Ammo {
        query_args: "ids=7".to_owned(),
        expected_http_code: 200,
        expected_total_items: 1,
        expected_ids: vec![ContentId::media_item(7)],
    }
}

fn media_item() -> MediaItem {
    MediaItem {
        id: 7,
        name: "Seven".to_owned(),
        ..MediaItem::default()
    }
}

fn media_body() -> Result<Vec<u8>, String> {
    serde_json::to_vec(&serde_json::json!({"total_items": 1, "items": [media_item()]}))
        .map_err(|err| format!("encode failed: {}", err))
}

fn context_for(method: &str, ammo: Ammo) -> Arc<RunContext> {
    let set = AmmoSet::new(BTreeMap::from([(method.to_owned(), vec![ammo])]));
    let dataset = ReferenceDataset::new(vec![media_item()], vec![]);
    Arc::new(RunContext::new(dataset, &set, &EndpointMap::default()))
}

fn job_for(context: &RunContext, seq: usize) -> Result<Job, String> {
    let plan = context
        .methods()
        .first()
        .ok_or_else(|| "Missing method plan".to_owned())?;
    let ammo = plan
        .ammo
        .first()
        .ok_or_else(|| "Missing ammo".to_owned())?;
    let url = Url::parse(&format!("http://127.0.0.1:9{}?seq={}", plan.method, seq))
        .map_err(|err| format!("url failed: {}", err))?;
    Ok(Job {
        url,
        ammo: Arc::clone(ammo),
        stat: plan.stat,
        endpoint: plan.endpoint,
    })
}

fn settings(workers: usize, queue_capacity: usize) -> Result<DispatcherSettings, String> {
    Ok(DispatcherSettings {
        workers: positive_usize(workers)?,
        queue_capacity: positive_usize(queue_capacity)?,
        request_timeout: Duration::from_secs(1),
    })
}

fn only_snapshot(context: &RunContext) -> Result<StatSnapshot, String> {
    context
        .stats()
        .snapshots()
        .into_iter()
        .next()
        .ok_or_else(|| "Missing snapshot".to_owned())
}

#[test]
fn dispatcher_processes_every_job_once_under_backpressure() -> Result<(), String> {
    run_multi_thread_test(4, async {
        let context = context_for(MEDIA_METHOD, media_ammo());
        let fetcher =
            Arc::new(StaticFetcher::new(200, media_body()?).with_delay(Duration::from_millis(1)));
        let dispatcher = JobDispatcher::start(
            Arc::clone(&fetcher) as Arc<dyn Fetcher>,
            Arc::clone(&context),
            settings(8, 1)?,
        );

        let total = 300;
        let mut expected = Vec::with_capacity(total);
        for seq in 0..total {
            let job = job_for(&context, seq)?;
            expected.push(job.url.to_string());
            dispatcher.submit(job).await.map_err(|err| err.to_string())?;
        }
        let summary = dispatcher.shutdown().await.map_err(|err| err.to_string())?;

        if summary.submitted != 300 || summary.processed != 300 {
            return Err(format!("Unexpected drain summary: {:?}", summary));
        }
        let mut seen = fetcher.seen();
        seen.sort();
        expected.sort();
        if seen != expected {
            return Err("Every job must be fetched exactly once".to_owned());
        }
        let snapshot = only_snapshot(&context)?;
        if snapshot.requests_count != 300 || snapshot.error_count() != 0 {
            return Err(format!("Unexpected snapshot: {:?}", snapshot));
        }
        Ok(())
    })
}

#[test]
fn dispatcher_counts_wrong_status_without_validating() -> Result<(), String> {
    run_async_test(async {
        let context = context_for(MEDIA_METHOD, media_ammo());
        let fetcher: Arc<dyn Fetcher> = Arc::new(StaticFetcher::new(500, "not json"));
        let dispatcher = JobDispatcher::start(fetcher, Arc::clone(&context), settings(2, 4)?);
        for seq in 0..10 {
            dispatcher
                .submit(job_for(&context, seq)?)
                .await
                .map_err(|err| err.to_string())?;
        }
        dispatcher.shutdown().await.map_err(|err| err.to_string())?;

        let snapshot = only_snapshot(&context)?;
        if snapshot.requests_count != 10
            || snapshot.http_code_errors != 10
            || snapshot.content_errors != 0
            || snapshot.conn_errors != 0
        {
            return Err(format!("Unexpected snapshot: {:?}", snapshot));
        }
        Ok(())
    })
}

#[test]
fn dispatcher_counts_transport_failures_as_conn_errors() -> Result<(), String> {
    run_async_test(async {
        let context = context_for(MEDIA_METHOD, media_ammo());
        let dispatcher =
            JobDispatcher::start(Arc::new(TimeoutFetcher), Arc::clone(&context), settings(3, 2)?);
        for seq in 0..7 {
            dispatcher
                .submit(job_for(&context, seq)?)
                .await
                .map_err(|err| err.to_string())?;
        }
        let summary = dispatcher.shutdown().await.map_err(|err| err.to_string())?;
        if summary.processed != 7 {
            return Err(format!("Unexpected drain summary: {:?}", summary));
        }

        let snapshot = only_snapshot(&context)?;
        if snapshot.conn_errors != 7 || snapshot.requests_count != 7 {
            return Err(format!("Unexpected snapshot: {:?}", snapshot));
        }
        Ok(())
    })
}

#[test]
fn process_job_routes_each_outcome() -> Result<(), String> {
    run_async_test(async {
        let context = context_for(MEDIA_METHOD, media_ammo());
        let job = job_for(&context, 0)?;
        let timeout = Duration::from_secs(1);

        let ok = StaticFetcher::new(200, media_body()?);
        if !process_job(&ok, &context, &job, timeout).await.is_success() {
            return Err("Expected success".to_owned());
        }

        let wrong_content = StaticFetcher::new(200, r#"{"total_items": 1, "items": []}"#);
        match process_job(&wrong_content, &context, &job, timeout).await {
            Outcome::Content(_) => {}
            other => return Err(format!("Expected content error, got {:?}", other)),
        }

        let snapshot = only_snapshot(&context)?;
        if snapshot.requests_count != 2
            || snapshot.success_count() != 1
            || snapshot.content_errors != 1
        {
            return Err(format!("Unexpected snapshot: {:?}", snapshot));
        }
        Ok(())
    })
}

#[test]
fn unvalidated_endpoint_only_checks_status() -> Result<(), String> {
    run_async_test(async {
        let context = context_for("/api/v1/health", media_ammo());
        let job = job_for(&context, 0)?;
        if job.endpoint != EndpointKind::Unvalidated {
            return Err("Expected unvalidated endpoint".to_owned());
        }
        let fetcher = StaticFetcher::new(200, "pong");
        let outcome = process_job(&fetcher, &context, &job, Duration::from_secs(1)).await;
        if !outcome.is_success() {
            return Err(format!("Expected success, got {:?}", outcome));
        }
        Ok(())
    })
}

#[test]
fn client_fetch_reads_status_and_body() -> Result<(), String> {
    run_async_test(async {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|err| format!("bind failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("addr failed: {}", err))?;
        let server = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buffer = [0u8; 1024];
                drop(stream.read(&mut buffer).await);
                drop(
                    stream
                        .write_all(
                            b"HTTP/1.1 201 Created\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
                        )
                        .await,
                );
            }
        });

        let client = reqwest::Client::new();
        let url = Url::parse(&format!("http://{}/api/v1/epg?limit=1", addr))
            .map_err(|err| format!("url failed: {}", err))?;
        let response = client
            .fetch(&url, Duration::from_secs(5))
            .await
            .map_err(|err| err.to_string())?;
        drop(server.await);

        if response.status != 201 || response.body != b"hello" {
            return Err(format!("Unexpected response: {:?}", response));
        }
        Ok(())
    })
}

#[test]
fn client_fetch_times_out_on_silent_server() -> Result<(), String> {
    run_async_test(async {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|err| format!("bind failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("addr failed: {}", err))?;
        let server = tokio::spawn(async move {
            if let Ok((stream, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(2)).await;
                drop(stream);
            }
        });

        let client = reqwest::Client::new();
        let url = Url::parse(&format!("http://{}/api/v1/search", addr))
            .map_err(|err| format!("url failed: {}", err))?;
        let result = client.fetch(&url, Duration::from_millis(100)).await;
        server.abort();

        match result {
            Err(TransportError::Timeout { .. }) => Ok(()),
            other => Err(format!("Expected timeout, got {:?}", other)),
        }
    })
}

#[test]
fn client_fetch_refused_connection_is_transport_error() -> Result<(), String> {
    run_async_test(async {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|err| format!("bind failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("addr failed: {}", err))?;
        drop(listener);

        let client = reqwest::Client::new();
        let url = Url::parse(&format!("http://{}/api/v1/search", addr))
            .map_err(|err| format!("url failed: {}", err))?;
        match client.fetch(&url, Duration::from_secs(2)).await {
            Err(TransportError::Request { .. }) => Ok(()),
            other => Err(format!("Expected request error, got {:?}", other)),
        }
    })
}
