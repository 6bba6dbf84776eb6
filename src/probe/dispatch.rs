// src/probe/dispatch.rs
// =============================================================================
// This module fans URL checks out to concurrent tasks and collects the
// results back in.
//
// How it works:
// 1. Create one results channel (the "conduit") with room for every URL
// 2. Spawn producers: either one task per URL, or a fixed pool of workers
//    that pull URLs from a shared queue
// 3. Every producer owns a clone of the channel's Sender
// 4. Drop our own Sender, so the channel closes exactly when the last
//    producer finishes
// 5. Drain the channel until recv() returns None
//
// Rust concepts:
// - tokio::spawn: Run a future as an independent task
// - mpsc channels: Many producers, one consumer, safe by construction
// - Arc<Mutex<T>>: Share one queue between many workers
// =============================================================================

use super::check::{check_url, UrlStatus};
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// How many checks may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    /// One task per URL, all started immediately
    Unbounded,
    /// A fixed number of workers sharing a work queue
    Workers(usize),
}

impl From<usize> for Concurrency {
    // 0 reads as "no limit"
    fn from(n: usize) -> Self {
        if n == 0 {
            Concurrency::Unbounded
        } else {
            Concurrency::Workers(n)
        }
    }
}

// Checks every URL and returns one UrlStatus per input entry
//
// Duplicated URLs are checked (and reported) once per occurrence.
// The order of the returned records is the order in which checks finished,
// NOT the input order.
pub async fn run_all(client: &Client, urls: Vec<String>, concurrency: Concurrency) -> Vec<UrlStatus> {
    let total = urls.len();
    if total == 0 {
        return Vec::new();
    }

    log::info!("checking {} url(s) with {:?}", total, concurrency);

    // Capacity = N, so no producer ever waits on a slow collector
    let (tx, mut rx) = mpsc::channel::<UrlStatus>(total);

    let handles = match concurrency {
        Concurrency::Unbounded => spawn_per_url(client, urls, &tx),
        Concurrency::Workers(n) => spawn_workers(client, urls, n, &tx).await,
    };

    // Our copy of the Sender must go, otherwise recv() below never sees
    // the channel close and we wait forever
    drop(tx);

    let mut results = Vec::with_capacity(total);
    while let Some(status) = rx.recv().await {
        results.push(status);
    }

    // Every Sender is gone by now, so these handles are already finished;
    // awaiting them just surfaces panics
    for joined in join_all(handles).await {
        if let Err(e) = joined {
            log::warn!("probe task failed: {}", e);
        }
    }

    if results.len() != total {
        log::warn!("expected {} result(s) but collected {}", total, results.len());
    }

    let up = results.iter().filter(|r| r.is_up()).count();
    log::info!("finished: {} up, {} down", up, results.len() - up);

    results
}

// One task per URL
fn spawn_per_url(
    client: &Client,
    urls: Vec<String>,
    tx: &mpsc::Sender<UrlStatus>,
) -> Vec<JoinHandle<()>> {
    urls.into_iter()
        .map(|url| {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let status = check_url(&client, &url).await;
                // Only fails if the collector is gone, and it never leaves early
                let _ = tx.send(status).await;
            })
        })
        .collect()
}

// A fixed pool of workers pulling from a shared queue
async fn spawn_workers(
    client: &Client,
    urls: Vec<String>,
    workers: usize,
    tx: &mpsc::Sender<UrlStatus>,
) -> Vec<JoinHandle<()>> {
    let workers = workers.min(urls.len());

    // Fill the whole queue up front, then close it; workers stop when
    // recv() returns None
    let (queue_tx, queue_rx) = mpsc::channel::<String>(urls.len());
    for url in urls {
        // Capacity matches the URL count, so this never waits
        if queue_tx.send(url).await.is_err() {
            break;
        }
    }
    drop(queue_tx);

    let queue = Arc::new(Mutex::new(queue_rx));

    (0..workers)
        .map(|id| {
            let client = client.clone();
            let tx = tx.clone();
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                loop {
                    // Hold the lock only long enough to take one URL
                    let next = queue.lock().await.recv().await;
                    let Some(url) = next else { break };

                    let status = check_url(&client, &url).await;
                    if tx.send(status).await.is_err() {
                        break;
                    }
                }
                log::debug!("worker {} done", id);
            })
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. How do we know when every check is done?
//    - Each task owns a Sender. When a task ends, its Sender is dropped
//    - A channel closes once ALL Senders are dropped
//    - So "channel closed" means "every task finished" - no counter needed
//
// 2. Why drop(tx) after spawning?
//    - run_all itself holds the original Sender
//    - If we kept it, the channel would never close and the loop would hang
//
// 3. Why a channel sized to the number of URLs?
//    - send() on a full bounded channel waits
//    - With room for every result, no task ever waits on the collector
//
// 4. Why a worker pool at all?
//    - One task per URL is fine for a handful of URLs
//    - For thousands, it means thousands of sockets at once
//    - Workers(n) keeps at most n requests in flight
//
// 5. What does `let Some(url) = next else { break };` do?
//    - It's "let-else": bind the value if the pattern matches, otherwise
//      run the else block (which must leave the loop or function)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{build_client, refused_url, Status};
    use std::collections::HashMap;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Counts how many records each URL received
    fn tally(results: &[UrlStatus]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for r in results {
            *counts.entry(r.url.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_concurrency_from_usize() {
        assert_eq!(Concurrency::from(0), Concurrency::Unbounded);
        assert_eq!(Concurrency::from(1), Concurrency::Workers(1));
        assert_eq!(Concurrency::from(64), Concurrency::Workers(64));
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let client = build_client(None).unwrap();

        assert!(run_all(&client, Vec::new(), Concurrency::Unbounded).await.is_empty());
        assert!(run_all(&client, Vec::new(), Concurrency::Workers(4)).await.is_empty());
    }

    #[tokio::test]
    async fn test_mixed_up_and_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = build_client(None).unwrap();

        let up_ok = format!("{}/ok", server.uri());
        let up_500 = format!("{}/broken", server.uri());
        let down = refused_url();
        let invalid = "http://totally-invalid-host-xyz.invalid".to_string();
        let urls = vec![up_ok.clone(), up_500.clone(), down.clone(), invalid.clone()];

        for concurrency in [Concurrency::Unbounded, Concurrency::Workers(2)] {
            let results = run_all(&client, urls.clone(), concurrency).await;
            assert_eq!(results.len(), 4);

            let by_url: HashMap<_, _> = results.iter().map(|r| (r.url.clone(), r.status)).collect();
            assert_eq!(by_url[&up_ok], Status::Up);
            assert_eq!(by_url[&up_500], Status::Up);
            assert_eq!(by_url[&down], Status::Down);
            assert_eq!(by_url[&invalid], Status::Down);
        }
    }

    #[tokio::test]
    async fn test_duplicates_each_get_a_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(6)
            .mount(&server)
            .await;
        let client = build_client(None).unwrap();
        let url = server.uri();

        let results = run_all(&client, vec![url.clone(); 3], Concurrency::Unbounded).await;
        assert_eq!(tally(&results)[&url], 3);

        let results = run_all(&client, vec![url.clone(); 3], Concurrency::Workers(1)).await;
        assert_eq!(tally(&results)[&url], 3);
    }

    #[tokio::test]
    async fn test_every_url_reported_exactly_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        let client = build_client(None).unwrap();
        let urls: Vec<String> = (0..50).map(|i| format!("{}/page/{}", server.uri(), i)).collect();

        // More workers than URLs, fewer workers than URLs, and a single worker
        for concurrency in [Concurrency::Workers(200), Concurrency::Workers(7), Concurrency::Workers(1)] {
            let results = run_all(&client, urls.clone(), concurrency).await;
            let counts = tally(&results);

            assert_eq!(results.len(), urls.len());
            assert!(urls.iter().all(|u| counts.get(u) == Some(&1)));
            assert!(results.iter().all(|r| r.status == Status::Up));
        }
    }

    #[tokio::test]
    async fn test_thousand_unreachable_urls_unbounded() {
        let client = build_client(None).unwrap();
        let url = refused_url();

        let results = run_all(&client, vec![url.clone(); 1000], Concurrency::Unbounded).await;

        assert_eq!(results.len(), 1000);
        assert!(results.iter().all(|r| r.url == url && r.status == Status::Down));
    }

    #[tokio::test]
    async fn test_thousand_unreachable_urls_with_workers() {
        let client = build_client(None).unwrap();
        let url = refused_url();

        let results = run_all(&client, vec![url; 1000], Concurrency::Workers(16)).await;

        assert_eq!(results.len(), 1000);
        assert!(results.iter().all(|r| r.status == Status::Down));
    }

    #[tokio::test]
    async fn test_timestamps_fall_inside_the_run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let client = build_client(None).unwrap();
        let urls = vec![server.uri(), refused_url()];

        let started = chrono::Utc::now();
        let results = run_all(&client, urls, Concurrency::Unbounded).await;
        let finished = chrono::Utc::now();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| started <= r.timestamp && r.timestamp <= finished));
    }
}
