use indexing_notifier::{
    dispatcher::{DispatchError, DispatchOptions, Dispatcher, Order},
    notifier::{DEFAULT_TIMEOUT, NotificationOutcome, NotificationType, Notifier},
};
use notify_common::sender::{
    HttpSender, HttpSenderOptions,
    provider::{StaticTokenProvider, TokenProvider},
};
use notify_common::progress::{Progress, ProgressBar};
use serde_json::{Value, json};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn credential() -> StaticTokenProvider {
    StaticTokenProvider::from("abc".to_string())
}

async fn notifier(endpoint: &str, timeout: Duration) -> Notifier {
    let _ = env_logger::builder().is_test(true).try_init();

    // the sender has no timeout of its own, the notifier's applies
    let sender = HttpSender::new(HttpSenderOptions::new()).await.unwrap();
    Notifier::new(sender, Url::parse(endpoint).unwrap()).timeout(timeout)
}

async fn server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

fn urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://a.example/{i}")).collect()
}

/// the URLs of all notifications the server received, in the order of arrival
async fn received(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            body["url"].as_str().unwrap().to_string()
        })
        .collect()
}

#[tokio::test]
async fn notify_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(header("authorization", "Bearer abc"))
        .and(header("content-type", "application/json"))
        .and(body_json(
            json!({"url": "https://a.example/x", "type": "URL_UPDATED"}),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let outcome = notifier.notify("https://a.example/x", &credential()).await;

    assert_eq!(outcome, NotificationOutcome::Succeeded);
}

#[tokio::test]
async fn notify_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(
            json!({"url": "https://a.example/x", "type": "URL_DELETED"}),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5))
        .await
        .notification_type(NotificationType::UrlDeleted);
    let outcome = notifier.notify("https://a.example/x", &credential()).await;

    assert_eq!(outcome, NotificationOutcome::Succeeded);
}

#[tokio::test]
async fn notify_quota_exceeded() {
    let server = server(429).await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let outcome = notifier.notify("https://a.example/x", &credential()).await;

    assert_eq!(outcome, NotificationOutcome::RejectedByServer(429));
}

#[tokio::test]
async fn notify_other_success_status() {
    // only 200 counts as success
    let server = server(204).await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let outcome = notifier.notify("https://a.example/x", &credential()).await;

    assert_eq!(outcome, NotificationOutcome::RejectedByServer(204));
}

#[tokio::test]
async fn notify_unreachable() {
    // nothing is listening on port 1
    let notifier = notifier("http://127.0.0.1:1/publish", Duration::from_secs(5)).await;
    let outcome = notifier.notify("https://a.example/x", &credential()).await;

    assert!(matches!(outcome, NotificationOutcome::TransportFailed(_)));
}

#[tokio::test]
async fn notify_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let notifier = notifier(
        &format!("{}/publish", server.uri()),
        Duration::from_millis(200),
    )
    .await;
    let outcome = notifier.notify("https://a.example/x", &credential()).await;

    assert_eq!(
        outcome,
        NotificationOutcome::TransportFailed("timeout".to_string())
    );
}

#[tokio::test]
async fn notify_default_timeout() {
    let sender = HttpSender::new(HttpSenderOptions::new()).await.unwrap();
    let notifier = Notifier::new(sender, Url::parse("http://127.0.0.1:1/publish").unwrap());

    assert_eq!(notifier.timeout, DEFAULT_TIMEOUT);
}

#[tokio::test]
async fn dispatch_mixed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"url": "https://a.example/3"})))
        .respond_with(ResponseTemplate::new(429))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"url": "https://a.example/7"})))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .with_options(DispatchOptions::new().concurrency(3))
        .dispatch(urls(20), &credential())
        .await
        .unwrap();

    assert_eq!(report.total, 20);
    assert_eq!(report.processed(), 20);
    assert_eq!(report.succeeded, 18);
    assert_eq!(report.rejected, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.quota_exceeded(), 1);
    assert_eq!(report.rejected_by_status.get(&500), Some(&1));

    assert_eq!(received(&server).await.len(), 20);
}

#[tokio::test]
async fn dispatch_unreachable() {
    let notifier = notifier("http://127.0.0.1:1/publish", Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .dispatch(urls(7), &credential())
        .await
        .unwrap();

    assert_eq!(report.total, 7);
    assert_eq!(report.failed, 7);
    assert_eq!(report.processed(), 7);
}

#[tokio::test]
async fn dispatch_stable_order() {
    let server = server(200).await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .with_options(DispatchOptions::new().concurrency(1).order(Order::Stable))
        .dispatch(urls(10), &credential())
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(received(&server).await, urls(10));
}

#[tokio::test]
async fn dispatch_shuffled_covers_all() {
    let server = server(200).await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .with_options(DispatchOptions::new().order(Order::Shuffled))
        .dispatch(urls(25), &credential())
        .await
        .unwrap();

    assert_eq!(report.succeeded, 25);

    let mut received = received(&server).await;
    received.sort();
    let mut expected = urls(25);
    expected.sort();
    assert_eq!(received, expected);
}

#[tokio::test]
async fn dispatch_duplicates() {
    let server = server(200).await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let urls = vec!["https://a.example/x".to_string(); 3];
    let report = Dispatcher::new(notifier)
        .dispatch(urls, &credential())
        .await
        .unwrap();

    assert_eq!(report.succeeded, 3);
    assert_eq!(received(&server).await.len(), 3);
}

#[tokio::test]
async fn dispatch_limit() {
    let server = server(200).await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .with_options(DispatchOptions::new().order(Order::Stable).limit(4))
        .dispatch(urls(10), &credential())
        .await
        .unwrap();

    assert_eq!(report.total, 10);
    assert_eq!(report.succeeded, 4);
    assert_eq!(report.skipped, 6);
    assert_eq!(received(&server).await, urls(4));
}

#[tokio::test]
async fn dispatch_zero_concurrency() {
    let server = server(200).await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .with_options(DispatchOptions::new().concurrency(0))
        .dispatch(urls(3), &credential())
        .await
        .unwrap();

    assert_eq!(report.succeeded, 3);
}

#[tokio::test]
async fn dispatch_invalid_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let credential = StaticTokenProvider::from(String::new());
    assert!(!credential.is_valid());

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let result = Dispatcher::new(notifier)
        .dispatch(urls(3), &credential)
        .await;

    assert!(matches!(result, Err(DispatchError::Credentials(_))));
}

#[tokio::test]
async fn dispatch_nothing() {
    let notifier = notifier("http://127.0.0.1:1/publish", Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .dispatch(vec![], &StaticTokenProvider::from(String::new()))
        .await
        .unwrap();

    assert_eq!(report.total, 0);
    assert_eq!(report.processed(), 0);
}

/// Answers after a delay, recording when each request arrived.
#[derive(Clone)]
struct Delayed {
    delay: Duration,
    arrivals: Arc<Mutex<Vec<Instant>>>,
}

impl Delayed {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            arrivals: Default::default(),
        }
    }

    /// The most requests which arrived within half of the delay.
    ///
    /// A request is in flight for at least the delay, so this can't exceed the number of
    /// requests in flight at the same time.
    fn peak(&self) -> usize {
        let mut arrivals = self.arrivals.lock().unwrap().clone();
        arrivals.sort();
        let window = self.delay / 2;
        arrivals
            .iter()
            .map(|start| {
                arrivals
                    .iter()
                    .filter(|t| **t >= *start && **t - *start < window)
                    .count()
            })
            .max()
            .unwrap_or_default()
    }
}

impl Respond for Delayed {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals.lock().unwrap().push(Instant::now());
        ResponseTemplate::new(200).set_delay(self.delay)
    }
}

#[tokio::test]
async fn dispatch_concurrency_ceiling() {
    let server = MockServer::start().await;
    let delayed = Delayed::new(Duration::from_millis(300));
    Mock::given(method("POST"))
        .respond_with(delayed.clone())
        .expect(12)
        .mount(&server)
        .await;

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .with_options(DispatchOptions::new().concurrency(3))
        .dispatch(urls(12), &credential())
        .await
        .unwrap();

    assert_eq!(report.succeeded, 12);
    let peak = delayed.peak();
    assert!(peak <= 3, "{peak} requests in flight");
    assert!(peak > 1, "requests must run in parallel");
}

#[derive(Clone, Default)]
struct Counting {
    started: Arc<AtomicUsize>,
    ticks: Arc<AtomicUsize>,
    finished: Arc<AtomicBool>,
}

impl Progress for Counting {
    type Instance = Counting;

    fn start(&self, work: usize) -> Self::Instance {
        self.started.store(work, Ordering::SeqCst);
        self.clone()
    }
}

impl ProgressBar for Counting {
    async fn tick(&mut self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    async fn finish(self) {
        self.finished.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn dispatch_progress() {
    let server = server(200).await;
    let progress = Counting::default();

    let notifier = notifier(&format!("{}/publish", server.uri()), Duration::from_secs(5)).await;
    let report = Dispatcher::new(notifier)
        .with_options(DispatchOptions::new().limit(Some(4)))
        .with_progress(progress.clone())
        .dispatch(urls(6), &credential())
        .await
        .unwrap();

    assert_eq!(report.processed(), 4);
    // skipped URLs are not part of the work
    assert_eq!(progress.started.load(Ordering::SeqCst), 4);
    assert_eq!(progress.ticks.load(Ordering::SeqCst), 4);
    assert!(progress.finished.load(Ordering::SeqCst));
}
