//! End-to-end tests against a live RabbitMQ broker.
//!
//! These are ignored by default. Start a broker reachable through the
//! `RABBIT_*` variables, make sure no other consumer is attached to the
//! `publisher` queue, and run `cargo test -- --ignored`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use courier::{Config, HandlerError, MessageHandler, MessagePublisher, Publisher, Subscription};

struct ForwardingHandler(mpsc::UnboundedSender<String>);

#[async_trait]
impl MessageHandler for ForwardingHandler {
    async fn handle(&self, body: &[u8]) -> Result<(), HandlerError> {
        let _ = self.0.send(String::from_utf8_lossy(body).into_owned());
        Ok(())
    }
}

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

async fn wait_for(rx: &mut mpsc::UnboundedReceiver<String>, expected: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    timeout(Duration::from_secs(10), async {
        while let Some(body) = rx.recv().await {
            if expected.contains(&body) {
                seen.push(body);
                if seen.len() == expected.len() {
                    break;
                }
            }
        }
    })
    .await
    .expect("timed out waiting for deliveries");
    seen
}

#[tokio::test]
#[ignore = "requires a running RabbitMQ broker"]
async fn test_publish_consume_round_trip() {
    let config = Config::from_env();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // One subscription for every scenario: parallel consumers on the shared
    // queue would split deliveries between them.
    // Consumer declares first, publisher declares again: both must succeed.
    let subscription = Subscription::open(&config.amqp_url()).await.unwrap();
    let _receiver = subscription.spawn(ForwardingHandler(tx));
    let publisher = Publisher::new(config.amqp_url());

    // Body arrives unchanged.
    let message = unique("hello world / \u{fc}n\u{ef}code");
    publisher.publish(&message).await.unwrap();
    let seen = wait_for(&mut rx, &[message.clone()]).await;
    assert_eq!(seen, vec![message]);

    // Sequential publishes are processed in order.
    let messages: Vec<String> = (0..5).map(|i| unique(&format!("ordered-{i}"))).collect();
    for message in &messages {
        publisher.publish(message).await.unwrap();
    }
    let seen = wait_for(&mut rx, &messages).await;
    assert_eq!(seen, messages);

    // Concurrent publishes each use their own connection.
    let first = unique("concurrent-a");
    let second = unique("concurrent-b");
    let (a, b) = tokio::join!(publisher.publish(&first), publisher.publish(&second));
    a.unwrap();
    b.unwrap();

    let mut seen = wait_for(&mut rx, &[first.clone(), second.clone()]).await;
    seen.sort();
    let mut expected = vec![first, second];
    expected.sort();
    assert_eq!(seen, expected);
}
