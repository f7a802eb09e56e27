// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub(crate) mod builder;

use crate::client::{Publisher, Subscriber, SubscriberSettings};
use crate::model::{
    AcknowledgeRequest, Message, PublishRequest, PublishResponse, PullRequest, PullResponse,
    ReceivedMessage,
};
use crate::{Error, Result};
use builder::{Config, FakePubSubBuilder};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

/// An in-process fake of the Pub/Sub publish and pull endpoints.
///
/// All topics share a single FIFO queue. Publishing appends to the queue and
/// resolves immediately with a new message id. Pulling removes a full batch
/// from the front of the queue, or fails without removing anything if the
/// queue is too short.
///
/// `FakePubSub` is cheap to clone, all clones share the same queue.
///
/// # Example
/// ```
/// # use pubsub_fake::FakePubSub;
/// # use pubsub_fake::model::Message;
/// # tokio_test::block_on(async {
/// let fake = FakePubSub::new();
/// let publisher = fake.publisher("pagevisits");
/// for i in 0..10 {
///     publisher.publish(Message::new().set_data(format!("visit-{i}"))).await?;
/// }
/// let subscriber = fake.subscriber();
/// let response = subscriber.pull("pagevisits-sub").send().await?;
/// assert_eq!(response.received_messages.len(), 10);
/// # pubsub_fake::Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct FakePubSub {
    inner: Arc<Inner>,
    publishers: Arc<Mutex<HashMap<String, Publisher>>>,
}

impl FakePubSub {
    /// Creates a fake with the default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder to configure the fake.
    pub fn builder() -> FakePubSubBuilder {
        FakePubSubBuilder::new()
    }

    pub(crate) fn new_with_config(config: Config) -> Self {
        Self {
            inner: Arc::new(Inner::new(config)),
            publishers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the publisher for `topic`.
    ///
    /// The publisher is created on first use. Later calls with the same topic
    /// return a handle to the same publisher.
    pub fn publisher<T: Into<String>>(&self, topic: T) -> Publisher {
        let topic = topic.into();
        let mut publishers = lock(&self.publishers);
        publishers
            .entry(topic)
            .or_insert_with_key(|topic| {
                tracing::debug!(topic = %topic, "creating publisher");
                Publisher::new(topic.clone(), self.inner.clone())
            })
            .clone()
    }

    /// Returns the settings a subscriber client needs to reach this fake.
    ///
    /// The settings point at an in-process channel, no network address is
    /// involved.
    pub fn subscriber_settings(&self) -> SubscriberSettings {
        SubscriberSettings::new(self.inner.config.endpoint.clone(), self.clone())
    }

    /// Returns a subscriber client connected to this fake.
    pub fn subscriber(&self) -> Subscriber {
        Subscriber::new(self.subscriber_settings())
    }

    /// Formats the full resource name of `topic` in the configured project.
    pub fn topic_path(&self, topic: &str) -> String {
        format!("projects/{}/topics/{topic}", self.inner.config.project)
    }

    /// The configured project.
    pub fn project(&self) -> &str {
        &self.inner.config.project
    }

    /// The number of messages each pull removes from the queue.
    pub fn messages_per_pull(&self) -> usize {
        self.inner.config.messages_per_pull
    }

    /// The number of messages waiting to be pulled.
    pub fn pending(&self) -> usize {
        lock(&self.inner.queue).len()
    }

    /// The ack ids received by `acknowledge()`, in arrival order.
    pub fn acknowledged(&self) -> Vec<String> {
        lock(&self.inner.acknowledged).clone()
    }
}

impl Default for FakePubSub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl crate::stub::Publisher for FakePubSub {
    async fn publish(&self, req: PublishRequest) -> Result<PublishResponse> {
        let publisher = self.publisher(req.topic);
        let message_ids = req
            .messages
            .into_iter()
            .map(|m| publisher.enqueue(m))
            .collect();
        Ok(PublishResponse { message_ids })
    }
}

#[async_trait::async_trait]
impl crate::stub::Subscriber for FakePubSub {
    async fn pull(&self, req: PullRequest) -> Result<PullResponse> {
        let requested = match req.max_messages {
            n if n < 0 => {
                return Err(Error::InvalidArgument(format!(
                    "max_messages must not be negative, got {n}"
                )));
            }
            0 => self.inner.config.messages_per_pull,
            n => n as usize,
        };
        let received_messages = self
            .inner
            .take_batch(&req.subscription, requested)?
            .into_iter()
            .map(|message| ReceivedMessage {
                ack_id: uuid::Uuid::new_v4().to_string(),
                message,
                delivery_attempt: 1,
            })
            .collect();
        Ok(PullResponse { received_messages })
    }

    async fn acknowledge(&self, req: AcknowledgeRequest) -> Result<()> {
        tracing::debug!(
            subscription = %req.subscription,
            count = req.ack_ids.len(),
            "acknowledging messages"
        );
        lock(&self.inner.acknowledged).extend(req.ack_ids);
        Ok(())
    }
}

/// The state shared by the fake and all its publishers.
#[derive(Debug)]
pub(crate) struct Inner {
    config: Config,
    // Shared by all topics.
    queue: Mutex<VecDeque<Message>>,
    acknowledged: Mutex<Vec<String>>,
}

impl Inner {
    fn new(config: Config) -> Self {
        Self {
            config,
            queue: Mutex::new(VecDeque::new()),
            acknowledged: Mutex::new(Vec::new()),
        }
    }

    /// Appends `message` to the queue and returns its new id.
    pub(crate) fn enqueue(&self, topic: &str, message: Message) -> String {
        let message_id = uuid::Uuid::new_v4().to_string();
        let message = Message {
            message_id: message_id.clone(),
            publish_time: Some(SystemTime::now()),
            ..message
        };
        let mut queue = lock(&self.queue);
        queue.push_back(message);
        tracing::debug!(
            topic,
            message_id = %message_id,
            pending = queue.len(),
            "message published"
        );
        message_id
    }

    /// Removes exactly `requested` messages from the front of the queue.
    ///
    /// Leaves the queue untouched if it holds fewer messages.
    fn take_batch(&self, subscription: &str, requested: usize) -> Result<Vec<Message>> {
        let mut queue = lock(&self.queue);
        let available = queue.len();
        if available < requested {
            tracing::warn!(subscription, requested, available, "pull cannot fill a batch");
            return Err(Error::InsufficientMessages {
                requested,
                available,
            });
        }
        let batch: Vec<Message> = queue.drain(..requested).collect();
        tracing::debug!(
            subscription,
            pulled = batch.len(),
            pending = queue.len(),
            "messages pulled"
        );
        Ok(batch)
    }
}

// The protected data is never left half-updated, so a poisoned lock is safe
// to reuse.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{Publisher as _, Subscriber as _};
    use pubsub_fake_test_utils::tracing::enable_tracing;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use test_case::test_case;

    fn messages(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| Message::new().set_data(format!("message-{i}")))
            .collect()
    }

    fn payloads(response: &PullResponse) -> Vec<String> {
        response
            .received_messages
            .iter()
            .map(|r| String::from_utf8_lossy(&r.message.data).to_string())
            .collect()
    }

    #[tokio::test]
    async fn publish_then_pull() -> anyhow::Result<()> {
        let _guard = enable_tracing();
        let fake = FakePubSub::new();
        let publisher = fake.publisher("pagevisits");
        let mut ids = Vec::new();
        for m in messages(10) {
            ids.push(publisher.publish(m).await?);
        }
        assert_eq!(fake.pending(), 10);

        let response = fake
            .pull(PullRequest::new().set_subscription("sub"))
            .await?;
        let want: Vec<String> = (0..10).map(|i| format!("message-{i}")).collect();
        assert_eq!(payloads(&response), want);
        let got_ids: Vec<String> = response
            .received_messages
            .iter()
            .map(|r| r.message.message_id.clone())
            .collect();
        assert_eq!(got_ids, ids);
        assert_eq!(fake.pending(), 0);
        Ok(())
    }

    #[test_case(10, 10)]
    #[test_case(15, 10)]
    #[test_case(25, 10)]
    #[tokio::test]
    async fn pull_takes_first_inserted(published: usize, batch: usize) -> anyhow::Result<()> {
        let fake = FakePubSub::new();
        let publisher = fake.publisher("pagevisits");
        for m in messages(published) {
            publisher.publish(m).await?;
        }
        let response = fake.pull(PullRequest::new()).await?;
        let want: Vec<String> = (0..batch).map(|i| format!("message-{i}")).collect();
        assert_eq!(payloads(&response), want);
        assert_eq!(fake.pending(), published - batch);
        Ok(())
    }

    #[tokio::test]
    async fn consecutive_pulls() -> anyhow::Result<()> {
        let fake = FakePubSub::new();
        let publisher = fake.publisher("pagevisits");
        for m in messages(20) {
            publisher.publish(m).await?;
        }
        let first = fake.pull(PullRequest::new()).await?;
        let second = fake.pull(PullRequest::new()).await?;
        let want: Vec<String> = (10..20).map(|i| format!("message-{i}")).collect();
        assert_eq!(first.received_messages.len(), 10);
        assert_eq!(payloads(&second), want);
        Ok(())
    }

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(9)]
    #[tokio::test]
    async fn short_queue_fails_without_removing(published: usize) -> anyhow::Result<()> {
        let fake = FakePubSub::new();
        let publisher = fake.publisher("pagevisits");
        for m in messages(published) {
            publisher.publish(m).await?;
        }
        let err = fake.pull(PullRequest::new()).await.unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientMessages {
                requested: 10,
                available: published
            }
        );
        assert_eq!(fake.pending(), published);
        Ok(())
    }

    #[tokio::test]
    async fn explicit_batch_size() -> anyhow::Result<()> {
        let fake = FakePubSub::new();
        let publisher = fake.publisher("pagevisits");
        for m in messages(5) {
            publisher.publish(m).await?;
        }
        let response = fake
            .pull(PullRequest::new().set_max_messages(3))
            .await?;
        assert_eq!(payloads(&response), vec!["message-0", "message-1", "message-2"]);
        assert_eq!(fake.pending(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn configured_batch_size() -> anyhow::Result<()> {
        let fake = FakePubSub::builder()
            .with_messages_per_pull(2_usize)
            .build();
        let publisher = fake.publisher("pagevisits");
        for m in messages(3) {
            publisher.publish(m).await?;
        }
        let response = fake.pull(PullRequest::new()).await?;
        assert_eq!(response.received_messages.len(), 2);
        assert_eq!(fake.pending(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn negative_batch_size() {
        let fake = FakePubSub::new();
        let err = fake
            .pull(PullRequest::new().set_max_messages(-1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{err:?}");
    }

    #[tokio::test]
    async fn receipt_metadata() -> anyhow::Result<()> {
        let fake = FakePubSub::new();
        let publisher = fake.publisher("pagevisits");
        for m in messages(10) {
            publisher.publish(m).await?;
        }
        let response = fake.pull(PullRequest::new()).await?;
        let ack_ids: HashSet<&str> = response
            .received_messages
            .iter()
            .map(|r| r.ack_id.as_str())
            .collect();
        assert_eq!(ack_ids.len(), 10, "{response:?}");
        for received in &response.received_messages {
            assert!(!received.ack_id.is_empty(), "{received:?}");
            assert_eq!(received.delivery_attempt, 1);
            assert!(received.message.publish_time.is_some(), "{received:?}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn topics_share_one_queue() -> anyhow::Result<()> {
        let fake = FakePubSub::builder()
            .with_messages_per_pull(2_usize)
            .build();
        fake.publisher("a").publish(Message::new().set_data("from-a")).await?;
        fake.publisher("b").publish(Message::new().set_data("from-b")).await?;
        let response = fake.pull(PullRequest::new().set_subscription("a-sub")).await?;
        assert_eq!(payloads(&response), vec!["from-a", "from-b"]);
        Ok(())
    }

    #[tokio::test]
    async fn stub_publish() -> anyhow::Result<()> {
        let fake = FakePubSub::new();
        let response = fake
            .publish(
                PublishRequest::new()
                    .set_topic("pagevisits")
                    .set_messages(messages(3)),
            )
            .await?;
        assert_eq!(response.message_ids.len(), 3);
        assert_eq!(fake.pending(), 3);
        let stored = lock(&fake.publishers).get("pagevisits").cloned();
        let stored = stored.ok_or_else(|| anyhow::anyhow!("missing publisher for pagevisits"))?;
        assert!(stored.same_publisher(&fake.publisher("pagevisits")));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_publish_and_pull() -> anyhow::Result<()> {
        const PUBLISHERS: usize = 8;
        const PER_PUBLISHER: usize = 100;
        const PULLERS: usize = 8;

        let fake = FakePubSub::new();
        let done = Arc::new(AtomicBool::new(false));

        let pullers: Vec<_> = (0..PULLERS)
            .map(|i| {
                let fake = fake.clone();
                let done = done.clone();
                tokio::spawn(async move {
                    let mut ids = Vec::new();
                    loop {
                        let finished = done.load(Ordering::SeqCst);
                        let request = PullRequest::new().set_subscription(format!("sub-{i}"));
                        match fake.pull(request).await {
                            Ok(response) => ids.extend(
                                response
                                    .received_messages
                                    .into_iter()
                                    .map(|r| r.message.message_id),
                            ),
                            Err(Error::InsufficientMessages { .. }) if finished => break,
                            Err(Error::InsufficientMessages { .. }) => {
                                tokio::task::yield_now().await
                            }
                            Err(e) => return Err(e),
                        }
                    }
                    Ok(ids)
                })
            })
            .collect();

        let publishers: Vec<_> = (0..PUBLISHERS)
            .map(|i| {
                let publisher = fake.publisher(format!("topic-{}", i % 2));
                tokio::spawn(async move {
                    let mut ids = Vec::new();
                    for n in 0..PER_PUBLISHER {
                        let msg = Message::new().set_data(format!("{i}-{n}"));
                        ids.push(publisher.publish(msg).await?);
                    }
                    Result::<Vec<String>>::Ok(ids)
                })
            })
            .collect();

        let mut published = HashSet::new();
        for task in publishers {
            published.extend(task.await??);
        }
        done.store(true, Ordering::SeqCst);

        let mut pulled = Vec::new();
        for task in pullers {
            pulled.extend(task.await??);
        }
        assert_eq!(published.len(), PUBLISHERS * PER_PUBLISHER);
        assert_eq!(pulled.len(), published.len());
        assert_eq!(pulled.into_iter().collect::<HashSet<_>>(), published);
        assert_eq!(fake.pending(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn huge_batch_is_insufficient() -> anyhow::Result<()> {
        let fake = FakePubSub::new();
        fake.publish(
            PublishRequest::new()
                .set_topic("pagevisits")
                .set_messages(messages(3)),
        )
        .await?;
        let err = fake
            .pull(PullRequest::new().set_max_messages(i32::MAX))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientMessages {
                requested: i32::MAX as usize,
                available: 3
            }
        );
        assert_eq!(fake.pending(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn acknowledge() -> anyhow::Result<()> {
        let fake = FakePubSub::new();
        assert!(fake.acknowledged().is_empty());
        fake.acknowledge(
            AcknowledgeRequest::new()
                .set_subscription("sub")
                .set_ack_ids(["a", "b"]),
        )
        .await?;
        fake.acknowledge(AcknowledgeRequest::new().set_ack_ids(["c"]))
            .await?;
        assert_eq!(fake.acknowledged(), vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn publisher_is_memoized() {
        let fake = FakePubSub::new();
        let a1 = fake.publisher("a");
        let a2 = fake.publisher("a".to_string());
        let b = fake.publisher("b");
        assert!(a1.same_publisher(&a2), "{a1:?} {a2:?}");
        assert!(!a1.same_publisher(&b), "{a1:?} {b:?}");
        assert_eq!(a1.topic(), "a");
        assert_eq!(b.topic(), "b");
    }

    #[test]
    fn clones_share_state() {
        let fake = FakePubSub::new();
        let clone = fake.clone();
        let _ = clone.publisher("a").publish(Message::new());
        assert_eq!(fake.pending(), 1);
        assert!(fake.publisher("a").same_publisher(&clone.publisher("a")));
    }

    #[test]
    fn accessors() {
        let fake = FakePubSub::default();
        assert_eq!(fake.project(), "test-project");
        assert_eq!(fake.messages_per_pull(), 10);
        assert_eq!(
            fake.topic_path("pagevisits"),
            "projects/test-project/topics/pagevisits"
        );
        assert_eq!(fake.subscriber_settings().endpoint(), "localhost:8080");
    }

    #[test]
    fn recovers_poisoned_lock() {
        let fake = FakePubSub::new();
        let inner = fake.inner.clone();
        let _ = std::thread::spawn(move || {
            let _guard = inner.queue.lock();
            panic!("poison the queue");
        })
        .join();
        assert_eq!(fake.pending(), 0);
        let _ = fake.publisher("a").publish(Message::new());
        assert_eq!(fake.pending(), 1);
    }
}
