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

use crate::Result;
use crate::error::rpc::Status;
use crate::listener::{ChannelListener, Listener, Metadata};
use crate::model::{AcknowledgeRequest, PullRequest, PullResponse};
use crate::stub;
use std::sync::Arc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Settings to create a [Subscriber].
///
/// The settings carry an in-process channel instead of a network address. The
/// endpoint is only a label, reported to the code under test.
///
/// ```
/// # use pubsub_fake::FakePubSub;
/// # use pubsub_fake::client::Subscriber;
/// let fake = FakePubSub::new();
/// let settings = fake.subscriber_settings();
/// assert_eq!(settings.endpoint(), "localhost:8080");
/// let client = Subscriber::new(settings);
/// ```
#[derive(Clone, Debug)]
pub struct SubscriberSettings {
    endpoint: String,
    channel: Arc<dyn stub::Subscriber>,
}

impl SubscriberSettings {
    /// Creates settings that route all calls to `channel`.
    pub fn new<E, T>(endpoint: E, channel: T) -> Self
    where
        E: Into<String>,
        T: stub::Subscriber + 'static,
    {
        Self {
            endpoint: endpoint.into(),
            channel: Arc::new(channel),
        }
    }

    /// The nominal endpoint of the service.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// A client to pull and acknowledge messages.
///
/// `Subscriber` uses an `Arc` internally, cloning it is cheap and all clones
/// share the same channel.
#[derive(Clone, Debug)]
pub struct Subscriber {
    inner: Arc<dyn stub::Subscriber>,
}

impl Subscriber {
    /// Creates a client from `settings`.
    pub fn new(settings: SubscriberSettings) -> Self {
        Self {
            inner: settings.channel,
        }
    }

    /// Creates a client that delegates every call to `stub`.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: stub::Subscriber + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    /// Pulls one batch of messages from `subscription`.
    ///
    /// ```
    /// # use pubsub_fake::client::Subscriber;
    /// # async fn sample(client: Subscriber) -> pubsub_fake::Result<()> {
    /// let response = client.pull("my-subscription").set_max_messages(10).send().await?;
    /// for received in response.received_messages {
    ///     println!("{:?}", received.message.data);
    /// }
    /// # Ok(()) }
    /// ```
    pub fn pull<T: Into<String>>(&self, subscription: T) -> Pull {
        Pull::new(
            self.inner.clone(),
            PullRequest::new().set_subscription(subscription),
        )
    }

    /// Starts a pull call that reports to `listener`.
    ///
    /// On success the listener receives the batch, then an OK status. On
    /// failure it only receives the status of the error. The `metadata` is
    /// echoed back in `on_close()`.
    pub async fn start<T, L>(&self, subscription: T, mut listener: L, metadata: Metadata)
    where
        T: Into<String>,
        L: Listener,
    {
        let subscription = subscription.into();
        match self.pull(subscription.as_str()).send().await {
            Ok(response) => {
                listener.on_message(response);
                listener.on_close(Status::ok(), metadata);
            }
            Err(e) => {
                tracing::warn!(subscription = %subscription, "pull call failed: {e}");
                listener.on_close(e.status(), metadata);
            }
        }
    }

    /// Pulls one batch and returns it as a stream.
    ///
    /// The stream yields the batch, or the error, and then ends.
    ///
    /// ```
    /// # use pubsub_fake::FakePubSub;
    /// # use pubsub_fake::model::Message;
    /// # use futures::StreamExt;
    /// # tokio_test::block_on(async {
    /// let fake = FakePubSub::builder().with_messages_per_pull(1_usize).build();
    /// fake.publisher("pagevisits").publish(Message::new().set_data("hello")).await?;
    /// let mut stream = fake.subscriber().streaming_pull("pagevisits-sub").await;
    /// while let Some(response) = stream.next().await.transpose()? {
    ///     assert_eq!(response.received_messages.len(), 1);
    /// }
    /// # pubsub_fake::Result::<()>::Ok(()) });
    /// ```
    pub async fn streaming_pull<T>(&self, subscription: T) -> PullStream
    where
        T: Into<String>,
    {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        self.start(subscription, ChannelListener::new(tx), Metadata::new())
            .await;
        UnboundedReceiverStream::new(rx)
    }

    /// Acknowledges the messages associated with `ack_ids`.
    pub async fn acknowledge<T, I, V>(&self, subscription: T, ack_ids: I) -> Result<()>
    where
        T: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let request = AcknowledgeRequest::new()
            .set_subscription(subscription)
            .set_ack_ids(ack_ids);
        self.inner.acknowledge(request).await
    }
}

/// The stream returned by [Subscriber::streaming_pull].
pub type PullStream = UnboundedReceiverStream<Result<PullResponse>>;

/// The request builder for [Subscriber::pull].
#[derive(Clone, Debug)]
pub struct Pull {
    stub: Arc<dyn stub::Subscriber>,
    request: PullRequest,
}

impl Pull {
    pub(crate) fn new(stub: Arc<dyn stub::Subscriber>, request: PullRequest) -> Self {
        Self { stub, request }
    }

    /// Sets the batch size. Without this the endpoint's default batch size is
    /// used.
    pub fn set_max_messages<T: Into<i32>>(mut self, v: T) -> Self {
        self.request.max_messages = v.into();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<PullResponse> {
        self.stub.pull(self.request).await
    }
}
