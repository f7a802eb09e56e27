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

use crate::fake::Inner;
use crate::model::Message;
use crate::model_ext::PublishFuture;
use std::sync::Arc;

/// Publishes messages to a single topic.
///
/// Obtain publishers from [FakePubSub::publisher][crate::FakePubSub::publisher].
/// Cloning a `Publisher` returns a handle to the same publisher.
///
/// ```
/// # use pubsub_fake::FakePubSub;
/// # use pubsub_fake::model::Message;
/// # tokio_test::block_on(async {
/// let fake = FakePubSub::new();
/// let publisher = fake.publisher("pagevisits");
/// let message_id = publisher.publish(Message::new().set_data("Hello, World")).await?;
/// # pubsub_fake::Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct Publisher {
    inner: Arc<PublisherInner>,
}

#[derive(Debug)]
struct PublisherInner {
    topic: String,
    fake: Arc<Inner>,
}

impl Publisher {
    pub(crate) fn new(topic: String, fake: Arc<Inner>) -> Self {
        Self {
            inner: Arc::new(PublisherInner { topic, fake }),
        }
    }

    /// Publishes a message to the topic.
    ///
    /// The message is queued before this function returns. The returned
    /// future is already resolved with the new message id.
    pub fn publish(&self, msg: Message) -> PublishFuture {
        PublishFuture::ready(Ok(self.enqueue(msg)))
    }

    pub(crate) fn enqueue(&self, msg: Message) -> String {
        self.inner.fake.enqueue(&self.inner.topic, msg)
    }

    /// The topic this publisher sends messages to.
    pub fn topic(&self) -> &str {
        &self.inner.topic
    }

    /// Returns true if both handles refer to the same publisher.
    pub fn same_publisher(&self, other: &Publisher) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
