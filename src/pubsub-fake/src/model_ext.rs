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

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::sync::oneshot;

/// A [`Future`] representing a publish operation.
///
/// This is returned by [`Publisher::publish`](crate::client::Publisher::publish).
/// Awaiting this future returns the message id assigned by the endpoint.
///
/// The fake endpoint resolves the future before `publish()` returns, awaiting
/// it never suspends.
///
/// # Example
///
/// ```
/// # use pubsub_fake::FakePubSub;
/// # use pubsub_fake::model::Message;
/// # tokio_test::block_on(async {
/// let fake = FakePubSub::new();
/// let publisher = fake.publisher("pagevisits");
/// let publish_future = publisher.publish(Message::new().set_data("hello world"));
/// let message_id = publish_future.await?;
/// assert!(!message_id.is_empty());
/// # pubsub_fake::Result::<()>::Ok(()) });
/// ```
#[derive(Debug)]
pub struct PublishFuture {
    pub(crate) rx: oneshot::Receiver<crate::Result<String>>,
}

impl PublishFuture {
    /// Returns a future that is already resolved with `result`.
    pub(crate) fn ready(result: crate::Result<String>) -> Self {
        let (tx, rx) = oneshot::channel();
        // The receiver is alive, this cannot fail.
        let _ = tx.send(result);
        Self { rx }
    }
}

impl Future for PublishFuture {
    /// The result of the publish operation.
    /// - `Ok(String)`: The endpoint-assigned message ID.
    /// - `Err(Error)`: The publish failed.
    type Output = crate::Result<String>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = ready!(Pin::new(&mut self.rx).poll(cx));
        Poll::Ready(result.unwrap_or(Err(crate::Error::Closed)))
    }
}
