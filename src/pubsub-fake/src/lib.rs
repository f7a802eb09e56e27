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

//! An in-process fake of the Pub/Sub publish and pull endpoints.
//!
//! Use this crate in the tests of code that consumes messages from Pub/Sub,
//! such as an ingestion connector. The fake keeps messages in memory,
//! publishing appends to a queue and pulling removes fixed-size batches from
//! it. No network connection is ever opened.
//!
//! # Example
//! ```
//! use pubsub_fake::FakePubSub;
//! use pubsub_fake::model::Message;
//!
//! # tokio_test::block_on(async {
//! let fake = FakePubSub::new();
//! let publisher = fake.publisher("pagevisits");
//! for i in 0..10 {
//!     publisher.publish(Message::new().set_data(format!("visit-{i}"))).await?;
//! }
//!
//! // Give the code under test a subscriber that talks to the fake.
//! let subscriber = pubsub_fake::client::Subscriber::new(fake.subscriber_settings());
//! let response = subscriber.pull("pagevisits-sub").send().await?;
//! assert_eq!(response.received_messages.len(), 10);
//! # pubsub_fake::Result::<()>::Ok(()) });
//! ```

pub mod error;
pub mod listener;
pub mod model;
pub mod model_ext;
pub mod stub;

pub(crate) mod fake;
pub(crate) mod publisher;
pub(crate) mod subscriber;

pub use error::Error;
pub use fake::FakePubSub;

/// The result type for all operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

pub mod builder {
    pub use crate::fake::builder::FakePubSubBuilder;
    pub use crate::subscriber::Pull;
}

pub mod client {
    pub use crate::publisher::Publisher;
    pub use crate::subscriber::{PullStream, Subscriber, SubscriberSettings};
}
