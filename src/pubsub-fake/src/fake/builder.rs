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

use super::FakePubSub;

pub(crate) const DEFAULT_PROJECT: &str = "test-project";
pub(crate) const DEFAULT_ENDPOINT: &str = "localhost:8080";
pub(crate) const DEFAULT_MESSAGES_PER_PULL: usize = 10;

/// The configuration of a [FakePubSub].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
    pub(crate) project: String,
    pub(crate) endpoint: String,
    pub(crate) messages_per_pull: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            messages_per_pull: DEFAULT_MESSAGES_PER_PULL,
        }
    }
}

/// A builder for [FakePubSub].
///
/// The defaults match what most connector tests expect: project
/// `test-project`, a nominal endpoint of `localhost:8080`, and batches of ten
/// messages per pull.
///
/// ```
/// # use pubsub_fake::FakePubSub;
/// let fake = FakePubSub::builder()
///     .with_project("my-project")
///     .with_messages_per_pull(5_usize)
///     .build();
/// assert_eq!(fake.topic_path("pagevisits"), "projects/my-project/topics/pagevisits");
/// ```
#[derive(Clone, Debug, Default)]
pub struct FakePubSubBuilder {
    config: Config,
}

impl FakePubSubBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the project used to format resource names.
    pub fn with_project<V: Into<String>>(mut self, v: V) -> Self {
        self.config.project = v.into();
        self
    }

    /// Sets the endpoint reported in the
    /// [SubscriberSettings][crate::client::SubscriberSettings].
    ///
    /// The fake never opens a connection, this is only a label for the
    /// connector under test.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = v.into();
        self
    }

    /// Sets the number of messages each pull removes from the queue.
    ///
    /// Values below 1 are raised to 1.
    pub fn with_messages_per_pull<V: Into<usize>>(mut self, v: V) -> Self {
        self.config.messages_per_pull = v.into();
        self
    }

    pub fn build(self) -> FakePubSub {
        let config = Config {
            messages_per_pull: std::cmp::max(1, self.config.messages_per_pull),
            ..self.config
        };
        tracing::debug!(
            project = %config.project,
            endpoint = %config.endpoint,
            messages_per_pull = config.messages_per_pull,
            "creating fake Pub/Sub endpoint"
        );
        FakePubSub::new_with_config(config)
    }
}
