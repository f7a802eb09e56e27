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

//! Messages and requests exchanged with the fake endpoint.

use bytes::Bytes;
use std::collections::HashMap;
use std::time::SystemTime;

/// A message published to a topic.
///
/// # Example
/// ```
/// # use pubsub_fake::model::Message;
/// let message = Message::new()
///     .set_data("hello world")
///     .set_attributes([("source", "test")]);
/// assert_eq!(message.data, "hello world");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct Message {
    /// The message payload.
    pub data: Bytes,

    /// Attributes for this message.
    pub attributes: HashMap<String, String>,

    /// The id assigned by the endpoint when the message is published.
    ///
    /// Publishers should leave this empty, the endpoint overwrites it.
    pub message_id: String,

    /// The time at which the endpoint accepted the message.
    pub publish_time: Option<SystemTime>,

    /// Messages with the same ordering key are delivered in publish order.
    pub ordering_key: String,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [data][Message::data].
    pub fn set_data<T: Into<Bytes>>(mut self, v: T) -> Self {
        self.data = v.into();
        self
    }

    /// Sets the value of [attributes][Message::attributes].
    pub fn set_attributes<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Sets the value of [message_id][Message::message_id].
    pub fn set_message_id<T: Into<String>>(mut self, v: T) -> Self {
        self.message_id = v.into();
        self
    }

    /// Sets the value of [publish_time][Message::publish_time].
    pub fn set_publish_time<T: Into<SystemTime>>(mut self, v: T) -> Self {
        self.publish_time = Some(v.into());
        self
    }

    /// Sets the value of [ordering_key][Message::ordering_key].
    pub fn set_ordering_key<T: Into<String>>(mut self, v: T) -> Self {
        self.ordering_key = v.into();
        self
    }
}

/// A message delivered to a subscriber, with its receipt metadata.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ReceivedMessage {
    /// The id used to acknowledge this delivery.
    pub ack_id: String,

    /// The delivered message.
    pub message: Message,

    /// How many times this message has been delivered.
    ///
    /// The fake never redelivers, so this is always 1.
    pub delivery_attempt: i32,
}

/// Request for [Publisher::publish][crate::stub::Publisher::publish].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PublishRequest {
    /// The topic name, as given to the publisher.
    pub topic: String,
    pub messages: Vec<Message>,
}

impl PublishRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [topic][PublishRequest::topic].
    pub fn set_topic<T: Into<String>>(mut self, v: T) -> Self {
        self.topic = v.into();
        self
    }

    /// Sets the value of [messages][PublishRequest::messages].
    pub fn set_messages<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<Message>,
    {
        self.messages = v.into_iter().map(|m| m.into()).collect();
        self
    }
}

/// Response for [Publisher::publish][crate::stub::Publisher::publish].
///
/// The ids are in the same order as the messages in the request.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PublishResponse {
    pub message_ids: Vec<String>,
}

/// Request for [Subscriber::pull][crate::stub::Subscriber::pull].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PullRequest {
    pub subscription: String,

    /// The batch size. Zero selects the endpoint's configured batch size.
    pub max_messages: i32,
}

impl PullRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [subscription][PullRequest::subscription].
    pub fn set_subscription<T: Into<String>>(mut self, v: T) -> Self {
        self.subscription = v.into();
        self
    }

    /// Sets the value of [max_messages][PullRequest::max_messages].
    pub fn set_max_messages<T: Into<i32>>(mut self, v: T) -> Self {
        self.max_messages = v.into();
        self
    }
}

/// Response for [Subscriber::pull][crate::stub::Subscriber::pull].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PullResponse {
    pub received_messages: Vec<ReceivedMessage>,
}

/// Request for [Subscriber::acknowledge][crate::stub::Subscriber::acknowledge].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct AcknowledgeRequest {
    pub subscription: String,
    pub ack_ids: Vec<String>,
}

impl AcknowledgeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [subscription][AcknowledgeRequest::subscription].
    pub fn set_subscription<T: Into<String>>(mut self, v: T) -> Self {
        self.subscription = v.into();
        self
    }

    /// Sets the value of [ack_ids][AcknowledgeRequest::ack_ids].
    pub fn set_ack_ids<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.ack_ids = v.into_iter().map(|id| id.into()).collect();
        self
    }
}
