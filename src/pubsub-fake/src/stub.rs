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

//! Traits to replace the transport used by the client handles.
//!
//! The client handles in this crate never talk to the network. They delegate
//! every call to an implementation of these traits. [FakePubSub] implements
//! both of them with an in-memory queue, tests that need different behavior
//! can provide their own implementation and override only the methods they
//! exercise. The default implementations return
//! [Error::Unimplemented][crate::Error::Unimplemented].
//!
//! [FakePubSub]: crate::FakePubSub

use crate::Result;
use crate::model::{
    AcknowledgeRequest, PublishRequest, PublishResponse, PullRequest, PullResponse,
};

/// Defines the publish side of the service.
#[async_trait::async_trait]
pub trait Publisher: std::fmt::Debug + Send + Sync {
    /// Adds one or more messages to the topic.
    async fn publish(&self, _req: PublishRequest) -> Result<PublishResponse> {
        Err(crate::Error::Unimplemented("publish"))
    }
}

/// Defines the pull side of the service.
#[async_trait::async_trait]
pub trait Subscriber: std::fmt::Debug + Send + Sync {
    /// Pulls one batch of messages.
    async fn pull(&self, _req: PullRequest) -> Result<PullResponse> {
        Err(crate::Error::Unimplemented("pull"))
    }

    /// Acknowledges the messages associated with the ack ids.
    async fn acknowledge(&self, _req: AcknowledgeRequest) -> Result<()> {
        Err(crate::Error::Unimplemented("acknowledge"))
    }
}
