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

//! Callbacks for the responses of a pull call.

use crate::error::rpc::Status;
use crate::model::PullResponse;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Request metadata, echoed back to the listener when the call closes.
pub type Metadata = HashMap<String, String>;

/// Receives the responses of a pull call started with
/// [Subscriber::start][crate::client::Subscriber::start].
///
/// A successful call produces exactly one `on_message()` followed by one
/// `on_close()` with an OK status. A failed call produces only the
/// `on_close()`, with the status of the error.
#[cfg_attr(test, mockall::automock)]
pub trait Listener: Send {
    /// Called with each batch of messages.
    fn on_message(&mut self, response: PullResponse);

    /// Called once, after the last message.
    fn on_close(&mut self, status: Status, metadata: Metadata);
}

/// A [Listener] that forwards the call events into a channel.
///
/// Successful batches are sent as `Ok(response)`. A non-OK status is sent as
/// [Error::Service][crate::Error::Service]. The sender is dropped when the
/// call closes, so the receiver sees the end of the stream.
#[derive(Debug)]
pub struct ChannelListener {
    tx: Option<UnboundedSender<crate::Result<PullResponse>>>,
}

impl ChannelListener {
    pub fn new(tx: UnboundedSender<crate::Result<PullResponse>>) -> Self {
        Self { tx: Some(tx) }
    }
}

impl Listener for ChannelListener {
    fn on_message(&mut self, response: PullResponse) {
        if let Some(tx) = &self.tx {
            // The receiver may be gone, that is not an error for the call.
            let _ = tx.send(Ok(response));
        }
    }

    fn on_close(&mut self, status: Status, _metadata: Metadata) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        if !status.is_ok() {
            let _ = tx.send(Err(crate::Error::Service(status)));
        }
    }
}
