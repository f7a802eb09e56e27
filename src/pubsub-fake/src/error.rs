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

//! Errors returned by the fake endpoint and its client handles.

pub mod rpc;

use rpc::{Code, Status};

/// The error type for all operations in this crate.
///
/// Publishing never fails against the fake. Pulls fail when the request is
/// malformed or when fewer messages are pending than the batch requires.
///
/// # Example
/// ```
/// # use pubsub_fake::Error;
/// # use pubsub_fake::error::rpc::Code;
/// let error = Error::InsufficientMessages { requested: 10, available: 3 };
/// assert_eq!(error.status().code, Code::FailedPrecondition);
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A pull asked for a full batch but the queue holds fewer messages.
    ///
    /// The fake never returns short batches. Publish more messages before
    /// pulling.
    #[error("cannot pull {requested} messages, only {available} are pending")]
    InsufficientMessages { requested: usize, available: usize },

    /// The request is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The stub does not implement this method.
    #[error("the stub does not implement `{0}`")]
    Unimplemented(&'static str),

    /// A [PublishFuture][crate::model_ext::PublishFuture] lost its sender
    /// before it resolved.
    ///
    /// Futures returned by the fake are resolved before `publish()` returns,
    /// so they never report this error.
    #[error("the call was closed before it completed")]
    Closed,

    /// The call completed with a non-OK status.
    #[error("the call failed with {0}")]
    Service(Status),
}

impl Error {
    /// Returns the status a listener receives when a call fails with this
    /// error.
    pub fn status(&self) -> Status {
        let code = match self {
            Error::InsufficientMessages { .. } => Code::FailedPrecondition,
            Error::InvalidArgument(_) => Code::InvalidArgument,
            Error::Unimplemented(_) => Code::Unimplemented,
            Error::Closed => Code::Unavailable,
            Error::Service(status) => return status.clone(),
        };
        Status::default().set_code(code).set_message(self.to_string())
    }
}
