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

/// The completion status of a call, as delivered to a
/// [Listener][crate::listener::Listener].
///
/// This is a subset of the `google.rpc.Status` message: the fake never
/// produces error details, only a code and a message.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct Status {
    /// The status code.
    pub code: Code,

    /// A developer-facing error message.
    pub message: String,
}

impl Status {
    /// A successful status.
    ///
    /// ```
    /// # use pubsub_fake::error::rpc::{Code, Status};
    /// assert_eq!(Status::ok().code, Code::Ok);
    /// ```
    pub fn ok() -> Self {
        Self::default().set_code(Code::Ok)
    }

    /// Sets the value for [code][Status::code].
    pub fn set_code<T: Into<Code>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    /// Sets the value for [message][Status::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    /// Returns true if the status represents a successful call.
    pub fn is_ok(&self) -> bool {
        self.code == Code::Ok
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            return write!(f, "{}", self.code);
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// The status codes the fake endpoint reports.
///
/// This is the subset of the canonical gRPC codes that the fake and its
/// client handles produce. The numeric values match the gRPC values, other
/// values convert to [Code::Unknown].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum Code {
    /// Not an error; returned on success.
    Ok = 0,

    /// Unknown error.
    #[default]
    Unknown = 2,

    /// The client specified an invalid argument.
    InvalidArgument = 3,

    /// The system is not in a state required for the operation's execution.
    ///
    /// The fake uses this code when a pull asks for more messages than are
    /// pending.
    FailedPrecondition = 9,

    /// The operation is not implemented by this stub.
    Unimplemented = 12,

    /// The service is currently unavailable.
    Unavailable = 14,
}

impl Code {
    pub fn name(&self) -> &str {
        match self {
            Code::Ok => "OK",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::Unavailable => "UNAVAILABLE",
        }
    }
}

impl std::convert::From<i32> for Code {
    fn from(value: i32) -> Self {
        match value {
            0 => Code::Ok,
            3 => Code::InvalidArgument,
            9 => Code::FailedPrecondition,
            12 => Code::Unimplemented,
            14 => Code::Unavailable,
            _ => Code::default(),
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
