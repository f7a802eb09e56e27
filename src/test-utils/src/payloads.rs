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

//! Helper functions to generate random message payloads and resource ids.

use rand::{Rng, distr::Alphanumeric, seq::IndexedRandom};

/// A common prefix for generated resource ids.
pub const PREFIX: &str = "pubsub-fake-";

/// The maximum length for a topic or subscription id.
const RESOURCE_ID_LENGTH: usize = 255;

/// Characters used after [PREFIX] in resource ids.
const RESOURCE_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random topic or subscription id.
///
/// The ids start with [PREFIX] and use lowercase letters and digits.
pub fn random_resource_id(len: usize) -> String {
    let len = len.clamp(PREFIX.len() + 1, RESOURCE_ID_LENGTH);
    let mut rng = rand::rng();
    let id: String = (PREFIX.len()..len)
        .filter_map(|_| RESOURCE_ID_CHARSET.choose(&mut rng))
        .map(|b| char::from(*b))
        .collect();
    format!("{PREFIX}{id}")
}

/// Generate `count` payloads of `len` alphanumeric characters each.
///
/// # Example
/// ```
/// use pubsub_fake_test_utils::payloads::random_payloads;
/// let got = random_payloads(10, 16);
/// assert_eq!(got.len(), 10);
/// assert!(got.iter().all(|p| p.len() == 16));
/// ```
pub fn random_payloads(count: usize, len: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            rand::rng()
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect()
        })
        .collect()
}
