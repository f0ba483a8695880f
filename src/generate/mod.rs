// SPDX-License-Identifier: MIT
// Test case generation — prompt construction, completion transport, decoding.
//
// The generation module renders a fixed instruction template around a
// free-text module description, sends it to the configured chat-completion
// endpoint, and decodes the returned text into a test-case record set.
// Failure is a first-class value: a completion that is not valid JSON comes
// back as `GenerationOutcome::Failure` carrying the raw text for diagnosis.

pub mod client;
pub mod model;
pub mod prompt;
