//! The `TextGenerator` trait — the seam to the generative-AI dependency.

use std::future::Future;

use crate::Result;

/// A black-box prompt → text service.
///
/// Implementations report every upstream failure (auth, quota, network,
/// safety block) as [`crate::Error::Generation`]. Callers get no retries and
/// no fallback.
pub trait TextGenerator: Send + Sync {
  fn generate<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a;
}

/// Prompt for a short greeting addressed to a recognised person.
pub fn welcome_prompt(name: &str) -> String {
  format!(
    "You are a friendly assistant that greets people by name.\n\nGenerate a \
     short and welcoming message for {name}."
  )
}
