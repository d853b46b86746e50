//! Generation command handler.

use anyhow::Result;
use seogen_core::api::ApiErrorKind;
use seogen_core::api::generate::{GENERATION_FALLBACK, GenerationClient};
use seogen_core::credentials::CredentialStore;
use seogen_core::notify::NotificationSink;

pub async fn run(
    base_url: &str,
    store: &dyn CredentialStore,
    sink: &dyn NotificationSink,
    title: &str,
    keywords: &str,
) -> Result<()> {
    let client = GenerationClient::new(base_url);

    match client.generate(store, sink, title, keywords).await {
        Ok(text) => {
            println!("{text}");
            Ok(())
        }
        // The precondition notice has already been surfaced; fail the
        // invocation without touching the result region.
        Err(e) if e.kind() == ApiErrorKind::Precondition => Err(e.into()),
        // Transport failures and missing fields collapse to one fixed
        // fallback in the result region.
        Err(e) => {
            tracing::debug!("generation failed: {e}");
            println!("{GENERATION_FALLBACK}");
            Ok(())
        }
    }
}
