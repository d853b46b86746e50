//! Key provisioning command handler.

use anyhow::Result;
use seogen_core::api::keys::{KeyClient, Plan};
use seogen_core::credentials::CredentialStore;
use seogen_core::notify::NotificationSink;

pub async fn create(
    base_url: &str,
    store: &dyn CredentialStore,
    sink: &dyn NotificationSink,
    plan: Plan,
) -> Result<()> {
    let client = KeyClient::new(base_url);

    // The client surfaces the server message itself; only a fresh key
    // needs displaying here.
    let outcome = client.create_key(store, sink, plan).await?;

    if let Some(api_key) = outcome.api_key {
        println!("API key: {api_key}");
    }

    Ok(())
}
