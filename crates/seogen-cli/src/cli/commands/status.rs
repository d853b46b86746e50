//! Status command handlers (stored credential, server health).

use anyhow::Result;
use seogen_core::api;
use seogen_core::credentials::CredentialStore;

pub fn credential(store: &dyn CredentialStore) -> Result<()> {
    match store.get() {
        Some(credential) => {
            println!("{}: {}", credential.kind(), credential.masked());
        }
        None => {
            println!("No credential stored.");
        }
    }
    Ok(())
}

pub async fn health(base_url: &str) -> Result<()> {
    let status = api::health(base_url).await?;
    println!("{status}");
    Ok(())
}
