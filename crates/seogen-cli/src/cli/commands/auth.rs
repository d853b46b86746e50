//! Account command handlers.

use anyhow::Result;
use seogen_core::api::auth::AuthClient;
use seogen_core::credentials::CredentialStore;
use seogen_core::notify::NotificationSink;

/// Notification shown after a successful registration.
pub const REGISTER_SUCCESS: &str = "Registration successful";

/// Generic notification for a failed registration.
pub const REGISTER_FAILED: &str = "Something went wrong";

/// Generic notification for a failed sign-in.
pub const LOGIN_FAILED: &str = "Sign-in failed";

pub async fn register(
    base_url: &str,
    sink: &dyn NotificationSink,
    email: &str,
    password: &str,
) -> Result<()> {
    let client = AuthClient::new(base_url);

    match client.register(email, password).await {
        Ok(()) => {
            sink.notify(REGISTER_SUCCESS);
            println!("You can now sign in with `seogen login`.");
            Ok(())
        }
        Err(e) => {
            // Collapsed to a generic message; the body is not surfaced.
            sink.notify(REGISTER_FAILED);
            Err(e.into())
        }
    }
}

pub async fn login(
    base_url: &str,
    store: &dyn CredentialStore,
    sink: &dyn NotificationSink,
    email: &str,
    password: &str,
) -> Result<()> {
    let client = AuthClient::new(base_url);

    match client.login(store, email, password).await {
        Ok(_token) => {
            println!("Signed in. Session token stored.");
            Ok(())
        }
        Err(e) => {
            sink.notify(LOGIN_FAILED);
            Err(e.into())
        }
    }
}
