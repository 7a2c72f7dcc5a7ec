use std::collections::HashMap;

use async_trait::async_trait;

use super::{AuthService, AuthToken};

pub(crate) const SERVICE_NAME: &str = "taskdeck";

/// Store the backend bearer token in the system keyring via Secret Service.
pub async fn store_token(server: &str, token: &str) -> Result<(), String> {
    let keyring = oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))?;

    let mut attrs = HashMap::new();
    attrs.insert("service", SERVICE_NAME);
    attrs.insert("server", server);

    keyring
        .create_item(
            &format!("Taskdeck ({})", server),
            &attrs,
            token.as_bytes(),
            true, // replace existing
        )
        .await
        .map_err(|e| format!("Failed to store token: {}", e))?;

    Ok(())
}

/// Load the backend bearer token from the system keyring.
pub async fn load_token(server: &str) -> Result<Option<String>, String> {
    let keyring = oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))?;

    let mut attrs = HashMap::new();
    attrs.insert("service", SERVICE_NAME);
    attrs.insert("server", server);

    let items = keyring
        .search_items(&attrs)
        .await
        .map_err(|e| format!("Failed to search keyring: {}", e))?;

    if let Some(item) = items.first() {
        let secret_bytes = item
            .secret()
            .await
            .map_err(|e| format!("Failed to read secret: {}", e))?;
        let token = String::from_utf8(secret_bytes.to_vec())
            .map_err(|e| format!("Invalid UTF-8 in secret: {}", e))?;
        if !token.is_empty() {
            return Ok(Some(token));
        }
    }

    Ok(None)
}

/// Delete the backend bearer token from the system keyring.
pub async fn delete_token(server: &str) -> Result<(), String> {
    let keyring = oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))?;

    let mut attrs = HashMap::new();
    attrs.insert("service", SERVICE_NAME);
    attrs.insert("server", server);

    let items = keyring
        .search_items(&attrs)
        .await
        .map_err(|e| format!("Failed to search keyring: {}", e))?;

    for item in items {
        item.delete()
            .await
            .map_err(|e| format!("Failed to delete token: {}", e))?;
    }

    Ok(())
}

/// Token lookup backed by the system keyring. An unreachable keyring is
/// treated the same as a missing token: the session starts signed out.
pub struct KeyringAuth {
    server: String,
}

impl KeyringAuth {
    pub fn new(server: &str) -> Self {
        Self {
            server: server.to_string(),
        }
    }
}

#[async_trait]
impl AuthService for KeyringAuth {
    async fn token(&self) -> Option<AuthToken> {
        match load_token(&self.server).await {
            Ok(token) => token,
            Err(e) => {
                log::error!("Keyring lookup failed: {}", e);
                None
            }
        }
    }
}
