//! Durable persistence over localStorage

use examina_core::session::keys;
use examina_core::{AuthError, AuthResult, PersistenceSink, SessionRecord, StoredSession};
use web_sys::Storage;

/// `PersistenceSink` backed by `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorageSink;

fn local_storage() -> AuthResult<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| AuthError::storage("localStorage unavailable"))
}

fn get(storage: &Storage, key: &str) -> AuthResult<Option<String>> {
    storage
        .get_item(key)
        .map_err(|e| AuthError::storage(format!("read {key}: {e:?}")))
}

fn set(storage: &Storage, key: &str, value: &str) -> AuthResult<()> {
    storage
        .set_item(key, value)
        .map_err(|e| AuthError::storage(format!("write {key}: {e:?}")))
}

fn remove(storage: &Storage, key: &str) -> AuthResult<()> {
    storage
        .remove_item(key)
        .map_err(|e| AuthError::storage(format!("remove {key}: {e:?}")))
}

impl PersistenceSink for BrowserStorageSink {
    fn write(&self, record: &SessionRecord) -> AuthResult<()> {
        let storage = local_storage()?;
        let user = serde_json::to_string(&record.user)
            .map_err(|e| AuthError::storage(e.to_string()))?;
        set(&storage, keys::ACCESS_TOKEN, &record.access_token)?;
        set(&storage, keys::REFRESH_TOKEN, &record.refresh_token)?;
        set(&storage, keys::TOKEN_EXPIRES_AT, &record.expires_at_ms.to_string())?;
        set(&storage, keys::USER, &user)?;
        // The legacy flat-token key is migration input only, never written.
        remove(&storage, keys::LEGACY_TOKEN)?;
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        let storage = local_storage()?;
        for key in [
            keys::ACCESS_TOKEN,
            keys::REFRESH_TOKEN,
            keys::TOKEN_EXPIRES_AT,
            keys::USER,
            keys::LEGACY_TOKEN,
        ] {
            remove(&storage, key)?;
        }
        Ok(())
    }

    fn read(&self) -> AuthResult<Option<StoredSession>> {
        let storage = local_storage()?;

        let Some(access_token) = get(&storage, keys::ACCESS_TOKEN)? else {
            // Fall back to the pre-token-pair format.
            return Ok(get(&storage, keys::LEGACY_TOKEN)?
                .map(|access_token| StoredSession::Legacy { access_token }));
        };

        let refresh_token = get(&storage, keys::REFRESH_TOKEN)?;
        let expires_at = get(&storage, keys::TOKEN_EXPIRES_AT)?;
        let user = get(&storage, keys::USER)?;
        let (Some(refresh_token), Some(expires_at), Some(user)) =
            (refresh_token, expires_at, user)
        else {
            return Err(AuthError::corrupt("partial token-pair record"));
        };

        let expires_at_ms = expires_at
            .parse::<i64>()
            .map_err(|_| AuthError::corrupt(format!("bad expiry '{expires_at}'")))?;
        let user = serde_json::from_str(&user)
            .map_err(|e| AuthError::corrupt(format!("bad user record: {e}")))?;

        Ok(Some(StoredSession::Full(SessionRecord {
            access_token,
            refresh_token,
            expires_at_ms,
            user,
        })))
    }
}
