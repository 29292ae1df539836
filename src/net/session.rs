use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use gloo::net::http::Request;
use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use super::ChannelError;
use crate::config::{DEVICE_ID_KEY, ServerConfig};

/// Authenticated player. `user_id` is what the server keys mark assignments by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

#[derive(Serialize)]
struct DeviceAuthRequest<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Deserialize)]
struct Claims {
    uid: String,
}

/// Stable per-browser id, created on first use.
pub fn device_id() -> String {
    let stored: gloo::storage::Result<String> = LocalStorage::get(DEVICE_ID_KEY);
    if let Ok(id) = stored {
        if !id.trim().is_empty() {
            return id;
        }
    }
    let id = uuid::Uuid::new_v4().to_string();
    let _ = LocalStorage::set(DEVICE_ID_KEY, &id);
    id
}

pub fn user_id_from_token(token: &str) -> Result<String, ChannelError> {
    let claims = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ChannelError::Auth("token is not a JWT".to_string()))?;
    let raw = URL_SAFE_NO_PAD
        .decode(claims.trim_end_matches('='))
        .map_err(|err| ChannelError::Auth(err.to_string()))?;
    let claims: Claims = serde_json::from_slice(&raw)?;
    Ok(claims.uid)
}

impl Session {
    pub async fn authenticate(config: &ServerConfig) -> Result<Self, ChannelError> {
        let device = device_id();
        let url = format!(
            "{}/v2/account/authenticate/device?create=true",
            config.http_base()
        );
        let basic = STANDARD.encode(format!("{}:", config.server_key));
        let response = Request::post(&url)
            .header("Authorization", &format!("Basic {basic}"))
            .json(&DeviceAuthRequest { id: &device })
            .map_err(|err| ChannelError::Http(err.to_string()))?
            .send()
            .await
            .map_err(|err| ChannelError::Http(err.to_string()))?;
        if !response.ok() {
            return Err(ChannelError::Auth(format!(
                "server answered {} {}",
                response.status(),
                response.status_text()
            )));
        }
        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|err| ChannelError::Http(err.to_string()))?;
        let user_id = user_id_from_token(&auth.token)?;
        Ok(Self {
            token: auth.token,
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(claims: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    #[test]
    fn reads_uid_claim() {
        let token = token_with(r#"{"uid":"5c1b7c9e","usn":"player","exp":1700000000}"#);
        assert_eq!(user_id_from_token(&token).unwrap(), "5c1b7c9e");
    }

    #[test]
    fn rejects_non_jwt() {
        assert!(matches!(
            user_id_from_token("opaque"),
            Err(ChannelError::Auth(_))
        ));
        let token = token_with(r#"{"usn":"player"}"#);
        assert!(matches!(
            user_id_from_token(&token),
            Err(ChannelError::Payload(_))
        ));
    }
}
