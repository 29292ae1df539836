use gloo::storage::{LocalStorage, Storage};

const HOST_KEY: &str = "tictactoe.server.host";
const PORT_KEY: &str = "tictactoe.server.port";
const SERVER_KEY_KEY: &str = "tictactoe.server.key";
const SSL_KEY: &str = "tictactoe.server.ssl";

pub const DEVICE_ID_KEY: &str = "tictactoe.device_id";

/// Where the game server lives. Defaults match a local development server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub server_key: String,
    pub use_ssl: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7350,
            server_key: "defaultkey".to_string(),
            use_ssl: false,
        }
    }
}

fn read_storage(key: &str) -> Option<String> {
    let raw = LocalStorage::raw().get_item(key).ok()??;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

impl ServerConfig {
    /// Defaults overridden by any `tictactoe.server.*` local storage entries.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(host) = read_storage(HOST_KEY) {
            config.host = host;
        }
        if let Some(port) = read_storage(PORT_KEY).and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Some(key) = read_storage(SERVER_KEY_KEY) {
            config.server_key = key;
        }
        if let Some(ssl) = read_storage(SSL_KEY) {
            config.use_ssl = ssl == "1" || ssl == "true";
        }
        config
    }

    pub fn http_base(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    pub fn socket_url(&self, token: &str) -> String {
        let scheme = if self.use_ssl { "wss" } else { "ws" };
        format!(
            "{scheme}://{}:{}/ws?lang=en&status=true&token={token}",
            self.host, self.port
        )
    }
}

/// Turn length requested from matchmaking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    #[default]
    Normal,
    Fast,
}

impl GameMode {
    pub fn is_fast(self) -> bool {
        matches!(self, GameMode::Fast)
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Normal => "Normal Mode",
            GameMode::Fast => "Fast Mode",
        }
    }

    pub fn turn_secs(self) -> u32 {
        match self {
            GameMode::Normal => 20,
            GameMode::Fast => 10,
        }
    }
}
