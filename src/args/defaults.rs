pub(crate) const DEFAULT_USER_AGENT: &str = concat!("ammo-tester/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_HOST: &str = "127.0.0.1:8080";
pub(crate) const DEFAULT_DATA_DIR: &str = "data";
pub(crate) const DEFAULT_CONNECTIONS: &str = "2";
pub(crate) const DEFAULT_TIMEOUT: &str = "10s";
pub(crate) const DEFAULT_COUNT: &str = "30000";
pub(crate) const DEFAULT_QUEUE_CAPACITY: &str = "100";

pub(crate) const DEFAULT_CONFIG_TOML: &str = "ammo-tester.toml";
pub(crate) const DEFAULT_CONFIG_JSON: &str = "ammo-tester.json";
