use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::quote::types::ShipperIdentity;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TlsBackend {
    #[default]
    Rustls,
    NativeTls,
}

/// 报价网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// 上游运费模拟接口地址
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// 发货方 CNPJ（同时作为 dispatcher 的 registered_number）
    #[serde(default)]
    pub registered_number: String,

    /// 上游 API Token
    #[serde(default)]
    pub token: String,

    /// 平台代码
    #[serde(default)]
    pub platform_code: String,

    /// SQLite 数据库路径，`:memory:` 表示仅内存
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// 上游请求超时（秒）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// HTTP 代理地址（可选）
    /// 支持格式: http://host:port, https://host:port, socks5://host:port
    #[serde(default)]
    pub proxy_url: Option<String>,

    #[serde(default)]
    pub tls_backend: TlsBackend,

    /// 配置文件路径（运行时元数据，不写入 JSON）
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_upstream_url() -> String {
    "https://sp.freterapido.com/api/v3/quote/simulate".to_string()
}

fn default_database_path() -> String {
    "quotes.db".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream_url: default_upstream_url(),
            registered_number: String::new(),
            token: String::new(),
            platform_code: String::new(),
            database_path: default_database_path(),
            request_timeout_secs: default_request_timeout_secs(),
            proxy_url: None,
            tls_backend: TlsBackend::default(),
            config_path: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // 配置文件不存在，返回默认配置
            let mut config = Self::default();
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// 获取配置文件路径（如果有）
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// 用进程环境变量覆盖凭据等敏感配置
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// 按键名查找覆盖值，空字符串视为未设置
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut String); 5] = [
            ("REGISTERED_NUMBER", &mut self.registered_number),
            ("TOKEN", &mut self.token),
            ("PLATFORM_CODE", &mut self.platform_code),
            ("UPSTREAM_URL", &mut self.upstream_url),
            ("DATABASE_PATH", &mut self.database_path),
        ];

        for (key, field) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
    }

    /// 发货方身份（注入到上游请求的 shipper / dispatcher）
    pub fn shipper_identity(&self) -> ShipperIdentity {
        ShipperIdentity {
            registered_number: self.registered_number.clone(),
            token: self.token.clone(),
            platform_code: self.platform_code.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_missing_file_returns_default() {
        let path = std::env::temp_dir().join("frete-rs-config-does-not-exist.json");
        let config = Config::load(&path).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "quotes.db");
        assert_eq!(config.tls_backend, TlsBackend::Rustls);
        assert_eq!(config.config_path(), Some(path.as_path()));
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let json = r#"{
            "port": 9000,
            "upstreamUrl": "http://127.0.0.1:1/simulate",
            "registeredNumber": "25438296000158",
            "platformCode": "5AKVkHqCn",
            "requestTimeoutSecs": 5,
            "tlsBackend": "native-tls"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.upstream_url, "http://127.0.0.1:1/simulate");
        assert_eq!(config.registered_number, "25438296000158");
        assert_eq!(config.platform_code, "5AKVkHqCn");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.tls_backend, TlsBackend::NativeTls);
        assert!(config.token.is_empty());
    }

    #[test]
    fn test_overrides_replace_only_non_empty_values() {
        let mut config = Config {
            token: "from-file".to_string(),
            platform_code: "file-code".to_string(),
            ..Config::default()
        };
        let env: HashMap<&str, &str> = [
            ("TOKEN", "from-env"),
            ("PLATFORM_CODE", "  "),
            ("DATABASE_PATH", ":memory:"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.token, "from-env");
        assert_eq!(config.platform_code, "file-code");
        assert_eq!(config.database_path, ":memory:");
    }

    #[test]
    fn test_shipper_identity() {
        let config = Config {
            registered_number: "123".to_string(),
            token: "tok".to_string(),
            platform_code: "plat".to_string(),
            ..Config::default()
        };

        let identity = config.shipper_identity();
        assert_eq!(identity.registered_number, "123");
        assert_eq!(identity.token, "tok");
        assert_eq!(identity.platform_code, "plat");
    }
}
