use std::path::PathBuf;

use storefront_shared::models::{DEFAULT_BLOCK_MESSAGE, ShippingSettings};

/// 服务器配置 - 配送资格服务设置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 (snapshot, logs) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志格式 |
/// | MAX_BODY_BYTES | 65536 | 请求体大小上限 |
/// | SHIPPING_SERVICES | ground,two_day,overnight | 可选配送服务 |
/// | SHIPPING_BLOCK_MESSAGE | Shipping is not available for this order | 默认拦截提示 |
/// | PERSIST_SNAPSHOT | true | 是否写入 JSON 快照 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/storefront HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储快照、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别 (EnvFilter 语法)
    pub log_level: String,
    /// JSON 日志格式
    pub log_json: bool,
    /// 请求体大小上限 (字节)
    pub max_body_bytes: usize,
    /// 结账时可选的配送服务 (按展示顺序)
    pub shipping_services: Vec<String>,
    /// 未提供提示时使用的默认拦截提示
    pub block_message: String,
    /// 将区域/规则保存到 `<work_dir>/data/shipping.json`
    pub persist_snapshot: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(64 * 1024),
            shipping_services: std::env::var("SHIPPING_SERVICES")
                .ok()
                .map(|v| parse_service_list(&v))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| ShippingSettings::default().available_services),
            block_message: std::env::var("SHIPPING_BLOCK_MESSAGE")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BLOCK_MESSAGE.into()),
            persist_snapshot: std::env::var("PERSIST_SNAPSHOT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 快照文件路径 (启用持久化时)
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.persist_snapshot
            .then(|| PathBuf::from(&self.work_dir).join("data").join("shipping.json"))
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 传给评估器的配送设置
    pub fn shipping_settings(&self) -> ShippingSettings {
        ShippingSettings {
            available_services: self.shipping_services.clone(),
            default_block_message: self.block_message.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 解析逗号分隔的服务列表 ("ground, two_day,,overnight")
fn parse_service_list(raw: &str) -> Vec<String> {
    let mut services: Vec<String> = Vec::new();
    for service in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !services.iter().any(|s| s == service) {
            services.push(service.to_string());
        }
    }
    services
}
