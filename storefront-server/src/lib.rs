//! Storefront Shipping Server - 配送资格评估服务
//!
//! # 架构概述
//!
//! - **资格评估** (`eligibility`): 区域检查 + 按优先级执行规则
//! - **数据库** (`db`): DashMap 记录存储，可选 JSON 快照持久化
//! - **HTTP API** (`api`): 区域/规则管理接口与评估预览
//!
//! # 模块结构
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── eligibility/   # 区域检查、规则匹配、评估器
//! ├── db/            # 存储与仓库
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod eligibility;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use db::Database;
pub use eligibility::{EligibilityEvaluator, ZoneRegistry};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export 日志函数
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// 设置运行环境: 创建工作目录并初始化日志
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;

    let log_dir = config.log_dir();
    let log_dir = config.is_production().then_some(log_dir.as_path());
    init_logger_with_file(&config.log_level, config.log_json, log_dir)?;

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ___ _                 __              _
 / __| |_ ___ _ _ ___  / _|_ _ ___ _ _| |_
 \__ \  _/ _ \ '_/ -_)|  _| '_/ _ \ ' \  _|
 |___/\__\___/_| \___||_| |_| \___/_||_\__|
           shipping eligibility
    "#
    );
}
