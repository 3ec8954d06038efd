//! 工具模块 - 通用工具函数和类型
//!
//! - [`logger`] - tracing 初始化、日志清理、审计日志宏
//! - 错误类型 re-export (来自 storefront-shared)

pub mod logger;

pub use storefront_shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
