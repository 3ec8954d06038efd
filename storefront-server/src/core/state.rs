use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::Database;
use crate::db::repository::{ShippingRuleRepository, ShippingZoneRepository};
use crate::eligibility::EligibilityEvaluator;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Database | 区域与规则记录存储 |
/// | evaluator | Arc<EligibilityEvaluator> | 配送资格评估 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 记录存储 (DashMap 表 + 可选快照)
    pub db: Database,
    /// 按配置的配送设置构建的评估器
    pub evaluator: Arc<EligibilityEvaluator>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 方法代替
    pub fn new(config: Config, db: Database, evaluator: EligibilityEvaluator) -> Self {
        Self {
            config,
            db,
            evaluator: Arc::new(evaluator),
        }
    }

    /// 初始化服务器状态: 打开快照 (如启用) 并构建评估器
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = match config.snapshot_path() {
            Some(path) => Database::open(path).await?,
            None => Database::in_memory(),
        };
        Ok(Self::with_database(config, db))
    }

    /// 基于已有存储构建状态 (测试、预览)
    pub fn with_database(config: &Config, db: Database) -> Self {
        let evaluator = EligibilityEvaluator::new(config.shipping_settings());
        tracing::info!(
            services = ?evaluator.settings().available_services,
            persisted = db.snapshot_path().is_some(),
            "Shipping state ready"
        );
        Self::new(config.clone(), db, evaluator)
    }

    pub fn zones(&self) -> ShippingZoneRepository {
        ShippingZoneRepository::new(self.db.clone())
    }

    pub fn rules(&self) -> ShippingRuleRepository {
        ShippingRuleRepository::new(self.db.clone())
    }
}
