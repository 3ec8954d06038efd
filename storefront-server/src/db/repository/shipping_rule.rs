//! Shipping Rule Repository

use super::{RepoError, RepoResult};
use crate::db::Database;
use chrono::{DateTime, Utc};
use storefront_shared::models::{ShippingRuleCreate, ShippingRuleUpdate, ShippingZoneRule};
use storefront_shared::util::{now_millis, snowflake_id};

#[derive(Clone)]
pub struct ShippingRuleRepository {
    db: Database,
}

impl ShippingRuleRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All rules, priority ascending then creation order
    pub fn find_all(&self) -> Vec<ShippingZoneRule> {
        let mut rules: Vec<ShippingZoneRule> =
            self.db.rules.iter().map(|e| e.value().clone()).collect();
        rules.sort_by_key(|r| (r.priority, r.created_at, r.id));
        rules
    }

    /// Rules flagged active (window not checked; evaluation does that)
    pub fn find_active(&self) -> Vec<ShippingZoneRule> {
        self.find_all().into_iter().filter(|r| r.is_active).collect()
    }

    pub fn find_by_id(&self, id: i64) -> Option<ShippingZoneRule> {
        self.db.rules.get(&id).map(|r| r.value().clone())
    }

    /// Create a new rule
    pub async fn create(&self, data: ShippingRuleCreate) -> RepoResult<ShippingZoneRule> {
        let name = required_name(&data.name)?;
        check_window(data.effective_start, data.effective_end)?;

        let now = now_millis();
        let rule = ShippingZoneRule {
            id: snowflake_id(),
            name,
            rule_type: data.rule_type,
            priority: data.priority.unwrap_or(0),
            conditions: data.conditions.unwrap_or_default(),
            actions: data.actions.unwrap_or_default(),
            effective_start: data.effective_start,
            effective_end: data.effective_end,
            is_active: data.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let writes = self.db.lock_writes().await;
        self.db.rules.insert(rule.id, rule.clone());
        if let Err(e) = self.db.persist(&writes).await {
            self.db.rules.remove(&rule.id);
            return Err(e);
        }
        Ok(rule)
    }

    /// Update a rule; absent fields keep their stored value
    pub async fn update(&self, id: i64, data: ShippingRuleUpdate) -> RepoResult<ShippingZoneRule> {
        let writes = self.db.lock_writes().await;

        // Merge under the entry guard; it is released before persisting
        let (previous, rule) = {
            let mut stored = self.db.rules.get_mut(&id).ok_or(RepoError::RuleNotFound(id))?;
            let mut rule = stored.clone();
            apply_update(&mut rule, data)?;
            rule.updated_at = now_millis();
            (std::mem::replace(&mut *stored, rule.clone()), rule)
        };

        if let Err(e) = self.db.persist(&writes).await {
            self.db.rules.insert(id, previous);
            return Err(e);
        }
        Ok(rule)
    }

    /// Delete a rule
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let writes = self.db.lock_writes().await;
        let Some((_, removed)) = self.db.rules.remove(&id) else {
            return Err(RepoError::RuleNotFound(id));
        };
        if let Err(e) = self.db.persist(&writes).await {
            self.db.rules.insert(id, removed);
            return Err(e);
        }
        Ok(())
    }
}

fn apply_update(rule: &mut ShippingZoneRule, data: ShippingRuleUpdate) -> RepoResult<()> {
    if let Some(name) = data.name {
        rule.name = required_name(&name)?;
    }
    if let Some(rule_type) = data.rule_type {
        rule.rule_type = rule_type;
    }
    if let Some(priority) = data.priority {
        rule.priority = priority;
    }
    if let Some(conditions) = data.conditions {
        rule.conditions = conditions;
    }
    if let Some(actions) = data.actions {
        rule.actions = actions;
    }
    if let Some(start) = data.effective_start {
        rule.effective_start = start;
    }
    if let Some(end) = data.effective_end {
        rule.effective_end = end;
    }
    if let Some(is_active) = data.is_active {
        rule.is_active = is_active;
    }
    check_window(rule.effective_start, rule.effective_end)
}

fn required_name(name: &str) -> RepoResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepoError::RuleNameRequired);
    }
    Ok(name.to_string())
}

fn check_window(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> RepoResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(RepoError::InvalidEffectiveWindow),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use storefront_shared::models::{RuleActions, RuleType};

    fn create(name: &str, priority: Option<i32>) -> ShippingRuleCreate {
        ShippingRuleCreate {
            name: name.to_string(),
            rule_type: RuleType::Surcharge,
            priority,
            conditions: None,
            actions: Some(RuleActions {
                surcharge_amount: Some(2.5),
                ..Default::default()
            }),
            effective_start: None,
            effective_end: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let rule = repo.create(create("  Remote areas ", None)).await.unwrap();

        assert_eq!(rule.name, "Remote areas");
        assert_eq!(rule.priority, 0);
        assert!(rule.is_active);
        assert!(rule.conditions.states.is_none());
        assert_eq!(repo.find_by_id(rule.id), Some(rule));
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let err = repo.create(create("   ", Some(1))).await.unwrap_err();
        assert!(matches!(err, RepoError::RuleNameRequired));
        assert!(repo.find_all().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_window() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let mut data = create("Holiday", None);
        data.effective_start = Some(Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap());
        data.effective_end = Some(Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());

        let err = repo.create(data).await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidEffectiveWindow));
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_priority() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        repo.create(create("late", Some(30))).await.unwrap();
        repo.create(create("early", Some(-5))).await.unwrap();
        repo.create(create("middle", Some(10))).await.unwrap();

        let names: Vec<String> = repo.find_all().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["early", "middle", "late"]);
    }

    #[tokio::test]
    async fn test_find_active() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let mut paused = create("paused", None);
        paused.is_active = Some(false);
        repo.create(paused).await.unwrap();
        repo.create(create("live", None)).await.unwrap();

        let active = repo.find_active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "live");
    }

    #[tokio::test]
    async fn test_update_partial() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let rule = repo.create(create("Flat fee", Some(3))).await.unwrap();

        let updated = repo
            .update(
                rule.id,
                ShippingRuleUpdate {
                    priority: Some(1),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Flat fee");
        assert_eq!(updated.priority, 1);
        assert!(!updated.is_active);
        assert_eq!(updated.actions.surcharge_amount, Some(2.5));
        assert_eq!(updated.created_at, rule.created_at);
    }

    #[tokio::test]
    async fn test_update_blank_name_rejected() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let rule = repo.create(create("Flat fee", None)).await.unwrap();

        let err = repo
            .update(
                rule.id,
                ShippingRuleUpdate {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::RuleNameRequired));
        assert_eq!(repo.find_by_id(rule.id).unwrap().name, "Flat fee");
    }

    #[tokio::test]
    async fn test_update_clears_window_bounds() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let mut data = create("Holiday fee", None);
        data.effective_start = Some(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        data.effective_end = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let rule = repo.create(data).await.unwrap();

        let cleared_end: ShippingRuleUpdate =
            serde_json::from_str(r#"{"effective_end": null}"#).unwrap();
        let updated = repo.update(rule.id, cleared_end).await.unwrap();
        assert!(updated.effective_end.is_none());
        assert_eq!(updated.effective_start, rule.effective_start);

        let cleared_start: ShippingRuleUpdate =
            serde_json::from_str(r#"{"effective_start": null}"#).unwrap();
        let updated = repo.update(rule.id, cleared_start).await.unwrap();
        assert!(updated.effective_start.is_none());
        assert!(updated.effective_end.is_none());
        assert_eq!(repo.find_by_id(rule.id), Some(updated));
    }

    #[tokio::test]
    async fn test_update_rejects_inverted_window() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let mut data = create("Holiday fee", None);
        data.effective_end = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let rule = repo.create(data).await.unwrap();

        let update = ShippingRuleUpdate {
            effective_start: Some(Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())),
            ..Default::default()
        };
        let err = repo.update(rule.id, update).await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidEffectiveWindow));
        assert_eq!(repo.find_by_id(rule.id), Some(rule));
    }

    #[tokio::test]
    async fn test_concurrent_partial_updates_keep_both_fields() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let rule = repo.create(create("Flat fee", Some(3))).await.unwrap();

        let rename = ShippingRuleUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let pause = ShippingRuleUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        let (a, b) = tokio::join!(repo.update(rule.id, rename), repo.update(rule.id, pause));
        a.unwrap();
        b.unwrap();

        let stored = repo.find_by_id(rule.id).unwrap();
        assert_eq!(stored.name, "Renamed");
        assert!(!stored.is_active);
    }

    /// Replace `<dir>/data` with a plain file so snapshot writes fail
    async fn break_snapshot_dir(dir: &std::path::Path) {
        let data = dir.join("data");
        if tokio::fs::metadata(&data).await.is_ok() {
            tokio::fs::remove_dir_all(&data).await.unwrap();
        }
        tokio::fs::write(&data, b"").await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_persist_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("shipping.json");
        let repo = ShippingRuleRepository::new(Database::open(&path).await.unwrap());
        let kept = repo.create(create("Kept", Some(1))).await.unwrap();

        break_snapshot_dir(dir.path()).await;

        let err = repo.create(create("Unsaved", None)).await.unwrap_err();
        assert!(matches!(err, RepoError::Storage(_)));
        assert_eq!(repo.find_all(), vec![kept.clone()]);

        let update = ShippingRuleUpdate {
            priority: Some(9),
            ..Default::default()
        };
        let err = repo.update(kept.id, update).await.unwrap_err();
        assert!(matches!(err, RepoError::Storage(_)));
        assert_eq!(repo.find_by_id(kept.id), Some(kept.clone()));

        let err = repo.delete(kept.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Storage(_)));
        assert_eq!(repo.find_by_id(kept.id), Some(kept));
    }

    #[tokio::test]
    async fn test_unknown_rule() {
        let repo = ShippingRuleRepository::new(Database::in_memory());
        let err = repo.update(99, ShippingRuleUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::RuleNotFound(99)));
        let err = repo.delete(99).await.unwrap_err();
        assert!(matches!(err, RepoError::RuleNotFound(99)));
    }

    #[tokio::test]
    async fn test_rules_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shipping.json");

        let repo = ShippingRuleRepository::new(Database::open(&path).await.unwrap());
        let rule = repo.create(create("Persisted", Some(7))).await.unwrap();

        let reopened = ShippingRuleRepository::new(Database::open(&path).await.unwrap());
        assert_eq!(reopened.find_by_id(rule.id), Some(rule.clone()));

        reopened.delete(rule.id).await.unwrap();
        let again = ShippingRuleRepository::new(Database::open(&path).await.unwrap());
        assert!(again.find_all().is_empty());
    }
}
