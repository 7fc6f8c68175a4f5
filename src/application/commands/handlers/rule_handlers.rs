//! Rule Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateRule, DeleteRule, UpdateRule};
use crate::application::error::ApplicationError;
use crate::application::ports::{RuleRecord, RuleRepositoryPort};

const RESOURCE: &str = "Rule";

// ============================================================================
// CreateRule
// ============================================================================

/// CreateRule Handler
pub struct CreateRuleHandler {
    rule_repo: Arc<dyn RuleRepositoryPort>,
}

impl CreateRuleHandler {
    pub fn new(rule_repo: Arc<dyn RuleRepositoryPort>) -> Self {
        Self { rule_repo }
    }

    pub async fn handle(&self, command: CreateRule) -> Result<RuleRecord, ApplicationError> {
        let rule = self.rule_repo.insert(&command.rule).await?;

        tracing::info!(
            id = rule.id,
            category_code = %rule.category_code,
            rule_id = %rule.rule_id,
            "Rule created"
        );

        Ok(rule)
    }
}

// ============================================================================
// UpdateRule
// ============================================================================

/// UpdateRule Handler
pub struct UpdateRuleHandler {
    rule_repo: Arc<dyn RuleRepositoryPort>,
}

impl UpdateRuleHandler {
    pub fn new(rule_repo: Arc<dyn RuleRepositoryPort>) -> Self {
        Self { rule_repo }
    }

    pub async fn handle(&self, command: UpdateRule) -> Result<RuleRecord, ApplicationError> {
        let rule = self
            .rule_repo
            .update(command.id, &command.changes)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, command.id))?;

        tracing::info!(id = rule.id, rule_id = %rule.rule_id, "Rule updated");

        Ok(rule)
    }
}

// ============================================================================
// DeleteRule
// ============================================================================

/// DeleteRule Handler
pub struct DeleteRuleHandler {
    rule_repo: Arc<dyn RuleRepositoryPort>,
}

impl DeleteRuleHandler {
    pub fn new(rule_repo: Arc<dyn RuleRepositoryPort>) -> Self {
        Self { rule_repo }
    }

    pub async fn handle(&self, command: DeleteRule) -> Result<(), ApplicationError> {
        if !self.rule_repo.delete(command.id).await? {
            return Err(ApplicationError::not_found(RESOURCE, command.id));
        }

        tracing::info!(id = command.id, "Rule deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NewRule, RepositoryError, RuleChanges};
    use async_trait::async_trait;

    /// 永远命中不到任何行的仓储
    struct EmptyRuleRepo;

    #[async_trait]
    impl RuleRepositoryPort for EmptyRuleRepo {
        async fn find_all(&self) -> Result<Vec<RuleRecord>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_by_category(&self, _: &str) -> Result<Vec<RuleRecord>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn insert(&self, rule: &NewRule) -> Result<RuleRecord, RepositoryError> {
            Ok(RuleRecord {
                id: 1,
                category_code: rule.category_code.clone(),
                rule_id: rule.rule_id.clone(),
                title: rule.title.clone(),
                content: rule.content.clone(),
                display_order: rule.display_order,
            })
        }

        async fn update(
            &self,
            _: i64,
            _: &RuleChanges,
        ) -> Result<Option<RuleRecord>, RepositoryError> {
            Ok(None)
        }

        async fn delete(&self, _: i64) -> Result<bool, RepositoryError> {
            Ok(false)
        }
    }

    fn changes() -> RuleChanges {
        RuleChanges {
            title: "T2".into(),
            content: "C".into(),
            display_order: 0,
        }
    }

    #[tokio::test]
    async fn test_update_missing_rule_is_not_found() {
        let handler = UpdateRuleHandler::new(Arc::new(EmptyRuleRepo));
        let err = handler
            .handle(UpdateRule { id: 7, changes: changes() })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { id: 7, .. }));
        assert_eq!(err.to_string(), "Rule not found");
    }

    #[tokio::test]
    async fn test_delete_missing_rule_is_not_found() {
        let handler = DeleteRuleHandler::new(Arc::new(EmptyRuleRepo));
        let err = handler.handle(DeleteRule { id: 3 }).await.unwrap_err();
        assert_eq!(err.to_string(), "Rule not found");
    }

    #[tokio::test]
    async fn test_create_returns_repository_row() {
        let handler = CreateRuleHandler::new(Arc::new(EmptyRuleRepo));
        let rule = handler
            .handle(CreateRule {
                rule: NewRule {
                    category_code: "safety".into(),
                    rule_id: "R1".into(),
                    title: "T".into(),
                    content: "C".into(),
                    display_order: 0,
                },
            })
            .await
            .unwrap();

        assert_eq!(rule.id, 1);
        assert_eq!(rule.rule_id, "R1");
    }
}
