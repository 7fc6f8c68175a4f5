//! Rule Commands

use crate::application::ports::{NewRule, RuleChanges};

/// 创建规则命令
#[derive(Debug, Clone)]
pub struct CreateRule {
    pub rule: NewRule,
}

/// 更新规则命令（整体替换可变字段）
#[derive(Debug, Clone)]
pub struct UpdateRule {
    pub id: i64,
    pub changes: RuleChanges,
}

/// 删除规则命令
#[derive(Debug, Clone)]
pub struct DeleteRule {
    pub id: i64,
}
