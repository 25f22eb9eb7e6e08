//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

use crate::models::MotionSample;

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    // 控件点击
    Start,
    Affirm,
    Decline,
    Restart,
    Acknowledge,
    Rate(usize), // 星级下标 0..=4

    // 秘密模式触发
    #[allow(dead_code)] // 终端没有加速度计，由其他输入源构造
    Motion(MotionSample),
    SecretKey, // 空格
}

impl Action {
    /// 是否算作一次点击
    pub fn is_click(&self) -> bool {
        matches!(
            self,
            Action::Start
                | Action::Affirm
                | Action::Decline
                | Action::Restart
                | Action::Acknowledge
                | Action::Rate(_)
        )
    }
}
