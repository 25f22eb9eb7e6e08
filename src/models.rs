use chrono::{DateTime, Local};

use crate::content::{DEFAULT_DECLINE_LABEL, RATING_NOTE, STAR_COUNT};
use crate::scheduler::Millis;

/// 顶层屏幕，任意时刻只有一个处于激活状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Intro,
    Question,
    Celebration,
    Secret,
}

/// 容器内的相对坐标 (单元格)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// "NO" 按钮状态
#[derive(Debug, Clone, PartialEq)]
pub struct NegativeButtonState {
    pub click_count: u32,
    pub is_evading: bool,
    pub position: Option<Position>,
    pub label: String,
}

impl Default for NegativeButtonState {
    fn default() -> Self {
        Self {
            click_count: 0,
            is_evading: false,
            position: None,
            label: DEFAULT_DECLINE_LABEL.to_string(),
        }
    }
}

impl NegativeButtonState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 星级评分
#[derive(Debug, Clone, PartialEq)]
pub struct RatingState {
    pub selected: Option<usize>,
    pub note: String,
}

impl Default for RatingState {
    fn default() -> Self {
        Self {
            selected: None,
            note: RATING_NOTE.to_string(),
        }
    }
}

impl RatingState {
    /// 第 `star` 颗星是否点亮
    pub fn is_filled(&self, star: usize) -> bool {
        self.selected.is_some_and(|selected| star <= selected)
    }

    pub fn select(&mut self, index: usize) {
        self.selected = Some(index.min(STAR_COUNT - 1));
    }
}

/// 逐字显示的文本
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Typewriter {
    message: String,
    progress: usize,
    total: usize,
}

impl Typewriter {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            progress: 0,
            total: message.chars().count(),
        }
    }

    /// 再显示一个字符，返回是否还有剩余
    pub fn step(&mut self) -> bool {
        if self.progress < self.total {
            self.progress += 1;
        }
        !self.is_done()
    }

    pub fn rewind(&mut self) {
        self.progress = 0;
    }

    pub fn is_done(&self) -> bool {
        self.progress >= self.total
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.total
    }

    /// 已显示的部分
    pub fn revealed(&self) -> &str {
        match self.message.char_indices().nth(self.progress) {
            Some((byte, _)) => &self.message[..byte],
            None => &self.message,
        }
    }

    /// 已显示部分按换行拆分
    pub fn lines(&self) -> Vec<&str> {
        self.revealed().split('\n').collect()
    }
}

/// 秘密模式状态
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SecretModeState {
    pub active: bool,
    pub last_shake: Option<Millis>,
    pub typewriter: Typewriter,
}

/// 一次加速度采样 (含重力)
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// 最近一次交互时间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionClock {
    pub last: Millis,
}

impl InteractionClock {
    pub fn touch(&mut self, now: Millis) {
        self.last = self.last.max(now);
    }

    /// 超过 `window` 毫秒没有交互
    pub fn idle_for(&self, now: Millis, window: Millis) -> bool {
        now.saturating_sub(self.last) > window
    }
}

/// 会话级标记
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionFlags {
    pub stickers_shown: bool,
    pub affirmed_at: Option<DateTime<Local>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typewriter_reveals_by_char() {
        let mut tw = Typewriter::new("hé\nyo");
        assert_eq!(tw.total(), 5);
        assert_eq!(tw.revealed(), "");

        let mut steps = 0;
        while tw.step() {
            steps += 1;
        }
        steps += 1;
        assert_eq!(steps, 5);
        assert_eq!(tw.revealed(), "hé\nyo");
        assert_eq!(tw.lines(), vec!["hé", "yo"]);
        assert!(!tw.step());
        assert_eq!(tw.progress(), 5);
    }

    #[test]
    fn test_rating_fill() {
        let mut rating = RatingState::default();
        assert!(!rating.is_filled(0));
        rating.select(2);
        assert!(rating.is_filled(0));
        assert!(rating.is_filled(2));
        assert!(!rating.is_filled(3));
    }

    #[test]
    fn test_idle_window_is_strict() {
        let mut clock = InteractionClock::default();
        clock.touch(1000);
        assert!(!clock.idle_for(6000, 5000));
        assert!(clock.idle_for(6001, 5000));
    }

    #[test]
    fn test_motion_magnitude() {
        let sample = MotionSample {
            x: 3.0,
            y: 4.0,
            z: 12.0,
        };
        assert_eq!(sample.magnitude(), 13.0);
    }
}
