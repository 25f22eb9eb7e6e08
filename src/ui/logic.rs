//! 业务逻辑处理 (Update/Dispatch)
//!
//! 屏幕切换、定时任务和装饰效果的触发都在这里

use chrono::Local;
use tracing::{debug, info};

use super::actions::Action;
use super::state::App;
use crate::content::{
    AFFIRMATIONS, DECLINE_LABELS, DECLINES, PROMPT, RATING_NOTE, STAR_COUNT, TEASERS,
    rating_message,
};
use crate::effects::{self, EffectKind};
use crate::models::{MotionSample, Position, Screen};
use crate::random::{RandomSource, pick};
use crate::scheduler::{Millis, Task, TaskGroup};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action, now: Millis) -> bool {
        if action.is_click() {
            self.interaction.touch(now);
        }

        match action {
            Action::Quit => return true,
            Action::Start if self.screen == Screen::Intro => self.show_question(now),
            Action::Affirm if self.screen == Screen::Question => self.affirm(now),
            Action::Decline if self.screen == Screen::Question => self.decline(now),
            Action::Restart if self.screen == Screen::Celebration => self.restart(),
            Action::Acknowledge if self.screen == Screen::Secret => self.exit_secret(),
            Action::Rate(index) if self.screen == Screen::Celebration => self.rate(index, now),
            Action::Motion(sample) => self.handle_motion(sample, now),
            Action::SecretKey => self.activate_secret(now),
            _ => {}
        }
        false
    }

    /// 推进时钟：执行所有到期任务并清理过期粒子
    pub fn tick(&mut self, now: Millis) {
        self.now = self.now.max(now);
        while let Some((at, task)) = self.scheduler.pop_due(self.now) {
            self.run_task(task, at);
        }
        self.effects.prune(self.now);
    }

    /// 执行到期任务，`at` 为任务的计划时间
    fn run_task(&mut self, task: Task, at: Millis) {
        debug!(?task, at, "running scheduled task");
        match task {
            Task::RevealCelebration => self.reveal_celebration(),
            Task::MoveDecline => self.move_decline(),
            Task::RotateTeaser => self.rotate_teaser(at),
            Task::ShowRating(index) => self.show_rating(index, at),
            Task::RestoreRating => self.rating.note = RATING_NOTE.to_string(),
            Task::StartTypewriter => {
                self.secret.typewriter.rewind();
                self.type_next_char(at);
            }
            Task::TypeNextChar => self.type_next_char(at),
        }
    }

    // ============ 屏幕切换 ============

    /// 离开当前屏幕，取消其名下的定时任务
    fn leave_screen(&mut self) {
        match self.screen {
            Screen::Intro => {}
            Screen::Question => {
                self.scheduler.cancel_group(TaskGroup::Question);
                self.stop_evasion();
            }
            Screen::Celebration => {
                self.scheduler.cancel_group(TaskGroup::Celebration);
                self.rating.note = RATING_NOTE.to_string();
            }
            Screen::Secret => {
                self.scheduler.cancel_group(TaskGroup::Secret);
            }
        }
    }

    fn enter(&mut self, screen: Screen) {
        self.leave_screen();
        info!(from = ?self.screen, to = ?screen, "screen transition");
        self.screen = screen;
    }

    /// Intro -> Question
    pub fn show_question(&mut self, now: Millis) {
        self.enter(Screen::Question);
        self.reset_negative();
        self.prompt = PROMPT.to_string();

        let period = self.config.timing.teaser_interval_ms;
        self.scheduler
            .every(now, period, period, TaskGroup::Question, Task::RotateTeaser);
    }

    /// Celebration -> Intro
    pub fn restart(&mut self) {
        self.enter(Screen::Intro);
    }

    fn reveal_celebration(&mut self) {
        if self.screen == Screen::Question {
            self.enter(Screen::Celebration);
        }
    }

    // ============ YES / NO ============

    pub fn affirm(&mut self, now: Millis) {
        self.effects.spawn(effects::heart_burst(now));
        let confetti = effects::confetti(self.rng.as_mut(), now);
        self.effects.spawn(confetti);

        if !self.flags.stickers_shown {
            self.effects.spawn(effects::stickers(now));
            self.flags.stickers_shown = true;
        }

        self.stop_evasion();
        self.prompt = pick(self.rng.as_mut(), &AFFIRMATIONS).to_string();
        self.flags.affirmed_at = Some(Local::now());
        info!(declines = self.negative.click_count, "affirmed");

        // 以第一次点击为准，之后的点击只追加效果
        if !self
            .scheduler
            .is_scheduled(TaskGroup::Question, &Task::RevealCelebration)
        {
            self.scheduler.after(
                now,
                self.config.timing.celebration_delay_ms,
                TaskGroup::Question,
                Task::RevealCelebration,
            );
        }
    }

    pub fn decline(&mut self, now: Millis) {
        self.negative.click_count += 1;
        self.prompt = pick(self.rng.as_mut(), &DECLINES).to_string();
        debug!(clicks = self.negative.click_count, "declined");

        if self.negative.click_count == 1 {
            self.start_evasion(now);
        }
    }

    fn reset_negative(&mut self) {
        self.scheduler.cancel_group(TaskGroup::Evasion);
        self.negative.reset();
    }

    fn start_evasion(&mut self, now: Millis) {
        self.negative.is_evading = true;
        let timing = &self.config.timing;
        self.scheduler.every(
            now,
            timing.evasion_warmup_ms,
            timing.evasion_interval_ms,
            TaskGroup::Evasion,
            Task::MoveDecline,
        );
        info!("decline control starts evading");
    }

    fn stop_evasion(&mut self) {
        self.scheduler.cancel_group(TaskGroup::Evasion);
        self.negative.is_evading = false;
    }

    /// 在容器范围内随机移动 "NO" 按钮，偶尔换一下文字
    fn move_decline(&mut self) {
        if !self.negative.is_evading {
            return;
        }
        let max_x = self.arena.0.saturating_sub(self.decline_size.0);
        let max_y = self.arena.1.saturating_sub(self.decline_size.1);
        let x = (self.rng.next_f64() * f64::from(max_x)).floor() as u16;
        let y = (self.rng.next_f64() * f64::from(max_y)).floor() as u16;
        self.negative.position = Some(Position {
            x: x.min(max_x),
            y: y.min(max_y),
        });

        if self.rng.chance(0.3) {
            self.negative.label = pick(self.rng.as_mut(), &DECLINE_LABELS).to_string();
        }
    }

    /// 问题屏闲置一段时间后换一句提示
    fn rotate_teaser(&mut self, at: Millis) {
        if self.screen != Screen::Question {
            return;
        }
        if self
            .interaction
            .idle_for(at, self.config.timing.idle_window_ms)
        {
            self.teaser = pick(self.rng.as_mut(), &TEASERS).to_string();
        }
    }

    // ============ 评分 ============

    pub fn rate(&mut self, index: usize, now: Millis) {
        if index >= STAR_COUNT {
            return;
        }
        self.rating.select(index);
        // 新的评分覆盖尚未完成的提示
        self.scheduler.cancel_group(TaskGroup::Celebration);
        self.scheduler.after(
            now,
            self.config.timing.rating_delay_ms,
            TaskGroup::Celebration,
            Task::ShowRating(index),
        );
    }

    fn show_rating(&mut self, index: usize, at: Millis) {
        self.rating.note = rating_message(index);
        self.scheduler.after(
            at,
            self.config.timing.rating_hold_ms,
            TaskGroup::Celebration,
            Task::RestoreRating,
        );
    }

    // ============ 秘密模式 ============

    fn handle_motion(&mut self, sample: MotionSample, now: Millis) {
        if self.secret.active {
            return;
        }
        let shake = &self.config.shake;
        let cooled = self
            .secret
            .last_shake
            .is_none_or(|last| now.saturating_sub(last) > shake.cooldown_ms);

        if sample.magnitude() > shake.threshold && cooled {
            self.secret.last_shake = Some(now);
            self.activate_secret(now);
        }
    }

    /// 进入秘密模式，已激活时不做任何事
    pub fn activate_secret(&mut self, now: Millis) {
        if self.secret.active {
            return;
        }
        self.enter(Screen::Secret);
        self.secret.active = true;
        self.secret.typewriter.rewind();

        let petals = effects::petals(self.rng.as_mut(), now);
        self.effects.spawn(petals);
        self.scheduler.after(
            now,
            self.config.timing.typewriter_delay_ms,
            TaskGroup::Secret,
            Task::StartTypewriter,
        );
        info!("secret mode unlocked");
    }

    /// Secret -> Intro
    pub fn exit_secret(&mut self) {
        self.enter(Screen::Intro);
        self.secret.active = false;
        self.secret.typewriter.rewind();
        self.effects.clear(EffectKind::Petal);
    }

    /// 显示一个字符，未结束时按基础间隔加抖动安排下一个
    fn type_next_char(&mut self, at: Millis) {
        if !self.secret.typewriter.step() {
            debug!("typewriter finished");
            return;
        }
        let timing = &self.config.timing;
        let jitter = timing.typewriter_jitter_ms as f64;
        let delay = timing.typewriter_base_ms as f64 + self.rng.range(-jitter, jitter);
        let delay = (delay.round() as Millis).max(1);
        self.scheduler
            .after(at, delay, TaskGroup::Secret, Task::TypeNextChar);
    }
}
