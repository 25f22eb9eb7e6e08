//! App 状态定义 (Model)
//!
//! 会话内的全部状态都在 App 中，处理函数显式接收当前时间

use ratatui::layout::Rect;

use super::actions::Action;
use crate::config::Config;
use crate::content::{DEFAULT_TEASER, PROMPT};
use crate::effects::{self, EffectLayer};
use crate::models::{
    InteractionClock, NegativeButtonState, RatingState, Screen, SecretModeState, SessionFlags,
    Typewriter,
};
use crate::random::RandomSource;
use crate::scheduler::{Millis, Scheduler};

/// 按钮所在容器的默认尺寸，首次渲染后由视图更新
pub const DEFAULT_ARENA: (u16, u16) = (40, 7);

/// 应用状态
pub struct App {
    pub config: Config,
    pub screen: Screen,
    pub negative: NegativeButtonState,
    pub rating: RatingState,
    pub secret: SecretModeState,
    pub interaction: InteractionClock,
    pub flags: SessionFlags,
    pub prompt: String,
    pub teaser: String,
    pub effects: EffectLayer,
    pub scheduler: Scheduler,
    pub rng: Box<dyn RandomSource>,
    /// 最近一次 tick 的时间
    pub now: Millis,
    /// 按钮容器尺寸 (宽, 高)
    pub arena: (u16, u16),
    /// "NO" 按钮尺寸 (宽, 高)
    pub decline_size: (u16, u16),
    /// 上一帧可点击区域
    pub hotspots: Vec<(Rect, Action)>,
}

impl App {
    /// 创建新的应用实例，并生成背景爱心
    pub fn new(config: Config, rng: Box<dyn RandomSource>) -> Self {
        let typewriter = Typewriter::new(&config.secret_message);
        let mut app = Self {
            config,
            screen: Screen::Intro,
            negative: NegativeButtonState::default(),
            rating: RatingState::default(),
            secret: SecretModeState {
                typewriter,
                ..SecretModeState::default()
            },
            interaction: InteractionClock::default(),
            flags: SessionFlags::default(),
            prompt: PROMPT.to_string(),
            teaser: DEFAULT_TEASER.to_string(),
            effects: EffectLayer::new(),
            scheduler: Scheduler::new(),
            rng,
            now: 0,
            arena: DEFAULT_ARENA,
            decline_size: (9, 3),
            hotspots: Vec::new(),
        };
        let hearts = effects::background_hearts(app.rng.as_mut(), 0);
        app.effects.spawn(hearts);
        app
    }

    /// 根据点击位置查找控件
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Action> {
        self.hotspots
            .iter()
            .rev()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x.saturating_add(rect.width)
                    && row >= rect.y
                    && row < rect.y.saturating_add(rect.height)
            })
            .map(|(_, action)| action.clone())
    }
}
