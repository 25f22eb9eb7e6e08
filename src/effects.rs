//! 装饰效果
//!
//! 每个生成器只负责产生带随机参数的粒子，粒子到期后由 `EffectLayer::prune` 清理。
//! 百分比坐标相对于整个画面，时间单位为毫秒。

use uuid::Uuid;

use crate::content::{HEART_GLYPHS, STICKERS};
use crate::random::{RandomSource, pick};
use crate::scheduler::Millis;

pub const BACKGROUND_HEART_COUNT: usize = 20;
pub const CONFETTI_COUNT: usize = 100;
pub const CONFETTI_LIFETIME_MS: Millis = 3000;
pub const PETAL_COUNT: usize = 15;
pub const HEART_BURST_PULSES: u32 = 3;
pub const HEART_BURST_PULSE_MS: Millis = 500;
pub const STICKER_BASE_LIFETIME_MS: Millis = 5000;
pub const STICKER_STAGGER_MS: Millis = 200;

/// 彩纸配色
pub const CONFETTI_COLORS: [Rgb; 5] = [
    Rgb(0xff, 0x6b, 0x6b),
    Rgb(0xff, 0x8e, 0x8e),
    Rgb(0xff, 0xb6, 0xd9),
    Rgb(0xff, 0x85, 0xc0),
    Rgb(0xff, 0x47, 0x57),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// HSL 转 RGB，`s`/`l` 取 [0, 1]
    pub fn from_hsl(hue: f64, s: f64, l: f64) -> Self {
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = (hue.rem_euclid(360.0)) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self(to_u8(r), to_u8(g), to_u8(b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParticleKind {
    BackgroundHeart {
        glyph: &'static str,
        left: f64,
        top: f64,
        size: f64,
        delay_ms: Millis,
        period_ms: Millis,
    },
    HeartBurst {
        pulses: u32,
        pulse_ms: Millis,
    },
    Confetti {
        color: Rgb,
        left: f64,
        size: f64,
        rotation: f64,
        spin: f64,
        drift: f64,
        delay_ms: Millis,
        duration_ms: Millis,
    },
    Sticker {
        glyph: &'static str,
        side: Side,
        bottom: f64,
        delay_ms: Millis,
    },
    Petal {
        color: Rgb,
        hue: f64,
        left: f64,
        size: f64,
        delay_ms: Millis,
        duration_ms: Millis,
    },
}

/// 用于按类型统计、清理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    BackgroundHeart,
    HeartBurst,
    Confetti,
    Sticker,
    Petal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: Uuid,
    pub kind: ParticleKind,
    pub spawned_at: Millis,
    /// None 表示常驻，直到被显式清除
    pub expires_at: Option<Millis>,
}

impl Particle {
    fn new(kind: ParticleKind, spawned_at: Millis, lifetime: Option<Millis>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            spawned_at,
            expires_at: lifetime.map(|ms| spawned_at + ms),
        }
    }

    pub fn effect(&self) -> EffectKind {
        match self.kind {
            ParticleKind::BackgroundHeart { .. } => EffectKind::BackgroundHeart,
            ParticleKind::HeartBurst { .. } => EffectKind::HeartBurst,
            ParticleKind::Confetti { .. } => EffectKind::Confetti,
            ParticleKind::Sticker { .. } => EffectKind::Sticker,
            ParticleKind::Petal { .. } => EffectKind::Petal,
        }
    }

    pub fn is_expired(&self, now: Millis) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// 距生成经过的毫秒数
    pub fn age(&self, now: Millis) -> Millis {
        now.saturating_sub(self.spawned_at)
    }
}

fn ms(seconds: f64) -> Millis {
    (seconds * 1000.0).round() as Millis
}

// ============ 生成器 ============

/// 背景漂浮的爱心，初始化时生成一次
pub fn background_hearts(rng: &mut dyn RandomSource, now: Millis) -> Vec<Particle> {
    (0..BACKGROUND_HEART_COUNT)
        .map(|_| {
            let kind = ParticleKind::BackgroundHeart {
                glyph: *pick(rng, &HEART_GLYPHS),
                left: rng.range(0.0, 100.0),
                top: rng.range(0.0, 100.0),
                size: rng.range(15.0, 45.0),
                delay_ms: ms(rng.range(0.0, 5.0)),
                period_ms: ms(rng.range(5.0, 15.0)),
            };
            Particle::new(kind, now, None)
        })
        .collect()
}

/// 中心的心跳动画
pub fn heart_burst(now: Millis) -> Vec<Particle> {
    let kind = ParticleKind::HeartBurst {
        pulses: HEART_BURST_PULSES,
        pulse_ms: HEART_BURST_PULSE_MS,
    };
    vec![Particle::new(
        kind,
        now,
        Some(HEART_BURST_PULSE_MS * HEART_BURST_PULSES as Millis),
    )]
}

/// 彩纸，3 秒后整体清除
pub fn confetti(rng: &mut dyn RandomSource, now: Millis) -> Vec<Particle> {
    (0..CONFETTI_COUNT)
        .map(|_| {
            let kind = ParticleKind::Confetti {
                color: *pick(rng, &CONFETTI_COLORS),
                left: rng.range(0.0, 100.0),
                size: rng.range(5.0, 15.0),
                rotation: rng.range(0.0, 360.0),
                spin: rng.range(0.0, 720.0),
                drift: rng.range(-50.0, 50.0),
                duration_ms: ms(rng.range(2.0, 4.0)),
                delay_ms: ms(rng.range(0.0, 1.0)),
            };
            Particle::new(kind, now, Some(CONFETTI_LIFETIME_MS))
        })
        .collect()
}

/// 左右交替弹出的贴纸
pub fn stickers(now: Millis) -> Vec<Particle> {
    STICKERS
        .iter()
        .copied()
        .enumerate()
        .map(|(index, glyph)| {
            let stagger = STICKER_STAGGER_MS * index as Millis;
            let kind = ParticleKind::Sticker {
                glyph,
                side: if index % 2 == 0 { Side::Left } else { Side::Right },
                bottom: 20.0 + 15.0 * index as f64,
                delay_ms: stagger,
            };
            Particle::new(kind, now, Some(STICKER_BASE_LIFETIME_MS + stagger))
        })
        .collect()
}

/// 秘密模式的花瓣，退出时清除
pub fn petals(rng: &mut dyn RandomSource, now: Millis) -> Vec<Particle> {
    (0..PETAL_COUNT)
        .map(|_| {
            let left = rng.range(0.0, 100.0);
            let delay_ms = ms(rng.range(0.0, 5.0));
            let duration_ms = ms(rng.range(10.0, 20.0));
            let hue = (rng.range(0.0, 20.0)).floor() + 330.0;
            let size = rng.range(10.0, 25.0);
            let kind = ParticleKind::Petal {
                color: Rgb::from_hsl(hue, 0.8, 0.7),
                hue,
                left,
                size,
                delay_ms,
                duration_ms,
            };
            Particle::new(kind, now, None)
        })
        .collect()
}

// ============ 粒子容器 ============

#[derive(Debug, Default)]
pub struct EffectLayer {
    particles: Vec<Particle>,
}

impl EffectLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, particles: Vec<Particle>) {
        self.particles.extend(particles);
    }

    /// 移除已到期的粒子，返回移除数量
    pub fn prune(&mut self, now: Millis) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired(now));
        before - self.particles.len()
    }

    /// 清除某一类粒子
    pub fn clear(&mut self, kind: EffectKind) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| p.effect() != kind);
        before - self.particles.len()
    }

    pub fn count(&self, kind: EffectKind) -> usize {
        self.particles.iter().filter(|p| p.effect() == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn test_confetti_count_and_bounds() {
        let mut rng = ScriptedRandom::new(&[0.0, 0.25, 0.5, 0.75, 0.999]);
        let pieces = confetti(&mut rng, 1000);
        assert_eq!(pieces.len(), CONFETTI_COUNT);

        for piece in &pieces {
            assert_eq!(piece.expires_at, Some(4000));
            let ParticleKind::Confetti {
                left,
                size,
                rotation,
                drift,
                duration_ms,
                delay_ms,
                ..
            } = piece.kind
            else {
                panic!("expected confetti");
            };
            assert!((0.0..100.0).contains(&left));
            assert!((5.0..15.0).contains(&size));
            assert!((0.0..360.0).contains(&rotation));
            assert!((-50.0..50.0).contains(&drift));
            assert!((2000..=4000).contains(&duration_ms));
            assert!(delay_ms <= 1000);
        }
    }

    #[test]
    fn test_confetti_colors_come_from_palette() {
        let mut rng = ScriptedRandom::new(&[0.0, 0.3, 0.5, 0.7, 0.99]);
        for piece in confetti(&mut rng, 0) {
            let ParticleKind::Confetti { color, .. } = piece.kind else {
                panic!("expected confetti");
            };
            assert!(CONFETTI_COLORS.contains(&color));
        }
    }

    #[test]
    fn test_confetti_self_removes() {
        let mut rng = ScriptedRandom::constant(0.5);
        let mut layer = EffectLayer::new();
        layer.spawn(confetti(&mut rng, 0));
        layer.spawn(background_hearts(&mut rng, 0));

        assert_eq!(layer.prune(2999), 0);
        assert_eq!(layer.prune(3000), CONFETTI_COUNT);
        assert_eq!(layer.count(EffectKind::Confetti), 0);
        assert_eq!(layer.count(EffectKind::BackgroundHeart), BACKGROUND_HEART_COUNT);
    }

    #[test]
    fn test_stickers_alternate_and_stagger() {
        let stickers = stickers(100);
        assert_eq!(stickers.len(), 4);

        for (index, sticker) in stickers.iter().enumerate() {
            let ParticleKind::Sticker {
                side,
                bottom,
                delay_ms,
                ..
            } = sticker.kind
            else {
                panic!("expected sticker");
            };
            let expected_side = if index % 2 == 0 { Side::Left } else { Side::Right };
            assert_eq!(side, expected_side);
            assert_eq!(bottom, 20.0 + 15.0 * index as f64);
            assert_eq!(delay_ms, 200 * index as Millis);
            assert_eq!(sticker.expires_at, Some(100 + 5000 + 200 * index as Millis));
        }
    }

    #[test]
    fn test_petals_are_pink_and_persistent() {
        let mut rng = ScriptedRandom::new(&[0.1, 0.9, 0.4]);
        let petals = petals(&mut rng, 0);
        assert_eq!(petals.len(), PETAL_COUNT);
        for petal in &petals {
            assert_eq!(petal.expires_at, None);
            let ParticleKind::Petal { hue, size, .. } = petal.kind else {
                panic!("expected petal");
            };
            assert!((330.0..350.0).contains(&hue));
            assert!((10.0..25.0).contains(&size));
        }
    }

    #[test]
    fn test_heart_burst_lifetime() {
        let burst = heart_burst(200);
        assert_eq!(burst.len(), 1);
        assert_eq!(burst[0].expires_at, Some(1700));
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb(255, 0, 0));
        assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb(0, 255, 0));
    }
}
