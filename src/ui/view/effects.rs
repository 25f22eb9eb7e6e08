//! 装饰粒子的绘制
//!
//! 粒子只保存参数，位置在每一帧根据当前时间计算

use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use super::layouts::percent_point;
use crate::effects::{EffectKind, EffectLayer, Particle, ParticleKind, Rgb, Side};
use crate::scheduler::Millis;

const CONFETTI_GLYPHS: [&str; 4] = ["■", "▪", "◆", "●"];

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// 绘制指定类型粒子的图层
pub struct EffectsOverlay<'a> {
    pub layer: &'a EffectLayer,
    pub kinds: &'a [EffectKind],
    pub now: Millis,
}

impl Widget for EffectsOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for particle in self.layer.iter() {
            if !self.kinds.contains(&particle.effect()) {
                continue;
            }
            if let Some((x, y, glyph, style)) = place(particle, area, self.now) {
                buf.set_string(x, y, glyph, style);
            }
        }
    }
}

/// 计算粒子在当前帧的位置、字形和样式
fn place(particle: &Particle, area: Rect, now: Millis) -> Option<(u16, u16, &'static str, Style)> {
    let age = particle.age(now);
    match particle.kind {
        ParticleKind::BackgroundHeart {
            glyph,
            left,
            top,
            size,
            delay_ms,
            period_ms,
        } => {
            // 缓慢上浮，到顶后从底部重新出现
            let phase = ((age + delay_ms) % period_ms.max(1)) as f64 / period_ms.max(1) as f64;
            let top = (top - phase * 100.0).rem_euclid(100.0);
            let (x, y) = percent_point(area, left, top, 2)?;
            let style = if size > 35.0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Some((x, y, glyph, style))
        }
        ParticleKind::HeartBurst { pulses, pulse_ms } => {
            let pulse = age / pulse_ms.max(1);
            if pulse >= Millis::from(pulses) {
                return None;
            }
            let (x, y) = percent_point(area, 50.0, 20.0, 2)?;
            let expanded = (age % pulse_ms.max(1)) < pulse_ms / 2;
            let glyph = if expanded { "💖" } else { "💗" };
            let style = Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD);
            Some((x, y, glyph, style))
        }
        ParticleKind::Confetti {
            color,
            left,
            size,
            rotation,
            spin,
            drift,
            delay_ms,
            duration_ms,
        } => {
            if age < delay_ms {
                return None;
            }
            let t = ((age - delay_ms) as f64 / duration_ms.max(1) as f64).min(1.0);
            // 先快后慢
            let eased = 1.0 - (1.0 - t).powi(3);
            let left = left + drift * t / 5.0;
            let (x, y) = percent_point(area, left, eased * 100.0, 1)?;
            let glyph = if size < 7.0 {
                "·"
            } else {
                let angle = (rotation + spin * t).rem_euclid(360.0);
                CONFETTI_GLYPHS[(angle / 90.0) as usize % CONFETTI_GLYPHS.len()]
            };
            Some((x, y, glyph, Style::default().fg(rgb(color))))
        }
        ParticleKind::Sticker {
            glyph,
            side,
            bottom,
            delay_ms,
        } => {
            if age < delay_ms {
                return None;
            }
            // 弹出：前 300ms 从边缘滑入
            let slide = ((age - delay_ms) as f64 / 300.0).min(1.0);
            let left = match side {
                Side::Left => 10.0 * slide,
                Side::Right => 100.0 - 10.0 * slide,
            };
            let (x, y) = percent_point(area, left, 100.0 - bottom, 2)?;
            Some((x, y, glyph, Style::default()))
        }
        ParticleKind::Petal {
            color,
            hue,
            left,
            size,
            delay_ms,
            duration_ms,
        } => {
            if age < delay_ms {
                return None;
            }
            let duration = duration_ms.max(1);
            let t = ((age - delay_ms) % duration) as f64 / duration as f64;
            // 每片花瓣的摆动相位不同
            let phase = (particle.id.as_u128() % 628) as f64 / 100.0;
            let sway = (t * TAU * 2.0 + phase).sin() * 3.0;
            let (x, y) = percent_point(area, left + sway, t * 100.0, 1)?;
            let glyph = if hue < 340.0 { "❀" } else { "✿" };
            let mut style = Style::default().fg(rgb(color));
            if size > 18.0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            Some((x, y, glyph, style))
        }
    }
}
