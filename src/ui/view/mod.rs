//! 视图层模块
//!
//! 包含主渲染入口和各屏幕的视图。渲染时会把按钮容器尺寸和可点击区域写回 App。

pub mod components;
pub mod effects;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::actions::Action;
use super::state::App;
use crate::content::{AFFIRM_LABEL, STAR_COUNT};
use crate::effects::EffectKind;
use crate::models::Screen;
use components::{button_size, render_button, render_centered_text};
use effects::EffectsOverlay;
use layouts::{centered_rect, centered_row};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    app.hotspots.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // 主画面
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    frame.render_widget(
        EffectsOverlay {
            layer: &app.effects,
            kinds: &[EffectKind::BackgroundHeart],
            now: app.now,
        },
        chunks[0],
    );

    let stage = centered_rect(80, 90, chunks[0]);
    match app.screen {
        Screen::Intro => render_intro(frame, app, stage),
        Screen::Question => render_question(frame, app, stage),
        Screen::Celebration => render_celebration(frame, app, stage),
        Screen::Secret => render_secret(frame, app, stage),
    }

    frame.render_widget(
        EffectsOverlay {
            layer: &app.effects,
            kinds: &[
                EffectKind::Petal,
                EffectKind::HeartBurst,
                EffectKind::Confetti,
                EffectKind::Sticker,
            ],
            now: app.now,
        },
        chunks[0],
    );

    render_help(frame, app, chunks[1]);
}

fn title_style() -> Style {
    Style::default()
        .fg(Color::LightMagenta)
        .add_modifier(Modifier::BOLD)
}

fn render_intro(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    render_centered_text(
        frame,
        chunks[0],
        vec![
            Line::from(""),
            Line::from("💌 Hey you 💌"),
            Line::from(""),
            Line::from("I have a very important question..."),
        ],
        title_style(),
    );

    let label = "▶ START";
    let (width, height) = button_size(label);
    let button = centered_row(width, height, chunks[1]);
    render_button(frame, app, button, label, Color::LightMagenta, Action::Start);
}

fn render_question(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 问题
            Constraint::Length(2), // 回应
            Constraint::Length(2), // 闲置提示
            Constraint::Min(5),    // 按钮容器
        ])
        .split(area);

    render_centered_text(
        frame,
        chunks[0],
        vec![Line::from(""), Line::from("Will you be my valentine? 💘")],
        title_style(),
    );
    render_centered_text(
        frame,
        chunks[1],
        vec![Line::from(app.prompt.clone())],
        Style::default().fg(Color::White),
    );
    render_centered_text(
        frame,
        chunks[2],
        vec![Line::from(Span::styled(
            app.teaser.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        ))],
        Style::default().fg(Color::Gray),
    );

    let container = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let arena = container.inner(chunks[3]);
    frame.render_widget(container, chunks[3]);
    app.arena = (arena.width, arena.height);

    let (yes_w, yes_h) = button_size(AFFIRM_LABEL);
    let decline_label = app.negative.label.clone();
    let (no_w, no_h) = button_size(&decline_label);
    app.decline_size = (no_w, no_h);

    let row_x = arena.x + arena.width.saturating_sub(yes_w + no_w + 4) / 2;
    let yes = Rect::new(row_x, arena.y, yes_w, yes_h);
    render_button(frame, app, yes, AFFIRM_LABEL, Color::LightGreen, Action::Affirm);

    let no = match app.negative.position {
        Some(pos) => Rect::new(arena.x + pos.x, arena.y + pos.y, no_w, no_h),
        None => Rect::new(row_x + yes_w + 4, arena.y, no_w, no_h),
    };
    render_button(
        frame,
        app,
        no.intersection(arena),
        &decline_label,
        Color::LightRed,
        Action::Decline,
    );
}

fn render_celebration(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // 标题
            Constraint::Length(3), // 星星
            Constraint::Length(2), // 评分提示
            Constraint::Length(3), // 重来
        ])
        .split(area);

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from("YAY!!! 💞"),
        Line::from(app.prompt.clone()),
    ];
    if let Some(at) = app.flags.affirmed_at {
        lines.push(Line::from(Span::styled(
            format!("said yes at {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        )));
    }
    render_centered_text(frame, chunks[0], lines, title_style());

    let star_w = 5;
    let row = centered_row(star_w * STAR_COUNT as u16, 3, chunks[1]);
    for index in 0..STAR_COUNT {
        let filled = app.rating.is_filled(index);
        let (glyph, color) = if filled {
            ("★", Color::Yellow)
        } else {
            ("☆", Color::Gray)
        };
        let star = Rect::new(row.x + star_w * index as u16, row.y, star_w, row.height);
        render_button(frame, app, star, glyph, color, Action::Rate(index));
    }

    render_centered_text(
        frame,
        chunks[2],
        vec![Line::from(app.rating.note.clone())],
        Style::default().fg(Color::White),
    );

    let label = "↺ AGAIN";
    let (width, height) = button_size(label);
    let button = centered_row(width, height, chunks[3]);
    render_button(frame, app, button, label, Color::LightMagenta, Action::Restart);
}

fn render_secret(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    render_centered_text(
        frame,
        chunks[0],
        vec![Line::from("🌸 secret mode 🌸")],
        title_style(),
    );

    let typewriter = &app.secret.typewriter;
    let mut lines: Vec<Line> = typewriter
        .lines()
        .into_iter()
        .map(|line| Line::from(line.to_string()))
        .collect();
    if !typewriter.is_done() {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("▌", Style::default().fg(Color::LightMagenta)));
        }
    }
    // 折行后放不下时丢弃最早的行，保持最新的文字可见
    let width = chunks[1].width.max(1) as usize;
    let rows = |line: &Line| line.width().div_ceil(width).max(1);
    let mut total: usize = lines.iter().map(rows).sum();
    while total > chunks[1].height as usize && lines.len() > 1 {
        total -= rows(&lines.remove(0));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    let label = "okay 🙂";
    let (width, height) = button_size(label);
    let button = centered_row(width, height, chunks[2]);
    render_button(frame, app, button, label, Color::LightMagenta, Action::Acknowledge);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.screen {
        Screen::Intro => "[Enter] start  [space] ???  [q] quit",
        Screen::Question => "[y] yes  [n] no  [space] ???  [q] quit",
        Screen::Celebration => "[1-5] rate  [r] again  [space] ???  [q] quit",
        Screen::Secret => "[Enter] okay  [q] quit",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}
