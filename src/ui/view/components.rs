//! 通用 UI 组件
//!
//! 按钮、居中文本等通用组件

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::actions::Action;
use crate::ui::state::App;

/// 按钮的外框尺寸 (宽, 高)
pub fn button_size(label: &str) -> (u16, u16) {
    let width = Span::raw(label).width() as u16;
    (width + 4, 3)
}

/// [组件] 带边框的按钮，同时登记点击区域
pub fn render_button(
    frame: &mut Frame,
    app: &mut App,
    area: Rect,
    label: &str,
    color: Color,
    action: Action,
) {
    let area = area.intersection(frame.area());
    if area.is_empty() {
        return;
    }
    frame.render_widget(Clear, area);
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(button, area);
    app.hotspots.push((area, action));
}

/// [组件] 居中的多行文本
pub fn render_centered_text(frame: &mut Frame, area: Rect, lines: Vec<Line>, style: Style) {
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}
