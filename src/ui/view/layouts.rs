//! 布局辅助函数

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 在 `r` 中居中取一个按百分比缩放的矩形
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// 水平居中放置一个固定宽度的矩形
pub fn centered_row(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(r.x + (r.width - width) / 2, r.y, width, height)
}

/// 把百分比坐标映射到区域内的单元格，`glyph_width` 用于防止越过右边界
pub fn percent_point(area: Rect, left: f64, top: f64, glyph_width: u16) -> Option<(u16, u16)> {
    if area.width < glyph_width || area.height == 0 {
        return None;
    }
    let span_x = f64::from(area.width - glyph_width);
    let span_y = f64::from(area.height - 1);
    let x = area.x + (left.clamp(0.0, 100.0) / 100.0 * span_x).round() as u16;
    let y = area.y + (top.clamp(0.0, 100.0) / 100.0 * span_y).round() as u16;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_point_stays_inside() {
        let area = Rect::new(5, 2, 20, 10);
        assert_eq!(percent_point(area, 0.0, 0.0, 2), Some((5, 2)));
        assert_eq!(percent_point(area, 100.0, 100.0, 2), Some((23, 11)));
        assert_eq!(percent_point(area, 250.0, -3.0, 1), Some((24, 2)));
        assert_eq!(percent_point(Rect::new(0, 0, 1, 1), 50.0, 50.0, 2), None);
    }

    #[test]
    fn test_centered_row_clamps() {
        let area = Rect::new(0, 4, 10, 2);
        assert_eq!(centered_row(4, 3, area), Rect::new(3, 4, 4, 2));
        assert_eq!(centered_row(20, 1, area), Rect::new(0, 4, 10, 1));
    }
}
