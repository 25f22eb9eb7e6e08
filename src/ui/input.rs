//! 键盘/鼠标事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use super::actions::Action;
use super::state::App;
use crate::models::Screen;
use crate::scheduler::Millis;

/// 根据当前屏幕和按键获取对应的 Action
pub fn get_action(screen: Screen, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char(' ') if screen != Screen::Secret => return Some(Action::SecretKey),
        _ => {}
    }

    match screen {
        Screen::Intro => match key {
            KeyCode::Enter | KeyCode::Char('s') => Some(Action::Start),
            _ => None,
        },
        Screen::Question => match key {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Affirm),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::Decline),
            _ => None,
        },
        Screen::Celebration => match key {
            KeyCode::Char(c @ '1'..='5') => Some(Action::Rate(c as usize - '1' as usize)),
            KeyCode::Enter | KeyCode::Char('r') => Some(Action::Restart),
            _ => None,
        },
        Screen::Secret => match key {
            KeyCode::Enter | KeyCode::Char('o') => Some(Action::Acknowledge),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode, now: Millis) -> bool {
    match get_action(app.screen, key) {
        Some(action) => app.dispatch(action, now),
        None => false,
    }
}

/// 处理鼠标事件：任意按下都算交互，落在控件上则触发对应 Action
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, now: Millis) -> bool {
    if !matches!(mouse.kind, MouseEventKind::Down(_)) {
        return false;
    }
    app.interaction.touch(now);

    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return false;
    }
    match app.hit_test(mouse.column, mouse.row) {
        Some(action) => app.dispatch(action, now),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::random::ScriptedRandom;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_mapping_per_screen() {
        assert_eq!(get_action(Screen::Intro, KeyCode::Enter), Some(Action::Start));
        assert_eq!(get_action(Screen::Question, KeyCode::Char('n')), Some(Action::Decline));
        assert_eq!(get_action(Screen::Question, KeyCode::Char('y')), Some(Action::Affirm));
        assert_eq!(get_action(Screen::Celebration, KeyCode::Char('3')), Some(Action::Rate(2)));
        assert_eq!(get_action(Screen::Celebration, KeyCode::Char('6')), None);
        assert_eq!(get_action(Screen::Secret, KeyCode::Enter), Some(Action::Acknowledge));
        assert_eq!(get_action(Screen::Intro, KeyCode::Char('n')), None);
    }

    #[test]
    fn test_space_is_secret_fallback_outside_secret() {
        for screen in [Screen::Intro, Screen::Question, Screen::Celebration] {
            assert_eq!(get_action(screen, KeyCode::Char(' ')), Some(Action::SecretKey));
        }
        assert_eq!(get_action(Screen::Secret, KeyCode::Char(' ')), None);
        assert_eq!(get_action(Screen::Secret, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_mouse_click_dispatches_hotspot() {
        let mut app = App::new(Config::default(), Box::new(ScriptedRandom::constant(0.5)));
        app.hotspots = vec![(Rect::new(10, 5, 8, 3), Action::Start)];

        assert!(!handle_mouse_event(&mut app, click(2, 2), 100));
        assert_eq!(app.screen, Screen::Intro);
        assert_eq!(app.interaction.last, 100);

        assert!(!handle_mouse_event(&mut app, click(12, 6), 200));
        assert_eq!(app.screen, Screen::Question);
    }

    #[test]
    fn test_mouse_release_ignored() {
        let mut app = App::new(Config::default(), Box::new(ScriptedRandom::constant(0.5)));
        app.hotspots = vec![(Rect::new(0, 0, 5, 5), Action::Start)];
        let mut release = click(1, 1);
        release.kind = MouseEventKind::Up(MouseButton::Left);

        handle_mouse_event(&mut app, release, 50);
        assert_eq!(app.screen, Screen::Intro);
        assert_eq!(app.interaction.last, 0);
    }
}
