mod config;
mod content;
mod effects;
mod error;
mod models;
mod random;
mod scheduler;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{info, warn};

use crate::config::{Config, config_path, load_config};
use crate::error::{Error, Result};
use crate::random::SystemRandom;
use crate::scheduler::Millis;
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/bemine/)
fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or(Error::MissingDir("data"))?
        .join("bemine");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 日志写入文件，终端留给 TUI
fn init_logging() -> Result<PathBuf> {
    let log_path = get_data_dir()?.join("bemine.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .init();

    Ok(log_path)
}

fn main() -> Result<()> {
    let log_path = init_logging()?;

    let config = match config_path() {
        Ok(path) => {
            let config = load_config(&path)?;
            info!(path = %path.display(), "config loaded");
            config
        }
        Err(e) => {
            warn!("{e}, using default config");
            Config::default()
        }
    };
    info!(started_at = %chrono::Local::now(), "session started");
    // 终端没有加速度计，只能用空格触发秘密模式
    info!("motion sensor unavailable, space bar triggers secret mode");

    let tick = Duration::from_millis(config.tick_ms);
    let rng = Box::new(SystemRandom::new(config.seed));
    let mut app = App::new(config, rng);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, tick);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("session ended");
    println!("日志已写入 {}", log_path.display());

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    let started = Instant::now();
    let now = || started.elapsed().as_millis() as Millis;

    loop {
        app.tick(now());
        terminal.draw(|f| render(f, app))?;

        if !event::poll(tick)? {
            continue;
        }
        let quit = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                ui::handle_key_event(app, key.code, now())
            }
            Event::Mouse(mouse) => ui::handle_mouse_event(app, mouse, now()),
            _ => false,
        };
        if quit {
            break;
        }
    }
    Ok(())
}
