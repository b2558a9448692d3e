use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent};

use cell_wm::Result;
use cell_wm::app::{self, Dispatcher};
use cell_wm::clock::Clock;
use cell_wm::components::text::set_global_log;
use cell_wm::components::{BlockGameWindow, DirectoryWindow, TextLog, TextWindow};
use cell_wm::config::{Cli, Config};
use cell_wm::drivers::OutputDriver;
use cell_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use cell_wm::menu::MenuBar;
use cell_wm::surface::Surface;
use cell_wm::theme;
use cell_wm::tracing_sub;
use cell_wm::window::{Bounds, WindowManager};

const MENU: [&str; 6] = ["=", "File", "Edit", "Search", "Run", "Exit"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::try_from(&cli)?;

    let log = TextLog::default();
    set_global_log(log.clone());
    tracing_sub::init(config.log_level);

    let mut dispatcher = Dispatcher::new(desktop(&config, log));

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let clock = Clock::spawn(config.clock_interval)?;
    let mut surface = Surface::new(0, 0).with_borders(config.borders);

    let result = app::run(
        &mut dispatcher,
        ConsoleInputDriver::new(),
        &mut output,
        Some(&clock),
        &mut surface,
    );

    clock.stop();
    let restored = output.exit();
    result?;
    restored?;
    Ok(())
}

/// Build the initial window stack, bottom to top.
fn desktop(config: &Config, log: TextLog) -> WindowManager {
    let mut wm = WindowManager::new(MenuBar::with_entries(MENU));
    wm.set_background(theme::desktop());

    let typed = TextLog::default();
    let input = TextWindow::new(
        " ls ",
        Bounds::from_origin(31, 12, 20, 10),
        theme::text_window(),
        typed.clone(),
    )
    .tail(true);
    wm.add_window(input);

    let sink = typed.clone();
    wm.set_rune_handler(move |c| sink.push(c));
    wm.set_key_handler(move |key: KeyEvent| match key.code {
        KeyCode::Enter => typed.push('\n'),
        KeyCode::Tab => typed.push('\t'),
        _ => {}
    });

    if config.show_game {
        wm.add_window(BlockGameWindow::new(68, 10));
    }

    for (i, dir) in config.dirs.iter().enumerate() {
        let offset = i as i32 * 4;
        let id = wm.add_window(DirectoryWindow::open(dir, offset, 1 + offset));
        tracing::debug!(window_id = ?id, dir = %dir.display(), "opened listing");
    }

    let logs = TextWindow::new(
        " log ",
        Bounds::from_origin(4, 24, 60, 8),
        theme::text_window(),
        log,
    )
    .tail(true);
    wm.add_window(logs);
    wm
}
