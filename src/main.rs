use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_rehab::build_info;
use flappy_rehab::config::persistence::{load_settings_or_default, save_settings_to, settings_path};
use flappy_rehab::config::{InputMode, Settings};
use flappy_rehab::core::constants::{
    FRAME_MS, KEY_HOLD_TIMEOUT_MS, MAX_FRAME_DT, SLIDER_DEFAULT_VALUE,
};
use flappy_rehab::game::{Scene, Session, TickEvent};
use flappy_rehab::input::{InputDevices, KeyHandle, SliderHandle};
use flappy_rehab::logging;
use flappy_rehab::ui::menu_scene::{MenuAction, MenuScreen};
use flappy_rehab::ui::settings_scene::{SettingsAction, SettingsScreen};
use flappy_rehab::ui::slider_widget::VerticalSlider;
use flappy_rehab::ui::{self, Screens};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

struct App {
    session: Session,
    screens: Screens,
    key: KeyHandle,
    settings_path: PathBuf,
    running: bool,
}

impl App {
    fn new(settings: Settings, settings_path: PathBuf) -> Self {
        let key = KeyHandle::new();
        let slider = SliderHandle::new(SLIDER_DEFAULT_VALUE);
        let devices = InputDevices {
            key: key.clone(),
            slider: Some(slider.clone()),
        };
        let screens = Screens {
            menu: MenuScreen::new(),
            settings: SettingsScreen::new(&settings),
            slider: VerticalSlider::new(slider),
        };
        Self {
            session: Session::new(settings, devices),
            screens,
            key,
            settings_path,
            running: true,
        }
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => {
                if self.session.scene() == Scene::Playing {
                    self.screens.slider.handle_mouse(&mouse);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let is_flap_key = matches!(key.code, KeyCode::Char(' ') | KeyCode::Up);
        if key.kind == KeyEventKind::Release {
            if is_flap_key {
                self.key.release();
            }
            return;
        }

        // Shift+S reloads settings from disk in any scene.
        if key.code == KeyCode::Char('S')
            || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::SHIFT))
        {
            self.hot_reload();
            return;
        }

        match self.session.scene() {
            Scene::Menu => {
                if key.kind != KeyEventKind::Press {
                    return;
                }
                match self.screens.menu.handle_key(key) {
                    MenuAction::Start => self.session.start(),
                    MenuAction::OpenSettings => self.open_settings(),
                    MenuAction::Quit => self.running = false,
                    MenuAction::None => {}
                }
            }
            Scene::Settings => {
                let action = self.screens.settings.handle_key(key);
                self.handle_settings_action(action);
            }
            Scene::AdvancedSettings => {
                let action = self.screens.settings.handle_advanced_key(key);
                self.handle_settings_action(action);
            }
            Scene::Playing | Scene::Dead => self.handle_play_key(key, is_flap_key, now),
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent, is_flap_key: bool, now: Instant) {
        let slider_mode = self.session.settings().input_mode == InputMode::Slider;
        match key.code {
            KeyCode::Esc => self.session.return_to_menu(),
            KeyCode::Char('s') => self.open_settings(),
            KeyCode::Char('r') | KeyCode::Char('R') if self.session.scene() == Scene::Dead => {
                self.session.restart()
            }
            KeyCode::Up if slider_mode => self.screens.slider.nudge(1),
            KeyCode::Down if slider_mode => self.screens.slider.nudge(-1),
            _ if is_flap_key => self.key.press(now),
            _ => {}
        }
    }

    fn open_settings(&mut self) {
        self.screens.settings.open(self.session.settings());
        self.session.open_settings();
    }

    fn handle_settings_action(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::None => {}
            SettingsAction::OpenAdvanced => self.session.open_advanced(),
            SettingsAction::CloseAdvanced => self.session.close_advanced(),
            SettingsAction::Back => self.session.return_to_menu(),
            SettingsAction::Apply(settings) => {
                self.session.apply_config(settings);
                match save_settings_to(&self.settings_path, self.session.settings()) {
                    Ok(()) => {
                        log::info!("settings saved to {}", self.settings_path.display());
                        self.session.return_to_menu();
                    }
                    Err(e) => {
                        log::error!("{e}");
                        self.screens.settings.status =
                            Some("Save failed; applied for this session only".to_string());
                    }
                }
            }
        }
    }

    fn hot_reload(&mut self) {
        let settings = load_settings_or_default(&self.settings_path);
        self.session.apply_config(settings);
        log::info!("settings reloaded from {}", self.settings_path.display());
    }
}

fn print_help() {
    println!("Flappy Rehab - rehabilitation flappy game for the terminal\n");
    println!("Usage: flappy-rehab [options]\n");
    println!("Options:");
    println!("  --config PATH  Use PATH as the settings file");
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
    println!("\nSet RUST_LOG=debug for verbose logs (written next to the settings file).");
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: Settings,
    settings_path: &Path,
    enhanced_keys: bool,
) -> io::Result<()> {
    let mut app = App::new(settings, settings_path.to_path_buf());
    let mut rng = rand::thread_rng();
    let frame = Duration::from_millis(FRAME_MS);
    let hold_timeout = Duration::from_millis(KEY_HOLD_TIMEOUT_MS);
    let mut last_tick = Instant::now();

    while app.running {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            app.handle_event(event, Instant::now());
        }
        if !enhanced_keys {
            app.key.expire(Instant::now(), hold_timeout);
        }

        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64().min(MAX_FRAME_DT);
        last_tick = now;

        let result = app.session.tick(dt, &mut rng);
        for event in &result.events {
            match event {
                TickEvent::Scored { total, .. } => log::debug!("score {total}"),
                TickEvent::Crashed { score } => log::info!("run over, {score} pipes"),
            }
        }

        terminal.draw(|f| ui::draw(f, &app.session, &mut app.screens))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_override: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_override = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("--config requires a path");
                        std::process::exit(1);
                    }
                }
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'flappy-rehab --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let settings_path = match config_override {
        Some(path) => path,
        None => settings_path().map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?,
    };
    let settings = load_settings_or_default(&settings_path);
    log::info!(
        "starting with settings from {} (control={}, input={})",
        settings_path.display(),
        settings.control_mode.name(),
        settings.input_mode.name()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let enhanced_keys = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced_keys {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, settings, &settings_path, enhanced_keys);

    // Restore terminal even if the loop failed
    if enhanced_keys {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    terminal.backend_mut().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("game loop failed: {e}");
    }
    result
}
