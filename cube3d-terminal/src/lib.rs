/// Terminal host for the cube engine
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use cube3d_core::Engine;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;
pub mod settings;

pub use renderer::{Cell, CellSurface};
pub use settings::{ScreenSettings, Settings};

pub const APP_NAME: &str = "3D Engine";

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleMode,
    TogglePause,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('m') => Some(Command::ToggleMode),
            KeyCode::Char(' ') => Some(Command::TogglePause),
            _ => None,
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    engine: Engine,
    surface: CellSurface,
    screen: ScreenSettings,
    running: bool,
    paused: bool,
    last_frame: Instant,
    fps_window_start: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(settings: Settings) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let (width, height) = settings.screen.resolve(columns, rows);
        log::info!(
            "terminal is {}x{}, rendering {}x{}",
            columns,
            rows,
            width,
            height
        );

        let now = Instant::now();
        Ok(Self {
            engine: Engine::new(settings.engine),
            surface: CellSurface::new(width as usize, height as usize),
            screen: settings.screen,
            running: true,
            paused: false,
            last_frame: now,
            fps_window_start: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Set up the engine. Fails if the render area is empty.
    pub fn create(&mut self) -> io::Result<()> {
        if self.engine.on_create(&self.surface) {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "cannot render to a {}x{} area",
                self.surface.width(),
                self.surface.height()
            )))
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.create()?;

        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide) {
            terminal::disable_raw_mode()?;
            return Err(e);
        }
        log::info!("render loop started");

        let result = self.main_loop();

        // Cleanup
        let restored = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        terminal::disable_raw_mode()?;
        log::info!("render loop stopped");

        result.and(restored)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs_f64(1.0 / self.screen.target_fps as f64);
        self.last_frame = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            let elapsed = (frame_start - self.last_frame).as_secs_f32();
            self.last_frame = frame_start;
            self.tick(elapsed);

            self.render()?;

            // Frame timing
            let spent = frame_start.elapsed();
            if spent < target_frame_time {
                std::thread::sleep(target_frame_time - spent);
            }
            self.update_fps();
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if let Some(command) = Command::from_key(code) {
                    log::debug!("key {:?} -> {:?}", code, command);
                    self.apply(command);
                }
            }
            Event::Resize(columns, rows) => self.resize(columns, rows),
            _ => {}
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::ToggleMode => {
                let mode = self.engine.render_mode().toggled();
                self.engine.set_render_mode(mode);
            }
            Command::TogglePause => self.paused = !self.paused,
        }
    }

    /// Advance and draw one frame into the cell buffer.
    pub fn tick(&mut self, elapsed: f32) {
        let elapsed = if self.paused { 0.0 } else { elapsed };
        if !self.engine.on_update(&mut self.surface, elapsed) {
            self.running = false;
        }
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        let (width, height) = self.screen.resolve(columns, rows);
        log::debug!("resized to {}x{}, rendering {}x{}", columns, rows, width, height);
        self.surface.resize(width as usize, height as usize);
        // The projection depends on the aspect ratio, so rebuild it
        if !self.engine.on_create(&self.surface) {
            log::warn!("render area collapsed to {}x{}", width, height);
        }
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        let window = now - self.fps_window_start;
        if window.as_secs() >= 1 {
            self.fps = self.frame_count as f32 / window.as_secs_f32();
            self.frame_count = 0;
            self.fps_window_start = now;
        }
    }

    pub fn title(&self) -> String {
        format!(
            "{} | FPS: {:.1} | mode: {:?}{} | M=Mode Space=Pause Q=Quit",
            APP_NAME,
            self.fps,
            self.engine.render_mode(),
            if self.paused { " (paused)" } else { "" }
        )
    }

    pub fn surface(&self) -> &CellSurface {
        &self.surface
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();

        // Title line, then the frame beneath it
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(self.title()),
            ResetColor,
            cursor::MoveTo(0, 1)
        )?;

        self.surface.present(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}
