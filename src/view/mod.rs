//! Terminal host for the window controller (impure shell).
//!
//! The host renders a [`StackSurface`] of [`TerminalNode`]s with ratatui and
//! forwards every scroll-offset change to the controller.

mod demo;
mod list_view;

pub use demo::{DemoItem, demo_items, render_demo_item};
pub use list_view::ListView;

use crate::config::ResolvedConfig;
use crate::state::WindowController;
use crate::surface::{Measure, StackSurface, Viewport};
use crossterm::{
    ExecutableCommand,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: f64 = 3.0;

/// Items added per append/prepend key press.
const BATCH_SIZE: i64 = 100;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// A rendered item: its terminal rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminalNode {
    lines: Vec<String>,
}

impl TerminalNode {
    /// Node showing `lines`, one per row.
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// The rows of this node.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Measure for TerminalNode {
    fn measure(&self) -> f64 {
        self.lines.len() as f64
    }
}

/// Controller type driven by the demo host.
pub type DemoController = WindowController<DemoItem, StackSurface<TerminalNode>>;

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    list: DemoController,
    /// Id given to the next appended item
    next_append_id: i64,
    /// Id given to the next prepended item (counts down)
    next_prepend_id: i64,
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Creates the app with `item_count` demo items sized to the terminal.
    pub fn new(
        terminal: Terminal<B>,
        item_count: usize,
        config: &ResolvedConfig,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let (list_area, _) = split_area(Rect::new(0, 0, size.width, size.height));

        let surface = StackSurface::new(f64::from(list_area.height))
            .with_item_margin(f64::from(config.item_margin));
        let mut list = WindowController::new(surface, render_demo_item, config.window);

        let count = i64::try_from(item_count).unwrap_or(i64::MAX);
        list.set_items(demo_items(0..count));
        info!(items = count, viewport = list_area.height, "Demo list ready");

        Ok(Self {
            terminal,
            list,
            next_append_id: count,
            next_prepend_id: -1,
        })
    }

    /// The window controller.
    pub fn controller(&self) -> &DemoController {
        &self.list
    }

    /// The terminal, e.g. to inspect a test backend's buffer.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run the event loop until the user quits (q or Ctrl+C).
    pub fn run(&mut self) -> Result<(), TuiError> {
        const TICK: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => continue,
            }
            self.draw()?;
        }
    }

    /// Apply a key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let page = self.list.surface().viewport_extent();
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1.0),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1.0),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to(0.0),
            KeyCode::Char('G') | KeyCode::End => {
                let end = self.list.surface().scroll_extent();
                self.scroll_to(end);
            }
            KeyCode::Char('a') => self.append_batch(),
            KeyCode::Char('p') => self.prepend_batch(),
            _ => {}
        }
        false
    }

    /// Apply a mouse event; only the wheel is used.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS),
            _ => {}
        }
    }

    /// Resize the viewport to the new terminal height.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        let (list_area, _) = split_area(Rect::new(0, 0, width, height));
        self.sync_viewport(list_area.height);
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let (list_area, _) = split_area(Rect::new(0, 0, size.width, size.height));
        self.sync_viewport(list_area.height);

        let status = self.status_line();
        let list = &self.list;
        self.terminal.draw(|frame| {
            let (list_area, status_area) = split_area(frame.area());
            frame.render_widget(ListView::new(list.surface()), list_area);
            frame.render_widget(
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::REVERSED)),
                status_area,
            );
        })?;
        Ok(())
    }

    fn status_line(&mut self) -> String {
        let estimate = self.list.estimated_extent();
        let range = self.list.window_range();
        let spacers = self.list.spacer_sizes();
        format!(
            " {} items | window {}..{} | spacers {:.0}/{:.0} | est {:.2} | offset {:.0}",
            self.list.len(),
            range.start,
            range.end,
            spacers.top,
            spacers.bottom,
            estimate,
            self.list.surface().scroll_offset(),
        )
    }

    fn scroll_by(&mut self, delta: f64) {
        let offset = self.list.surface().scroll_offset();
        self.scroll_to(offset + delta);
    }

    fn scroll_to(&mut self, offset: f64) {
        self.list.surface_mut().set_scroll_offset(offset);
        self.deliver_scroll_notifications();
    }

    /// Forward queued surface notifications, including echoes of
    /// controller-issued offset corrections.
    fn deliver_scroll_notifications(&mut self) {
        while self.list.surface_mut().take_scroll_notification() {
            self.list.on_scroll();
        }
    }

    fn sync_viewport(&mut self, height: u16) {
        let extent = f64::from(height);
        if self.list.surface().viewport_extent() == extent {
            return;
        }
        self.list.surface_mut().set_viewport_extent(extent);
        self.deliver_scroll_notifications();
        self.list.relayout();
    }

    fn append_batch(&mut self) {
        let start = self.next_append_id;
        self.next_append_id += BATCH_SIZE;
        self.list.append_items(demo_items(start..self.next_append_id));
        self.deliver_scroll_notifications();
    }

    fn prepend_batch(&mut self) {
        let end = self.next_prepend_id + 1;
        self.next_prepend_id -= BATCH_SIZE;
        self.list.prepend_items(demo_items(end - BATCH_SIZE..end));
        self.deliver_scroll_notifications();
    }
}

/// Split a frame into the list area and a one-row status line.
fn split_area(area: Rect) -> (Rect, Rect) {
    let [list, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    (list, status)
}

/// Set up the terminal, run the demo and restore the terminal.
///
/// Logging must be initialized by the caller.
pub fn run(item_count: usize, config: &ResolvedConfig) -> Result<(), TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = TuiApp::new(terminal, item_count, config).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
