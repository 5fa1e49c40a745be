// SPDX-License-Identifier: GPL-3.0-only

//! Terminal front end
//!
//! Renders depth and video images to the terminal using Unicode half-block
//! characters (two vertical pixels per cell) and runs the single-threaded
//! event loops of the file viewer and the live capture tool.

use crate::app::{CaptureSession, KeyAction, keys};
use crate::constants::terminal::INPUT_POLL_INTERVAL;
use crate::display::{Panels, RgbBuffer};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color,
    style::Style, widgets::Widget,
};
use std::io::{self, stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::info;

type TerminalResult = Result<(), Box<dyn std::error::Error>>;

/// Set up the alternate screen, run `f`, and always restore the terminal
fn with_terminal<F>(f: F) -> TerminalResult
where
    F: FnOnce(&mut Terminal<CrosstermBackend<io::Stdout>>) -> TerminalResult,
{
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = f(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Wait for a key press, returning the mapped action
fn poll_action() -> io::Result<Option<KeyAction>> {
    if event::poll(INPUT_POLL_INTERVAL)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(KeyAction::from_key_event(&key));
    }
    Ok(None)
}

/// Show a single decoded depth image until the user quits
pub fn run_file_viewer(title: &str, image: &RgbBuffer, stop: Arc<AtomicBool>) -> TerminalResult {
    with_terminal(|terminal| {
        let status = format!("File: {}", title);
        while !stop.load(Ordering::SeqCst) {
            terminal.draw(|f| {
                let area = f.area();
                let (view, status_area, _) = split_status(area, 1);
                f.render_widget(
                    FrameWidget {
                        frame: Some(image),
                        placeholder: "",
                    },
                    view,
                );
                f.render_widget(StatusBar { message: &status }, status_area);
            })?;

            if poll_action()? == Some(KeyAction::Quit) {
                break;
            }
        }
        Ok(())
    })
}

/// Run the live view until quit or interrupt
pub fn run_capture(mut session: CaptureSession<Panels>, stop: Arc<AtomicBool>) -> TerminalResult {
    let result = with_terminal(|terminal| {
        loop {
            if stop.load(Ordering::SeqCst) {
                info!("Interrupted");
                break;
            }
            if session.step(Instant::now()).is_break() {
                break;
            }

            let status = format!("{} | {}", session.viewer().status_line(), session.source_name());
            terminal.draw(|f| draw_capture(f, session.surface(), &status))?;

            if let Some(action) = poll_action()?
                && session.key(action, Instant::now()).is_break()
            {
                break;
            }
        }
        Ok(())
    });

    info!(
        frames = session.recorder().frames_written(),
        dir = %session.recorder().directory().display(),
        "Capture session ended"
    );
    result
}

fn draw_capture(f: &mut Frame, panels: &Panels, status: &str) {
    let (view, status_area, help_area) = split_status(f.area(), 2);

    // Depth on the left, color video on the right
    let half = view.width / 2;
    let depth_area = Rect { width: half, ..view };
    let video_area = Rect {
        x: view.x + half,
        width: view.width - half,
        ..view
    };

    f.render_widget(
        FrameWidget {
            frame: panels.depth.as_ref(),
            placeholder: "Waiting for depth...",
        },
        depth_area,
    );
    f.render_widget(
        FrameWidget {
            frame: panels.video.as_ref(),
            placeholder: "No video",
        },
        video_area,
    );
    f.render_widget(StatusBar { message: status }, status_area);
    if let Some(help_area) = help_area {
        f.render_widget(
            StatusBar {
                message: keys::instructions(),
            },
            help_area,
        );
    }
}

/// Reserve `lines` (1 or 2) rows at the bottom for status text
fn split_status(area: Rect, lines: u16) -> (Rect, Rect, Option<Rect>) {
    let lines = lines.min(area.height);
    let view = Rect {
        height: area.height - lines,
        ..area
    };
    let status = Rect {
        y: area.y + view.height,
        height: lines.min(1),
        ..area
    };
    let help = (lines > 1).then(|| Rect {
        y: status.y + 1,
        height: 1,
        ..area
    });
    (view, status, help)
}

/// Largest `(columns, rows)` that fits `area` while keeping the aspect ratio
///
/// Each row holds two image pixels.
fn fit_to_area(width: u32, height: u32, area: Rect) -> (u16, u16) {
    let frame_aspect = width as f64 / height as f64;
    let term_width = area.width as f64;
    let term_height = (area.height * 2) as f64;

    if term_width / term_height > frame_aspect {
        // Terminal is wider - fit to height
        let h = term_height;
        let w = h * frame_aspect;
        (w as u16, (h / 2.0) as u16)
    } else {
        // Terminal is taller - fit to width
        let w = term_width;
        let h = w / frame_aspect;
        (w as u16, (h / 2.0) as u16)
    }
}

/// Renders an image using half-block characters
struct FrameWidget<'a> {
    frame: Option<&'a RgbBuffer>,
    placeholder: &'a str,
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let Some(frame) = self.frame else {
            let x = area.x + (area.width.saturating_sub(self.placeholder.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            buf.set_stringn(x, y, self.placeholder, area.width as usize, Style::default());
            return;
        };

        let (display_width, display_height) = fit_to_area(frame.width, frame.height, area);
        if display_width == 0 || display_height == 0 {
            return;
        }

        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = frame.width as f64 / display_width as f64;
        let y_scale = frame.height as f64 / (display_height * 2) as f64;

        // Upper half (▀) takes the foreground color, lower half the background
        for ty in 0..display_height {
            for tx in 0..display_width {
                let src_x = (tx as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let (r, g, b) = frame.sample(src_x, src_y_top);
                let top = Color::Rgb(r, g, b);
                let (r, g, b) = frame.sample(src_x, src_y_bottom);
                let bottom = Color::Rgb(r, g, b);

                if let Some(cell) = buf.cell_mut((x_offset + tx, y_offset + ty)) {
                    cell.set_char('▀');
                    cell.set_fg(top);
                    cell.set_bg(bottom);
                }
            }
        }
    }
}

/// Single line of text on a gray bar
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        buf.set_stringn(
            area.x,
            area.y,
            self.message,
            area.width as usize,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}
