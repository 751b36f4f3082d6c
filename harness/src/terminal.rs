//! Terminal output for frames, styled with `crossterm`.
//!
//! Plain cells are steel blue, the probed midpoint yellow, the found element
//! sea green, all with white text. Older steps are drawn dim. With colour
//! off, highlights fall back to brackets: `[4]` for the midpoint, `<9>` for
//! the found element.

use std::io::{self, Write};

use bisect_kernel::sequence::number::format_number;
use bisect_kernel::SortedSequence;
use bisect_search::ProbeV1;
use crossterm::cursor::MoveToPreviousLine;
use crossterm::queue;
use crossterm::style::{style, Attribute, Color, Stylize};
use crossterm::terminal::{Clear, ClearType};

use crate::config::PlaybackSettings;
use crate::render::{CellV1, FrameV1, HighlightV1};

const STEEL_BLUE: Color = Color::Rgb {
    r: 0x46,
    g: 0x82,
    b: 0xB4,
};
const YELLOW: Color = Color::Rgb {
    r: 0xEA,
    g: 0xB3,
    b: 0x08,
};
const SEA_GREEN: Color = Color::Rgb {
    r: 0x3C,
    g: 0xB3,
    b: 0x71,
};
const FOUND_TEXT: Color = Color::Rgb {
    r: 0x2E,
    g: 0x8B,
    b: 0x57,
};
const NOT_FOUND_TEXT: Color = Color::Rgb {
    r: 0x80,
    g: 0x00,
    b: 0x00,
};

/// Writes sequences, frames, and the outcome banner to any `Write`.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    color: bool,
    cell_width: usize,
    columns: Option<usize>,
}

impl TerminalRenderer {
    /// Cells are at least `settings.cell_width` wide and always wide enough
    /// for the longest value in `sequence` plus bracket padding.
    #[must_use]
    pub fn new(settings: &PlaybackSettings, sequence: &SortedSequence) -> Self {
        let widest = sequence
            .to_text_values()
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(1);
        Self {
            color: settings.color,
            cell_width: settings.cell_width.max(widest + 2),
            columns: None,
        }
    }

    /// Terminal width in columns. In-place redraws need a known width.
    #[must_use]
    pub fn with_columns(mut self, columns: Option<u16>) -> Self {
        self.columns = columns.map(usize::from);
        self
    }

    #[must_use]
    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// The "Current Sorted Array" row.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_sequence<W: Write>(&self, out: &mut W, sequence: &SortedSequence) -> io::Result<()> {
        writeln!(out, "Current Sorted Array")?;
        let cells: Vec<String> = sequence
            .as_slice()
            .iter()
            .map(|&value| self.cell(value, HighlightV1::Plain, false, false))
            .collect();
        writeln!(out, "{}", cells.join(" "))
    }

    /// One frame as a single line, with a decision note.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_frame<W: Write>(&self, out: &mut W, frame: &FrameV1, target: f64) -> io::Result<()> {
        writeln!(out, "{}", self.frame_line(frame, target))
    }

    /// Redraw the previous line (now dimmed) and append the latest frame.
    ///
    /// Used during live playback: the line printed for the previous step is
    /// replaced in place, so the terminal always shows older steps dimmed.
    /// The redraw needs colour and a known terminal width the previous line
    /// fits in; a wrapped line spans more than the one row moved over.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_frame_update<W: Write>(
        &self,
        out: &mut W,
        previous: Option<&FrameV1>,
        latest: &FrameV1,
        target: f64,
    ) -> io::Result<()> {
        if let Some(previous) = previous.filter(|p| self.fits_one_row(p, target)) {
            queue!(out, MoveToPreviousLine(1), Clear(ClearType::CurrentLine))?;
            self.write_frame(out, previous, target)?;
        }
        self.write_frame(out, latest, target)?;
        out.flush()
    }

    /// The outcome banner line.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_banner<W: Write>(&self, out: &mut W, message: &str, found: bool) -> io::Result<()> {
        if self.color {
            let color = if found { FOUND_TEXT } else { NOT_FOUND_TEXT };
            writeln!(out, "{}", style(message).with(color).bold())
        } else {
            writeln!(out, "{message}")
        }
    }

    fn fits_one_row(&self, frame: &FrameV1, target: f64) -> bool {
        let Some(columns) = self.columns.filter(|_| self.color) else {
            return false;
        };
        let plain = Self {
            color: false,
            ..*self
        };
        plain.frame_line(frame, target).chars().count() <= columns
    }

    /// Plain-text frame line (styling included when colour is on).
    #[must_use]
    pub fn frame_line(&self, frame: &FrameV1, target: f64) -> String {
        let cells: Vec<String> = frame
            .cells
            .iter()
            .map(|cell| match *cell {
                CellV1::Hidden => " ".repeat(self.cell_width),
                CellV1::Visible {
                    value,
                    highlight,
                    dimmed,
                    emphasized,
                    ..
                } => self.cell(value, highlight, dimmed, emphasized),
            })
            .collect();
        format!(
            "step {:>2}  {}  {}",
            frame.step_index + 1,
            cells.join(" "),
            decision_note(frame, target)
        )
    }

    fn cell(&self, value: f64, highlight: HighlightV1, dimmed: bool, emphasized: bool) -> String {
        let text = format_number(value);
        if !self.color {
            let marked = match highlight {
                HighlightV1::Plain => text,
                HighlightV1::Midpoint => format!("[{text}]"),
                HighlightV1::Found => format!("<{text}>"),
            };
            return format!("{marked:^width$}", width = self.cell_width);
        }
        let padded = format!("{text:^width$}", width = self.cell_width);
        let background = match highlight {
            HighlightV1::Plain => STEEL_BLUE,
            HighlightV1::Midpoint => YELLOW,
            HighlightV1::Found => SEA_GREEN,
        };
        let mut styled = style(padded).with(Color::White).on(background);
        if dimmed {
            styled = styled.attribute(Attribute::Dim);
        }
        if emphasized {
            styled = styled.attribute(Attribute::Bold);
        }
        styled.to_string()
    }
}

fn decision_note(frame: &FrameV1, target: f64) -> String {
    let probed = format_number(frame.probed_value);
    let target = format_number(target);
    match frame.step.probe {
        ProbeV1::Match => format!("{probed} = {target}, match"),
        ProbeV1::GoRight => format!("{probed} < {target}, go right"),
        ProbeV1::GoLeft => format!("{probed} > {target}, go left"),
    }
}
