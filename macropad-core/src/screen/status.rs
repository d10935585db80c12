//! Key and encoder status page

use crate::console::Output;
use crate::input::InputSnapshot;

use super::Screen;

const TITLE_ROW: u16 = 1;
const FIRST_ROW: u16 = 3;
const LABEL_COL: u16 = 3;
const VALUE_COL: u16 = 16;

/// Shows every key line and the encoder
#[derive(Debug, Default)]
pub struct StatusScreen {
    snapshot: InputSnapshot,
    drawn: Option<InputSnapshot>,
}

impl StatusScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the state to show on the next draw
    pub fn set_snapshot(&mut self, snapshot: InputSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    fn encoder_row(&self) -> u16 {
        FIRST_ROW + self.snapshot.keys.len() as u16 + 1
    }

    fn draw_labels(&self, out: &mut dyn Output) {
        out.emit_at(TITLE_ROW, LABEL_COL, format_args!("Macropad status"));
        for (i, key) in self.snapshot.keys.iter().enumerate() {
            out.emit_at(
                FIRST_ROW + i as u16,
                LABEL_COL,
                format_args!("Key {} ({})", i, key.id()),
            );
        }
        let row = self.encoder_row();
        out.emit_at(row, LABEL_COL, format_args!("Encoder"));
        out.emit_at(row + 1, LABEL_COL, format_args!("Direction"));
    }

    fn draw_values(&mut self, out: &mut dyn Output) {
        for (i, key) in self.snapshot.keys.iter().enumerate() {
            out.emit_at(
                FIRST_ROW + i as u16,
                VALUE_COL,
                format_args!("{:<8} {:>10}", key.state().as_str(), key.count()),
            );
        }
        let row = self.encoder_row();
        out.emit_at(
            row,
            VALUE_COL,
            format_args!("{:<5}", self.snapshot.toggle_count),
        );
        out.emit_at(
            row + 1,
            VALUE_COL,
            format_args!("{:<13}", self.snapshot.toggle_direction.as_str()),
        );
        self.drawn = Some(self.snapshot.clone());
    }
}

impl Screen for StatusScreen {
    fn refresh(&mut self, out: &mut dyn Output) {
        out.print("\x1b[2J");
        self.draw_labels(out);
        self.draw_values(out);
        out.prompt();
    }

    fn update(&mut self, out: &mut dyn Output) {
        if self.drawn.as_ref() != Some(&self.snapshot) {
            self.draw_values(out);
        }
    }
}
