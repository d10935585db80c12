//! Board-specific console commands

use heapless::String;
use macropad_core::console::{write_to_string, Action, Output, EMIT_CAPACITY};
use macropad_core::transport::SerialTransport;

/// `stats` - transport drop counters
pub struct StatsCommand {
    transport: &'static SerialTransport<'static>,
}

impl StatsCommand {
    pub fn new(transport: &'static SerialTransport<'static>) -> Self {
        Self { transport }
    }
}

impl Action for StatsCommand {
    fn run(&self, out: &mut dyn Output) {
        let mut msg: String<EMIT_CAPACITY> = String::new();
        write_to_string(
            &mut msg,
            format_args!(
                "rx dropped {} tx dropped {}",
                self.transport.dropped_rx(),
                self.transport.dropped_tx()
            ),
        );
        out.message(&msg);
    }
}
