//! Foreground loop
//!
//! One task owns the console, the input engine and the keymap. Each tick it
//! drains the received bytes, scans the keys and encoder, queues the text
//! for any events, then refreshes the status screen.
//!
//! Text for events that arrive while the type queue is full is merged into
//! one pending string and queued as soon as there is room. Only text beyond
//! `PENDING_TEXT_LEN` bytes of backlog is dropped.

use defmt::*;
use embassy_stm32::peripherals::TIM3;
use embassy_sync::channel::TrySendError;
use embassy_time::{Duration, Ticker};
use heapless::Vec;

use macropad_core::console::{Console, Output};
use macropad_core::hid::PendingText;
use macropad_core::input::{InputEngine, InputEvent};
use macropad_core::keymap::Keymap;
use macropad_core::screen::StatusScreen;
use macropad_hal_stm32::{EncoderCounter, KeyPin};

use crate::channels::TYPE_CHANNEL;
use crate::serial::ChannelTx;

/// Keys wired on this board
pub const NUM_KEYS: usize = 5;

/// At most one event per key plus one rotation per tick
const MAX_EVENTS: usize = NUM_KEYS + 1;

pub type KeypadConsole = Console<'static, ChannelTx, StatusScreen>;
pub type KeypadInput = InputEngine<KeyPin<'static>, EncoderCounter<'static, TIM3>, NUM_KEYS>;

#[embassy_executor::task]
pub async fn foreground_task(
    mut console: KeypadConsole,
    mut input: KeypadInput,
    keymap: Keymap,
    scan_interval_ms: u32,
) {
    info!("Foreground task started");

    console.screen_mut().set_snapshot(input.snapshot());
    console.refresh_screen();

    let mut ticker = Ticker::every(Duration::from_millis(scan_interval_ms as u64));
    let mut pending = PendingText::new();

    loop {
        console.poll();

        let mut events: Vec<InputEvent, MAX_EVENTS> = Vec::new();
        input.scan_tick(&mut |event: InputEvent| {
            if events.push(event).is_err() {
                warn!("Event buffer full, dropped {:?}", event);
            }
        });

        for event in &events {
            handle_event(&mut console, &keymap, &mut pending, event);
        }
        pending.flush(|text| {
            TYPE_CHANNEL.try_send(text).map_err(|e| match e {
                TrySendError::Full(text) => text,
            })
        });

        console.screen_mut().set_snapshot(input.snapshot());
        console.update_screen();

        ticker.next().await;
    }
}

fn handle_event(
    console: &mut KeypadConsole,
    keymap: &Keymap,
    pending: &mut PendingText,
    event: &InputEvent,
) {
    debug!("Input event: {:?}", event);

    let Some(text) = keymap.text_for(event) else {
        console.writer().message("Unknown key");
        return;
    };

    if !pending.push(text) {
        warn!("Typing backlog full, dropped {:?}", event);
    }
}
