// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::trace;

use crate::geometry::Point;
use crate::input::events::{
    KeyEvent, Modifiers, PointerDevice, PointerEvent, PointerEventKind, TextEvent,
};
use crate::input::queue::EventQueue;
use crate::input::touch::{TouchKeyboardHost, TouchKeyboardSettings};
use crate::store::ControlId;

/// Capacity of the pointer event queue.
pub const POINTER_QUEUE_SIZE: usize = 4;

/// Capacity of the keyboard event queues.
pub const KEYBOARD_QUEUE_SIZE: usize = 16;

const MAX_POINTER_BUTTONS: usize = 3;

const MULTI_CLICK_TIME: f64 = 0.2;
const MULTI_CLICK_DISTANCE: f32 = 20.0;
const CLICK_DISTANCE: f32 = 8.0;

/// The per-frame input boundary the dispatcher reads from.
///
/// Exposes a consumable current pointer event, an indexed keyboard queue
/// whose events are markable as consumed, a consumable platform text-input
/// event, and the system clipboard.
pub trait InputSource {
    /// Monotonic time, in seconds.
    fn time(&self) -> f64;

    /// Current pointer position, in view space.
    fn pointer_position(&self) -> Point;

    /// The frame's pointer event, unless consumed.
    fn pointer_event(&self) -> Option<&PointerEvent>;

    /// Consumes the frame's pointer event.
    fn consume_pointer_event(&mut self);

    /// Number of keyboard events this frame, consumed slots included.
    fn keyboard_event_count(&self) -> usize;

    /// The keyboard event at `index`, unless consumed.
    fn keyboard_event(&self, index: usize) -> Option<&KeyEvent>;

    /// Consumes the keyboard event at `index`.
    fn consume_keyboard_event(&mut self, index: usize);

    /// The frame's platform text-input event, unless consumed.
    fn text_event(&self) -> Option<&TextEvent>;

    /// Consumes the frame's text-input event.
    fn consume_text_event(&mut self);

    /// Current clipboard content.
    fn clipboard(&self) -> &str;

    /// Replaces the clipboard content.
    fn set_clipboard(&mut self, text: &str);

    /// Forwards a touch-keyboard request to the platform, if it has one.
    fn request_touch_keyboard(
        &mut self,
        owner: ControlId,
        text: &[char],
        settings: &TouchKeyboardSettings,
    );
}

/// A frame-collected [`InputSource`].
///
/// The host feeds OS events in as they arrive; [`begin_frame`] then fixes
/// the frame's view of them — one pointer event drained from its queue, the
/// keyboard queues swapped so events pushed mid-frame wait for the next one,
/// and the touch keyboard polled for a pending text event. Multi-click
/// counting and click-versus-drag discrimination happen at feed time.
///
/// [`begin_frame`]: QueuedInput::begin_frame
pub struct QueuedInput {
    time: f64,
    pointer_position: Point,
    pointer_queue: EventQueue<PointerEvent>,
    pointer_event: Option<PointerEvent>,
    keyboard: EventQueue<KeyEvent>,
    next_keyboard: EventQueue<KeyEvent>,
    text_event: Option<TextEvent>,
    clipboard: String,
    touch_keyboard: Option<Box<dyn TouchKeyboardHost>>,

    down_time: [f64; MAX_POINTER_BUTTONS],
    down_count: [u32; MAX_POINTER_BUTTONS],
    down_position: [Point; MAX_POINTER_BUTTONS],
    possible_click: [bool; MAX_POINTER_BUTTONS],
    down_device: PointerDevice,
}

impl Default for QueuedInput {
    fn default() -> Self {
        Self::new()
    }
}

impl QueuedInput {
    /// Creates an input source with empty queues and no touch keyboard.
    pub fn new() -> Self {
        Self {
            time: 0.0,
            pointer_position: Point::ZERO,
            pointer_queue: EventQueue::new(POINTER_QUEUE_SIZE),
            pointer_event: None,
            keyboard: EventQueue::new(KEYBOARD_QUEUE_SIZE),
            next_keyboard: EventQueue::new(KEYBOARD_QUEUE_SIZE),
            text_event: None,
            clipboard: String::new(),
            touch_keyboard: None,
            down_time: [f64::MIN; MAX_POINTER_BUTTONS],
            down_count: [0; MAX_POINTER_BUTTONS],
            down_position: [Point::ZERO; MAX_POINTER_BUTTONS],
            possible_click: [false; MAX_POINTER_BUTTONS],
            down_device: PointerDevice::Mouse,
        }
    }

    /// Attaches a platform touch-keyboard bridge.
    pub fn set_touch_keyboard(&mut self, host: Box<dyn TouchKeyboardHost>) {
        self.touch_keyboard = Some(host);
    }

    /// Updates the pointer position, in view space.
    pub fn set_pointer_position(&mut self, position: Point) {
        self.pointer_position = position;
    }

    /// Feeds a button press. Tracks consecutive clicks within the usual
    /// time and distance thresholds.
    pub fn push_pointer_down(&mut self, button: u8, device: PointerDevice, modifiers: Modifiers) {
        let slot = button as usize;
        if slot >= MAX_POINTER_BUTTONS {
            return;
        }

        let position = self.pointer_position;
        if self.time - self.down_time[slot] >= MULTI_CLICK_TIME
            || distance(position, self.down_position[slot]) >= MULTI_CLICK_DISTANCE
        {
            self.down_count[slot] = 0;
        }

        self.down_position[slot] = position;
        self.down_count[slot] += 1;
        self.down_time[slot] = self.time;
        self.possible_click[slot] = true;
        self.down_device = device;

        self.pointer_queue.push(PointerEvent {
            kind: PointerEventKind::Down,
            button,
            modifiers,
            delta: Point::ZERO,
            device,
            count: self.down_count[slot],
        });
    }

    /// Feeds a button release; emits a click event when the pointer stayed
    /// within the click threshold since the press.
    pub fn push_pointer_up(&mut self, button: u8, device: PointerDevice, modifiers: Modifiers) {
        let slot = button as usize;
        if slot >= MAX_POINTER_BUTTONS {
            return;
        }

        self.pointer_queue.push(PointerEvent {
            kind: PointerEventKind::Up,
            button,
            modifiers,
            delta: Point::ZERO,
            device,
            count: 0,
        });

        if !self.possible_click[slot] {
            return;
        }

        if distance(self.down_position[slot], self.pointer_position) < CLICK_DISTANCE {
            self.pointer_queue.push(PointerEvent {
                kind: PointerEventKind::Click,
                button,
                modifiers,
                delta: Point::ZERO,
                device,
                count: self.down_count[slot],
            });
            self.possible_click[slot] = false;
        }
    }

    /// Feeds the start of a drag.
    pub fn push_begin_drag(
        &mut self,
        button: u8,
        delta: Point,
        device: PointerDevice,
        modifiers: Modifiers,
    ) {
        self.pointer_queue.push(PointerEvent {
            kind: PointerEventKind::BeginDrag,
            button,
            modifiers,
            delta,
            device,
            count: 0,
        });
    }

    /// Feeds drag motion.
    pub fn push_drag(
        &mut self,
        button: u8,
        delta: Point,
        device: PointerDevice,
        modifiers: Modifiers,
    ) {
        self.pointer_queue.push(PointerEvent {
            kind: PointerEventKind::Drag,
            button,
            modifiers,
            delta,
            device,
            count: 0,
        });
    }

    /// Feeds scroll-wheel motion.
    pub fn push_scroll(&mut self, delta: Point, device: PointerDevice) {
        self.pointer_queue.push(PointerEvent {
            kind: PointerEventKind::Scroll,
            button: 0,
            modifiers: Modifiers::NONE,
            delta,
            device,
            count: 0,
        });
    }

    /// Feeds a keyboard event; it becomes visible on the next frame.
    pub fn push_key(&mut self, event: KeyEvent) {
        self.next_keyboard.push(event);
    }

    /// Installs a platform text event directly. Touch-keyboard hosts surface
    /// theirs through [`TouchKeyboardHost::poll`] instead.
    pub fn push_text_event(&mut self, event: TextEvent) {
        self.text_event = Some(event);
    }

    /// Fixes this frame's view of the input: drains one pointer event, swaps
    /// in the keyboard events collected since the last frame, and polls the
    /// touch keyboard.
    pub fn begin_frame(&mut self, time: f64) {
        self.time = time;

        self.pointer_event = self.pointer_queue.pop();

        for slot in 0..MAX_POINTER_BUTTONS {
            if self.possible_click[slot]
                && distance(self.pointer_position, self.down_position[slot]) > CLICK_DISTANCE
            {
                self.possible_click[slot] = false;
            }
        }

        core::mem::swap(&mut self.keyboard, &mut self.next_keyboard);
        self.next_keyboard.clear();

        self.text_event = None;
        if let Some(touch) = self.touch_keyboard.as_mut() {
            self.text_event = touch.poll();
            if self.text_event.is_some() {
                trace!("touch keyboard surfaced a text event");
            }
        }
    }

    /// Device of the most recent press.
    pub fn down_device(&self) -> PointerDevice {
        self.down_device
    }
}

impl InputSource for QueuedInput {
    fn time(&self) -> f64 {
        self.time
    }

    fn pointer_position(&self) -> Point {
        self.pointer_position
    }

    fn pointer_event(&self) -> Option<&PointerEvent> {
        self.pointer_event.as_ref()
    }

    fn consume_pointer_event(&mut self) {
        self.pointer_event = None;
    }

    fn keyboard_event_count(&self) -> usize {
        self.keyboard.len()
    }

    fn keyboard_event(&self, index: usize) -> Option<&KeyEvent> {
        self.keyboard.get(index)
    }

    fn consume_keyboard_event(&mut self, index: usize) {
        self.keyboard.consume(index);
    }

    fn text_event(&self) -> Option<&TextEvent> {
        self.text_event.as_ref()
    }

    fn consume_text_event(&mut self) {
        self.text_event = None;
    }

    fn clipboard(&self) -> &str {
        &self.clipboard
    }

    fn set_clipboard(&mut self, text: &str) {
        self.clipboard.clear();
        self.clipboard.push_str(text);
    }

    fn request_touch_keyboard(
        &mut self,
        owner: ControlId,
        text: &[char],
        settings: &TouchKeyboardSettings,
    ) {
        if let Some(touch) = self.touch_keyboard.as_mut() {
            if touch.supported() {
                touch.request(owner, text, settings);
            }
        }
    }
}

fn distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::Key;

    #[test]
    fn keyboard_events_arrive_next_frame_in_order() {
        let mut input = QueuedInput::new();
        input.push_key(KeyEvent::pressed(Key::ArrowLeft));
        input.push_key(KeyEvent::pressed(Key::ArrowRight));
        assert_eq!(input.keyboard_event_count(), 0);

        input.begin_frame(0.0);
        assert_eq!(input.keyboard_event_count(), 2);
        assert_eq!(input.keyboard_event(0).unwrap().key, Key::ArrowLeft);
        assert_eq!(input.keyboard_event(1).unwrap().key, Key::ArrowRight);

        input.begin_frame(0.016);
        assert_eq!(input.keyboard_event_count(), 0);
    }

    #[test]
    fn quick_presses_count_up() {
        let mut input = QueuedInput::new();
        input.begin_frame(0.0);
        input.push_pointer_down(0, PointerDevice::Mouse, Modifiers::NONE);
        input.push_pointer_up(0, PointerDevice::Mouse, Modifiers::NONE);

        input.begin_frame(0.05);
        input.push_pointer_down(0, PointerDevice::Mouse, Modifiers::NONE);
        let down = input.pointer_event().copied();
        // first frame still carries the initial Down
        assert_eq!(down.unwrap().count, 1);

        input.begin_frame(0.1);
        // Up from the first press
        assert_eq!(input.pointer_event().unwrap().kind, PointerEventKind::Up);
        input.begin_frame(0.15);
        assert_eq!(input.pointer_event().unwrap().kind, PointerEventKind::Click);
        input.begin_frame(0.2);
        let second_down = input.pointer_event().unwrap();
        assert_eq!(second_down.kind, PointerEventKind::Down);
        assert_eq!(second_down.count, 2);
    }

    #[test]
    fn slow_presses_do_not_count_up() {
        let mut input = QueuedInput::new();
        input.begin_frame(0.0);
        input.push_pointer_down(0, PointerDevice::Mouse, Modifiers::NONE);
        input.begin_frame(1.0);
        input.push_pointer_down(0, PointerDevice::Mouse, Modifiers::NONE);
        input.begin_frame(1.016);
        assert_eq!(input.pointer_event().unwrap().count, 1);
    }

    #[test]
    fn moving_away_cancels_the_click() {
        let mut input = QueuedInput::new();
        input.begin_frame(0.0);
        input.push_pointer_down(0, PointerDevice::Mouse, Modifiers::NONE);
        input.set_pointer_position(Point::new(100.0, 0.0));
        input.push_pointer_up(0, PointerDevice::Mouse, Modifiers::NONE);

        // drain: Down, then Up, then nothing — no Click was queued
        input.begin_frame(0.016);
        assert_eq!(input.pointer_event().unwrap().kind, PointerEventKind::Down);
        input.begin_frame(0.032);
        assert_eq!(input.pointer_event().unwrap().kind, PointerEventKind::Up);
        input.begin_frame(0.048);
        assert!(input.pointer_event().is_none());
    }

    #[test]
    fn clipboard_round_trips() {
        let mut input = QueuedInput::new();
        input.set_clipboard("copied");
        assert_eq!(input.clipboard(), "copied");
    }
}
