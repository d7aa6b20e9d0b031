use egui::{Context, PointerButton, Pos2, Rect};

use crate::state::EditorState;

/// Pointer events in canvas space: positions are relative to the canvas's
/// top-left corner and still include the zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved over the canvas, with or without the button held
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp,
    /// Pointer left the canvas
    PointerLeave,
}

/// Handles converting raw egui input into canvas `InputEvent`s
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if the window is resized or scrolled)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input
                .pointer
                .hover_pos()
                .filter(|pos| self.canvas_rect.contains(*pos));

            match hover {
                Some(pos) => {
                    if Some(pos) != self.last_pointer_pos {
                        events.push(InputEvent::PointerMove {
                            position: self.to_canvas(pos),
                        });
                    }
                    if input.pointer.button_pressed(PointerButton::Primary) {
                        events.push(InputEvent::PointerDown {
                            position: self.to_canvas(pos),
                        });
                    }
                }
                None if self.last_pointer_pos.is_some() => events.push(InputEvent::PointerLeave),
                None => {}
            }

            if input.pointer.button_released(PointerButton::Primary) {
                events.push(InputEvent::PointerUp);
            }
            self.last_pointer_pos = hover;
        });

        events
    }
}

impl EditorState {
    /// Drives the paint gesture. Returns `true` if the map changed.
    ///
    /// Pressing paints once and starts a drag; every move while dragging
    /// paints again. Releasing or leaving the canvas ends the drag. Each
    /// paint is complete when applied, so ending a drag never undoes work.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { position } => {
                self.set_cursor(Some(self.screen_to_map(position)));
                self.dragging = true;
                self.paint_at(position)
            }
            InputEvent::PointerMove { position } => {
                self.set_cursor(Some(self.screen_to_map(position)));
                self.dragging && self.paint_at(position)
            }
            InputEvent::PointerUp => {
                self.dragging = false;
                false
            }
            InputEvent::PointerLeave => {
                self.dragging = false;
                self.set_cursor(None);
                false
            }
        }
    }
}
