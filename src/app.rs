// Interactive front end.
// What you SEE:
// • A 280×280 black square: hold Left Mouse to draw white strokes.
// • Below it a HUD: selected label, sample count, last message, key hints,
//   and a 28×28 preview of what "save" would capture.
// • 0-9 pick the label, S/Enter saves, C clears the canvas, E exports the CSV,
//   X clears the dataset (answer Y/N), ESC quits.

use crate::canvas::DrawState;
use crate::dataset::write_export;
use crate::draw::{blit, draw_gray_grid, draw_rect, draw_text_5x7, fill_rect, wrap_text, Drawer};
use crate::error::Error;
use crate::session::{Effect, Event, Prompt, Session};
use crate::types::{CANVAS_SIZE, FrameBuffer, GRID_SIZE};
use log::{error, info};
use minifb::{Key, Scale};
use std::path::Path;

const HUD_HEIGHT: usize = 96;
const PREVIEW_CELL: i32 = 2;
const PREVIEW_X: i32 = (CANVAS_SIZE as i32) - (GRID_SIZE as i32) * PREVIEW_CELL - 6;
const PREVIEW_Y: i32 = CANVAS_SIZE as i32 + 6;
const TEXT_X: i32 = 6;
const TEXT_COLS: usize = ((PREVIEW_X - 2 * TEXT_X) / 6) as usize;

const HUD_BG: u32 = 0x00_20_20_28;
const HUD_TEXT: u32 = 0x00_FF_FF_FF;
const HUD_ACCENT: u32 = 0x00_FF_CC_33;
const HUD_DIM: u32 = 0x00_90_90_A0;

pub fn run(session: &mut Session, out_dir: &Path, scale: Scale) -> Result<(), Error> {
    /* --- Window setup ---
       Visual: a window with the canvas on top and the HUD strip below. */
    let width = CANVAS_SIZE;
    let height = CANVAS_SIZE + HUD_HEIGHT;
    let mut drawer = Drawer::new("MNIST Digit Drawer", width, height, scale)?;
    let mut screen = FrameBuffer::filled(width, height, HUD_BG);

    let mut message = String::from("Draw a digit, pick its label, press S");
    let mut track = PointerTrack::default();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Pointer → canvas events.
           Visual: white dabs appear while the button is held over the canvas. */
        let over_canvas = drawer
            .mouse_pos()
            .filter(|&(x, y)| x < CANVAS_SIZE as f32 && y < CANVAS_SIZE as f32);
        let mut events = pointer_events(over_canvas, drawer.left_mouse_down(), &mut track);

        /* 2) Keys → session events. */
        for key in drawer.keys_pressed_once() {
            if let Some(ev) = key_event(key) {
                events.push(ev);
            }
        }

        /* 3) Dispatch and carry out whatever the session asks for. */
        for ev in events {
            for effect in session.handle(ev) {
                if let Some(text) = perform(effect, out_dir) {
                    message = text;
                }
            }
        }

        /* 4) Compose the frame: canvas, HUD, preview. */
        blit(&mut screen, session.canvas().bitmap(), 0, 0);
        draw_hud(&mut screen, session, &message);

        /* 5) Present to the window. */
        drawer.present(&screen)?;
    }

    info!("Window closed with {} unsaved sample(s) in session", session.dataset().len());
    Ok(())
}

/// Mouse state carried between frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTrack {
    inside: bool,
    was_down: bool,
    pressed_on_canvas: bool, // the current press began over the canvas
}

/// Turn one frame of mouse state into pointer events.
/// Only a press that starts over the canvas opens a stroke; a press made elsewhere
/// and dragged in produces nothing until it is released.
pub fn pointer_events(over: Option<(f32, f32)>, down: bool, prev: &mut PointerTrack) -> Vec<Event> {
    let mut events = Vec::new();
    match over {
        Some((x, y)) => {
            if down && !prev.was_down {
                prev.pressed_on_canvas = true;
                events.push(Event::PointerDown { x, y });
            } else if down && prev.pressed_on_canvas {
                events.push(Event::PointerMove { x, y });
            } else if !down && prev.was_down && prev.pressed_on_canvas {
                events.push(Event::PointerUp);
            }
        }
        None => {
            if prev.inside {
                events.push(Event::PointerLeave);
            }
        }
    }
    prev.inside = over.is_some();
    prev.was_down = down;
    if !down {
        prev.pressed_on_canvas = false;
    }
    events
}

/// Map a key press to a session event.
fn key_event(key: Key) -> Option<Event> {
    let digit = match key {
        Key::Key0 | Key::NumPad0 => Some(0),
        Key::Key1 | Key::NumPad1 => Some(1),
        Key::Key2 | Key::NumPad2 => Some(2),
        Key::Key3 | Key::NumPad3 => Some(3),
        Key::Key4 | Key::NumPad4 => Some(4),
        Key::Key5 | Key::NumPad5 => Some(5),
        Key::Key6 | Key::NumPad6 => Some(6),
        Key::Key7 | Key::NumPad7 => Some(7),
        Key::Key8 | Key::NumPad8 => Some(8),
        Key::Key9 | Key::NumPad9 => Some(9),
        _ => None,
    };
    if let Some(label) = digit {
        return Some(Event::SelectLabel { label });
    }
    match key {
        Key::C => Some(Event::ClearCanvas),
        Key::S | Key::Enter => Some(Event::SaveDigit),
        Key::E => Some(Event::Export),
        Key::X => Some(Event::ClearDataset),
        Key::Y => Some(Event::Confirm { yes: true }),
        Key::N => Some(Event::Confirm { yes: false }),
        _ => None,
    }
}

/// Carry out one effect. Returns the text the HUD should show, if any.
fn perform(effect: Effect, out_dir: &Path) -> Option<String> {
    match effect {
        Effect::Export { file_name, csv } => match write_export(out_dir, &file_name, &csv) {
            Ok(path) => Some(format!("Saved {}", path.display())),
            Err(e) => {
                error!("export of {file_name} failed: {e}");
                Some(format!("Export failed: {e}"))
            }
        },
        other => other.message(),
    }
}

fn draw_hud(screen: &mut FrameBuffer, session: &Session, message: &str) {
    let top = CANVAS_SIZE as i32;
    fill_rect(screen, 0, top, screen.width as i32, HUD_HEIGHT as i32, HUD_BG);

    let mut status = format!("LABEL {} | SAMPLES {}", session.label(), session.dataset().len());
    if session.canvas().state() == DrawState::Active {
        status.push_str(" | DRAWING");
    }
    draw_text_5x7(screen, TEXT_X, top + 6, &status, HUD_ACCENT);

    for (i, line) in wrap_text(message, TEXT_COLS).iter().take(4).enumerate() {
        draw_text_5x7(screen, TEXT_X, top + 20 + 10 * i as i32, line, HUD_TEXT);
    }

    let hints = match session.prompt() {
        Prompt::ConfirmClearDataset => "Y yes | N no",
        Prompt::None => "0-9 label C clear S save E export X reset",
    };
    draw_text_5x7(screen, TEXT_X, top + HUD_HEIGHT as i32 - 12, hints, HUD_DIM);

    // Preview of the capture, framed.
    let side = GRID_SIZE as i32 * PREVIEW_CELL;
    draw_rect(screen, PREVIEW_X - 1, PREVIEW_Y - 1, side + 2, side + 2, HUD_DIM);
    draw_gray_grid(screen, PREVIEW_X, PREVIEW_Y, GRID_SIZE, PREVIEW_CELL, &session.preview());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::sampler::Resample;
    use crate::types::Label;
    use test_log::test;

    #[test]
    fn keys_map_to_events() {
        assert_eq!(key_event(Key::Key7), Some(Event::SelectLabel { label: 7 }));
        assert_eq!(key_event(Key::NumPad0), Some(Event::SelectLabel { label: 0 }));
        assert_eq!(key_event(Key::Enter), Some(Event::SaveDigit));
        assert_eq!(key_event(Key::S), Some(Event::SaveDigit));
        assert_eq!(key_event(Key::C), Some(Event::ClearCanvas));
        assert_eq!(key_event(Key::E), Some(Event::Export));
        assert_eq!(key_event(Key::X), Some(Event::ClearDataset));
        assert_eq!(key_event(Key::N), Some(Event::Confirm { yes: false }));
        assert_eq!(key_event(Key::F1), None);
    }

    #[test]
    fn press_inside_draws_until_release() {
        let mut t = PointerTrack::default();
        assert!(pointer_events(Some((10.0, 10.0)), false, &mut t).is_empty());
        assert_eq!(pointer_events(Some((10.0, 10.0)), true, &mut t), [Event::PointerDown { x: 10.0, y: 10.0 }]);
        assert_eq!(pointer_events(Some((12.0, 10.0)), true, &mut t), [Event::PointerMove { x: 12.0, y: 10.0 }]);
        assert_eq!(pointer_events(Some((12.0, 10.0)), false, &mut t), [Event::PointerUp]);
        assert!(pointer_events(Some((14.0, 10.0)), false, &mut t).is_empty());
    }

    #[test]
    fn drag_out_leaves_and_reentry_stays_idle() {
        let mut session = Session::new(Canvas::new(), Label::default(), Resample::Box);
        let mut t = PointerTrack::default();
        let frames = [
            (Some((20.0, 20.0)), true),
            (None, true),
            (Some((200.0, 200.0)), true),
            (Some((200.0, 200.0)), false),
        ];
        let mut all = Vec::new();
        for (over, down) in frames {
            all.extend(pointer_events(over, down, &mut t));
        }
        assert_eq!(
            all,
            [
                Event::PointerDown { x: 20.0, y: 20.0 },
                Event::PointerLeave,
                Event::PointerMove { x: 200.0, y: 200.0 },
                Event::PointerUp,
            ]
        );
        for ev in all {
            session.handle(ev);
        }
        // the re-entry move arrived while Idle, so nothing was painted there
        assert_eq!(session.canvas().bitmap().pixels[200 * CANVAS_SIZE + 200], 0);
        assert_eq!(session.canvas().bitmap().pixels[20 * CANVAS_SIZE + 20], 0x00_FF_FF_FF);
    }

    #[test]
    fn press_outside_then_drag_in_sends_nothing() {
        let mut t = PointerTrack::default();
        assert!(pointer_events(None, true, &mut t).is_empty());
        assert!(pointer_events(Some((140.0, 140.0)), true, &mut t).is_empty());
        assert!(pointer_events(Some((150.0, 140.0)), true, &mut t).is_empty());
        assert!(pointer_events(Some((150.0, 140.0)), false, &mut t).is_empty());
        // a fresh press inside still works
        assert_eq!(pointer_events(Some((150.0, 140.0)), true, &mut t), [Event::PointerDown { x: 150.0, y: 140.0 }]);
    }

    #[test]
    fn hud_layout_fits_the_window() {
        assert!(PREVIEW_Y + GRID_SIZE as i32 * PREVIEW_CELL < (CANVAS_SIZE + HUD_HEIGHT) as i32);
        assert!(TEXT_COLS >= 30);
    }

    #[test]
    fn hud_draws_preview_of_the_canvas() {
        let mut session = Session::new(Canvas::new(), Label::default(), Resample::Box);
        session.handle(Event::PointerDown { x: 140.0, y: 140.0 });
        let mut screen = FrameBuffer::filled(CANVAS_SIZE, CANVAS_SIZE + HUD_HEIGHT, 0);
        draw_hud(&mut screen, &session, "hello");

        // cell (14,14) of the preview is lit (gray) by the dab at the canvas center
        let px = PREVIEW_X + 14 * PREVIEW_CELL;
        let py = PREVIEW_Y + 14 * PREVIEW_CELL;
        let (r, g, b) = FrameBuffer::rgb(screen.pixels[py as usize * CANVAS_SIZE + px as usize]);
        assert!(r > 0 && r == g && g == b);
    }

    #[test]
    fn failed_export_is_reported_not_raised() {
        // A file where the directory should be makes create_dir_all fail.
        let blocker = std::env::temp_dir().join(format!("mnist-drawer-blocker-{}", std::process::id()));
        std::fs::write(&blocker, "x").unwrap();
        let text = perform(Effect::Export { file_name: "a.csv".into(), csv: "label".into() }, &blocker);
        assert!(text.unwrap().starts_with("Export failed"));
        std::fs::remove_file(&blocker).unwrap();
    }
}
