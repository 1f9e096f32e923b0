// One drawing session: the canvas, the saved samples and the selected label,
// driven by input events. Each event updates the owned state and hands back
// the side effects (alerts, prompts, file exports) for the front end to carry out.

use crate::canvas::{Canvas, Pointer};
use crate::dataset::Dataset;
use crate::error::Error;
use crate::sampler::{self, Resample};
use crate::types::Label;
use log::{debug, info, warn};
use serde::Deserialize;

pub const CLEAR_DATASET_QUESTION: &str = "Are you sure you want to clear all saved digits?";

/// Input, already translated out of window/mouse/script terms.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    PointerLeave,
    SelectLabel { label: u8 },
    ClearCanvas,
    SaveDigit,
    ClearDataset,
    Confirm { yes: bool },
    Export,
}

/// Something the session wants done outside itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Saved { label: Label, total: usize },
    /// Informational message the user should see.
    Alert(String),
    /// Ask a yes/no question; the answer comes back as `Event::Confirm`.
    AskConfirm(String),
    DatasetCleared,
    /// Write `csv` to a file called `file_name`.
    Export { file_name: String, csv: String },
}

/// A modal question waiting for an answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Prompt {
    #[default]
    None,
    ConfirmClearDataset,
}

pub struct Session {
    canvas: Canvas,
    dataset: Dataset,
    label: Label,
    resample: Resample,
    prompt: Prompt,
}

impl Session {
    pub fn new(canvas: Canvas, label: Label, resample: Resample) -> Self {
        Self { canvas, dataset: Dataset::new(), label, resample, prompt: Prompt::None }
    }

    /// Apply one event and return what the front end should do about it.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        debug!("event {event:?}");

        // A pending question is modal: nothing else gets through until it is answered.
        if self.prompt != Prompt::None {
            return match event {
                Event::Confirm { yes } => self.answer(yes),
                other => {
                    debug!("ignoring {other:?} while a prompt is open");
                    Vec::new()
                }
            };
        }

        match event {
            Event::PointerDown { x, y } => self.pointer(Pointer::Down { x, y }),
            Event::PointerMove { x, y } => self.pointer(Pointer::Move { x, y }),
            Event::PointerUp => self.pointer(Pointer::Up),
            Event::PointerLeave => self.pointer(Pointer::Leave),
            Event::SelectLabel { label } => match Label::new(label) {
                Ok(l) => {
                    self.label = l;
                    Vec::new()
                }
                Err(e) => {
                    warn!("{e}");
                    vec![Effect::Alert(e.to_string())]
                }
            },
            Event::ClearCanvas => {
                self.canvas.clear();
                Vec::new()
            }
            Event::SaveDigit => self.save_digit(),
            Event::ClearDataset => {
                if self.dataset.is_empty() {
                    Vec::new()
                } else {
                    self.prompt = Prompt::ConfirmClearDataset;
                    vec![Effect::AskConfirm(CLEAR_DATASET_QUESTION.to_string())]
                }
            }
            Event::Confirm { .. } => Vec::new(), // nothing was asked
            Event::Export => self.export(),
        }
    }

    fn pointer(&mut self, pointer: Pointer) -> Vec<Effect> {
        self.canvas.handle_pointer(pointer);
        Vec::new()
    }

    fn save_digit(&mut self) -> Vec<Effect> {
        let pixels = sampler::capture(self.canvas.bitmap(), self.resample);
        match self.dataset.append(self.label, pixels) {
            Ok(total) => {
                self.canvas.clear();
                info!("Digit {} saved! Total samples: {total}", self.label);
                vec![Effect::Saved { label: self.label, total }]
            }
            Err(e) => {
                warn!("save failed: {e}");
                vec![Effect::Alert(e.to_string())]
            }
        }
    }

    fn answer(&mut self, yes: bool) -> Vec<Effect> {
        let prompt = std::mem::take(&mut self.prompt);
        match prompt {
            Prompt::ConfirmClearDataset if yes => {
                info!("Clearing {} saved samples", self.dataset.len());
                self.dataset.clear();
                vec![Effect::DatasetCleared]
            }
            _ => Vec::new(),
        }
    }

    fn export(&self) -> Vec<Effect> {
        match self.dataset.to_csv() {
            Ok(csv) => vec![Effect::Export { file_name: self.dataset.export_file_name(), csv }],
            Err(Error::EmptyDataset) => {
                warn!("export requested with an empty dataset");
                vec![Effect::Alert(Error::EmptyDataset.to_string())]
            }
            Err(e) => vec![Effect::Alert(e.to_string())],
        }
    }

    /// What a capture would produce right now, without saving it.
    pub fn preview(&self) -> Vec<u8> {
        sampler::capture(self.canvas.bitmap(), self.resample)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }
}

impl Effect {
    /// One-line text for the HUD / log.
    pub fn message(&self) -> Option<String> {
        match self {
            Effect::Saved { label, total } => Some(format!("Digit {label} saved! Total samples: {total}")),
            Effect::Alert(msg) | Effect::AskConfirm(msg) => Some(msg.clone()),
            Effect::DatasetCleared => Some("Dataset cleared".to_string()),
            Effect::Export { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::csv_header;
    use crate::types::{CANVAS_SIZE, PIXEL_COUNT, WHITE};
    use test_log::test;

    fn session() -> Session {
        Session::new(Canvas::new(), Label::default(), Resample::Box)
    }

    fn draw_something(s: &mut Session) {
        s.handle(Event::PointerDown { x: 140.0, y: 140.0 });
        s.handle(Event::PointerMove { x: 150.0, y: 160.0 });
        s.handle(Event::PointerUp);
    }

    #[test]
    fn save_appends_with_selected_label_and_clears_canvas() {
        let mut s = session();
        s.handle(Event::SelectLabel { label: 3 });
        draw_something(&mut s);
        let expected = s.preview();
        assert!(expected.iter().any(|&p| p > 0));

        let effects = s.handle(Event::SaveDigit);
        assert_eq!(effects, vec![Effect::Saved { label: Label::new(3).unwrap(), total: 1 }]);
        assert_eq!(effects[0].message().unwrap(), "Digit 3 saved! Total samples: 1");
        assert_eq!(s.dataset().samples()[0].pixels(), expected.as_slice());
        assert!(s.canvas().bitmap().pixels.iter().all(|&p| p != WHITE));
    }

    #[test]
    fn export_emits_csv_named_by_count() {
        let mut s = session();
        s.handle(Event::SelectLabel { label: 3 });
        draw_something(&mut s);
        s.handle(Event::SaveDigit);

        let effects = s.handle(Event::Export);
        let [Effect::Export { file_name, csv }] = effects.as_slice() else {
            panic!("expected one export effect, got {effects:?}");
        };
        assert_eq!(file_name, "mnist_dataset_1_samples.csv");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], csv_header());
        assert!(lines[1].starts_with("3,"));
        assert_eq!(lines[1].split(',').count(), PIXEL_COUNT + 1);
    }

    #[test]
    fn export_with_no_samples_alerts() {
        let mut s = session();
        assert_eq!(s.handle(Event::Export), vec![Effect::Alert("No data to download!".into())]);
    }

    #[test]
    fn clearing_the_dataset_needs_confirmation() {
        let mut s = session();
        s.handle(Event::SaveDigit);
        s.handle(Event::SaveDigit);

        let asked = s.handle(Event::ClearDataset);
        assert_eq!(asked, vec![Effect::AskConfirm(CLEAR_DATASET_QUESTION.into())]);
        assert_eq!(s.prompt(), Prompt::ConfirmClearDataset);

        assert!(s.handle(Event::Confirm { yes: false }).is_empty());
        assert_eq!(s.dataset().len(), 2);
        assert_eq!(s.prompt(), Prompt::None);

        s.handle(Event::ClearDataset);
        assert_eq!(s.handle(Event::Confirm { yes: true }), vec![Effect::DatasetCleared]);
        assert!(s.dataset().is_empty());
        assert_eq!(s.handle(Event::Export), vec![Effect::Alert("No data to download!".into())]);
    }

    #[test]
    fn prompt_swallows_other_events() {
        let mut s = session();
        s.handle(Event::SaveDigit);
        s.handle(Event::ClearDataset);

        assert!(s.handle(Event::SaveDigit).is_empty());
        assert!(s.handle(Event::PointerDown { x: 10.0, y: 10.0 }).is_empty());
        assert!(s.canvas().bitmap().pixels.iter().all(|&p| p != WHITE));
        assert_eq!(s.dataset().len(), 1);
    }

    #[test]
    fn clear_dataset_on_empty_asks_nothing() {
        let mut s = session();
        assert!(s.handle(Event::ClearDataset).is_empty());
        assert_eq!(s.prompt(), Prompt::None);
    }

    #[test]
    fn bad_label_is_rejected_and_previous_kept() {
        let mut s = session();
        s.handle(Event::SelectLabel { label: 6 });
        let effects = s.handle(Event::SelectLabel { label: 12 });
        assert!(matches!(effects.as_slice(), [Effect::Alert(_)]));
        assert_eq!(s.label().value(), 6);
    }

    #[test]
    fn clear_canvas_leaves_dataset_alone() {
        let mut s = session();
        s.handle(Event::SaveDigit);
        draw_something(&mut s);
        s.handle(Event::ClearCanvas);
        assert_eq!(s.canvas().bitmap(), Canvas::new().bitmap());
        assert_eq!(s.dataset().len(), 1);
    }

    #[test]
    fn moves_after_leave_do_not_draw() {
        let mut s = session();
        s.handle(Event::PointerDown { x: 5.0, y: 5.0 });
        s.handle(Event::PointerLeave);
        s.handle(Event::PointerMove { x: 200.0, y: 200.0 });
        assert_ne!(s.canvas().bitmap().pixels[200 * CANVAS_SIZE + 200], WHITE);
    }

    #[test]
    fn events_parse_from_json() {
        let ev: Event = serde_json::from_str(r#"{"type":"pointer_down","x":1.5,"y":2}"#).unwrap();
        assert_eq!(ev, Event::PointerDown { x: 1.5, y: 2.0 });
        let ev: Event = serde_json::from_str(r#"{"type":"confirm","yes":true}"#).unwrap();
        assert_eq!(ev, Event::Confirm { yes: true });
        let ev: Event = serde_json::from_str(r#"{"type":"save_digit"}"#).unwrap();
        assert_eq!(ev, Event::SaveDigit);
    }
}
