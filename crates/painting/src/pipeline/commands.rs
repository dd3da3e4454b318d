//! Routing of UI messages to the canvas

use pixel_painter_ipc::{EditorToUi, UiToEditor};
use tracing::{debug, info, warn};

use crate::color::{argb_to_hex, hex_to_argb};
use crate::convert::{ConversionJob, ConversionOutcome};
use crate::types::GestureStart;

use super::Canvas;

/// Result of handling one UI message
#[derive(Debug, Default)]
pub struct Dispatch {
    /// Events to send back to the UI, in order
    pub events: Vec<EditorToUi>,
    /// Conversion the host should run and hand back via
    /// [`Canvas::finish_conversion`]
    pub job: Option<ConversionJob>,
}

impl Dispatch {
    fn event(event: EditorToUi) -> Self {
        Self {
            events: vec![event],
            job: None,
        }
    }

    fn job(job: Option<ConversionJob>) -> Self {
        Self {
            events: Vec::new(),
            job,
        }
    }
}

impl Canvas {
    /// Apply one UI message
    pub fn handle_message(&mut self, msg: UiToEditor) -> Dispatch {
        match msg {
            UiToEditor::BeginGesture(sample) => {
                match self.begin_gesture(sample.pointer_id, sample.x, sample.y) {
                    GestureStart::Started => Dispatch {
                        events: vec![self.grid_changed()],
                        job: None,
                    },
                    GestureStart::Picked(color) => Dispatch::event(EditorToUi::ColorPicked {
                        color: argb_to_hex(color),
                    }),
                    GestureStart::Ignored => Dispatch::default(),
                }
            }
            UiToEditor::UpdateGesture(sample) => {
                if self.update_gesture(sample.pointer_id, sample.x, sample.y) {
                    Dispatch::event(self.grid_changed())
                } else {
                    Dispatch::default()
                }
            }
            UiToEditor::EndGesture { pointer_id } => {
                if self.end_gesture(pointer_id) {
                    Dispatch::event(self.undo_availability())
                } else {
                    Dispatch::default()
                }
            }
            UiToEditor::CancelGesture { pointer_id } => {
                if self.cancel_gesture(pointer_id) {
                    Dispatch::event(self.grid_changed())
                } else {
                    Dispatch::default()
                }
            }
            UiToEditor::SetTool(kind) => {
                self.set_tool(kind.into());
                Dispatch::default()
            }
            UiToEditor::SetBrushSize { size } => {
                self.set_brush_size(size);
                debug!("Set brush size to {}", self.brush.size);
                Dispatch::default()
            }
            UiToEditor::SetSelectedColor { color } => match hex_to_argb(&color) {
                Ok(argb) => {
                    self.set_selected_color(argb);
                    Dispatch::default()
                }
                Err(e) => {
                    warn!("Rejected color {:?}: {}", color, e);
                    Dispatch::event(EditorToUi::Error {
                        code: "invalid_color".to_string(),
                        message: e.to_string(),
                    })
                }
            },
            UiToEditor::Undo => {
                if self.undo() {
                    info!("Undo performed");
                    Dispatch {
                        events: vec![self.grid_changed(), self.undo_availability()],
                        job: None,
                    }
                } else {
                    debug!("Undo: nothing to undo");
                    Dispatch::default()
                }
            }
            UiToEditor::SetConversionMode(kind) => Dispatch::job(self.set_conversion_mode(kind.into())),
            UiToEditor::Resize { width } => {
                let job = self.resize(width);
                if job.is_some() {
                    Dispatch::job(job)
                } else {
                    Dispatch {
                        events: self.grid_replaced(),
                        job: None,
                    }
                }
            }
            UiToEditor::Repixelate => Dispatch::job(self.repixelate()),
            UiToEditor::ClearImage => {
                self.clear_image();
                Dispatch {
                    events: self.grid_replaced(),
                    job: None,
                }
            }
        }
    }

    /// Install a finished conversion and report the result to the UI
    ///
    /// Stale results produce no events.
    pub fn finish_conversion(&mut self, outcome: ConversionOutcome) -> Vec<EditorToUi> {
        match self.apply_conversion(outcome) {
            Ok(true) => self.grid_replaced(),
            Ok(false) => Vec::new(),
            Err(e) => vec![EditorToUi::ConversionFailed {
                message: e.to_string(),
            }],
        }
    }

    fn grid_changed(&self) -> EditorToUi {
        EditorToUi::GridChanged {
            revision: self.revision(),
        }
    }

    fn undo_availability(&self) -> EditorToUi {
        EditorToUi::UndoAvailability {
            can_undo: self.can_undo(),
            depth: self.undo_count(),
        }
    }

    fn grid_replaced(&self) -> Vec<EditorToUi> {
        vec![
            EditorToUi::GridReplaced {
                width: self.width(),
                height: self.height(),
                has_reference: self.has_reference(),
            },
            self.undo_availability(),
        ]
    }
}
