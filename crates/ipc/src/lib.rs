//! IPC message protocol for Pixel Painter
//!
//! Defines all message types exchanged between the grid editor engine and
//! the UI host, plus JSON helpers for the wire format.

mod commands;
mod error;
mod messages;

pub use commands::*;
pub use error::IpcError;
pub use messages::*;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize a message to its JSON wire form.
pub fn to_json<T: Serialize>(message: &T) -> Result<String, IpcError> {
    Ok(serde_json::to_string(message)?)
}

/// Parse a message from its JSON wire form.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, IpcError> {
    if text.trim().is_empty() {
        return Err(IpcError::EmptyMessage);
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_envelope() {
        let msg = UiToEditor::BeginGesture(PointerSample {
            pointer_id: 7,
            x: 3,
            y: -1,
        });
        let json = to_json(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"type":"BeginGesture","data":{"pointer_id":7,"x":3,"y":-1}}"#
        );
    }

    #[test]
    fn test_parse_unit_and_enum_payloads() {
        let undo: UiToEditor = from_json(r#"{"type":"Undo"}"#).unwrap();
        assert_eq!(undo, UiToEditor::Undo);

        let tool: UiToEditor = from_json(r#"{"type":"SetTool","data":"eyedrop"}"#).unwrap();
        assert_eq!(tool, UiToEditor::SetTool(ToolKind::Eyedrop));

        let mode: UiToEditor =
            from_json(r#"{"type":"SetConversionMode","data":"outline"}"#).unwrap();
        assert_eq!(mode, UiToEditor::SetConversionMode(ConversionKind::Outline));
    }

    #[test]
    fn test_empty_message_rejected() {
        let result: Result<UiToEditor, _> = from_json("   ");
        assert!(matches!(result, Err(IpcError::EmptyMessage)));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<UiToEditor, _> = from_json(r#"{"type":"Sculpt"}"#);
        assert!(matches!(result, Err(IpcError::Json(_))));
    }

    #[test]
    fn test_editor_event_serialization() {
        let event = EditorToUi::ColorPicked {
            color: "#ff0000".to_string(),
        };
        let json = to_json(&event).unwrap();
        let back: EditorToUi = from_json(&json).unwrap();
        assert_eq!(back, event);
    }
}
