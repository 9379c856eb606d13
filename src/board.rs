//! Sketch board bootstrapper
//!
//! Sizes the board container to the window, then hands it to the
//! DrawingBoard widget loaded by the host page. Stroke capture and
//! storage belong to the widget.

use serde::{Deserialize, Serialize};

use crate::sim::Viewport;

/// Options passed to the widget constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardOptions {
    /// Show the widget's toolbar
    pub controls: bool,
    /// Persist drawings in browser storage
    pub web_storage: bool,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            controls: false,
            web_storage: false,
        }
    }
}

/// Container size and options for one board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    pub element_id: String,
    pub width: u32,
    pub height: u32,
    pub options: BoardOptions,
}

impl BoardLayout {
    /// Fill the whole viewport, as measured before the widget is created
    pub fn for_viewport(element_id: &str, viewport: Viewport) -> Self {
        Self {
            element_id: element_id.to_string(),
            width: viewport.width,
            height: viewport.height,
            options: BoardOptions::default(),
        }
    }

    pub fn options_json(&self) -> String {
        serde_json::to_string(&self.options).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    use super::BoardLayout;
    use crate::error::SetupError;

    #[wasm_bindgen(inline_js = "
        export function create_board(id, options_json) {
            if (typeof DrawingBoard === 'undefined') {
                console.error('DrawingBoard widget not loaded');
                return false;
            }
            window.simpleBoard = new DrawingBoard.Board(id, JSON.parse(options_json));
            return true;
        }
    ")]
    extern "C" {
        fn create_board(id: &str, options_json: &str) -> bool;
    }

    /// Size the container element, then construct the widget inside it
    pub fn mount(layout: &BoardLayout) -> Result<(), SetupError> {
        let document = web_sys::window()
            .ok_or(SetupError::NoWindow)?
            .document()
            .ok_or(SetupError::NoWindow)?;
        let container: web_sys::HtmlElement = document
            .get_element_by_id(&layout.element_id)
            .ok_or_else(|| SetupError::MissingElement {
                id: layout.element_id.clone(),
            })?
            .dyn_into()
            .map_err(|_| SetupError::WrongElementType {
                id: layout.element_id.clone(),
                expected: "HTML element",
            })?;

        let style = container.style();
        let _ = style.set_property("width", &format!("{}px", layout.width));
        let _ = style.set_property("height", &format!("{}px", layout.height));

        if !create_board(&layout.element_id, &layout.options_json()) {
            return Err(SetupError::MissingElement {
                id: "DrawingBoard".to_string(),
            });
        }
        log::info!("Sketch board ready ({}x{})", layout.width, layout.height);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::mount;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_viewport() {
        let layout = BoardLayout::for_viewport("simple-board", Viewport::new(1280, 720));
        assert_eq!((layout.width, layout.height), (1280, 720));
        assert_eq!(layout.element_id, "simple-board");
    }

    #[test]
    fn test_options_disable_controls_and_storage() {
        let layout = BoardLayout::for_viewport("b", Viewport::new(1, 1));
        assert_eq!(layout.options_json(), r#"{"controls":false,"webStorage":false}"#);
    }
}
