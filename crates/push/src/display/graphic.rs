//! Element model for the Push 2 graphic display.

use keystone_core::{GraphicDisplay, OptionElement, ParameterElement};

/// Number of element columns
pub const COLUMNS: usize = 8;

/// One column of the graphic display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Option(OptionElement),
    Parameter(ParameterElement),
    Empty,
}

/// Records the elements painted for a frame, for a renderer to draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphicDisplayModel {
    elements: Vec<Element>,
    message: Option<(usize, String)>,
}

impl GraphicDisplayModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Column and text of the message, if the frame is a message
    pub fn message(&self) -> Option<(usize, &str)> {
        self.message.as_ref().map(|(column, text)| (*column, text.as_str()))
    }

    fn push(&mut self, element: Element) {
        if self.elements.len() < COLUMNS {
            self.elements.push(element);
        } else {
            tracing::trace!("Graphic display full, dropping {:?}", element);
        }
    }
}

impl GraphicDisplay for GraphicDisplayModel {
    fn clear(&mut self) {
        self.elements.clear();
        self.message = None;
    }

    fn add_option(&mut self, element: OptionElement) {
        self.push(Element::Option(element));
    }

    fn add_parameter(&mut self, element: ParameterElement) {
        self.push(Element::Parameter(element));
    }

    fn add_empty(&mut self) {
        self.push(Element::Empty);
    }

    fn set_message(&mut self, column: usize, text: &str) {
        self.elements.clear();
        self.message = Some((column.min(COLUMNS - 1), text.to_string()));
    }
}
