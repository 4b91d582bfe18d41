//! Paint contract between feature groups and display backends.
//!
//! Two display technologies are supported. Character displays are addressed by
//! row, block and cell. Graphic displays receive one element per column: an
//! option with top and bottom labels, a parameter with a value bar, or an
//! empty column.

/// Character display addressed by row, block and cell.
pub trait TextDisplay {
    fn rows(&self) -> usize;
    fn cells(&self) -> usize;

    fn clear(&mut self) -> &mut dyn TextDisplay;
    fn set_row(&mut self, row: usize, text: &str) -> &mut dyn TextDisplay;
    /// A block spans two cells
    fn set_block(&mut self, row: usize, block: usize, text: &str) -> &mut dyn TextDisplay;
    fn set_cell(&mut self, row: usize, cell: usize, text: &str) -> &mut dyn TextDisplay;
    /// Clear the display and center `text` on `row`
    fn set_message(&mut self, row: usize, text: &str) -> &mut dyn TextDisplay;
}

/// An option column: a top button label, a header and a bottom button label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionElement {
    pub header: String,
    pub top_label: String,
    pub top_selected: bool,
    pub bottom_label: String,
    pub bottom_selected: bool,
    pub touched: bool,
}

impl OptionElement {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Default::default()
        }
    }

    pub fn top(mut self, label: impl Into<String>, selected: bool) -> Self {
        self.top_label = label.into();
        self.top_selected = selected;
        self
    }

    pub fn bottom(mut self, label: impl Into<String>, selected: bool) -> Self {
        self.bottom_label = label.into();
        self.bottom_selected = selected;
        self
    }

    pub fn touched(mut self, touched: bool) -> Self {
        self.touched = touched;
        self
    }
}

/// A parameter column with its name, value and formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterElement {
    pub name: String,
    /// Value in the model's integer range
    pub value: u32,
    pub displayed_value: String,
    pub touched: bool,
}

impl ParameterElement {
    pub fn new(name: impl Into<String>, value: u32, displayed_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            displayed_value: displayed_value.into(),
            touched: false,
        }
    }

    pub fn touched(mut self, touched: bool) -> Self {
        self.touched = touched;
        self
    }
}

/// Graphic display built from one element per column.
pub trait GraphicDisplay {
    fn clear(&mut self);
    fn add_option(&mut self, element: OptionElement);
    fn add_parameter(&mut self, element: ParameterElement);
    fn add_empty(&mut self);
    /// Replace the frame with a centered message in `column`
    fn set_message(&mut self, column: usize, text: &str);
}

/// The display a feature group is asked to paint.
pub enum Display<'a> {
    Text(&'a mut dyn TextDisplay),
    Graphic(&'a mut dyn GraphicDisplay),
}

impl Display<'_> {
    pub fn reborrow(&mut self) -> Display<'_> {
        match self {
            Display::Text(d) => Display::Text(&mut **d),
            Display::Graphic(d) => Display::Graphic(&mut **d),
        }
    }
}
