//! Citation form state and event handling
//!
//! The form owns explicit handles for each visible element (source input,
//! style selector, output and error panels, in-text dialog) plus a clipboard.
//! Each UI event maps to one method; the terminal layer only forwards events
//! and draws whatever the handles hold.

use std::fmt;

use cite_core::{
    combined_citation, format_in_text, format_reference, parse_validated, CitationStyle,
};
use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;

/// Shown in the dialog when the source details do not validate
pub const DIALOG_ERROR: &str = "Error: Please correct source details first.";

/// The raw source record text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInput {
    value: String,
}

impl SourceInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The style selector. Holds a raw id, like a select element's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSelector {
    value: String,
}

impl StyleSelector {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The selected style, if the value is a supported id.
    pub fn selected(&self) -> Option<CitationStyle> {
        CitationStyle::from_id(&self.value)
    }

    /// The id after the current one, wrapping around.
    pub fn next_id(&self) -> &'static str {
        let all = CitationStyle::ALL;
        match self.position() {
            Some(i) => all[(i + 1) % all.len()].id(),
            None => all[0].id(),
        }
    }

    /// The id before the current one, wrapping around.
    pub fn prev_id(&self) -> &'static str {
        let all = CitationStyle::ALL;
        match self.position() {
            Some(i) => all[(i + all.len() - 1) % all.len()].id(),
            None => all[all.len() - 1].id(),
        }
    }

    fn position(&self) -> Option<usize> {
        let style = self.selected()?;
        CitationStyle::ALL.iter().position(|s| *s == style)
    }
}

impl Default for StyleSelector {
    fn default() -> Self {
        Self::new(CitationStyle::Apa.id())
    }
}

/// A text panel that can be shown or hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    text: String,
    visible: bool,
}

impl Panel {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

/// The in-text citation dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InTextDialog {
    visible: bool,
    input: String,
    output: String,
}

impl InTextDialog {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }
}

/// Handles to every element the form reads or updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormHandles {
    pub source: SourceInput,
    pub style: StyleSelector,
    pub output: Panel,
    pub error: Panel,
    /// Field named by the current error, if any
    pub error_field: Option<&'static str>,
    pub dialog: InTextDialog,
}

impl FormHandles {
    pub fn new(source: impl Into<String>, style_id: impl Into<String>) -> Self {
        Self {
            source: SourceInput::new(source),
            style: StyleSelector::new(style_id),
            ..Self::default()
        }
    }
}

/// Outcome of a copy request, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Copied,
    CopyFailed(String),
    NothingToCopy,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Copied => write!(f, "Citation copied to clipboard!"),
            Notice::CopyFailed(reason) => write!(f, "Failed to copy: {reason}"),
            Notice::NothingToCopy => write!(f, "Generate a citation first!"),
        }
    }
}

/// The citation form.
pub struct CitationForm<C> {
    handles: FormHandles,
    clipboard: C,
}

impl<C: Clipboard> CitationForm<C> {
    /// Build the form and run the initial preview over the default text.
    pub fn load(handles: FormHandles, clipboard: C) -> Self {
        let mut form = Self { handles, clipboard };
        form.update_reference_preview();
        form
    }

    pub fn handles(&self) -> &FormHandles {
        &self.handles
    }

    #[cfg(test)]
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// The source text was edited.
    pub fn source_changed(&mut self, text: impl Into<String>) {
        self.handles.source = SourceInput::new(text);
        self.update_reference_preview();
    }

    /// A different style was selected.
    pub fn style_changed(&mut self, style_id: impl Into<String>) {
        self.handles.style = StyleSelector::new(style_id);
        self.update_reference_preview();
    }

    pub fn select_next_style(&mut self) {
        let next = self.handles.style.next_id();
        self.style_changed(next);
    }

    pub fn select_prev_style(&mut self) {
        let prev = self.handles.style.prev_id();
        self.style_changed(prev);
    }

    /// The explicit "generate citation" action.
    pub fn generate_reference(&mut self) {
        self.update_reference_preview();
    }

    /// Show the in-text dialog with cleared input and output.
    pub fn open_in_text_dialog(&mut self) {
        let dialog = &mut self.handles.dialog;
        dialog.input.clear();
        dialog.output.clear();
        dialog.visible = true;
    }

    /// The dialog's own input field was edited.
    pub fn dialog_input_changed(&mut self, text: impl Into<String>) {
        self.handles.dialog.input = text.into();
    }

    /// Render the in-text citation into the dialog and the main output.
    pub fn generate_in_text(&mut self) {
        let record = match parse_validated(self.handles.source.value()) {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "in-text request rejected");
                self.handles.dialog.output = DIALOG_ERROR.to_string();
                return;
            }
        };

        let style = self.handles.style.value();
        let in_text = format_in_text(&record, style);
        let reference = format_reference(&record, style);

        self.handles.dialog.output = format!("In-Text Citation: {in_text}");
        self.handles
            .output
            .show(combined_citation(&reference, &in_text));
    }

    /// Hide the dialog, keeping its contents.
    pub fn close_in_text_dialog(&mut self) {
        self.handles.dialog.visible = false;
    }

    /// Copy the main output to the clipboard.
    pub fn copy(&mut self) -> Notice {
        let text = self.handles.output.text();
        if text.is_empty() {
            return Notice::NothingToCopy;
        }

        match self.clipboard.copy_text(text) {
            Ok(()) => {
                info!(bytes = text.len(), "citation copied");
                Notice::Copied
            }
            Err(e) => {
                warn!(error = %e, "copy failed");
                Notice::CopyFailed(e.to_string())
            }
        }
    }

    fn update_reference_preview(&mut self) {
        match parse_validated(self.handles.source.value()) {
            Ok(record) => {
                let style = self.handles.style.value();
                let reference = format_reference(&record, style);
                debug!(style, "reference rendered");
                self.handles.error.hide();
                self.handles.error_field = None;
                self.handles.output.show(reference);
            }
            Err(e) => {
                debug!(error = %e, field = ?e.field(), "source rejected");
                self.handles.error.show(e.user_message());
                self.handles.error_field = e.field();
                self.handles.output.hide();
            }
        }
    }
}
