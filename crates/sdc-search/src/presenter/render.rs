//! Row templates and menu sizing, injected into the presenter.

use sdc_core::Suggestion;

/// Turns one suggestion into the markup of one dropdown row.
pub trait ItemTemplate {
    fn render_item(&self, item: &Suggestion) -> String;
}

impl<F> ItemTemplate for F
where
    F: Fn(&Suggestion) -> String,
{
    fn render_item(&self, item: &Suggestion) -> String {
        self(item)
    }
}

/// Decides the dropdown width given the input box width and rendered rows.
pub trait WidthPolicy {
    fn menu_width(&self, input_width: usize, rows: &[String]) -> usize;
}

impl<F> WidthPolicy for F
where
    F: Fn(usize, &[String]) -> usize,
{
    fn menu_width(&self, input_width: usize, rows: &[String]) -> usize {
        self(input_width, rows)
    }
}

/// Label above, icon and subline below.
///
/// ```text
/// <div class='autocomplete-label'>Detroit, MI</div><div class='autocomplete-subline'><i class='fa fa-bar-chart-o dingbat'></i> place</div>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlItemTemplate;

impl ItemTemplate for HtmlItemTemplate {
    fn render_item(&self, item: &Suggestion) -> String {
        let subline = escape_html(item.subline());
        let subline = match item.kind().marker() {
            Some(marker) => format!("{marker} {subline}"),
            None => subline,
        };
        format!(
            "<div class='autocomplete-label'>{}</div><div class='autocomplete-subline'>{subline}</div>",
            escape_html(item.label())
        )
    }
}

/// Menu is exactly as wide as the input box, whatever the rows contain.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinToInput;

impl WidthPolicy for PinToInput {
    fn menu_width(&self, input_width: usize, _rows: &[String]) -> usize {
        input_width
    }
}

/// Background/foreground pair applied to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyle {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl RowStyle {
    pub const ACTIVE: RowStyle = RowStyle {
        background: "#1a9d95",
        foreground: "#fff",
    };

    pub const DEFAULT: RowStyle = RowStyle {
        background: "#fff",
        foreground: "#000",
    };
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
