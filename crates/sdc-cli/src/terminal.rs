use reqwest::Url;
use sdc_core::Suggestion;
use sdc_search::{Navigator, RowStyle, SuggestionView};

/// Row template for terminals: label, then the subline on the same line.
pub fn plain_row(item: &Suggestion) -> String {
    if item.subline().is_empty() {
        item.label().to_string()
    } else {
        format!("{}  ({}: {})", item.label(), item.kind(), item.subline())
    }
}

/// Prints the dropdown to stdout, clipped to the input width.
pub struct TerminalView {
    input_width: usize,
    rows: Vec<String>,
    width: usize,
}

impl TerminalView {
    pub fn new(input_width: usize) -> Self {
        Self {
            input_width,
            rows: Vec::new(),
            width: input_width,
        }
    }

    fn print(&self, active: Option<usize>) {
        for (index, row) in self.rows.iter().enumerate() {
            let marker = if Some(index) == active { '>' } else { ' ' };
            println!("{marker}{index:>2} {}", clip(row, self.width));
        }
        println!("{}", "-".repeat(self.width.min(self.input_width)));
    }
}

impl SuggestionView for TerminalView {
    fn input_width(&self) -> usize {
        self.input_width
    }

    fn show(&mut self, rows: &[String], width: usize) {
        self.rows = rows.to_vec();
        self.width = width;
        self.print(None);
    }

    fn style_rows(&mut self, styles: &[RowStyle]) {
        let active = styles.iter().position(|s| *s == RowStyle::ACTIVE);
        self.print(active);
    }

    fn clear(&mut self) {
        if !self.rows.is_empty() {
            println!("(suggestions closed)");
        }
        self.rows.clear();
    }
}

/// Prints the absolute navigation target instead of opening it.
pub struct PrintNavigator {
    site_base_url: Url,
}

impl PrintNavigator {
    pub fn new(site_base_url: Url) -> Self {
        Self { site_base_url }
    }

    pub fn resolve(&self, target_url: &str) -> String {
        self.site_base_url
            .join(target_url)
            .map_or_else(|_| target_url.to_string(), |url| url.to_string())
    }
}

impl Navigator for PrintNavigator {
    fn navigate(&mut self, target_url: &str) {
        println!("navigate: {}", self.resolve(target_url));
    }
}

fn clip(row: &str, width: usize) -> String {
    if row.chars().count() <= width {
        return row.to_string();
    }
    let mut clipped: String = row.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}
