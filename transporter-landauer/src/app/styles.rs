use owo_colors::Style;

// Stylesheet used to colorize prints.
#[derive(Debug, Default)]
pub(crate) struct Styles {
    pub heading_style: Style,
    pub value_style: Style,
    pub path_style: Style,
}

impl Styles {
    pub(crate) fn colorize(&mut self) {
        self.heading_style = Style::new().bright_blue().bold();
        self.value_style = Style::new().bright_green();
        self.path_style = Style::new().dimmed();
    }

    /// Colorized when stdout is a terminal which supports colour, plain otherwise
    pub(crate) fn for_stdout() -> Self {
        let mut styles = Self::default();
        if supports_color::on(supports_color::Stream::Stdout).is_some() {
            styles.colorize();
        }
        styles
    }
}
