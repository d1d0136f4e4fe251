//! ANSI palette shared by the runtime formatter, tracer and CLI.

/// jq-style output colors.
///
/// Only standard 16-color ANSI codes, so output reads on light and dark
/// terminals alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Object keys, element tags, names.
    pub blue: &'static str,
    /// String values.
    pub green: &'static str,
    /// Punctuation, `null`, trace markers.
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.blue.is_empty()
    }
}
