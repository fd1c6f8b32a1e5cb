// In-memory output sink

use std::io;

use super::{Color, FormatterOptions, OutputSink, pad_name};

/// Stream a write was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Normal,
    Failure,
}

/// One recorded write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub channel: Channel,
    pub text: String,
    /// Colors active when the text was written
    pub colors: Vec<Color>,
}

/// Sink that records every write, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    options: FormatterOptions,
    interactive: bool,
    longest: usize,
    colors: Vec<Color>,
    writes: Vec<RecordedWrite>,
}

impl MemorySink {
    pub fn new(options: FormatterOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Pretend to be an interactive terminal
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Pad names to line up with the longest expected name
    pub fn with_longest(mut self, longest: usize) -> Self {
        self.longest = longest;
        self
    }

    pub fn writes(&self) -> &[RecordedWrite] {
        &self.writes
    }

    /// Everything written, in order, regardless of channel
    pub fn output(&self) -> String {
        self.writes.iter().map(|w| w.text.as_str()).collect()
    }

    /// Everything written to the given channel
    pub fn channel_output(&self, channel: Channel) -> String {
        self.writes
            .iter()
            .filter(|w| w.channel == channel)
            .map(|w| w.text.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    fn record(&mut self, channel: Channel, text: &str) {
        self.writes.push(RecordedWrite {
            channel,
            text: text.to_string(),
            colors: self.colors.clone(),
        });
    }
}

impl OutputSink for MemorySink {
    fn options(&self) -> &FormatterOptions {
        &self.options
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn format_name(&self, name: &str) -> String {
        pad_name(name, self.longest.max(name.len()))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.record(Channel::Normal, text);
        Ok(())
    }

    fn write_failure(&mut self, text: &str) -> io::Result<()> {
        self.record(Channel::Failure, text);
        Ok(())
    }

    fn set_colors(&mut self, colors: &[Color]) -> io::Result<()> {
        self.colors = colors.to_vec();
        Ok(())
    }

    fn reset_colors(&mut self) -> io::Result<()> {
        self.colors.clear();
        Ok(())
    }
}
