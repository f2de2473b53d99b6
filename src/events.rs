//! Structured events emitted by the engine.
//!
//! There is no global logger reachable from inside the engine. Callers that want
//! removal statistics pass an [EventSink]; callers that don't pass `None` and the
//! engine stays silent.

/// One structured event describing what a run removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    BlankLinesRemoved(usize),
    CommentsRemoved { lines: usize, inline: usize },
    DocstringsRemoved(usize),
}

/// Receiver for engine events. Implementations must be cheap; the engine calls
/// them synchronously at the end of the assembly pass.
pub trait EventSink {
    fn emit(&self, event: Event);
}

/// Sink that accumulates counts, mainly for tests and the verbose CLI path.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub blank_lines: std::cell::Cell<usize>,
    pub comment_lines: std::cell::Cell<usize>,
    pub inline_comments: std::cell::Cell<usize>,
    pub docstrings: std::cell::Cell<usize>,
}

impl EventSink for CountingSink {
    fn emit(&self, event: Event) {
        match event {
            Event::BlankLinesRemoved(n) => self.blank_lines.set(self.blank_lines.get() + n),
            Event::CommentsRemoved { lines, inline } => {
                self.comment_lines.set(self.comment_lines.get() + lines);
                self.inline_comments.set(self.inline_comments.get() + inline);
            }
            Event::DocstringsRemoved(n) => self.docstrings.set(self.docstrings.get() + n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_sink_accumulates() {
        let sink = CountingSink::default();
        sink.emit(Event::BlankLinesRemoved(2));
        sink.emit(Event::BlankLinesRemoved(1));
        sink.emit(Event::CommentsRemoved { lines: 1, inline: 3 });
        sink.emit(Event::DocstringsRemoved(1));
        assert_eq!(sink.blank_lines.get(), 3);
        assert_eq!(sink.comment_lines.get(), 1);
        assert_eq!(sink.inline_comments.get(), 3);
        assert_eq!(sink.docstrings.get(), 1);
    }
}
