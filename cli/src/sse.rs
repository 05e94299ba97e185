//! Minimal server-sent-events decoder for the auth event stream.
//!
//! Handles `event:` and `data:` fields, multi-line data, comment lines
//! (keep-alives), and frames split across network chunks. Bytes are buffered
//! until a frame is complete, so a character split between chunks decodes
//! intact. Frames that are not valid UTF-8 are dropped. `id:` and `retry:`
//! are ignored.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SseMessage {
    pub event: Option<String>,
    pub data: String,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feed a chunk of bytes; returns every message completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.buffer.extend_from_slice(chunk);

        let mut messages = Vec::new();
        while let Some((end, delimiter)) = frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + delimiter).collect();
            let Ok(frame) = String::from_utf8(frame) else {
                continue;
            };
            if let Some(message) = parse_frame(&frame.replace("\r\n", "\n")) {
                messages.push(message);
            }
        }
        messages
    }
}

/// Position and length of the first blank-line delimiter.
fn frame_end(buffer: &[u8]) -> Option<(usize, usize)> {
    let lf = buffer.windows(2).position(|w| w == b"\n\n").map(|i| (i, 2));
    let crlf = buffer.windows(4).position(|w| w == b"\r\n\r\n").map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn parse_frame(frame: &str) -> Option<SseMessage> {
    let mut event = None;
    let mut data: Vec<&str> = Vec::new();
    for line in frame.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = line.split_once(':').unwrap_or((line, ""));
        let value = value.strip_prefix(' ').unwrap_or(value);
        match field {
            "event" => event = Some(value.to_owned()),
            "data" => data.push(value),
            _ => {}
        }
    }
    if event.is_none() && data.is_empty() {
        return None;
    }
    Some(SseMessage { event, data: data.join("\n") })
}

#[cfg(test)]
#[path = "sse_test.rs"]
mod tests;
