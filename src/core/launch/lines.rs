// ─── Line Reassembly ───
// Child output arrives in arbitrary chunks; markers are only matched against
// complete lines so a phrase split across two reads is still seen.

/// Accumulates raw output bytes and yields completed lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completed, without the
    /// trailing `\n` / `\r\n`.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(decode_line(&raw[..raw.len() - 1]));
        }
        lines
    }

    /// Flush a final unterminated line, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let raw = std::mem::take(&mut self.pending);
        Some(decode_line(&raw))
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Fires once, on the first line containing the marker.
#[derive(Debug)]
pub struct MarkerWatch {
    marker: String,
    fired: bool,
}

impl MarkerWatch {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            fired: false,
        }
    }

    /// `true` only for the first matching line.
    pub fn observe(&mut self, line: &str) -> bool {
        if self.fired || !line.contains(&self.marker) {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}
