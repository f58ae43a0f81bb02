use crate::packet::{DataMode, LiteralData};

/// An unencrypted message: raw content plus the metadata carried by the
/// literal data layer. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainMessage {
    data: Vec<u8>,
    text: bool,
    filename: String,
    /// Modification time hint, seconds since the epoch, 0 when absent.
    time: u32,
}

impl PlainMessage {
    /// A binary message without filename or time hints.
    pub fn new(data: Vec<u8>) -> Self {
        PlainMessage {
            data,
            text: false,
            filename: String::new(),
            time: 0,
        }
    }

    /// A text message without filename or time hints.
    pub fn from_string(text: &str) -> Self {
        PlainMessage {
            data: text.as_bytes().to_vec(),
            text: true,
            filename: String::new(),
            time: 0,
        }
    }

    pub fn with_metadata(data: Vec<u8>, text: bool, filename: &str, time: u32) -> Self {
        PlainMessage {
            data,
            text,
            filename: filename.to_string(),
            time,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Content interpreted as UTF-8, lossy on invalid sequences.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }

    pub fn is_text(&self) -> bool {
        self.text
    }

    pub fn is_binary(&self) -> bool {
        !self.text
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    pub(crate) fn to_literal(&self) -> LiteralData {
        let mode = if self.text {
            DataMode::Utf8
        } else {
            DataMode::Binary
        };

        LiteralData::new(mode, &self.filename, self.time, self.data.clone())
    }

    pub(crate) fn from_literal(literal: LiteralData) -> Self {
        PlainMessage {
            text: !literal.is_binary(),
            filename: literal.file_name().to_string(),
            time: literal.created(),
            data: literal.into_data(),
        }
    }
}
