//! # Line ending normalization module
//!
//! Canonicalization for text that is signed in a format independent way:
//! a streaming newline normalizer, and the trailing-whitespace trimming
//! canonical form used by the cleartext signature framework.

use std::iter::Peekable;

/// Line break style to normalize to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineBreak {
    Lf,
    Crlf,
}

/// This struct wraps an u8 iterator to normalize line endings.
pub struct Normalized<I>
where
    I: Iterator<Item = u8>,
{
    line_break: LineBreak,
    iter: Peekable<I>,
    prev_was_cr: bool,
}

impl<I: Iterator<Item = u8>> Normalized<I> {
    /// Take a u8 iterator and return similar iterator with normalized line endings
    ///
    /// # Example
    /// ```
    /// use pgp_core::normalize_lines::{LineBreak, Normalized};
    ///
    /// let input = "This is a string \n with \r some \n\r\n random newlines\r\r\n\n";
    /// assert_eq!(
    ///     &String::from_utf8(Normalized::new(input.bytes(), LineBreak::Lf).collect()).unwrap(),
    ///     "This is a string \n with \n some \n\n random newlines\n\n\n"
    /// );
    /// ```
    pub fn new(iter: I, line_break: LineBreak) -> Normalized<I> {
        Normalized {
            iter: iter.peekable(),
            prev_was_cr: false,
            line_break,
        }
    }
}

impl<I: Iterator<Item = u8>> Iterator for Normalized<I> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        match self.iter.peek() {
            Some(b'\n') => match self.line_break {
                LineBreak::Lf => {
                    if self.prev_was_cr {
                        // we already inserted a \n
                        let _ = self.iter.next();
                    }

                    self.iter.next()
                }
                LineBreak::Crlf => {
                    if self.prev_was_cr {
                        self.prev_was_cr = false;
                        self.iter.next()
                    } else {
                        self.prev_was_cr = true;
                        Some(b'\r')
                    }
                }
            },
            Some(b'\r') => match self.line_break {
                LineBreak::Lf => {
                    self.prev_was_cr = true;
                    let _ = self.iter.next();
                    Some(b'\n')
                }
                LineBreak::Crlf => {
                    if self.prev_was_cr {
                        self.prev_was_cr = false;
                        Some(b'\n')
                    } else {
                        self.prev_was_cr = true;
                        self.iter.next()
                    }
                }
            },
            _ => match self.line_break {
                LineBreak::Lf => {
                    self.prev_was_cr = false;
                    self.iter.next()
                }
                LineBreak::Crlf => {
                    let res = if self.prev_was_cr {
                        Some(b'\n')
                    } else {
                        self.iter.next()
                    };
                    self.prev_was_cr = false;
                    res
                }
            },
        }
    }
}

/// Split `text` on line feeds, strip trailing spaces, tabs and carriage
/// returns from every line and rejoin with the given line break.
///
/// This is the canonical form hashed by cleartext signatures, so whitespace
/// mangled in transport does not break verification.
pub fn canonicalize_and_trim(text: &str, line_break: LineBreak) -> String {
    let sep = match line_break {
        LineBreak::Lf => "\n",
        LineBreak::Crlf => "\r\n",
    };

    text.split('\n')
        .map(|line| line.trim_end_matches([' ', '\t', '\r']))
        .collect::<Vec<_>>()
        .join(sep)
}

// tests
#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn normalized_lf() {
        let input = "This is a string \n with \r some \n\r\n random newlines\r\r\n\n";
        assert_eq!(
            &String::from_utf8(Normalized::new(input.bytes(), LineBreak::Lf).collect()).unwrap(),
            "This is a string \n with \n some \n\n random newlines\n\n\n"
        );
    }

    #[test]
    fn normalized_crlf() {
        let input = "This is a string \n with \r some \n\r\n random newlines\r\r\n\n";
        assert_eq!(
            &String::from_utf8(Normalized::new(input.bytes(), LineBreak::Crlf).collect()).unwrap(),
            "This is a string \r\n with \r\n some \r\n\r\n random newlines\r\n\r\n\r\n"
        );
    }

    #[test]
    fn canonicalize_trims_trailing_whitespace() {
        assert_eq!(
            canonicalize_and_trim("  Signed message\n  \n  ", LineBreak::Crlf),
            "  Signed message\r\n\r\n"
        );
        assert_eq!(
            canonicalize_and_trim("  Signed message\n  \n  ", LineBreak::Lf),
            "  Signed message\n\n"
        );
    }

    #[test]
    fn canonicalize_no_trailing_newline() {
        assert_eq!(
            canonicalize_and_trim("a\t \nb", LineBreak::Crlf),
            "a\r\nb"
        );
    }
}
