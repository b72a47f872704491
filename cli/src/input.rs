//! Line-oriented terminal prompts.
//!
//! Every prompt echoes the current value as a hint (`Name [default]: `).
//! Sensitive values are masked in the hint only; the answer is returned as
//! typed. An empty answer keeps the current value.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{Result, TecliError};

/// Number of trailing characters left visible by [`mask`].
pub const MASK_VISIBLE_CHARS: usize = 3;

/// Replaces all but the last [`MASK_VISIBLE_CHARS`] characters with `*`.
///
/// Values of that length or shorter are returned unchanged.
pub fn mask(value: &str) -> String {
    let len = value.chars().count();
    if len <= MASK_VISIBLE_CHARS {
        return value.to_string();
    }

    let hidden = len - MASK_VISIBLE_CHARS;
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { '*' } else { c })
        .collect()
}

/// Reads answers from `reader`, writing prompts to `writer`.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Prints `prompt [current]: ` and returns the raw answer line.
    pub fn read_plain(&mut self, prompt: &str, current: &str) -> Result<String> {
        self.read_line(prompt, current)
    }

    /// Like [`read_plain`](Self::read_plain), but the hint shows [`mask`]ed
    /// `current`.
    pub fn read_masked(&mut self, prompt: &str, current: &str) -> Result<String> {
        self.read_line(prompt, &mask(current))
    }

    /// Asks for a string; an empty answer keeps `current`.
    pub fn ask_string(&mut self, prompt: &str, current: &str) -> Result<String> {
        let answer = self.read_plain(prompt, current)?;
        Ok(keep_if_empty(answer, current))
    }

    /// Asks for a sensitive string; an empty answer keeps `current`.
    pub fn ask_masked(&mut self, prompt: &str, current: &str) -> Result<String> {
        let answer = self.read_masked(prompt, current)?;
        Ok(keep_if_empty(answer, current))
    }

    /// Asks for a boolean.
    ///
    /// Only `true` and `false` are accepted; any other answer keeps `current`.
    pub fn ask_bool(&mut self, prompt: &str, current: bool) -> Result<bool> {
        let answer = self.read_plain(prompt, &current.to_string())?;
        Ok(match answer.as_str() {
            "true" => true,
            "false" => false,
            _ => current,
        })
    }

    fn read_line(&mut self, prompt: &str, hint: &str) -> Result<String> {
        if hint.is_empty() {
            write!(self.writer, "{prompt}: ")?;
        } else {
            write!(self.writer, "{prompt} [{hint}]: ")?;
        }
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| TecliError::Input(e.to_string()))?;
        if read == 0 {
            return Err(TecliError::Input("input stream closed".to_string()));
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_string())
    }
}

fn keep_if_empty(answer: String, current: &str) -> String {
    if answer.is_empty() {
        current.to_string()
    } else {
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.writer.clone()).unwrap()
    }

    #[test]
    fn mask_keeps_last_three() {
        assert_eq!(mask("abcd1234"), "*****234");
        assert_eq!(mask("abcd"), "*bcd");
    }

    #[test]
    fn mask_short_values_unchanged() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("a"), "a");
        assert_eq!(mask("abc"), "abc");
    }

    #[test]
    fn mask_preserves_length() {
        for value in ["abcd", "0123456789", "a-much-longer-token.atlasv1.xyz", "héllo wörld"] {
            let masked = mask(value);
            let n = value.chars().count();
            assert_eq!(masked.chars().count(), n);
            assert!(masked.chars().take(n - 3).all(|c| c == '*'));
            let tail: String = value.chars().skip(n - 3).collect();
            assert!(masked.ends_with(&tail));
        }
    }

    #[test]
    fn read_plain_shows_hint_and_strips_newline() {
        let mut p = prompter("answer\n");
        let answer = p.read_plain("Name", "default").unwrap();

        assert_eq!(answer, "answer");
        assert_eq!(output(&p), "Name [default]: ");
    }

    #[test]
    fn read_plain_without_hint() {
        let mut p = prompter("x\r\n");
        assert_eq!(p.read_plain("Description", "").unwrap(), "x");
        assert_eq!(output(&p), "Description: ");
    }

    #[test]
    fn read_plain_returns_empty_answer() {
        let mut p = prompter("\n");
        assert_eq!(p.read_plain("Name", "default").unwrap(), "");
    }

    #[test]
    fn read_masked_masks_hint_not_answer() {
        let mut p = prompter("newsecret\n");
        let answer = p.read_masked("Team token", "abcd1234").unwrap();

        assert_eq!(answer, "newsecret");
        assert_eq!(output(&p), "Team token [*****234]: ");
    }

    #[test]
    fn ask_string_keeps_current_on_empty() {
        let mut p = prompter("\nnew\n");
        assert_eq!(p.ask_string("Name", "default").unwrap(), "default");
        assert_eq!(p.ask_string("Name", "default").unwrap(), "new");
    }

    #[test]
    fn ask_masked_keeps_current_on_empty() {
        let mut p = prompter("\n");
        assert_eq!(p.ask_masked("Token", "abcd1234").unwrap(), "abcd1234");
    }

    #[test]
    fn ask_bool_accepts_exact_literals() {
        let mut p = prompter("true\nfalse\n");
        assert!(p.ask_bool("Enabled", false).unwrap());
        assert!(!p.ask_bool("Enabled", true).unwrap());
    }

    #[test]
    fn ask_bool_falls_back_on_other_answers() {
        let mut p = prompter("yes\nTRUE\n\n");
        assert!(!p.ask_bool("Enabled", false).unwrap());
        assert!(p.ask_bool("Enabled", true).unwrap());
        assert!(!p.ask_bool("Enabled", false).unwrap());
        assert!(output(&p).starts_with("Enabled [false]: "));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompter("");
        let err = p.read_plain("Name", "").unwrap_err();
        assert!(matches!(err, TecliError::Input(_)));
    }
}
