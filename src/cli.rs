//! CLI utilities for the clustering client.
//!
//! [`Prompt`] reads operator answers from any buffered reader and writes the
//! questions to any writer, re-asking until the answer is usable. Values it
//! hands out are already checked: names are non-empty and radii positive.
use std::io::{self, BufRead, Write};

/// Data source picked from the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// `(1)` read a stored cluster set from a server-side file.
    LoadClustersFromFile,
    /// `(2)` load a database table and cluster it.
    LoadDataFromDb,
}

pub struct Prompt<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Show the main menu until `1` or `2` is chosen.
    pub fn menu(&mut self) -> io::Result<MenuChoice> {
        loop {
            writeln!(self.writer, "(1) Load clusters from file")?;
            writeln!(self.writer, "(2) Load data from db")?;
            match self.ask("(1/2):")?.parse::<i32>() {
                Ok(1) => return Ok(MenuChoice::LoadClustersFromFile),
                Ok(2) => return Ok(MenuChoice::LoadDataFromDb),
                _ => {}
            }
        }
    }

    /// Ask for a non-empty line of text.
    pub fn text(&mut self, label: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(label)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    /// Ask for a clustering radius until a number greater than zero is given.
    pub fn radius(&mut self) -> io::Result<f64> {
        loop {
            if let Ok(r) = self.ask("Radius:")?.parse::<f64>() {
                if r > 0.0 {
                    return Ok(r);
                }
            }
        }
    }

    /// Yes/no question; only an answer starting with `y` counts as yes.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(question)?;
        Ok(matches!(answer.chars().next(), Some('y' | 'Y')))
    }

    /// Print a line of output for the operator.
    pub fn say(&mut self, line: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }

    fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.writer, "{label}")?;
        self.writer.flush()?;

        let mut s = String::default();
        if self.reader.read_line(&mut s)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(s.trim().to_string())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(input: &[u8]) -> Prompt<&[u8], Vec<u8>> {
        Prompt::new(input, Vec::new())
    }

    fn output(prompt: Prompt<&[u8], Vec<u8>>) -> String {
        String::from_utf8(prompt.into_inner().1).expect("not valid UTF-8")
    }

    #[test]
    fn menu_prints_correctly() {
        let mut p = prompt(b"1\n");

        assert_eq!(p.menu().unwrap(), MenuChoice::LoadClustersFromFile);
        assert_eq!(
            "(1) Load clusters from file\n(2) Load data from db\n(1/2):",
            output(p)
        );
    }

    #[test]
    fn menu_repeats_on_invalid_choice() {
        let mut p = prompt(b"0\nthree\n3\n2\n");

        assert_eq!(p.menu().unwrap(), MenuChoice::LoadDataFromDb);
        assert_eq!(output(p).matches("(1/2):").count(), 4);
    }

    #[test]
    fn text_skips_blank_lines() {
        let mut p = prompt(b"\n   \n playtennis \n");

        assert_eq!(p.text("Table name:").unwrap(), "playtennis");
    }

    #[test]
    fn radius_must_be_positive() {
        let mut p = prompt(b"abc\n0\n-1.5\n2.5\n");

        assert_eq!(p.radius().unwrap(), 2.5);
        assert_eq!(output(p).matches("Radius:").count(), 4);
    }

    #[test]
    fn confirm_answers() {
        let inputs = vec![
            ("y\n", true),
            ("Yes\n", true),
            ("n\n", false),
            ("\n", false),
            ("maybe\n", false),
        ];

        for (input, expected) in inputs {
            let mut p = prompt(input.as_bytes());
            assert_eq!(p.confirm("Would you repeat?(y/n)").unwrap(), expected);
        }
    }

    #[test]
    fn closed_input() {
        let mut p = prompt(b"");

        let err = p.text("File Name:").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
