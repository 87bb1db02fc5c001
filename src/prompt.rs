use crate::error::SenseResult;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented prompts over any reader/writer pair. Blank input or EOF picks the default.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// A prompter over borrowed streams, for handing to code that wants ownership.
    pub fn by_ref(&mut self) -> Prompter<&mut R, &mut W> {
        Prompter::new(&mut self.input, &mut self.output)
    }

    /// Reads one trimmed line. `None` on EOF.
    pub fn line(&mut self, question: &str) -> SenseResult<Option<String>> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    pub fn integer(&mut self, question: &str, default: i64) -> SenseResult<i64> {
        loop {
            let answer = match self.line(&format!("{} [{}]:", question, default))? {
                None => return Ok(default),
                Some(a) if a.is_empty() => return Ok(default),
                Some(a) => a,
            };
            match answer.parse::<i64>() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }

    pub fn number(&mut self, question: &str, default: f64) -> SenseResult<f64> {
        loop {
            let answer = match self.line(&format!("{} [{}]:", question, default))? {
                None => return Ok(default),
                Some(a) if a.is_empty() => return Ok(default),
                Some(a) => a,
            };
            match answer.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => return Ok(v),
                _ => writeln!(self.output, "Please enter a positive number.")?,
            }
        }
    }

    /// Numbered choice in `1..=count`.
    pub fn choice(&mut self, question: &str, count: usize, default: usize) -> SenseResult<usize> {
        loop {
            let v = self.integer(&format!("{} (1-{})", question, count), default as i64)?;
            if v >= 1 && (v as usize) <= count {
                return Ok(v as usize);
            }
            writeln!(self.output, "Please select one of 1-{}.", count)?;
        }
    }

    pub fn confirm(&mut self, question: &str, default: bool) -> SenseResult<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let answer = match self.line(&format!("{} [{}]:", question, hint))? {
                None => return Ok(default),
                Some(a) if a.is_empty() => return Ok(default),
                Some(a) => a.to_lowercase(),
            };
            match answer.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn blank_and_eof_use_defaults() {
        let mut p = prompter("\n");
        assert_eq!(p.integer("pct", 100).unwrap(), 100);
        assert_eq!(p.integer("pct", 100).unwrap(), 100);
        assert!(p.confirm("ok?", true).unwrap());
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let mut p = prompter("abc\n7\n2\n");
        assert_eq!(p.choice("pick", 3, 3).unwrap(), 2);
        let (_, out) = p.into_inner();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("whole number"));
        assert!(text.contains("one of 1-3"));
    }

    #[test]
    fn negative_percentages_parse() {
        let mut p = prompter("-20\n");
        assert_eq!(p.integer("pct", 100).unwrap(), -20);
    }
}
