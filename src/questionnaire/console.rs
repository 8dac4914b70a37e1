use super::collector::CollectError;
use std::fmt::Display;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Line-oriented prompt/response channel. Tests drive it with in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn line(&mut self, text: impl Display) -> Result<(), CollectError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print `prompt` without a newline and read one raw line, line ending included.
    pub fn ask_bytes(&mut self, prompt: &str) -> Result<Vec<u8>, CollectError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buffer = Vec::new();
        if self.input.read_until(b'\n', &mut buffer)? == 0 {
            return Err(CollectError::InputClosed);
        }

        Ok(buffer)
    }

    /// Like [`Console::ask_bytes`], decoded and trimmed. Undecodable bytes become U+FFFD.
    pub fn ask(&mut self, prompt: &str) -> Result<String, CollectError> {
        let buffer = self.ask_bytes(prompt)?;
        Ok(String::from_utf8_lossy(&buffer).trim().to_string())
    }

    /// Numbered menu; returns the zero-based index of the chosen entry.
    pub fn choose<S: AsRef<str>>(
        &mut self,
        heading: &str,
        entries: &[S],
    ) -> Result<usize, CollectError> {
        self.line(heading)?;
        for (index, entry) in entries.iter().enumerate() {
            self.line(format_args!("  {}. {}", index + 1, entry.as_ref()))?;
        }

        let prompt = format!("\nSelect an option (1-{}): ", entries.len());
        loop {
            let raw = self.ask(&prompt)?;
            match raw.parse::<usize>() {
                Ok(choice) if (1..=entries.len()).contains(&choice) => return Ok(choice - 1),
                Ok(_) => self.line("Invalid choice. Please try again.")?,
                Err(_) => self.line("Please enter a valid number.")?,
            }
        }
    }

    pub fn confirm(&mut self, prompt: &str) -> Result<bool, CollectError> {
        let raw = self.ask(prompt)?;
        Ok(matches!(raw.to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn choose_reprompts_until_valid() {
        let mut console = console("abc\n9\n2\n");

        let index = console
            .choose("Pick a set:", &["Alpha", "Beta"])
            .expect("valid choice eventually");

        assert_eq!(index, 1);
        let output = String::from_utf8(console.into_output()).expect("utf8");
        assert!(output.contains("Please enter a valid number."));
        assert!(output.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn ask_reports_closed_input() {
        let mut console = console("");

        match console.ask("Name: ") {
            Err(CollectError::InputClosed) => {}
            other => panic!("expected closed input, got {other:?}"),
        }
    }

    #[test]
    fn choose_treats_undecodable_input_as_invalid() {
        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(b"1\n");
        let mut console = Console::new(Cursor::new(input), Vec::new());

        let index = console
            .choose("Pick a set:", &["Alpha", "Beta"])
            .expect("valid choice eventually");

        assert_eq!(index, 0);
        let output = String::from_utf8(console.into_output()).expect("utf8");
        assert!(output.contains("Please enter a valid number."));
    }

    #[test]
    fn confirm_accepts_yes_variants() {
        let mut console = console("Y\nno\n");
        assert!(console.confirm("Save? ").expect("answer"));
        assert!(!console.confirm("Save? ").expect("answer"));
    }
}
