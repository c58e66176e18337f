//! Line-oriented prompts for the interactive menu.
//!
//! Every helper returns `Ok(None)` once input is exhausted so the menu can
//! shut down cleanly on EOF.

use std::io::{self, BufRead, Write};

pub fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Re-prompts until the lower-cased answer is one of `options`.
pub fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    options: &[&str],
) -> io::Result<Option<String>> {
    loop {
        let Some(answer) = read_line(input, out, prompt)? else {
            return Ok(None);
        };
        let answer = answer.to_lowercase();
        if options.contains(&answer.as_str()) {
            return Ok(Some(answer));
        }
        writeln!(out, "Invalid input. Please choose from {}.", options.join(", "))?;
    }
}

/// Re-prompts until the answer parses as a number greater than zero.
pub fn read_positive_f64<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<f64>> {
    loop {
        let Some(answer) = read_line(input, out, prompt)? else {
            return Ok(None);
        };
        match answer.parse::<f64>() {
            Ok(value) if value > 0.0 => return Ok(Some(value)),
            Ok(_) => writeln!(out, "Value must be greater than 0.")?,
            Err(_) => writeln!(out, "Invalid input. Please enter a numeric value.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn choice_retries_until_valid() {
        let mut input = Cursor::new("9\n  3 \n");
        let mut out = Vec::new();

        let choice = read_choice(&mut input, &mut out, "> ", &["1", "2", "3"]).unwrap();

        assert_eq!(choice.as_deref(), Some("3"));
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Invalid input. Please choose from 1, 2, 3."));
    }

    #[test]
    fn choice_is_case_insensitive() {
        let mut input = Cursor::new("BITCOIN\n");
        let mut out = Vec::new();

        let choice = read_choice(&mut input, &mut out, "> ", &["bitcoin", "solana"]).unwrap();
        assert_eq!(choice.as_deref(), Some("bitcoin"));
    }

    #[test]
    fn positive_number_rejects_zero_and_text() {
        let mut input = Cursor::new("abc\n0\n-2\n2.5\n");
        let mut out = Vec::new();

        let value = read_positive_f64(&mut input, &mut out, "qty: ").unwrap();

        assert_eq!(value, Some(2.5));
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches("Value must be greater than 0.").count(), 2);
        assert_eq!(shown.matches("Please enter a numeric value.").count(), 1);
    }

    #[test]
    fn eof_yields_none() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        assert_eq!(read_line(&mut input, &mut out, "> ").unwrap(), None);
        assert_eq!(read_positive_f64(&mut input, &mut out, "> ").unwrap(), None);
    }
}
