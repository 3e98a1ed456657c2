//! Flat line-oriented text formatter.
//!
//! Every field is written as one or more lines of plain text:
//!
//! | kind            | lines                                      |
//! |-----------------|--------------------------------------------|
//! | integers, `f32` | the number                                 |
//! | `bool`          | `true` or `false`                          |
//! | string          | the string, with `\\`, `\n`, `\r` escaped  |
//! | `Vector3`       | one line per component                     |
//! | `Quaternion`    | one line per component                     |
//! | integer array   | the count, then one line per element       |
//!
//! As with the binary formatter, nested objects write nothing of their own.

use crate::{Error, Formatter, Quaternion, Result, Saveable, Vector3};
use std::str::FromStr;

/// Formatter over newline-separated text.
#[derive(Debug, Default)]
pub struct TextFormatter {
    output: String,
    input: String,
    position: usize,
    lines_written: usize,
    lines_read: usize,
}

impl TextFormatter {
    /// Creates a formatter for saving.
    pub fn new() -> Self {
        TextFormatter::default()
    }

    /// Creates a formatter that reads from `input`.
    pub fn reader(input: impl Into<String>) -> Self {
        TextFormatter {
            input: input.into(),
            ..TextFormatter::default()
        }
    }

    /// Lines written plus lines read so far.
    #[inline]
    pub fn lines(&self) -> usize {
        self.lines_written + self.lines_read
    }

    pub fn into_string(self) -> String {
        self.output
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.output.push_str(line);
        self.output.push('\n');
        self.lines_written += 1;
        Ok(())
    }

    fn write_display<T: std::fmt::Display>(&mut self, value: T) -> Result<()> {
        let line = value.to_string();
        self.write_line(&line)
    }

    /// Returns the next line, without its terminator, and its 1-based number.
    fn next_line(&mut self, expected: &str) -> Result<(usize, &str)> {
        if self.position >= self.input.len() {
            return Err(Error::unexpected_eof(self.lines_read, "lines", expected));
        }
        let start = self.position;
        let (end, next) = match self.input[start..].find('\n') {
            Some(offset) => (start + offset, start + offset + 1),
            None => (self.input.len(), self.input.len()),
        };
        self.position = next;
        self.lines_read += 1;

        let line = &self.input[start..end];
        Ok((self.lines_read, line.strip_suffix('\r').unwrap_or(line)))
    }

    fn parse_line<T: FromStr>(&mut self, expected: &str) -> Result<T> {
        let (number, line) = self.next_line(expected)?;
        line.trim().parse::<T>().map_err(|_| {
            Error::invalid_format(
                number,
                "line",
                &format!("expected {}, found '{}'", expected, line),
            )
        })
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ch => out.push(ch),
        }
    }
    out
}

fn unescape(line: &str, number: usize) -> Result<String> {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                return Err(Error::invalid_format(
                    number,
                    "line",
                    &format!("unknown escape '\\{}'", other),
                ))
            }
            None => return Err(Error::invalid_format(number, "line", "dangling '\\'")),
        }
    }
    Ok(out)
}

impl Formatter for TextFormatter {
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_display(value)
    }

    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_display(value)
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_display(value)
    }

    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_display(value)
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_display(value)
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_display(value)
    }

    fn write_str(&mut self, value: &str) -> Result<()> {
        let line = escape(value);
        self.write_line(&line)
    }

    fn write_vector3(&mut self, value: Vector3) -> Result<()> {
        for component in <[f32; 3]>::from(value) {
            self.write_f32(component)?;
        }
        Ok(())
    }

    fn write_quaternion(&mut self, value: Quaternion) -> Result<()> {
        for component in <[f32; 4]>::from(value) {
            self.write_f32(component)?;
        }
        Ok(())
    }

    fn write_i32_array(&mut self, value: &[i32]) -> Result<()> {
        self.write_display(value.len())?;
        for item in value {
            self.write_i32(*item)?;
        }
        Ok(())
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.parse_line("i32")
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.parse_line("u32")
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.parse_line("i64")
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.parse_line("u8")
    }

    fn read_bool(&mut self) -> Result<bool> {
        self.parse_line("bool")
    }

    fn read_f32(&mut self) -> Result<f32> {
        self.parse_line("f32")
    }

    fn read_string(&mut self) -> Result<String> {
        let (number, line) = self.next_line("string")?;
        unescape(line, number)
    }

    fn read_vector3(&mut self) -> Result<Vector3> {
        Ok(Vector3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    fn read_quaternion(&mut self) -> Result<Quaternion> {
        Ok(Quaternion::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    fn read_i32_array(&mut self) -> Result<Vec<i32>> {
        let count: usize = self.parse_line("array length")?;
        (0..count).map(|_| self.read_i32()).collect()
    }

    fn save<S: Saveable>(&mut self, child: &S) -> Result<()> {
        child.save(self)
    }

    fn load<S: Saveable>(&mut self, child: &mut S) -> Result<()> {
        child.load(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_value_per_line() {
        let mut f = TextFormatter::new();
        f.write_i32(-3).unwrap();
        f.write_bool(false).unwrap();
        f.write_f32(0.1).unwrap();
        f.write_str("two\nlines").unwrap();
        f.write_i32_array(&[4, 5]).unwrap();
        assert_eq!(f.lines(), 7);
        assert_eq!(
            f.into_string(),
            "-3\nfalse\n0.1\ntwo\\nlines\n2\n4\n5\n"
        );
    }

    #[test]
    fn test_reads_back_escapes_and_crlf() {
        let mut r = TextFormatter::reader("a\\\\b\\r\r\n\n7");
        assert_eq!(r.read_string().unwrap(), "a\\b\r");
        assert_eq!(r.read_string().unwrap(), "");
        assert_eq!(r.read_u8().unwrap(), 7);
        assert_eq!(r.lines(), 3);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let mut r = TextFormatter::reader("1\nnope\n");
        assert_eq!(r.read_i32().unwrap(), 1);
        match r.read_i32().unwrap_err() {
            Error::InvalidFormat { position, unit, .. } => {
                assert_eq!(position, 2);
                assert_eq!(unit, "line");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(matches!(
            r.read_bool(),
            Err(Error::UnexpectedEof { consumed: 2, .. })
        ));
    }

    #[test]
    fn test_special_floats() {
        let mut f = TextFormatter::new();
        f.write_f32(f32::INFINITY).unwrap();
        f.write_f32(f32::NAN).unwrap();
        let mut r = TextFormatter::reader(f.into_string());
        assert_eq!(r.read_f32().unwrap(), f32::INFINITY);
        assert!(r.read_f32().unwrap().is_nan());
    }
}
