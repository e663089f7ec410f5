//! Template literals as (cooked, raw) string pairs.
//!
//! A template is its literal chunks between `${..}` substitutions. Each chunk
//! keeps the source text verbatim (`raw`) next to the text with escapes
//! processed (`cooked`). Tag functions receive both; untagged templates and
//! `String.raw` pick one side.

use catalog::{Completion, ErrorKind, Thrown, Value};

use crate::js::coerce::to_string;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePart {
    /// `None` when the raw text holds an escape that is only legal in tagged templates.
    pub cooked: Option<String>,
    pub raw: String,
}

impl TemplatePart {
    pub fn new(raw: &str) -> Self {
        Self {
            cooked: cook(raw),
            raw: raw.to_string(),
        }
    }
}

/// One template call site: `n + 1` chunks around `n` substitutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

impl Template {
    /// `raw_chunks` are the source texts between substitutions, escapes unprocessed.
    pub fn new(raw_chunks: &[&str]) -> Self {
        Self {
            parts: raw_chunks.iter().map(|raw| TemplatePart::new(raw)).collect(),
        }
    }

    /// First argument of a tag function: cooked chunks, `undefined` where invalid.
    pub fn strings(&self) -> Value {
        Value::array(self.parts.iter().map(|part| part.cooked.clone()))
    }

    /// `strings.raw`.
    pub fn raw(&self) -> Value {
        Value::array(self.parts.iter().map(|part| part.raw.clone()))
    }

    /// Untagged evaluation: `` `a${x}b` ``.
    pub fn interpolate(&self, substitutions: &[Value]) -> Completion {
        let mut out = String::new();
        for (index, part) in self.parts.iter().enumerate() {
            let Some(cooked) = &part.cooked else {
                return Err(Thrown::error(
                    ErrorKind::SyntaxError,
                    format!("Invalid escape sequence in template: {}", part.raw),
                ));
            };
            out.push_str(cooked);
            if let Some(substitution) = substitutions.get(index)
                && index + 1 < self.parts.len()
            {
                out.push_str(&to_string(substitution));
            }
        }
        Ok(Value::from(out))
    }

    /// `` String.raw`...` ``.
    pub fn raw_string(&self, substitutions: &[Value]) -> String {
        let mut out = String::new();
        for (index, part) in self.parts.iter().enumerate() {
            out.push_str(&part.raw);
            if let Some(substitution) = substitutions.get(index)
                && index + 1 < self.parts.len()
            {
                out.push_str(&to_string(substitution));
            }
        }
        out
    }
}

/// Process escape sequences. `None` for malformed ones (`\u{zz}`, `\01`, `\x4`).
pub fn cook(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push('\0'),
            '1'..='9' | '0' => return None,
            // Line continuation.
            '\n' => {}
            'x' => {
                let code = hex_digits(&mut chars, 2)?;
                out.push(char::from_u32(code)?);
            }
            'u' => out.push(unicode_escape(&mut chars)?),
            other => out.push(other),
        }
    }
    Some(out)
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

fn hex_digits(chars: &mut Chars<'_>, count: usize) -> Option<u32> {
    let mut code = 0;
    for _ in 0..count {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}

fn unicode_escape(chars: &mut Chars<'_>) -> Option<char> {
    if chars.peek() == Some(&'{') {
        chars.next();
        let mut code: u32 = 0;
        let mut digits = 0;
        loop {
            let c = chars.next()?;
            if c == '}' {
                break;
            }
            code = code.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
            digits += 1;
        }
        if digits == 0 {
            return None;
        }
        return char::from_u32(code);
    }

    let high = hex_digits(chars, 4)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high);
    }
    // Surrogate pair spelled as two escapes.
    if chars.next()? != '\\' || chars.next()? != 'u' {
        return None;
    }
    let low = hex_digits(chars, 4)?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooks_common_escapes() {
        assert_eq!(cook(r"a\nb").as_deref(), Some("a\nb"));
        assert_eq!(cook(r"\u{2615}").as_deref(), Some("\u{2615}"));
        assert_eq!(cook(r"\uD83D\uDE00").as_deref(), Some("\u{1F600}"));
        assert_eq!(cook(r"\x41\`\$").as_deref(), Some("A`$"));
        assert_eq!(cook(r"\0"), Some("\0".to_string()));
    }

    #[test]
    fn malformed_escapes_have_no_cooked_value() {
        assert_eq!(cook(r"\u{zz}"), None);
        assert_eq!(cook(r"\01"), None);
        assert_eq!(cook(r"\x4"), None);
        assert_eq!(cook("trailing\\"), None);
    }

    #[test]
    fn raw_keeps_backslashes() {
        let template = Template::new(&[r"one\n", r"\ttwo"]);
        assert_eq!(template.raw_string(&[Value::from(1)]), r"one\n1\ttwo");
        let cooked = template.interpolate(&[Value::from(1)]).expect("valid");
        assert!(matches!(cooked, Value::String(ref s) if s == "one\n1\ttwo"));
    }

    #[test]
    fn untagged_template_rejects_invalid_escape() {
        let template = Template::new(&[r"\unicode"]);
        let err = template.interpolate(&[]).expect_err("invalid");
        assert_eq!(err.kind(), Some(ErrorKind::SyntaxError));
        assert!(matches!(template.strings().as_array(), Some([Value::Undefined])));
    }
}
