//! CPF input helpers.
//!
//! The kiosk only keeps the digits of whatever is typed and shows them
//! through the `000.000.000-00` mask.

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Apply the `000.000.000-00` mask to the digits typed so far.
///
/// The mask grows with the input, so `1234` renders as `123.4`.
pub fn format(digits: &str) -> String {
    let mut out = String::with_capacity(CPF_LEN + 3);
    for (i, c) in digits.chars().filter(char::is_ascii_digit).take(CPF_LEN).enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Editable CPF field: digits only, capped at [`CPF_LEN`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpfField {
    digits: String,
}

impl CpfField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a typed character. Non-digits and overflow are ignored; returns
    /// whether the field changed.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_ascii_digit() && self.digits.len() < CPF_LEN {
            self.digits.push(c);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn masked(&self) -> String {
        format(&self.digits)
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == CPF_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progressive_mask() {
        assert_eq!(format(""), "");
        assert_eq!(format("123"), "123");
        assert_eq!(format("1234"), "123.4");
        assert_eq!(format("1234567"), "123.456.7");
        assert_eq!(format("1234567890"), "123.456.789-0");
        assert_eq!(format("12345678902"), "123.456.789-02");
    }

    #[test]
    fn test_field_rejects_non_digits_and_overflow() {
        let mut field = CpfField::new();
        assert!(!field.push('a'));
        for c in "12345678902".chars() {
            assert!(field.push(c));
        }
        assert!(!field.push('9'));
        assert!(field.is_complete());
        assert_eq!(field.masked(), "123.456.789-02");

        assert!(field.pop());
        assert!(!field.is_complete());
        assert_eq!(field.digits(), "1234567890");
    }

    #[test]
    fn test_field_pop_on_empty() {
        let mut field = CpfField::new();
        assert!(!field.pop());
        assert!(field.is_empty());
    }
}
