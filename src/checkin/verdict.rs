//! # Mock Verdict Rules
//!
//! Placeholder accept/reject rules standing in for a provider backend. Each
//! rule is a pure function of the current input string.

use super::cpf::CPF_LEN;

/// Outcome of an authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    /// Nothing evaluated yet.
    #[default]
    Pending,
    Accepted,
    Rejected,
    InvalidInput,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

/// A rule deciding a verdict from raw input.
///
/// Implementations never return [`Verdict::Pending`].
pub trait VerdictRule {
    fn evaluate(&self, input: &str) -> Verdict;
}

/// Extract exactly [`CPF_LEN`] digits, tolerating the mask separators.
fn cpf_digits(input: &str) -> Option<Vec<u32>> {
    let mut digits = Vec::with_capacity(CPF_LEN);
    for c in input.trim().chars() {
        match c {
            '.' | '-' | ' ' => continue,
            _ => digits.push(c.to_digit(10)?),
        }
    }
    (digits.len() == CPF_LEN).then_some(digits)
}

/// Accepts a complete CPF whose last digit is even, rejects odd ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastDigitParity;

impl VerdictRule for LastDigitParity {
    fn evaluate(&self, input: &str) -> Verdict {
        match cpf_digits(input).and_then(|d| d.last().copied()) {
            Some(last) if last % 2 == 0 => Verdict::Accepted,
            Some(_) => Verdict::Rejected,
            None => Verdict::InvalidInput,
        }
    }
}

/// Accepts any complete CPF.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompleteCpf;

impl VerdictRule for CompleteCpf {
    fn evaluate(&self, input: &str) -> Verdict {
        if cpf_digits(input).is_some() {
            Verdict::Accepted
        } else {
            Verdict::InvalidInput
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_even_last_digit_accepted() {
        assert_eq!(LastDigitParity.evaluate("12345678902"), Verdict::Accepted);
        assert_eq!(LastDigitParity.evaluate("123.456.789-00"), Verdict::Accepted);
    }

    #[test]
    fn test_parity_odd_last_digit_rejected() {
        assert_eq!(LastDigitParity.evaluate("12345678901"), Verdict::Rejected);
        assert_eq!(LastDigitParity.evaluate("12345678909"), Verdict::Rejected);
    }

    #[test]
    fn test_parity_wrong_length_is_invalid() {
        for input in ["", "2", "1234567890", "123456789012", "1234567890a"] {
            assert_eq!(
                LastDigitParity.evaluate(input),
                Verdict::InvalidInput,
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_parity_is_idempotent() {
        let first = LastDigitParity.evaluate("98765432104");
        for _ in 0..5 {
            assert_eq!(LastDigitParity.evaluate("98765432104"), first);
        }
    }

    #[test]
    fn test_complete_cpf_rule() {
        assert_eq!(CompleteCpf.evaluate("123.456.789-01"), Verdict::Accepted);
        assert_eq!(CompleteCpf.evaluate("123.456.789-0"), Verdict::InvalidInput);
    }

    #[test]
    fn test_every_length_except_eleven_is_invalid() {
        for len in 0..=20 {
            let input = "4".repeat(len);
            let verdict = LastDigitParity.evaluate(&input);
            if len == CPF_LEN {
                assert_eq!(verdict, Verdict::Accepted);
            } else {
                assert_eq!(verdict, Verdict::InvalidInput);
            }
        }
    }
}
