//! Ledger validation
//!
//! Turns raw `{debtor, creditor, amount}` records into [`Obligation`]s.
//! Validation is all-or-nothing: the first offending record rejects the whole
//! request.

use crate::error::{Field, Reason, ValidationError};
use clearledger_core::{Amount, Obligation, PartyId};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::fmt;

/// Validation result with detailed error
pub type ValidationResult<T> = Result<T, ValidationError>;

/// An unvalidated obligation record.
///
/// Fields hold raw JSON values so that type mismatches are reported per
/// record instead of failing the whole payload at parse time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawObligation {
    pub debtor: Option<Value>,
    pub creditor: Option<Value>,
    pub amount: Option<Value>,
}

impl RawObligation {
    pub fn new(
        debtor: impl Into<String>,
        creditor: impl Into<String>,
        amount: impl Into<Value>,
    ) -> Self {
        Self {
            debtor: Some(Value::String(debtor.into())),
            creditor: Some(Value::String(creditor.into())),
            amount: Some(amount.into()),
        }
    }

    /// Read a record from a JSON object.
    ///
    /// Lowercase keys are canonical; `Debtor`, `Creditor` and `Amount` are
    /// accepted as fallbacks. A `null` value counts as missing.
    pub fn from_value(index: usize, value: &Value) -> ValidationResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| ValidationError::new(index, Field::Record, Reason::NotAnObject))?;

        Ok(Self {
            debtor: lookup(obj, "debtor", "Debtor"),
            creditor: lookup(obj, "creditor", "Creditor"),
            amount: lookup(obj, "amount", "Amount"),
        })
    }
}

fn lookup(obj: &Map<String, Value>, key: &str, alias: &str) -> Option<Value> {
    [key, alias]
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
        .cloned()
}

/// An input amount that had to be rounded to the working precision.
///
/// Informational only: the request still succeeds with `working` as the
/// amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionWarning {
    pub index: usize,
    /// The amount exactly as submitted
    pub original: String,
    /// The decimal value used for netting
    pub working: Decimal,
}

impl fmt::Display for PrecisionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transaction #{}: amount {} rounded to {}",
            self.index, self.original, self.working
        )
    }
}

/// Obligations that passed validation, in submission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedLedger {
    pub obligations: Vec<Obligation>,
    pub warnings: Vec<PrecisionWarning>,
    /// Sum of every accepted amount, at most [`Amount::MAX`]
    pub total_amount: Decimal,
}

/// Validate typed raw records
pub fn validate(records: &[RawObligation]) -> ValidationResult<ValidatedLedger> {
    let mut ledger = ValidatedLedger::default();
    for (index, raw) in records.iter().enumerate() {
        validate_record(index, raw, &mut ledger)?;
    }
    Ok(ledger)
}

/// Validate records straight from a JSON array
pub fn validate_values(values: &[Value]) -> ValidationResult<ValidatedLedger> {
    let mut ledger = ValidatedLedger::default();
    for (index, value) in values.iter().enumerate() {
        let raw = RawObligation::from_value(index, value)?;
        validate_record(index, &raw, &mut ledger)?;
    }
    Ok(ledger)
}

fn validate_record(
    index: usize,
    raw: &RawObligation,
    ledger: &mut ValidatedLedger,
) -> ValidationResult<()> {
    let reject = move |field: Field| move |reason: Reason| ValidationError::new(index, field, reason);

    let debtor = parse_party(raw.debtor.as_ref()).map_err(reject(Field::Debtor))?;
    let creditor = parse_party(raw.creditor.as_ref()).map_err(reject(Field::Creditor))?;
    let parsed = parse_amount(raw.amount.as_ref()).map_err(reject(Field::Amount))?;

    let obligation = Obligation::new(debtor, creditor.clone(), parsed.amount)
        .map_err(|_| ValidationError::new(index, Field::Creditor, Reason::SelfDebt(creditor)))?;

    // Both operands are at most MAX at working scale, so this sum is exact
    let total = ledger.total_amount + parsed.amount.value();
    if total > Amount::MAX {
        return Err(reject(Field::Amount)(Reason::TotalOutOfRange(total)));
    }
    ledger.total_amount = total;

    if parsed.rounded {
        ledger.warnings.push(PrecisionWarning {
            index,
            original: parsed.text,
            working: parsed.amount.value(),
        });
    }
    ledger.obligations.push(obligation);
    Ok(())
}

fn parse_party(value: Option<&Value>) -> Result<PartyId, Reason> {
    match value {
        None => Err(Reason::Missing),
        Some(Value::String(s)) => PartyId::new(s.as_str()).map_err(|_| Reason::Empty),
        Some(other) => Err(Reason::NotText(json_kind(other))),
    }
}

struct ParsedAmount {
    amount: Amount,
    text: String,
    rounded: bool,
}

fn parse_amount(value: Option<&Value>) -> Result<ParsedAmount, Reason> {
    // JSON numbers keep their literal text (serde_json `arbitrary_precision`)
    let text = match value {
        None => return Err(Reason::Missing),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(Reason::Empty);
            }
            trimmed.to_string()
        }
        Some(other) => return Err(Reason::NotANumber(json_kind(other).to_string())),
    };

    if is_non_finite(&text) {
        return Err(Reason::NonFinite(text));
    }

    let literal = Literal::parse(&text).ok_or_else(|| Reason::NotANumber(text.clone()))?;
    if literal.negative || literal.is_zero() {
        return Err(Reason::NonPositive(text));
    }

    let (value, rounded) = literal
        .to_working_scale()
        .ok_or_else(|| Reason::OutOfRange(text.clone()))?;
    if value > Amount::MAX {
        return Err(Reason::OutOfRange(text));
    }
    if value.is_zero() {
        return Err(Reason::TooSmall(text));
    }

    Ok(ParsedAmount {
        amount: Amount::new_unchecked(value),
        text,
        rounded,
    })
}

/// Exponents beyond this magnitude are clamped; the result is out of range
/// or rounds to zero either way.
const EXPONENT_LIMIT: i64 = 1_000;

/// Digits of a decimal literal with the exponent folded into `point`.
#[derive(Debug, PartialEq, Eq)]
struct Literal {
    negative: bool,
    /// Every mantissa digit, without sign or decimal point
    digits: Vec<u8>,
    /// Number of digits left of the decimal point; may be negative or
    /// exceed `digits.len()`
    point: i64,
}

impl Literal {
    /// `[+-]digits[.digits][(e|E)[+-]digits]`, at least one mantissa digit
    fn parse(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(pos) => (&unsigned[..pos], parse_exponent(&unsigned[pos + 1..])?),
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
            return None;
        }

        let digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).map(|b| b - b'0').collect();
        Some(Self {
            negative,
            digits,
            point: int_part.len() as i64 + exponent,
        })
    }

    fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// Round to [`Amount::SCALE`] fractional digits, half to even.
    ///
    /// Returns the value and whether non-zero digits were dropped, or `None`
    /// when the integer part cannot be below 10^19.
    fn to_working_scale(&self) -> Option<(Decimal, bool)> {
        let scale = Amount::SCALE as i64;
        let first = self.digits.iter().position(|&d| d != 0)? as i64;

        if self.point - first > 19 {
            return None;
        }
        // First significant digit sits two or more places past the kept scale
        if self.point < -scale {
            return Some((Decimal::ZERO, true));
        }

        // Positions past the last mantissa digit are zeros
        let digit_at = |i: i64| self.digits.get(i as usize).copied().unwrap_or(0);

        let kept_end = self.point + scale;
        let kept_len = (self.digits.len() as i64).max(self.point).min(kept_end);

        let mut mantissa: i128 = 0;
        for i in 0..kept_len {
            mantissa = mantissa * 10 + i128::from(digit_at(i));
        }
        let frac_digits = (kept_len - self.point).max(0) as u32;

        let rest: Vec<u8> = self
            .digits
            .iter()
            .skip(kept_end.max(0) as usize)
            .copied()
            .collect();
        let rounded = rest.iter().any(|&d| d != 0);
        let round_up = match rest.split_first() {
            Some((&5, tail)) if tail.iter().all(|&d| d == 0) => mantissa % 2 == 1,
            Some((&head, _)) => head >= 5,
            None => false,
        };
        if round_up {
            mantissa += 1;
        }

        Decimal::try_from_i128_with_scale(mantissa, frac_digits)
            .ok()
            .map(|value| (value, rounded))
    }
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits
        .parse::<i64>()
        .map_or(EXPONENT_LIMIT, |e| e.min(EXPONENT_LIMIT));
    Some(if negative { -magnitude } else { magnitude })
}

fn is_non_finite(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    let unsigned = lower.trim_start_matches(['+', '-']);
    matches!(unsigned, "nan" | "inf" | "infinity")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
