//! The Health Attribute Record submitted with each prediction request.
//!
//! Fields keep the raw text exactly as the form (or JSON body) supplied it.
//! Interpretation happens through the accessor methods, which never fail:
//! a missing field, an unparseable number, or an unrecognised string all
//! contribute nothing to the score.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw health attributes for one prediction request.
///
/// All fields are optional. Absence behaves exactly like a value that fails
/// numeric parsing or matches no recognised string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthRecord {
    #[serde(deserialize_with = "text_or_number")]
    pub age: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub hypertension: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub heart_disease: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub avg_glucose_level: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub bmi: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub smoking_status: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub work_type: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub ever_married: Option<String>,
}

/// Smoking history as the scorer distinguishes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokingStatus {
    Smokes,
    FormerlySmoked,
    Other,
}

impl HealthRecord {
    /// Build a record from decoded form pairs.
    ///
    /// Unrecognised keys are ignored. A repeated key keeps its last value,
    /// the same rule the gateway applies to credential fields.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (key, value) in pairs {
            record.set(key.as_ref(), value);
        }
        record
    }

    /// Set the field named `key`. Returns false when `key` is not a
    /// recognised attribute.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "age" => &mut self.age,
            "gender" => &mut self.gender,
            "hypertension" => &mut self.hypertension,
            "heart_disease" => &mut self.heart_disease,
            "avg_glucose_level" => &mut self.avg_glucose_level,
            "bmi" => &mut self.bmi,
            "smoking_status" => &mut self.smoking_status,
            "work_type" => &mut self.work_type,
            "ever_married" => &mut self.ever_married,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Age in whole years. Only the leading integer is read, so `"65.9"`
    /// is 65.
    pub fn age(&self) -> f64 {
        parse_age(self.age.as_deref())
    }

    pub fn avg_glucose_level(&self) -> f64 {
        parse_number(self.avg_glucose_level.as_deref())
    }

    pub fn bmi(&self) -> f64 {
        parse_number(self.bmi.as_deref())
    }

    /// Case-sensitive: only `"Male"` matches.
    pub fn is_male(&self) -> bool {
        self.gender.as_deref() == Some("Male")
    }

    pub fn has_hypertension(&self) -> bool {
        self.hypertension.as_deref() == Some("1")
    }

    pub fn has_heart_disease(&self) -> bool {
        self.heart_disease.as_deref() == Some("1")
    }

    pub fn smoking(&self) -> SmokingStatus {
        match self.smoking_status.as_deref() {
            Some("smokes") => SmokingStatus::Smokes,
            Some("formerly smoked") => SmokingStatus::FormerlySmoked,
            _ => SmokingStatus::Other,
        }
    }

    pub fn works_private(&self) -> bool {
        self.work_type.as_deref() == Some("Private")
    }

    pub fn never_married(&self) -> bool {
        self.ever_married.as_deref() == Some("No")
    }
}

// ── Numeric normalization ─────────────────────────────────────────────────────

/// Parse a decimal measurement, falling back to zero.
///
/// Reads the longest leading decimal number after trimming whitespace, so
/// `"27.5kg"` is 27.5. A number too large for `f64` (`"1e999"`) and the
/// literal `"Infinity"` read as positive infinity and land in the top band.
/// Missing, empty, non-numeric and negative input all yield `0.0`. A bad
/// field only loses its own contribution and never fails the request.
pub fn parse_number(raw: Option<&str>) -> f64 {
    raw.and_then(|s| leading_decimal(s.trim()))
        .filter(|v| *v > 0.0)
        .unwrap_or(0.0)
}

/// Parse an age, keeping only the leading integer and falling back to zero.
///
/// A `0x` prefix reads the digits as hexadecimal (`"0x50"` is 80). An
/// integer too long for `f64` is positive infinity.
pub fn parse_age(raw: Option<&str>) -> f64 {
    raw.and_then(|s| leading_integer(s.trim()))
        .filter(|v| *v > 0.0)
        .unwrap_or(0.0)
}

/// Length of the run of ASCII digits starting at `start`.
fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

fn sign_len(bytes: &[u8]) -> usize {
    matches!(bytes.first(), Some(b'+') | Some(b'-')) as usize
}

fn leading_integer(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let sign = sign_len(bytes);
    let rest = &s[sign..];

    let magnitude = match rest.get(..2) {
        Some("0x") | Some("0X") => leading_hex(&rest[2..])?,
        _ => {
            let digits = digit_run(bytes, sign);
            if digits == 0 {
                return None;
            }
            rest[..digits].parse().ok()?
        }
    };
    Some(if bytes.first() == Some(&b'-') { -magnitude } else { magnitude })
}

/// Leading hexadecimal digits folded into an `f64`, so long runs saturate to
/// infinity instead of overflowing.
fn leading_hex(s: &str) -> Option<f64> {
    let (count, value) = s
        .chars()
        .map_while(|c| c.to_digit(16))
        .fold((0usize, 0.0f64), |(n, acc), d| (n + 1, acc * 16.0 + f64::from(d)));
    (count > 0).then_some(value)
}

fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = sign_len(bytes);

    if s[end..].starts_with("Infinity") {
        return Some(if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = digit_run(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(bytes, end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // The exponent only counts when it has at least one digit.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = digit_run(bytes, end + 1 + exp_sign);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse().ok()
}

// ── Serde helpers ─────────────────────────────────────────────────────────────

/// Accept a JSON string, number, or boolean and keep it as text.
///
/// Booleans map to `"1"` / `"0"` so `{"hypertension": true}` means the same
/// as the form value `"1"`. Anything else is treated as absent.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(if b { "1" } else { "0" }.to_string()),
        _ => None,
    })
}
