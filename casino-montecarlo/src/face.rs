//! Face labels: the outcomes a die can produce.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::numbers::i64_to_f64;

/// A single outcome label, either a number or a piece of text.
///
/// Reals compare and hash by bit pattern (with `-0.0` folded into `0.0`), so
/// every face can key a map. Numbers order before text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Face {
    Int(i64),
    Real(f64),
    Text(String),
}

/// The kind of value a face holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceKind {
    Int,
    Real,
    Text,
}

impl Face {
    #[must_use]
    pub const fn kind(&self) -> FaceKind {
        match self {
            Self::Int(_) => FaceKind::Int,
            Self::Real(_) => FaceKind::Real,
            Self::Text(_) => FaceKind::Text,
        }
    }

    /// Text content, if this face is a text label.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    fn real_bits(value: f64) -> u64 {
        if value == 0.0 {
            0.0_f64.to_bits()
        } else if value.is_nan() {
            f64::NAN.to_bits()
        } else {
            value.to_bits()
        }
    }

    fn numeric(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(i64_to_f64(*value)),
            Self::Real(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => Self::real_bits(*a) == Self::real_bits(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Face {}

impl Hash for Face {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(value) => value.hash(state),
            Self::Real(value) => Self::real_bits(*value).hash(state),
            Self::Text(text) => text.hash(state),
        }
    }
}

impl Ord for Face {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Text(_), _) => Ordering::Greater,
            (_, Self::Text(_)) => Ordering::Less,
            _ => {
                let lhs = f64::from_bits(Self::real_bits(self.numeric().unwrap_or(f64::NAN)));
                let rhs = f64::from_bits(Self::real_bits(other.numeric().unwrap_or(f64::NAN)));
                // Ints sort ahead of reals with the same value to stay consistent with Eq.
                lhs.total_cmp(&rhs).then_with(|| match (self, other) {
                    (Self::Int(_), Self::Real(_)) => Ordering::Less,
                    (Self::Real(_), Self::Int(_)) => Ordering::Greater,
                    _ => Ordering::Equal,
                })
            }
        }
    }
}

impl PartialOrd for Face {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Real(value) => write_real(f, *value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Shortest round-trip form with a signed, two-digit exponent (`1e+20`,
/// `1.5e-05`), so signatures of tiny or huge reals stay conventional.
fn write_real(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    }
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(('+', exponent), |digits| ('-', digits));
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&text),
    }
}

impl From<i64> for Face {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Face {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Face {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u8> for Face {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Face {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for Face {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Face {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<char> for Face {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

/// Build a face list from anything convertible into [`Face`].
///
/// ```
/// use casino_montecarlo::face::faces;
/// let coin = faces(["H", "T"]);
/// assert_eq!(coin.len(), 2);
/// ```
pub fn faces<I, T>(items: I) -> Vec<Face>
where
    I: IntoIterator<Item = T>,
    T: Into<Face>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_matches_label_text() {
        assert_eq!(Face::from(6).to_string(), "6");
        assert_eq!(Face::from(1.0).to_string(), "1.0");
        assert_eq!(Face::from(2.5).to_string(), "2.5");
        assert_eq!(Face::from("H").to_string(), "H");
    }

    #[test]
    fn extreme_reals_use_signed_exponents() {
        assert_eq!(Face::from(1e20).to_string(), "1e+20");
        assert_eq!(Face::from(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Face::from(2.5e300).to_string(), "2.5e+300");
        assert_eq!(Face::from(-1e16).to_string(), "-1e+16");
        assert_eq!(Face::from(0.0001).to_string(), "0.0001");
        assert_eq!(Face::from(f64::INFINITY).to_string(), "inf");
        assert_eq!(Face::from(f64::NAN).to_string(), "nan");
    }

    #[test]
    fn reals_hash_by_value() {
        let mut set = HashSet::new();
        set.insert(Face::Real(0.0));
        set.insert(Face::Real(-0.0));
        set.insert(Face::Real(1.5));
        assert_eq!(set.len(), 2);
        assert_ne!(Face::Int(1), Face::Real(1.0));
    }

    #[test]
    fn numbers_sort_before_text() {
        let mut items = vec![
            Face::from("b"),
            Face::from(2.5),
            Face::from("a"),
            Face::from(3),
            Face::from(1),
            Face::from(1.0),
        ];
        items.sort();
        assert_eq!(
            items,
            vec![
                Face::Int(1),
                Face::Real(1.0),
                Face::Real(2.5),
                Face::Int(3),
                Face::from("a"),
                Face::from("b"),
            ]
        );
    }

    #[test]
    fn deserializes_untagged_labels() {
        let parsed: Vec<Face> = serde_json::from_str(r#"[1, 2.5, "H"]"#).unwrap();
        assert_eq!(parsed, vec![Face::Int(1), Face::Real(2.5), Face::from("H")]);
        assert_eq!(parsed[1].kind(), FaceKind::Real);
        assert_eq!(parsed[2].as_text(), Some("H"));
    }
}
