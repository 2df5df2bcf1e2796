//! Trial storage and its two presentation layouts.
//!
//! A played game keeps one dense, trial-major [`TrialMatrix`]. The wide and
//! narrow tables are projections built on request; neither reshapes the
//! stored matrix.

use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use twox_hash::XxHash64;

use crate::error::MonteCarloError;
use crate::face::Face;

/// Column names of the narrow layout.
pub const NARROW_COLUMNS: [&str; 3] = ["Roll", "Dice", "Face"];

/// Presentation layout of a trial table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One row per trial, one column per die.
    #[default]
    Wide,
    /// One row per `(trial, die)` pair with a single face column.
    Narrow,
}

impl Layout {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Narrow => "narrow",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = MonteCarloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("wide") || token.eq_ignore_ascii_case("w") {
            Ok(Self::Wide)
        } else if token.eq_ignore_ascii_case("narrow") || token.eq_ignore_ascii_case("n") {
            Ok(Self::Narrow)
        } else {
            Err(MonteCarloError::InvalidLayout {
                requested: s.to_string(),
            })
        }
    }
}

impl TryFrom<&str> for Layout {
    type Error = MonteCarloError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Dense outcome matrix: `trials × dice`, stored trial-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialMatrix {
    trials: usize,
    dice: usize,
    cells: Vec<Face>,
}

impl TrialMatrix {
    /// Assemble a matrix from die-major draws: `columns[d][t]` is the face
    /// die `d` showed on trial `t`.
    ///
    /// Every column must hold the same number of draws.
    #[must_use]
    pub(crate) fn from_columns(columns: Vec<Vec<Face>>) -> Self {
        let dice = columns.len();
        let trials = columns.first().map_or(0, Vec::len);
        debug_assert!(columns.iter().all(|column| column.len() == trials));
        let mut iters: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
        let mut cells = Vec::with_capacity(trials * dice);
        for _ in 0..trials {
            for column in &mut iters {
                if let Some(face) = column.next() {
                    cells.push(face);
                }
            }
        }
        Self {
            trials,
            dice,
            cells,
        }
    }

    /// Build a matrix from trial rows.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::NoDice`] when there are no rows or the first
    /// row is empty, and [`MonteCarloError::RaggedRows`] when row lengths differ.
    pub fn from_rows(rows: Vec<Vec<Face>>) -> Result<Self, MonteCarloError> {
        let dice = rows.first().map_or(0, Vec::len);
        if dice == 0 {
            return Err(MonteCarloError::NoDice);
        }
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != dice) {
            return Err(MonteCarloError::RaggedRows {
                row: idx + 1,
                expected: dice,
                found: row.len(),
            });
        }
        let trials = rows.len();
        Ok(Self {
            trials,
            dice,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of trials (rows).
    #[must_use]
    pub const fn trials(&self) -> usize {
        self.trials
    }

    /// Number of dice (columns).
    #[must_use]
    pub const fn dice(&self) -> usize {
        self.dice
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.trials, self.dice)
    }

    /// Outcome of die `die` on trial `roll`, both 1-based.
    #[must_use]
    pub fn cell(&self, roll: usize, die: usize) -> Option<&Face> {
        if roll == 0 || die == 0 || roll > self.trials || die > self.dice {
            return None;
        }
        self.cells.get((roll - 1) * self.dice + (die - 1))
    }

    /// Outcomes of trial `roll` (1-based) in die order.
    #[must_use]
    pub fn row(&self, roll: usize) -> Option<&[Face]> {
        if roll == 0 || roll > self.trials {
            return None;
        }
        let start = (roll - 1) * self.dice;
        self.cells.get(start..start + self.dice)
    }

    /// Trial rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Face]> + '_ {
        self.cells.chunks_exact(self.dice.max(1))
    }

    /// Outcomes of die `die` (1-based) across all trials.
    pub fn column(&self, die: usize) -> impl Iterator<Item = &Face> + '_ {
        let stride = self.dice.max(1);
        let skip = if die == 0 || die > self.dice {
            self.cells.len()
        } else {
            die - 1
        };
        self.cells.iter().skip(skip).step_by(stride)
    }

    /// Stable xxHash64 digest of shape and cell values.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write_usize(self.trials);
        hasher.write_usize(self.dice);
        for face in &self.cells {
            hasher.write(face.to_string().as_bytes());
            hasher.write_u8(0x1F);
        }
        hasher.finish()
    }

    #[must_use]
    pub fn wide(&self) -> WideView {
        WideView {
            rows: self.rows().map(<[Face]>::to_vec).collect(),
        }
    }

    #[must_use]
    pub fn narrow(&self) -> NarrowView {
        let rows = self
            .rows()
            .enumerate()
            .flat_map(|(t, row)| {
                row.iter().enumerate().map(move |(d, face)| NarrowRow {
                    roll: t + 1,
                    die: d + 1,
                    face: face.clone(),
                })
            })
            .collect();
        NarrowView {
            dice: self.dice,
            rows,
        }
    }

    #[must_use]
    pub fn project(&self, layout: Layout) -> View {
        match layout {
            Layout::Wide => View::Wide(self.wide()),
            Layout::Narrow => View::Narrow(self.narrow()),
        }
    }
}

/// Wide table: row `i` holds the outcomes of trial `i + 1` in die order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WideView {
    rows: Vec<Vec<Face>>,
}

impl WideView {
    #[must_use]
    pub fn rows(&self) -> &[Vec<Face>] {
        &self.rows
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, Vec::len))
    }

    /// Outcome at 1-based `(roll, die)`.
    #[must_use]
    pub fn cell(&self, roll: usize, die: usize) -> Option<&Face> {
        self.rows
            .get(roll.checked_sub(1)?)?
            .get(die.checked_sub(1)?)
    }

    #[must_use]
    pub fn to_narrow(&self) -> NarrowView {
        self.to_matrix().narrow()
    }

    #[must_use]
    pub fn to_matrix(&self) -> TrialMatrix {
        let (trials, dice) = self.shape();
        TrialMatrix {
            trials,
            dice,
            cells: self.rows.iter().flatten().cloned().collect(),
        }
    }
}

/// One row of the narrow table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrowRow {
    #[serde(rename = "Roll")]
    pub roll: usize,
    #[serde(rename = "Dice")]
    pub die: usize,
    #[serde(rename = "Face")]
    pub face: Face,
}

/// Narrow table: one row per `(roll, die)` pair, trial-major then die-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrowView {
    dice: usize,
    rows: Vec<NarrowRow>,
}

impl NarrowView {
    #[must_use]
    pub fn rows(&self) -> &[NarrowRow] {
        &self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> [&'static str; 3] {
        NARROW_COLUMNS
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Outcome at 1-based `(roll, die)`.
    #[must_use]
    pub fn face(&self, roll: usize, die: usize) -> Option<&Face> {
        if die == 0 || die > self.dice {
            return None;
        }
        let idx = roll
            .checked_sub(1)?
            .checked_mul(self.dice)?
            .checked_add(die - 1)?;
        self.rows.get(idx).map(|row| &row.face)
    }

    #[must_use]
    pub fn to_wide(&self) -> WideView {
        let rows = self
            .rows
            .chunks_exact(self.dice.max(1))
            .map(|chunk| chunk.iter().map(|row| row.face.clone()).collect())
            .collect();
        WideView { rows }
    }
}

/// A projection in either layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", content = "table", rename_all = "lowercase")]
pub enum View {
    Wide(WideView),
    Narrow(NarrowView),
}

impl View {
    #[must_use]
    pub const fn layout(&self) -> Layout {
        match self {
            Self::Wide(_) => Layout::Wide,
            Self::Narrow(_) => Layout::Narrow,
        }
    }

    #[must_use]
    pub fn as_wide(&self) -> Option<&WideView> {
        match self {
            Self::Wide(view) => Some(view),
            Self::Narrow(_) => None,
        }
    }

    #[must_use]
    pub fn as_narrow(&self) -> Option<&NarrowView> {
        match self {
            Self::Narrow(view) => Some(view),
            Self::Wide(_) => None,
        }
    }

    /// Convert into the wide layout regardless of the current one.
    #[must_use]
    pub fn into_wide(self) -> WideView {
        match self {
            Self::Wide(view) => view,
            Self::Narrow(view) => view.to_wide(),
        }
    }

    /// Convert into the narrow layout regardless of the current one.
    #[must_use]
    pub fn into_narrow(self) -> NarrowView {
        match self {
            Self::Narrow(view) => view,
            Self::Wide(view) => view.to_narrow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::faces;
    use pretty_assertions::assert_eq;

    fn sample_matrix() -> TrialMatrix {
        // Two dice, three trials, drawn die-major.
        TrialMatrix::from_columns(vec![faces(["H", "T", "T"]), faces(["H", "H", "T"])])
    }

    #[test]
    fn layout_parses_names_and_short_forms() {
        assert_eq!("wide".parse::<Layout>().unwrap(), Layout::Wide);
        assert_eq!("N".parse::<Layout>().unwrap(), Layout::Narrow);
        assert_eq!(Layout::try_from("Narrow").unwrap(), Layout::Narrow);
        assert!(matches!(
            "X".parse::<Layout>(),
            Err(MonteCarloError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn columns_transpose_into_trial_rows() {
        let matrix = sample_matrix();
        assert_eq!(matrix.shape(), (3, 2));
        assert_eq!(matrix.row(2).unwrap(), faces(["T", "H"]).as_slice());
        assert_eq!(matrix.cell(3, 1), Some(&Face::from("T")));
        assert_eq!(matrix.cell(0, 1), None);
        assert_eq!(matrix.cell(1, 3), None);
        let second: Vec<&Face> = matrix.column(2).collect();
        assert_eq!(second.len(), 3);
        assert_eq!(second[0], &Face::from("H"));
    }

    #[test]
    fn narrow_rows_are_trial_major() {
        let narrow = sample_matrix().narrow();
        let keys: Vec<(usize, usize)> = narrow.rows().iter().map(|r| (r.roll, r.die)).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)]);
        assert_eq!(narrow.face(2, 1), Some(&Face::from("T")));
        assert_eq!(narrow.face(4, 1), None);
        assert_eq!(narrow.face(usize::MAX, 1), None);
        assert_eq!(narrow.face(0, 1), None);
        assert_eq!(narrow.columns(), ["Roll", "Dice", "Face"]);
    }

    #[test]
    fn wide_narrow_round_trip_preserves_cells() {
        let matrix = sample_matrix();
        let wide = matrix.wide();
        let back = wide.to_narrow().to_wide();
        assert_eq!(back, wide);
        assert_eq!(back.to_matrix(), matrix);
    }

    #[test]
    fn fingerprint_tracks_contents() {
        let matrix = sample_matrix();
        assert_eq!(matrix.fingerprint(), sample_matrix().fingerprint());
        let other = TrialMatrix::from_rows(vec![faces(["T", "T"])]).unwrap();
        assert_ne!(matrix.fingerprint(), other.fingerprint());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(
            TrialMatrix::from_rows(vec![faces(["H", "T"]), faces(["H"])]),
            Err(MonteCarloError::RaggedRows {
                row: 2,
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            TrialMatrix::from_rows(Vec::new()),
            Err(MonteCarloError::NoDice)
        ));
        assert!(matches!(
            TrialMatrix::from_rows(vec![Vec::new()]),
            Err(MonteCarloError::NoDice)
        ));
    }

    #[test]
    fn views_serialize_with_layout_tag() {
        let view = sample_matrix().project(Layout::Narrow);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["layout"], "narrow");
        assert_eq!(json["table"]["rows"][0]["Roll"], 1);
        assert_eq!(view.into_wide().shape(), (3, 2));
    }
}
