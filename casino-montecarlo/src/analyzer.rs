//! Descriptive statistics over a played game.
//!
//! An [`Analyzer`] borrows its [`Game`] and recomputes every table from the
//! game's current results on each call. Analysis never changes the game; the
//! only game state it consults besides the results is the remembered layout,
//! which selects the orientation of [`Analyzer::face_count`].

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::error::Result;
use crate::face::{Face, FaceKind};
use crate::game::Game;
use crate::layout::{Layout, TrialMatrix};
use crate::numbers::ratio;

/// The ordered outcomes of one trial, used as a frequency key.
///
/// Identity is positional: `H T` and `T H` are different combinations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Combination(SmallVec<[Face; 4]>);

impl Combination {
    #[must_use]
    pub fn new(faces: &[Face]) -> Self {
        Self(faces.iter().cloned().collect())
    }

    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.0
    }

    /// The outcomes joined by single spaces, e.g. `"H T"`.
    ///
    /// Labels that contain spaces can render identical signatures for
    /// different combinations; the combinations themselves stay distinct.
    #[must_use]
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, face) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

/// A combination with the number of trials that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboCount {
    pub combination: Combination,
    pub count: usize,
}

/// Distinct combinations with their counts, ascending by count.
///
/// Combinations with equal counts keep the order in which they first appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboTable {
    entries: Vec<ComboCount>,
    trials: usize,
}

impl ComboTable {
    fn tally(matrix: &TrialMatrix) -> Self {
        let mut slots: HashMap<Combination, usize> = HashMap::new();
        let mut entries: Vec<ComboCount> = Vec::new();
        for row in matrix.rows() {
            let combination = Combination::new(row);
            match slots.get(&combination) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    slots.insert(combination.clone(), entries.len());
                    entries.push(ComboCount {
                        combination,
                        count: 1,
                    });
                }
            }
        }
        entries.sort_by_key(|entry| entry.count);
        Self {
            entries,
            trials: matrix.trials(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ComboCount] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComboCount> + '_ {
        self.entries.iter()
    }

    /// Number of distinct combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts; equals the number of trials.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Count of the exact outcome sequence `faces`.
    #[must_use]
    pub fn count(&self, faces: &[Face]) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.combination.faces() == faces)
            .map_or(0, |entry| entry.count)
    }

    /// Count of every combination rendering to `signature`.
    #[must_use]
    pub fn count_signature(&self, signature: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.combination.signature() == signature)
            .map(|entry| entry.count)
            .sum()
    }

    /// Share of trials that produced `faces`.
    #[must_use]
    pub fn relative_frequency(&self, faces: &[Face]) -> f64 {
        ratio(self.count(faces), self.trials)
    }

    /// The combination seen most often (the last entry).
    #[must_use]
    pub fn most_common(&self) -> Option<&ComboCount> {
        self.entries.last()
    }
}

/// Which entity each row of a [`FaceCountTable`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// One row per trial.
    PerRoll,
    /// One row per die.
    PerDie,
}

impl From<Layout> for Orientation {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Wide => Self::PerRoll,
            Layout::Narrow => Self::PerDie,
        }
    }
}

/// Counts of one roll's or one die's outcomes, aligned with
/// [`FaceCountTable::faces`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceCountRow {
    /// 1-based trial or die number.
    pub index: usize,
    pub counts: Vec<usize>,
}

fn count_row<'a>(
    columns: &HashMap<&Face, usize>,
    index: usize,
    outcomes: impl Iterator<Item = &'a Face>,
) -> FaceCountRow {
    let mut counts = vec![0; columns.len()];
    for face in outcomes {
        if let Some(&col) = columns.get(face) {
            counts[col] += 1;
        }
    }
    FaceCountRow { index, counts }
}

/// How often each face occurred, per roll or per die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceCountTable {
    orientation: Orientation,
    faces: Vec<Face>,
    rows: Vec<FaceCountRow>,
}

impl FaceCountTable {
    fn tally(matrix: &TrialMatrix, orientation: Orientation) -> Self {
        let faces: Vec<Face> = matrix
            .rows()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        let columns: HashMap<&Face, usize> =
            faces.iter().enumerate().map(|(idx, face)| (face, idx)).collect();
        let rows = match orientation {
            Orientation::PerRoll => matrix
                .rows()
                .enumerate()
                .map(|(idx, row)| count_row(&columns, idx + 1, row.iter()))
                .collect(),
            Orientation::PerDie => (1..=matrix.dice())
                .map(|die| count_row(&columns, die, matrix.column(die)))
                .collect(),
        };
        Self {
            orientation,
            faces,
            rows,
        }
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Column labels: every face seen in the results, in face order.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[must_use]
    pub fn rows(&self) -> &[FaceCountRow] {
        &self.rows
    }

    /// Count of `face` in row `index` (1-based); 0 when either is absent.
    #[must_use]
    pub fn count(&self, index: usize, face: &Face) -> usize {
        let Some(col) = self.faces.iter().position(|candidate| candidate == face) else {
            return 0;
        };
        self.rows
            .get(index.wrapping_sub(1))
            .map_or(0, |row| row.counts[col])
    }

    /// Column sums: total occurrences of each face across all rows.
    #[must_use]
    pub fn totals(&self) -> Vec<(Face, usize)> {
        self.faces
            .iter()
            .enumerate()
            .map(|(col, face)| {
                let total = self.rows.iter().map(|row| row.counts[col]).sum();
                (face.clone(), total)
            })
            .collect()
    }
}

/// Computes statistics over the results of a [`Game`].
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    game: &'a Game,
}

impl<'a> Analyzer<'a> {
    #[must_use]
    pub const fn new(game: &'a Game) -> Self {
        Self { game }
    }

    #[must_use]
    pub const fn game(&self) -> &'a Game {
        self.game
    }

    fn matrix(&self) -> Result<&'a TrialMatrix> {
        self.game.matrix()
    }

    /// Kind of value recorded in the first cell of the results.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MonteCarloError::NotPlayed`] before the game is played.
    pub fn face_kind(&self) -> Result<FaceKind> {
        let matrix = self.matrix()?;
        Ok(matrix.cell(1, 1).map_or(FaceKind::Text, Face::kind))
    }

    /// 1-based numbers of the trials in which every die showed the same face.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MonteCarloError::NotPlayed`] before the game is played.
    pub fn jackpot_rolls(&self) -> Result<Vec<usize>> {
        let matrix = self.matrix()?;
        Ok(matrix
            .rows()
            .enumerate()
            .filter(|(_, row)| row.windows(2).all(|pair| pair[0] == pair[1]))
            .map(|(idx, _)| idx + 1)
            .collect())
    }

    /// Number of trials in which every die showed the same face.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MonteCarloError::NotPlayed`] before the game is played.
    pub fn jackpot(&self) -> Result<usize> {
        self.jackpot_rolls().map(|rolls| rolls.len())
    }

    /// Distinct ordered combinations and their counts, ascending by count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MonteCarloError::NotPlayed`] before the game is played.
    pub fn combo(&self) -> Result<ComboTable> {
        self.matrix().map(ComboTable::tally)
    }

    /// Face counts oriented by the game's remembered layout: per roll when
    /// the game was last viewed wide (or never viewed), per die when it was
    /// last viewed narrow.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MonteCarloError::NotPlayed`] before the game is played.
    pub fn face_count(&self) -> Result<FaceCountTable> {
        self.face_count_by(self.game.layout().into())
    }

    /// Face counts with an explicit orientation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MonteCarloError::NotPlayed`] before the game is played.
    pub fn face_count_by(&self, orientation: Orientation) -> Result<FaceCountTable> {
        let matrix = self.matrix()?;
        Ok(FaceCountTable::tally(matrix, orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::die::Die;
    use crate::error::ErrorKind;
    use crate::face::faces;
    use pretty_assertions::assert_eq;

    fn coins_matrix() -> TrialMatrix {
        TrialMatrix::from_rows(vec![
            faces(["H", "H"]),
            faces(["H", "T"]),
            faces(["T", "T"]),
            faces(["H", "T"]),
        ])
        .unwrap()
    }

    #[test]
    fn unplayed_game_is_not_ready() {
        let game = Game::new([Die::new(["H", "T"]).unwrap()]);
        let analyzer = game.analyzer();
        assert_eq!(analyzer.jackpot().unwrap_err().kind(), ErrorKind::NotReady);
        assert_eq!(analyzer.combo().unwrap_err().kind(), ErrorKind::NotReady);
        assert_eq!(analyzer.face_count().unwrap_err().kind(), ErrorKind::NotReady);
        assert_eq!(analyzer.face_kind().unwrap_err().kind(), ErrorKind::NotReady);
    }

    #[test]
    fn combo_counts_ordered_sequences() {
        let table = ComboTable::tally(&coins_matrix());
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 4);
        assert_eq!(table.count(&faces(["H", "T"])), 2);
        assert_eq!(table.count(&faces(["T", "H"])), 0);
        assert_eq!(table.count_signature("T T"), 1);
        let signatures: Vec<String> = table.iter().map(|e| e.combination.signature()).collect();
        assert_eq!(signatures, vec!["H H", "T T", "H T"]);
        assert_eq!(table.most_common().unwrap().count, 2);
        assert!((table.relative_frequency(&faces(["H", "T"])) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn signatures_join_string_forms() {
        let combo = Combination::new(&[Face::from(1), Face::from(2.5), Face::from("x")]);
        assert_eq!(combo.signature(), "1 2.5 x");
    }

    #[test]
    fn labels_with_spaces_share_signatures_but_not_keys() {
        let matrix = TrialMatrix::from_rows(vec![
            faces(["a b", "c"]),
            faces(["a", "b c"]),
        ])
        .unwrap();
        let table = ComboTable::tally(&matrix);
        assert_eq!(table.len(), 2);
        assert_eq!(table.count_signature("a b c"), 2);
    }

    #[test]
    fn face_counts_per_roll_and_per_die() {
        let matrix = coins_matrix();
        let per_roll = FaceCountTable::tally(&matrix, Orientation::PerRoll);
        assert_eq!(per_roll.faces(), faces(["H", "T"]).as_slice());
        assert_eq!(per_roll.rows().len(), 4);
        assert_eq!(per_roll.count(1, &Face::from("H")), 2);
        assert_eq!(per_roll.count(3, &Face::from("H")), 0);

        let per_die = FaceCountTable::tally(&matrix, Orientation::PerDie);
        assert_eq!(per_die.rows().len(), 2);
        assert_eq!(per_die.rows()[0].counts, vec![3, 1]);
        assert_eq!(per_die.rows()[1].counts, vec![1, 3]);
        assert_eq!(
            per_die.totals(),
            vec![(Face::from("H"), 4), (Face::from("T"), 4)]
        );
        assert_eq!(per_die.count(9, &Face::from("H")), 0);
    }

    #[test]
    fn orientation_follows_layout() {
        assert_eq!(Orientation::from(Layout::Wide), Orientation::PerRoll);
        assert_eq!(Orientation::from(Layout::Narrow), Orientation::PerDie);
    }
}
