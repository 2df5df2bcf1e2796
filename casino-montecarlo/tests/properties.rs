//! Property checks over randomly generated dice and games.

use casino_montecarlo::{Die, Face, Game, RollRng};
use proptest::prelude::*;

// Distinct integer faces with a weight per face, at least one positive.
fn weighted_faces() -> impl Strategy<Value = Vec<(i64, f64)>> {
    prop::collection::btree_set(-50_i64..50, 1..8)
        .prop_flat_map(|set| {
            let len = set.len();
            (
                Just(set.into_iter().collect::<Vec<_>>()),
                prop::collection::vec(0.0_f64..10.0, len),
            )
        })
        .prop_map(|(faces, mut weights)| {
            if weights.iter().all(|w| *w == 0.0) {
                weights[0] = 1.0;
            }
            faces.into_iter().zip(weights).collect()
        })
}

fn build_die(spec: &[(i64, f64)]) -> Die {
    let mut die = Die::new(spec.iter().map(|(face, _)| *face)).unwrap();
    for (face, weight) in spec {
        die.change_weight(*face, *weight).unwrap();
    }
    die
}

proptest! {
    /// Every sample belongs to the declared faces.
    #[test]
    fn samples_stay_in_domain(spec in weighted_faces(), n in 0_usize..200, seed in any::<u64>()) {
        let die = build_die(&spec);
        let rolls = die.sample_with(n, &mut RollRng::from_user_seed(seed)).unwrap();
        prop_assert_eq!(rolls.len(), n);
        prop_assert!(rolls.iter().all(|face| die.contains(face)));
    }

    /// Re-weighting one face leaves every other weight alone, and a zero
    /// weight removes that face from later samples.
    #[test]
    fn reweighting_is_local(spec in weighted_faces(), pick in any::<prop::sample::Index>(), seed in any::<u64>()) {
        prop_assume!(spec.len() > 1);
        let mut die = build_die(&spec);
        let idx = pick.index(spec.len());
        let target = spec[idx].0;
        prop_assume!(spec.iter().enumerate().any(|(i, (_, w))| i != idx && *w > 0.0));

        let before = die.weights().to_vec();
        die.change_weight(target, 0).unwrap();
        for (i, weight) in die.weights().iter().enumerate() {
            if i == idx {
                prop_assert_eq!(*weight, 0.0);
            } else {
                prop_assert_eq!(*weight, before[i]);
            }
        }
        let rolls = die.sample_with(300, &mut RollRng::from_user_seed(seed)).unwrap();
        prop_assert!(!rolls.contains(&Face::from(target)));
    }

    /// Shape, round trip, jackpot bounds, and combination totals of any play.
    #[test]
    fn played_games_are_consistent(
        specs in prop::collection::vec(weighted_faces(), 1..5),
        trials in 1_i64..60,
        seed in any::<u64>(),
    ) {
        let mut game = Game::new(specs.iter().map(|spec| build_die(spec)));
        game.play_with(trials, &mut RollRng::from_user_seed(seed)).unwrap();
        let expected_trials = usize::try_from(trials).unwrap();

        let matrix = game.matrix().unwrap();
        prop_assert_eq!(matrix.shape(), (expected_trials, specs.len()));

        let wide = game.wide().unwrap();
        prop_assert_eq!(&wide.to_narrow().to_wide(), &wide);
        prop_assert_eq!(&wide.to_matrix(), matrix);

        let analyzer = game.analyzer();
        let jackpots = analyzer.jackpot().unwrap();
        prop_assert!(jackpots <= expected_trials);
        let combos = analyzer.combo().unwrap();
        prop_assert_eq!(combos.total(), expected_trials);
        prop_assert!(combos.entries().windows(2).all(|pair| pair[0].count <= pair[1].count));
    }

    /// Negative and zero trial counts never produce results.
    #[test]
    fn non_positive_trials_rejected(trials in -100_i64..=0) {
        let mut game = Game::new([Die::new(["H", "T"]).unwrap()]);
        prop_assert!(game.play(trials).is_err());
        prop_assert!(!game.is_played());
    }
}
