use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::liftable::{HybridWorklist, SetWorklist, StackWorklist};
use crate::{
    Arena, Player, Preprocessed, Set, SmallProgressMeasures, Solution, SolveError, Solver, Vertex,
    VertexId, Zielonka,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parses a game in the PGSolver format, with dense ids starting from 0.
pub fn parse_game(source: &str) -> Arena {
    let vertices = source
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| {
            let rest = line.strip_suffix(';').unwrap();
            let (id, rest) = rest.split_once(' ').unwrap();
            let (priority, rest) = rest.split_once(' ').unwrap();
            let (player, rest) = rest.split_once(' ').unwrap();
            let (successors, _) = rest.split_once(' ').unwrap_or((rest, ""));

            assert_eq!(id.parse::<usize>().unwrap(), i, "ids must be dense");
            let priority = priority.parse().unwrap();
            let player = if player == "0" { Player::P0 } else { Player::P1 };
            let successors = successors.split(',').map(|s| VertexId(s.parse().unwrap())).collect();
            Vertex { player, priority, successors }
        })
        .collect();

    Arena::new(vertices).unwrap()
}

pub fn random_arena(rng: &mut StdRng, size: usize, max_priority: usize, max_out: usize) -> Arena {
    let vertices = (0..size)
        .map(|_| {
            let out = rng.gen_range(1..=max_out);
            Vertex {
                player: if rng.gen_bool(0.5) { Player::P0 } else { Player::P1 },
                priority: rng.gen_range(0..=max_priority),
                successors: (0..out).map(|_| VertexId(rng.gen_range(0..size))).collect(),
            }
        })
        .collect();

    Arena::new(vertices).unwrap()
}

/// Checks that each player really wins its region with its strategy: the
/// opponent can't leave the region, and every cycle left inside it has a
/// maximum priority favouring the player.
pub fn verify(arena: &Arena, solution: &Solution) {
    if let Err(e) = solution.check(arena) {
        panic!("{e}");
    }

    for player in [Player::P0, Player::P1] {
        let region = solution.winning_region(player);

        for &v in region {
            for w in solution.moves_from(arena, v) {
                assert!(region.contains(&w), "{v:?} can escape the region of {player:?} to {w:?}");
            }
        }

        let bad = region.iter().copied().filter(|&v| Player::of_priority(arena.priority_of(v)) != player);
        for v in bad {
            let p = arena.priority_of(v);
            let mut seen = Set::default();
            let mut stack = vec![v];
            while let Some(u) = stack.pop() {
                for w in solution.moves_from(arena, u) {
                    assert_ne!(w, v, "{player:?} loses the cycle through {v:?}");
                    if arena.priority_of(w) <= p && seen.insert(w) {
                        stack.push(w);
                    }
                }
            }
        }
    }
}

fn boxed(solver: impl Solver + 'static) -> Box<dyn Solver> {
    Box::new(solver)
}

fn solvers() -> Vec<(&'static str, Box<dyn Solver>)> {
    vec![
        ("zielonka", boxed(Zielonka::<HybridWorklist>::new())),
        ("zielonka/set", boxed(Zielonka::<SetWorklist>::new())),
        ("zielonka/stack", boxed(Zielonka::<StackWorklist>::new())),
        ("big-step", boxed(Zielonka::<HybridWorklist>::big_step())),
        ("big-step/set", boxed(Zielonka::<SetWorklist>::big_step())),
        ("big-step/stack", boxed(Zielonka::<StackWorklist>::big_step())),
        ("spm", boxed(SmallProgressMeasures::<HybridWorklist>::new())),
        ("spm/set", boxed(SmallProgressMeasures::<SetWorklist>::new())),
        ("spm/stack", boxed(SmallProgressMeasures::<StackWorklist>::new())),
        ("preprocessed zielonka", boxed(Preprocessed::new(Zielonka::<HybridWorklist>::new()))),
        ("preprocessed big-step", boxed(Preprocessed::new(Zielonka::<HybridWorklist>::big_step()))),
        ("preprocessed spm", boxed(Preprocessed::new(SmallProgressMeasures::<HybridWorklist>::new()))),
    ]
}

fn winners(arena: &Arena, solution: &Solution) -> Vec<Player> {
    arena.vertices().map(|v| solution.winner(v)).collect_vec()
}

#[test]
fn even_self_loop() {
    init_logger();
    let arena = parse_game(
        "parity 0;
        0 2 1 0;",
    );

    for (name, solver) in solvers() {
        let solution = solver.solve(&arena).unwrap();
        verify(&arena, &solution);
        assert_eq!(solution.winner(VertexId(0)), Player::P0, "{name}");
        assert!(solution.strategy().is_empty(), "{name}");
    }
}

#[test]
fn alternating_cycle() {
    init_logger();
    let arena = parse_game(
        "parity 1;
        0 1 0 1;
        1 2 1 0;",
    );

    for (name, solver) in solvers() {
        let solution = solver.solve(&arena).unwrap();
        verify(&arena, &solution);
        assert_eq!(solution.winning_region(Player::P0).len(), 2, "{name}");
        assert_eq!(solution.strategy_of(VertexId(0)), Some(VertexId(1)), "{name}");
        assert_eq!(solution.strategy_of(VertexId(1)), None, "{name}");
    }
}

#[test]
fn choice_matters() {
    init_logger();
    // P0 at 0 must go to 2, where P1 can only loop on the even priority;
    // going to 1 lets P1 loop on 3 forever.
    let arena = parse_game(
        "parity 3;
        0 0 0 1,2;
        1 3 1 1,0;
        2 4 1 2;
        3 1 1 0,3;",
    );

    for (name, solver) in solvers() {
        let solution = solver.solve(&arena).unwrap();
        verify(&arena, &solution);
        assert_eq!(winners(&arena, &solution), [Player::P0, Player::P1, Player::P0, Player::P1], "{name}");
        assert_eq!(solution.strategy_of(VertexId(0)), Some(VertexId(2)), "{name}");
        assert_eq!(solution.strategy_of(VertexId(1)), Some(VertexId(1)), "{name}");
        assert_eq!(solution.strategy_of(VertexId(3)), Some(VertexId(3)), "{name}");
    }
}

#[test]
fn random_games_agree() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..150 {
        let size = rng.gen_range(1..=24);
        let max_priority = rng.gen_range(0..=6);
        let arena = random_arena(&mut rng, size, max_priority, 3);

        let expected = Zielonka::<HybridWorklist>::new().solve(&arena).unwrap();
        verify(&arena, &expected);

        for (name, solver) in solvers() {
            let solution = solver.solve(&arena).unwrap();
            verify(&arena, &solution);
            assert_eq!(winners(&arena, &solution), winners(&arena, &expected), "{name} in round {round}");
        }
    }
}

#[test]
fn long_chains_agree() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(42);

    // Mostly single successors, so preprocessing has chains to compress.
    for _ in 0..50 {
        let size = rng.gen_range(2..=40);
        let arena = random_arena(&mut rng, size, 5, 1);
        let plain = Zielonka::<HybridWorklist>::new().solve(&arena).unwrap();
        let pre = Preprocessed::new(Zielonka::<HybridWorklist>::new()).solve(&arena).unwrap();
        verify(&arena, &pre);
        assert_eq!(winners(&arena, &plain), winners(&arena, &pre));
    }
}

#[test]
fn repeated_solves_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    let arena = random_arena(&mut rng, 30, 7, 3);

    for (name, solver) in solvers() {
        let first = solver.solve(&arena).unwrap();
        let second = solver.solve(&arena).unwrap();
        verify(&arena, &second);
        assert_eq!(winners(&arena, &first), winners(&arena, &second), "{name}");
    }
}

#[test]
fn rejects_invalid_arenas() {
    let dead_end = vec![
        Vertex { player: Player::P0, priority: 0, successors: vec![VertexId(1)] },
        Vertex { player: Player::P1, priority: 1, successors: vec![] },
    ];
    assert_eq!(Arena::new(dead_end).unwrap_err(), SolveError::NoSuccessors { vertex: VertexId(1) });

    let dangling = vec![Vertex { player: Player::P0, priority: 0, successors: vec![VertexId(3)] }];
    assert_eq!(
        Arena::new(dangling).unwrap_err(),
        SolveError::UnknownSuccessor { vertex: VertexId(0), successor: VertexId(3) }
    );
}

#[test]
fn empty_arena() {
    let arena = Arena::new(Vec::new()).unwrap();
    for (name, solver) in solvers() {
        let solution = solver.solve(&arena).unwrap();
        assert!(solution.winning_region(Player::P0).is_empty(), "{name}");
        assert!(solution.winning_region(Player::P1).is_empty(), "{name}");
    }
}
