use solver::liftable::{SetWorklist, StackWorklist};
use solver::{Player, Preprocessed, SmallProgressMeasures, Solver, VertexId, Zielonka};

use crate::{load_arena, parity_game_to_arena, parse_parity_game, parse_parity_sol};

fn solvers() -> Vec<Box<dyn Solver>> {
    vec![
        Box::new(Zielonka::<StackWorklist>::new()),
        Box::new(Zielonka::<SetWorklist>::big_step()),
        Box::new(SmallProgressMeasures::<StackWorklist>::new()),
        Box::new(Preprocessed::new(Zielonka::<SetWorklist>::new())),
        Box::new(Preprocessed::new(SmallProgressMeasures::<SetWorklist>::new())),
    ]
}

fn run_test(input: &str, sol: &str) {
    let game = parse_parity_game(input).unwrap();
    let (arena, ids) = parity_game_to_arena(&game).unwrap();
    let sol = parse_parity_sol(sol).unwrap();

    assert_eq!(sol.len(), arena.vertex_count());

    for solver in solvers() {
        let solution = solver.solve(&arena).unwrap();
        solution.check(&arena).unwrap();

        for row in &sol {
            let v = ids[&row.id];
            assert_eq!(solution.winner(v), row.winner, "Node {}", row.id);
            if let Some(next) = row.strategy {
                assert_eq!(solution.strategy_of(v), Some(ids[&next]), "Node {}", row.id);
            }
        }
    }
}

macro_rules! declare_test {
    ($($name:ident),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let input = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/", stringify!($name)));
                let sol = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/", stringify!($name), ".sol"));
                run_test(input, sol)
            }
        )*
    };
}

#[test]
fn all() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/");
    for e in std::fs::read_dir(dir).unwrap() {
        let e = e.unwrap();

        let name = e.file_name().into_string().unwrap();
        let path = e.path();
        if name == ".gitignore" || path.extension() == Some("sol".as_ref()) {
            continue;
        }

        let input = std::fs::read_to_string(&path).unwrap();
        let sol = std::fs::read_to_string(path.with_extension("sol")).unwrap();

        if let Err(e) = std::panic::catch_unwind(|| run_test(&input, &sol)) {
            eprintln!("Test {name} failed");
            std::panic::resume_unwind(e);
        }
    }
}

declare_test! {
    small,
    ladder,
    named,
    escape,
    selfloop,
    twocycle,
    scattered,
}

#[test]
fn sparse_ids() {
    let game = parse_parity_game("parity 30;\n10 2 0 20,30 \"start\";\n20 5 1 10,20;\n30 4 1 10;\n").unwrap();
    assert_eq!(game.nodes.len(), 3);
    assert_eq!(game.nodes[0].successors, [20, 30]);

    let (arena, ids) = parity_game_to_arena(&game).unwrap();
    assert_eq!(ids[&10], VertexId(0));
    assert_eq!(ids[&30], VertexId(2));
    assert_eq!(arena.player_of(ids[&20]), Player::P1);
    assert_eq!(arena.successors_of(ids[&10]).collect::<Vec<_>>(), [VertexId(1), VertexId(2)]);
}

#[test]
fn sol_rows() {
    let sol = parse_parity_sol("paritysol 2;\n0 1 3;\n3 0;\n").unwrap();
    assert_eq!(sol.len(), 2);
    assert_eq!((sol[0].id, sol[0].winner, sol[0].strategy), (0, Player::P1, Some(3)));
    assert_eq!((sol[1].id, sol[1].winner, sol[1].strategy), (3, Player::P0, None));
}

#[test]
fn bad_input() {
    assert!(parse_parity_game("parity 1;\n0 1 2 0;\n").is_err());
    assert!(parse_parity_game("parity 1;\n0 1 0;\n").is_err());
    assert!(parse_parity_game("0 1 0 0;\n").is_err());

    let dangling = parse_parity_game("parity 1;\n0 1 0 5;\n").unwrap();
    assert!(parity_game_to_arena(&dangling).is_err());

    let twice = parse_parity_game("parity 1;\n0 1 0 0;\n0 2 1 0;\n").unwrap();
    assert!(parity_game_to_arena(&twice).is_err());
}

#[test]
fn load_from_disk() {
    let (arena, ids) = load_arena(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/ladder")).unwrap();
    assert_eq!(arena.vertex_count(), 8);
    assert_eq!(arena.max_priority(), 7);
    assert_eq!(ids.len(), 8);

    assert!(load_arena(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/missing")).is_err());

    let (arena, ids) = load_arena(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/scattered")).unwrap();
    assert_eq!(arena.vertex_count(), 24);
    assert_eq!(arena.max_priority(), 1000001);
    assert_eq!(arena.priority_of(ids[&29]), 1000000);
}
