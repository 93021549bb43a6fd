use chumsky::error::Simple;
use chumsky::primitive::{choice, end, just, none_of};
use chumsky::text::{self, TextParser};
use chumsky::Parser;
use solver::Player;

use crate::{Node, ParityGame, SolRow};

fn number() -> impl Parser<char, usize, Error = Simple<char>> + Clone {
    text::int(10)
        .try_map(|n: String, span| n.parse::<usize>().map_err(|e| Simple::custom(span, e.to_string())))
        .padded()
}

fn player() -> impl Parser<char, Player, Error = Simple<char>> + Clone {
    choice((just('0').to(Player::P0), just('1').to(Player::P1)))
}

/// Parses the rows following a `<keyword> <number>;` header line.
fn file<T>(
    keyword: &'static str,
    row: impl Parser<char, T, Error = Simple<char>>,
) -> impl Parser<char, Vec<T>, Error = Simple<char>> {
    let header = just(keyword).padded().then(number()).then(just(';')).then(text::newline());

    // Anything after the last field, like a vertex name, is ignored.
    let comment = none_of(";").repeated();
    let rows = row.then_ignore(comment).then_ignore(just(';')).separated_by(text::newline()).allow_trailing();

    header.ignore_then(rows).then_ignore(text::whitespace()).then_ignore(end())
}

pub fn parse_parity_game(source: &str) -> Result<ParityGame, Vec<Simple<char>>> {
    let successors = number().separated_by(just(',').padded()).at_least(1);
    let row = number().then(number()).then(player()).then(successors);
    let row = row.map(|(((id, priority), player), successors)| Node {
        id,
        priority,
        player,
        successors,
    });

    file("parity", row).map(|nodes| ParityGame { nodes }).parse(source)
}

pub fn parse_parity_sol(source: &str) -> Result<Vec<SolRow>, Vec<Simple<char>>> {
    let row = number().then(player()).then(number().or_not());
    let row = row.map(|((id, winner), strategy)| SolRow { id, winner, strategy });

    file("paritysol", row).parse(source)
}
