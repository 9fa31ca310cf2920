use anyhow::{Context, bail};
use sweeper_core::Coord2;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Mark(Coord2),
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r ROW COL   reveal a cell, or chord a revealed number
  f ROW COL   cycle flag / question mark on a hidden cell
  n           new board with the same settings
  h           this help
  q           quit";

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Mark(parse_coords(&mut words)?),
            "n" | "new" => Self::Reset,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => bail!("unknown command {other:?}, try h"),
        };

        if words.next().is_some() {
            bail!("too many arguments");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let row = words.next().context("missing row")?;
    let col = words.next().context("missing column")?;
    let row = row.parse().with_context(|| format!("bad row {row:?}"))?;
    let col = col.parse().with_context(|| format!("bad column {col:?}"))?;
    Ok((row, col))
}
