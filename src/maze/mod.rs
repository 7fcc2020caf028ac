pub mod generator;
pub mod tile;

use std::io::{BufRead, Write};
use std::ops::{Index, IndexMut};

pub use tile::Tile;

use crate::error::MazeError;
use crate::geometry::{self, Location};

/// An immutable rectangular grid of [`Tile`]s plus its unique start and end
/// coordinates (`spec.md` §3). Produced by [`generator`] or [`Maze::parse`],
/// consumed read-only by the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    tiles: Vec<Tile>,
    width: u8,
    height: u8,
    start: (u8, u8),
    end: (u8, u8),
}

impl Maze {
    /// Builds a maze already filled with `fill`, with `start`/`end` written
    /// in. Used by the generator; not part of the external parsing path.
    pub fn blank(width: u8, height: u8, fill: Tile, start: (u8, u8), end: (u8, u8)) -> Self {
        let mut tiles = vec![fill; width as usize * height as usize];
        let maze_is_empty = width == 0 || height == 0;
        if !maze_is_empty {
            tiles[start.1 as usize * width as usize + start.0 as usize] = Tile::Start;
            tiles[end.1 as usize * width as usize + end.0 as usize] = Tile::End;
        }
        Maze {
            tiles,
            width,
            height,
            start,
            end,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn start(&self) -> (u8, u8) {
        self.start
    }

    pub fn end(&self) -> (u8, u8) {
        self.end
    }

    /// Zero width and height: the sentinel returned for a maze that failed
    /// to parse (`spec.md` §7).
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    pub fn coin_count(&self) -> usize {
        self.tiles.iter().filter(|t| **t == Tile::Coin).count()
    }

    pub fn is_in_bounds(&self, coord: (u8, u8)) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    pub fn in_bounds_loc(&self, loc: Location) -> bool {
        geometry::in_bounds(self.width, self.height, loc)
    }

    fn index_of(&self, coord: (u8, u8)) -> usize {
        coord.1 as usize * self.width as usize + coord.0 as usize
    }

    pub fn get(&self, coord: (u8, u8)) -> Tile {
        self.tiles[self.index_of(coord)]
    }

    /// Parses the text format from `spec.md` §6:
    /// ```text
    /// <W>
    /// <H>
    /// <row of exactly W chars> * H
    /// ```
    pub fn parse<R: BufRead>(mut reader: R) -> Result<Maze, MazeError> {
        let width = read_dimension(&mut reader)?;
        let height = read_dimension(&mut reader)?;

        if width == 0 || height == 0 || width > 254 || height > 254 {
            return Err(MazeError::SizeOutOfRange { width, height });
        }
        let width = width as u8;
        let height = height as u8;

        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        let mut start = None;
        let mut end = None;

        for y in 0..height {
            let mut line = String::new();
            let read = reader
                .read_line(&mut line)
                .map_err(|_| MazeError::InputTruncated)?;
            if read == 0 {
                return Err(MazeError::InputTruncated);
            }
            let line = line.trim_end_matches(['\n', '\r']);
            let bytes = line.as_bytes();
            if bytes.len() < width as usize {
                return Err(MazeError::InputTruncated);
            }

            for x in 0..width {
                let byte = bytes[x as usize];
                let tile = Tile::from_byte(byte).ok_or_else(|| MazeError::InputInvalid {
                    reason: format!("illegal character {:?} at ({x}, {y})", byte as char),
                })?;

                match tile {
                    Tile::Start if start.is_some() => {
                        return Err(MazeError::InputInvalid {
                            reason: "more than one start tile".into(),
                        });
                    }
                    Tile::Start => start = Some((x, y)),
                    Tile::End if end.is_some() => {
                        return Err(MazeError::InputInvalid {
                            reason: "more than one end tile".into(),
                        });
                    }
                    Tile::End => end = Some((x, y)),
                    _ => {}
                }

                tiles.push(tile);
            }
        }

        let start = start.ok_or_else(|| MazeError::InputInvalid {
            reason: "missing start tile".into(),
        })?;
        let end = end.ok_or_else(|| MazeError::InputInvalid {
            reason: "missing end tile".into(),
        })?;

        Ok(Maze {
            tiles,
            width,
            height,
            start,
            end,
        })
    }

    /// Writes the maze's byte representation, in the same format accepted
    /// by [`Maze::parse`].
    pub fn write_text(&self, mut out: impl Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.width)?;
        writeln!(out, "{}", self.height)?;
        for y in 0..self.height {
            let mut row = Vec::with_capacity(self.width as usize);
            for x in 0..self.width {
                row.push(self.get((x, y)).to_byte());
            }
            out.write_all(&row)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

fn read_dimension<R: BufRead>(reader: &mut R) -> Result<u32, MazeError> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|_| MazeError::InputTruncated)?;
    if read == 0 {
        return Err(MazeError::InputTruncated);
    }
    line.trim()
        .parse()
        .map_err(|_| MazeError::InputInvalid {
            reason: format!("expected an integer dimension, got {line:?}"),
        })
}

impl Index<(u8, u8)> for Maze {
    type Output = Tile;

    fn index(&self, coord: (u8, u8)) -> &Tile {
        &self.tiles[coord.1 as usize * self.width as usize + coord.0 as usize]
    }
}

impl IndexMut<(u8, u8)> for Maze {
    fn index_mut(&mut self, coord: (u8, u8)) -> &mut Tile {
        let width = self.width as usize;
        &mut self.tiles[coord.1 as usize * width + coord.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(text: &str) -> Maze {
        Maze::parse(text.as_bytes()).expect("maze should parse")
    }

    #[test]
    fn parses_trivial_corridor() {
        let maze = sample("5\n3\n#####\no  _#\n#####\n");
        assert_eq!(maze.width(), 5);
        assert_eq!(maze.height(), 3);
        assert_eq!(maze.start(), (0, 1));
        assert_eq!(maze.end(), (3, 1));
        assert_eq!(maze.get((0, 0)), Tile::Wall);
        assert_eq!(maze.get((1, 1)), Tile::Open);
    }

    #[test]
    fn rejects_illegal_character() {
        let err = Maze::parse("3\n1\nx#o\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MazeError::InputInvalid { .. }));
    }

    #[test]
    fn rejects_truncated_stream() {
        let err = Maze::parse("3\n3\n###\no_#\n".as_bytes()).unwrap_err();
        assert_eq!(err, MazeError::InputTruncated);
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let err = Maze::parse("255\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MazeError::SizeOutOfRange { .. }));
    }

    #[test]
    fn rejects_missing_start_or_end() {
        let err = Maze::parse("3\n1\n# #\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MazeError::InputInvalid { .. }));
    }

    #[test]
    fn rejects_duplicate_start() {
        let err = Maze::parse("3\n1\noo_\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MazeError::InputInvalid { .. }));
    }

    #[test]
    fn write_text_roundtrips_through_parse() {
        let maze = sample("5\n3\n#####\no $_#\n#####\n");
        let mut buf = Vec::new();
        maze.write_text(&mut buf).unwrap();
        let reparsed = Maze::parse(buf.as_slice()).unwrap();
        assert_eq!(maze, reparsed);
    }
}
