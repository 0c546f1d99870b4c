use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::message::Message;

/// Every glyph is exactly one week tall: row 0 is Sunday, row 6 is Saturday.
pub const GLYPH_HEIGHT: usize = 7;

/// Pixel matrix for one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    ch: char,
    rows: [Vec<bool>; GLYPH_HEIGHT],
}

impl Glyph {
    /// Build a glyph from row art where `#` is on and anything else is off.
    fn from_art(ch: char, art: [&str; GLYPH_HEIGHT]) -> Self {
        let rows = art.map(|row| row.chars().map(|c| c == '#').collect::<Vec<_>>());
        Self { ch, rows }
    }

    pub fn ch(&self) -> char {
        self.ch
    }

    /// Number of columns (weeks) the glyph occupies
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[Vec<bool>; GLYPH_HEIGHT] {
        &self.rows
    }
}

/// Static character → glyph mapping
#[derive(Debug)]
pub struct GlyphTable {
    glyphs: BTreeMap<char, Glyph>,
}

static STANDARD: Lazy<GlyphTable> = Lazy::new(GlyphTable::build_standard);

impl GlyphTable {
    /// The built-in table: A–Z, 0–9, space and a few symbols.
    pub fn standard() -> &'static GlyphTable {
        &STANDARD
    }

    pub fn lookup(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn supports(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Supported characters in sorted order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Width in weeks of a composed message: glyph widths plus one gap between
    /// consecutive supported characters. Unsupported characters count for nothing.
    pub fn message_width(&self, message: &Message) -> usize {
        let (sum, count) = message
            .chars()
            .filter_map(|c| self.lookup(c))
            .fold((0usize, 0usize), |(sum, count), g| (sum + g.width(), count + 1));
        sum + count.saturating_sub(1)
    }

    fn build_standard() -> Self {
        let glyphs = STANDARD_ART
            .iter()
            .map(|(ch, art)| (*ch, Glyph::from_art(*ch, *art)))
            .collect();
        Self { glyphs }
    }
}

#[rustfmt::skip]
const STANDARD_ART: &[(char, [&str; GLYPH_HEIGHT])] = &[
    ('A', [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('B', ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."]),
    ('C', [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', ["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."]),
    ('E', ["#####", "#....", "#....", "####.", "#....", "#....", "#####"]),
    ('F', ["#####", "#....", "#....", "####.", "#....", "#....", "#...."]),
    ('G', [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".###."]),
    ('H', ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('I', ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "#####"]),
    ('J', ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."]),
    ('K', ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"]),
    ('L', ["#....", "#....", "#....", "#....", "#....", "#....", "#####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#...#", "#...#", "#...#", "#...#"]),
    ('N', ["#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#", "#...#"]),
    ('O', [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('P', ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."]),
    ('Q', [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"]),
    ('R', ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"]),
    ('S', [".####", "#....", "#....", ".###.", "....#", "....#", "####."]),
    ('T', ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('U', ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('V', ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."]),
    ('W', ["#...#", "#...#", "#...#", "#...#", "#.#.#", "##.##", "#...#"]),
    ('X', ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('Y', ["#...#", ".#.#.", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('Z', ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"]),
    ('0', [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."]),
    ('1', [".#.", "##.", ".#.", ".#.", ".#.", ".#.", "###"]),
    ('2', [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', ["####.", "....#", "....#", ".###.", "....#", "....#", "####."]),
    ('4', ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."]),
    ('5', ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    ('6', [".###.", "#....", "#....", "####.", "#...#", "#...#", ".###."]),
    ('7', ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    ('8', [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    ('9', [".###.", "#...#", "#...#", ".####", "....#", "....#", ".###."]),
    (' ', ["...", "...", "...", "...", "...", "...", "..."]),
    ('!', ["#", "#", "#", "#", "#", ".", "#"]),
    ('.', [".", ".", ".", ".", ".", ".", "#"]),
    ('-', ["...", "...", "...", "###", "...", "...", "..."]),
    ('?', [".###.", "#...#", "....#", "...#.", "..#..", ".....", "..#.."]),
    ('+', [".....", "..#..", "..#..", "#####", "..#..", "..#..", "....."]),
    ('#', [".#.#.", ".#.#.", "#####", ".#.#.", "#####", ".#.#.", ".#.#."]),
];
