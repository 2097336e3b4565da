use serde::{Deserialize, Serialize};

use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    Classic,
    Blocks,
    Arrows,
    Dots,
}

struct SkinSymbols {
    skin: Skin,
    name: &'static str,
    head: char,
    body: char,
}

static SKINS: [SkinSymbols; 4] = [
    SkinSymbols { skin: Skin::Classic, name: "classic", head: 'O', body: 'o' },
    SkinSymbols { skin: Skin::Blocks, name: "blocks", head: '█', body: '▓' },
    SkinSymbols { skin: Skin::Arrows, name: "arrows", head: '>', body: '=' },
    SkinSymbols { skin: Skin::Dots, name: "dots", head: '@', body: '·' },
];

impl Skin {
    fn symbols(self) -> &'static SkinSymbols {
        &SKINS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.symbols().name
    }

    /// Head symbol. The arrows skin points the head where the snake goes.
    pub fn head_char(self, direction: Direction) -> char {
        match (self, direction) {
            (Skin::Arrows, Direction::Up) => '^',
            (Skin::Arrows, Direction::Down) => 'v',
            (Skin::Arrows, Direction::Left) => '<',
            (Skin::Arrows, Direction::Right) => '>',
            _ => self.symbols().head,
        }
    }

    pub fn body_char(self) -> char {
        self.symbols().body
    }

    pub fn next(self) -> Skin {
        SKINS[(self as usize + 1) % SKINS.len()].skin
    }
}

impl Default for Skin {
    fn default() -> Self {
        Skin::Classic
    }
}
