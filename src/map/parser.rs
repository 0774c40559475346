//! Level parsing functionality for converting raw board layouts into structured data.

use glam::IVec2;

use crate::constants::MapTile;
use crate::entity::EntityKind;
use crate::error::ParseError;

/// An entity to spawn when a level is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: EntityKind,
    pub position: IVec2,
}

/// Represents the parsed data from a raw level layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLevel {
    pub width: usize,
    pub height: usize,
    /// Row-major terrain, `y * width + x`.
    pub tiles: Vec<MapTile>,
    /// Initial entities, in reading order.
    pub placements: Vec<Placement>,
    /// The player's starting cell.
    pub player_start: IVec2,
}

impl ParsedLevel {
    pub fn terrain_at(&self, pos: IVec2) -> Option<MapTile> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        self.tiles.get(pos.y as usize * self.width + pos.x as usize).copied()
    }
}

/// Parser for converting raw level layouts into structured level data.
pub struct LevelParser;

impl LevelParser {
    /// Parses a single character into its terrain and the entity standing on it, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownCharacter`] for characters outside the level alphabet.
    pub fn parse_character(c: char) -> Result<(MapTile, Option<EntityKind>), ParseError> {
        match c {
            '#' => Ok((MapTile::Wall, None)),
            '.' | ' ' => Ok((MapTile::Floor, None)),
            'o' => Ok((MapTile::Goal, None)),
            'D' => Ok((MapTile::Door, None)),
            '@' => Ok((MapTile::Floor, Some(EntityKind::Player))),
            '+' => Ok((MapTile::Goal, Some(EntityKind::Player))),
            'c' => Ok((MapTile::Floor, Some(EntityKind::Crate))),
            '*' => Ok((MapTile::Goal, Some(EntityKind::Crate))),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw level layout, one string per row.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is empty, rows differ in width, a character is unknown, or the level does not
    /// contain exactly one player.
    pub fn parse_level<S: AsRef<str>>(rows: &[S]) -> Result<ParsedLevel, ParseError> {
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(ParseError::EmptyLevel);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut placements = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in row.chars().enumerate() {
                let (tile, kind) = Self::parse_character(character)?;
                tiles.push(tile);
                if let Some(kind) = kind {
                    placements.push(Placement {
                        kind,
                        position: IVec2::new(x as i32, y as i32),
                    });
                }
            }
        }

        let mut players = placements.iter().filter(|p| p.kind == EntityKind::Player);
        let player_start = match (players.next(), players.count()) {
            (Some(player), 0) => player.position,
            (None, _) => return Err(ParseError::InvalidPlayerCount(0)),
            (Some(_), extra) => return Err(ParseError::InvalidPlayerCount(extra + 1)),
        };

        Ok(ParsedLevel {
            width,
            height: rows.len(),
            tiles,
            placements,
            player_start,
        })
    }

    /// Parses a newline-separated layout. Trailing carriage returns and blank trailing lines are ignored.
    pub fn parse_str(layout: &str) -> Result<ParsedLevel, ParseError> {
        let mut rows: Vec<&str> = layout.lines().map(|line| line.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        Self::parse_level(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_LEVEL;

    #[test]
    fn test_parse_character() {
        assert!(matches!(LevelParser::parse_character('#').unwrap(), (MapTile::Wall, None)));
        assert!(matches!(LevelParser::parse_character('.').unwrap(), (MapTile::Floor, None)));
        assert!(matches!(
            LevelParser::parse_character('*').unwrap(),
            (MapTile::Goal, Some(EntityKind::Crate))
        ));

        // Test invalid character
        assert!(LevelParser::parse_character('Z').is_err());
    }

    #[test]
    fn test_parse_default_level() {
        let parsed = LevelParser::parse_level(&RAW_LEVEL).unwrap();

        assert_eq!(parsed.width, 12);
        assert_eq!(parsed.height, 6);
        assert_eq!(parsed.tiles.len(), 72);
        assert_eq!(parsed.player_start, IVec2::new(1, 2));
    }
}
