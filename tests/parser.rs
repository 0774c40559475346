use glam::IVec2;
use pretty_assertions::assert_eq;
use pushgrid::constants::{MapTile, RAW_LEVEL};
use pushgrid::entity::EntityKind;
use pushgrid::error::ParseError;
use pushgrid::map::parser::{LevelParser, Placement};

#[test]
fn test_parse_character() {
    let test_cases = [
        ('#', MapTile::Wall, None),
        ('.', MapTile::Floor, None),
        (' ', MapTile::Floor, None),
        ('o', MapTile::Goal, None),
        ('D', MapTile::Door, None),
        ('@', MapTile::Floor, Some(EntityKind::Player)),
        ('+', MapTile::Goal, Some(EntityKind::Player)),
        ('c', MapTile::Floor, Some(EntityKind::Crate)),
        ('*', MapTile::Goal, Some(EntityKind::Crate)),
    ];

    for (c, tile, kind) in test_cases {
        assert_eq!(LevelParser::parse_character(c), Ok((tile, kind)), "character {c:?}");
    }

    assert_eq!(LevelParser::parse_character('Z'), Err(ParseError::UnknownCharacter('Z')));
}

#[test]
fn test_parse_default_level() {
    let parsed = LevelParser::parse_level(&RAW_LEVEL).unwrap();

    assert_eq!((parsed.width, parsed.height), (12, 6));
    assert_eq!(parsed.player_start, IVec2::new(1, 2));
    assert_eq!(
        parsed.placements,
        vec![
            Placement {
                kind: EntityKind::Player,
                position: IVec2::new(1, 2)
            },
            Placement {
                kind: EntityKind::Crate,
                position: IVec2::new(2, 2)
            },
            Placement {
                kind: EntityKind::Crate,
                position: IVec2::new(3, 3)
            },
        ]
    );
    assert_eq!(parsed.terrain_at(IVec2::new(9, 2)), Some(MapTile::Goal));
    assert_eq!(parsed.terrain_at(IVec2::new(10, 5)), Some(MapTile::Door));
    assert_eq!(parsed.terrain_at(IVec2::new(0, 0)), Some(MapTile::Wall));
    assert_eq!(parsed.terrain_at(IVec2::new(12, 0)), None);
}

#[test]
fn test_parse_level_invalid_character() {
    let mut invalid = RAW_LEVEL;
    invalid[0] = "###########Z";

    let result = LevelParser::parse_level(&invalid);
    assert_eq!(result, Err(ParseError::UnknownCharacter('Z')));
}

#[test]
fn test_parse_level_errors() {
    assert_eq!(LevelParser::parse_level::<&str>(&[]), Err(ParseError::EmptyLevel));
    assert_eq!(LevelParser::parse_level(&[""]), Err(ParseError::EmptyLevel));
    assert_eq!(
        LevelParser::parse_level(&["@..", ".."]),
        Err(ParseError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        })
    );
    assert_eq!(LevelParser::parse_level(&["c.o"]), Err(ParseError::InvalidPlayerCount(0)));
    assert_eq!(LevelParser::parse_level(&["@.@", "..+"]), Err(ParseError::InvalidPlayerCount(3)));
}

#[test]
fn test_parse_str() {
    let parsed = LevelParser::parse_str("#####\r\n#@c*#\n#####\n\n").unwrap();

    assert_eq!((parsed.width, parsed.height), (5, 3));
    assert_eq!(parsed.placements.len(), 3);
    assert_eq!(parsed.terrain_at(IVec2::new(3, 1)), Some(MapTile::Goal));
}
