use pushgrid::input::{process_key_events, Bindings, FrameInput, GameCommand, Key, KeyEvent};
use pushgrid::map::direction::Direction;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_single_press_moves() {
    let bindings = Bindings::default();

    let input = process_key_events(&bindings, &[KeyEvent::Pressed(Key::Left)]);
    assert_that(&input.movement).is_equal_to(Some(Direction::Left));
    assert_that(&input.commands.is_empty()).is_true();
}

#[test]
fn test_first_direction_wins() {
    let bindings = Bindings::default();

    let input = process_key_events(
        &bindings,
        &[
            KeyEvent::Pressed(Key::W),
            KeyEvent::Pressed(Key::Right),
            KeyEvent::Pressed(Key::Down),
        ],
    );
    assert_that(&input.movement).is_equal_to(Some(Direction::Up));
}

#[test]
fn test_releases_and_empty_frames_do_nothing() {
    let bindings = Bindings::default();

    assert_that(&process_key_events(&bindings, &[]).is_empty()).is_true();
    assert_that(&process_key_events(&bindings, &[KeyEvent::Released(Key::Up)]).is_empty()).is_true();
}

#[test]
fn test_commands_keep_press_order() {
    let bindings = Bindings::default();

    let input = process_key_events(
        &bindings,
        &[
            KeyEvent::Pressed(Key::R),
            KeyEvent::Pressed(Key::A),
            KeyEvent::Pressed(Key::Q),
        ],
    );

    assert_that(&input.movement).is_equal_to(Some(Direction::Left));
    assert_that(&input.commands).is_equal_to(vec![GameCommand::ResetLevel, GameCommand::Exit]);
    assert_that(&input.contains(GameCommand::MovePlayer(Direction::Left))).is_true();
    assert_that(&input.contains(GameCommand::MovePlayer(Direction::Right))).is_false();
}

#[test]
fn test_every_key_is_bound_by_default() {
    let bindings = Bindings::default();
    for key in Key::iter() {
        assert_that(&bindings.get(key)).is_some();
    }
}

#[test]
fn test_rebinding() {
    let mut bindings = Bindings::default();

    let previous = bindings.bind(Key::R, GameCommand::Exit);
    assert_that(&previous).is_equal_to(Some(GameCommand::ResetLevel));

    bindings.unbind(Key::Up);
    let input = process_key_events(&bindings, &[KeyEvent::Pressed(Key::Up), KeyEvent::Pressed(Key::R)]);
    assert_that(&input).is_equal_to(FrameInput::command(GameCommand::Exit));
}
