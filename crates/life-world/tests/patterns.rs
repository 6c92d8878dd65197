use life_core::{Cell, Position};
use life_world::{Pattern, Universe};

fn live_cells(universe: &Universe) -> Vec<Position> {
    let width = universe.width();
    universe
        .render()
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Cell::Alive)
        .map(|(i, _)| Position::new(i as u32 % width, i as u32 / width))
        .collect()
}

fn board_with(pattern: &Pattern, width: u32, height: u32, col: u32, row: u32) -> Universe {
    let mut universe = Universe::dead(width, height).unwrap();
    universe.place(pattern, col, row).unwrap();
    universe
}

#[test]
fn test_blinker_oscillates_with_period_two() {
    let mut universe = board_with(&Pattern::blinker(), 7, 7, 2, 3);
    let start = universe.render().to_vec();
    assert_eq!(
        live_cells(&universe),
        vec![Position::new(2, 3), Position::new(3, 3), Position::new(4, 3)]
    );

    universe.tick();
    assert_eq!(
        live_cells(&universe),
        vec![Position::new(3, 2), Position::new(3, 3), Position::new(3, 4)]
    );

    universe.tick();
    assert_eq!(universe.render(), start.as_slice());
    assert_eq!(universe.generation(), 2);
}

#[test]
fn test_block_is_still_life() {
    let mut universe = board_with(&Pattern::block(), 6, 6, 2, 2);
    let start = universe.render().to_vec();

    for _ in 0..50 {
        universe.tick();
        assert_eq!(universe.render(), start.as_slice());
    }
}

#[test]
fn test_block_straddling_corner_is_still_life() {
    // Anchored on the last cell, the block occupies all four corners.
    let mut universe = board_with(&Pattern::block(), 6, 5, 5, 4);
    assert_eq!(
        live_cells(&universe),
        vec![
            Position::new(0, 0),
            Position::new(5, 0),
            Position::new(0, 4),
            Position::new(5, 4),
        ]
    );

    let start = universe.render().to_vec();
    for _ in 0..10 {
        universe.tick();
    }
    assert_eq!(universe.render(), start.as_slice());
}

#[test]
fn test_glider_translates_diagonally() {
    let mut universe = board_with(&Pattern::glider(), 10, 10, 1, 1);
    let expected = board_with(&Pattern::glider(), 10, 10, 2, 2);

    for _ in 0..4 {
        universe.tick();
    }
    assert_eq!(universe.render(), expected.render());
    assert_eq!(universe.live_count(), 5);
}

#[test]
fn test_glider_wraps_around_torus() {
    let size = 8;
    let mut universe = board_with(&Pattern::glider(), size, size, 0, 0);
    let start = universe.render().to_vec();

    // One diagonal step every four generations.
    for _ in 0..(4 * size) {
        universe.tick();
        assert_eq!(universe.live_count(), 5);
    }
    assert_eq!(universe.render(), start.as_slice());
}

#[test]
fn test_click_then_tick_kills_lonely_cell() {
    let mut universe = Universe::dead(5, 5).unwrap();
    universe.click(2, 2).unwrap();
    assert_eq!(universe.live_count(), 1);

    universe.tick();
    assert_eq!(universe.live_count(), 0);
}

#[test]
fn test_full_board_dies_out() {
    // Every cell sees eight live neighbors, so all of them die.
    let mut universe = Universe::new(6, 6, 1.0).unwrap();
    universe.tick();
    assert_eq!(universe.live_count(), 0);
}
