use std::thread;

use tilewave::prelude::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_logger() {
    let _ = env_logger::builder()
        // Include all events in tests
        .filter_level(log::LevelFilter::max())
        // Ensure events are captured by `cargo test`
        .is_test(true)
        // Ignore errors initializing the logger if tests race to configure it
        .try_init();
}

/// Tiles that may only sit next to an equal tile.
fn matching(n: u8, width: usize, height: usize) -> Wave<u8> {
    TileSet::new((0..n).collect())
        .wave_with(width, height, |a: &u8, b: &u8, _: Direction| a == b)
        .expect("failed to build wave")
}

fn entropies<T>(wave: &Wave<T>) -> Vec<usize> {
    wave.slots().map(Slot::entropy).collect()
}

#[test]
fn single_slot_always_collapses() {
    init_logger();

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut wave = TileSet::new(vec!['a', 'b'])
            .wave_with(1, 1, |_: &char, _: &char, _: Direction| false)
            .expect("failed to build wave");

        wave.collapse(1, &mut rng).expect("a lone slot cannot contradict");

        let slot = wave.slot(0, 0).unwrap();
        assert_eq!(slot.entropy(), 1);
        assert!(slot.module().unwrap() < 2);
        assert!(wave.is_collapsed());
    }
}

#[test]
fn matching_pair_agrees() {
    init_logger();

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut wave = matching(2, 2, 1);

        wave.collapse(4, &mut rng).expect("matching tiles never contradict");

        let left = wave.slot(0, 0).and_then(Slot::module);
        let right = wave.slot(1, 0).and_then(Slot::module);
        assert!(left.is_some());
        assert_eq!(left, right);
    }
}

#[test]
fn forced_contradiction_is_reported() {
    init_logger();

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        // nothing may ever be placed to the right of anything
        let mut wave = TileSet::new(vec!['a', 'b'])
            .wave_with(2, 1, |_: &char, _: &char, d: Direction| d != Direction::Right)
            .expect("failed to build wave");

        let err = wave.collapse(2, &mut rng).unwrap_err();

        assert_eq!(err, WaveError::Contradiction { x: 1, y: 0 });
        assert_eq!(err.to_string(), "no possible modules for slot (1, 0)");
        assert!(wave.slot(1, 0).unwrap().is_contradiction());
        assert_eq!(wave.slot(0, 0).unwrap().entropy(), 1);
    }
}

#[test]
fn contradiction_aborts_remaining_attempts() {
    init_logger();

    let mut rng = StdRng::seed_from_u64(21);
    // a column where nothing may sit below anything
    let mut wave = TileSet::new(vec![0u8, 1, 2])
        .wave_with(1, 6, |_: &u8, _: &u8, d: Direction| d != Direction::Down)
        .expect("failed to build wave");

    assert!(wave.collapse(100, &mut rng).is_err());

    let contradictions = wave.slots().filter(|s| s.is_contradiction()).count();
    assert_eq!(contradictions, 1);
}

#[test]
fn superpositions_only_shrink() {
    init_logger();

    let mut rng = StdRng::seed_from_u64(42);
    // each tile accepts itself and its successor to the right
    let mut wave = TileSet::new((0..4u8).collect())
        .wave_with(6, 6, |a: &u8, b: &u8, d: Direction| match d {
            Direction::Right => *b == *a || *b == (*a + 1) % 4,
            Direction::Left => *a == *b || *a == (*b + 1) % 4,
            _ => true,
        })
        .expect("failed to build wave");

    let mut before = entropies(&wave);
    let mut before_sets: Vec<Vec<ModuleId>> =
        wave.slots().map(|s| s.superposition().to_vec()).collect();

    for _ in 0..36 {
        if wave.collapse(1, &mut rng).is_err() {
            break;
        }

        let after = entropies(&wave);
        assert!(before.iter().zip(&after).all(|(b, a)| a <= b));

        for (slot, old) in wave.slots().zip(&before_sets) {
            assert!(slot.superposition().iter().all(|m| old.contains(m)));
        }

        before = after;
        before_sets = wave.slots().map(|s| s.superposition().to_vec()).collect();
    }
}

#[test]
fn attempts_are_cumulative() {
    init_logger();

    let mut rng = StdRng::seed_from_u64(8);
    let mut wave = TileSet::new(vec![0u8, 1])
        .wave_with(5, 5, |_: &u8, _: &u8, _: Direction| true)
        .expect("failed to build wave");

    wave.collapse(4, &mut rng).unwrap();
    assert_eq!(wave.slots().filter(|s| s.entropy() == 1).count(), 4);

    wave.collapse(4, &mut rng).unwrap();
    assert_eq!(wave.slots().filter(|s| s.entropy() == 1).count(), 8);

    // enough attempts to resolve every remaining slot; extra attempts are no-ops
    wave.collapse(30, &mut rng).unwrap();
    assert!(wave.is_collapsed());
    assert!(wave.slots().all(|s| s.entropy() == 1));
}

#[test]
fn initialize_restores_full_superposition() {
    init_logger();

    let mut rng = StdRng::seed_from_u64(2);
    let mut wave = matching(3, 3, 3);

    wave.collapse(1, &mut rng).unwrap();
    assert!(wave.is_collapsed());

    wave.initialize();
    assert!(!wave.is_collapsed());
    assert!(wave.slots().all(|s| s.superposition() == [0, 1, 2]));
}

#[test]
fn same_seed_same_grid() {
    init_logger();

    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut wave = TileSet::new((0..5u8).collect())
            .wave_with(8, 8, |a: &u8, b: &u8, _: Direction| a.abs_diff(*b) <= 1)
            .expect("failed to build wave");

        let result = wave.collapse(64, &mut rng);
        let grid: Vec<_> = wave.slots().map(|s| s.superposition().to_vec()).collect();

        (result, grid)
    };

    assert_eq!(run(1234), run(1234));
}

#[test]
fn custom_predicate_disables_propagation() {
    init_logger();

    let mut rng = StdRng::seed_from_u64(17);
    let mut wave = matching(3, 4, 4).with_is_possible(
        |_: &[Module<u8>], _: &Module<u8>, _: &Slot, _: &Slot, _: Direction| true,
    );

    wave.collapse(2, &mut rng).unwrap();

    assert_eq!(wave.slots().filter(|s| s.entropy() == 1).count(), 2);
    assert_eq!(wave.slots().filter(|s| s.entropy() == 3).count(), 14);
}

#[test]
fn independent_waves_on_threads() {
    init_logger();

    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let mut wave = matching(3, 10, 10);

            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                wave.collapse(1, &mut rng).map(|_| wave.is_collapsed())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), Ok(true));
    }
}

#[cfg(feature = "image")]
mod images {
    use super::*;

    use image::Rgba;
    use image::RgbaImage;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn solid(color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba(color))
    }

    #[test]
    fn solid_tiles_never_mix() {
        init_logger();

        let mut rng = StdRng::seed_from_u64(5);
        let blue = [0, 0, 255, 255];
        let green = [0, 255, 0, 255];

        let mut wave = TileSet::from_images(vec![solid(blue), solid(green)])
            .unwrap()
            .wave(5, 4)
            .unwrap();

        wave.collapse(1, &mut rng).unwrap();
        assert!(wave.is_collapsed());

        let image = wave.export_image();
        assert_eq!(image.dimensions(), (20, 16));

        let first = *image.get_pixel(0, 0);
        assert!(first == Rgba(blue) || first == Rgba(green));
        assert!(image.pixels().all(|px| *px == first));
    }

    #[test]
    fn export_marks_contradictions_red() {
        init_logger();

        let mut rng = StdRng::seed_from_u64(3);
        let tiles = vec![solid([0, 0, 255, 255]), solid([0, 255, 0, 255])];

        let mut wave = TileSet::from_images(tiles)
            .unwrap()
            .wave_with(2, 1, |_: &RgbaImage, _: &RgbaImage, d: Direction| {
                d != Direction::Right
            })
            .unwrap();

        assert!(wave.collapse(2, &mut rng).is_err());

        let image = wave.export_image();
        assert_eq!(image.dimensions(), (8, 4));

        // the left slot holds a tile, the right one is red
        assert_ne!(*image.get_pixel(0, 0), RED);
        assert_eq!(image.get_pixel(0, 0).0[3], 255);
        for x in 4..8 {
            for y in 0..4 {
                assert_eq!(*image.get_pixel(x, y), RED);
            }
        }
    }

    #[test]
    fn export_leaves_superposed_slots_transparent() {
        init_logger();

        let mut rng = StdRng::seed_from_u64(6);
        let tiles = vec![solid([10, 20, 30, 255]), solid([10, 20, 30, 255])];

        // identical tiles are still two modules, so nothing is settled by propagation
        let mut wave = TileSet::from_images(tiles)
            .unwrap()
            .wave_with(3, 1, |_: &RgbaImage, _: &RgbaImage, _: Direction| true)
            .unwrap();

        wave.collapse(1, &mut rng).unwrap();

        let image = wave.export_image();
        let opaque = image.pixels().filter(|px| px.0[3] == 255).count();
        assert_eq!(opaque, 16);
        assert_eq!(image.pixels().filter(|px| px.0[3] == 0).count(), 32);
    }
}
