use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn fixed(item_count: usize, size: u32) -> SizeAndPositionManager {
    SizeAndPositionManager::new(ManagerConfig::new(item_count, move |_| size, size)).unwrap()
}

fn from_sizes(sizes: &[u32], estimated_item_size: u32) -> SizeAndPositionManager {
    let sizes: Arc<[u32]> = Arc::from(sizes);
    let count = sizes.len();
    SizeAndPositionManager::new(ManagerConfig {
        item_count: count,
        item_size_getter: ItemSize::List(sizes).getter(),
        estimated_item_size,
    })
    .unwrap()
}

/// A size getter that counts how often each index is queried.
fn counting(sizes: &[u32]) -> (SizeGetter, Arc<Vec<AtomicUsize>>) {
    let sizes: Arc<[u32]> = Arc::from(sizes);
    let calls: Arc<Vec<AtomicUsize>> = Arc::new((0..sizes.len()).map(|_| AtomicUsize::new(0)).collect());
    let getter: SizeGetter = Arc::new({
        let calls = Arc::clone(&calls);
        move |i| {
            calls[i].fetch_add(1, Ordering::Relaxed);
            sizes[i]
        }
    });
    (getter, calls)
}

fn calls_of(calls: &[AtomicUsize]) -> Vec<usize> {
    calls.iter().map(|c| c.load(Ordering::Relaxed)).collect()
}

fn expected_offset(sizes: &[u32], index: usize) -> u64 {
    sizes[..index].iter().map(|&s| s as u64).sum()
}

fn expected_nearest_item(sizes: &[u32], offset: u64) -> usize {
    // Last item whose leading edge is at or before `offset`; zero-size runs resolve to their end.
    let mut nearest = 0;
    let mut start = 0u64;
    for (i, &size) in sizes.iter().enumerate() {
        if start > offset {
            break;
        }
        nearest = i;
        start += size as u64;
    }
    nearest
}

fn expected_visible_range(
    sizes: &[u32],
    offset: u64,
    container_size: u32,
    overscan_count: usize,
) -> VisibleRange {
    let last = sizes.len() - 1;
    let window_end = offset + container_size as u64;
    let start = expected_nearest_item(sizes, offset);
    let mut covered = expected_offset(sizes, start) + sizes[start] as u64;
    let mut stop = start;
    while covered < window_end && stop < last {
        stop += 1;
        covered += sizes[stop] as u64;
    }
    VisibleRange {
        start: start.saturating_sub(overscan_count),
        stop: (stop + overscan_count).min(last),
    }
}

#[test]
fn fixed_size_visible_range_at_top() {
    let mut m = fixed(1000, 50);
    let r = m.visible_range(VisibleRangeQuery {
        container_size: 500,
        offset: 0,
        overscan_count: 0,
    });
    assert_eq!(r, Some(VisibleRange { start: 0, stop: 9 }));
    assert_eq!(m.last_measured_index(), Some(9));
}

#[test]
fn start_alignment_puts_target_at_window_start() {
    let mut m = fixed(1000, 50);
    let off = m
        .updated_offset_for_index(OffsetForIndexQuery {
            align: Align::Start,
            container_size: 500,
            current_offset: 0,
            target_index: 20,
        })
        .unwrap();
    assert_eq!(off, 1000);
}

#[test]
fn variable_sizes_accumulate_offsets() {
    let mut m = from_sizes(&[10, 20, 10, 10, 50, 10, 10, 10, 10, 10], 50);
    assert_eq!(
        m.size_and_position_for_index(4).unwrap(),
        ItemPosition {
            offset: 50,
            size: 50
        }
    );
    assert_eq!(m.last_measured_index(), Some(4));
}

#[test]
fn reset_item_rederives_from_updated_source() {
    let mut m = from_sizes(&[10, 20, 10, 10, 50, 10, 10, 10, 10, 10], 50);
    m.size_and_position_for_index(4).unwrap();

    m.update_config(ConfigUpdate::default().with_item_size_getter(|i| match i {
        2 => 100,
        1 => 20,
        4 => 50,
        _ => 10,
    }))
    .unwrap();
    // Updating the source alone does not invalidate cached records.
    assert_eq!(m.size_and_position_for_index(4).unwrap().offset, 50);

    m.reset_item(2);
    assert_eq!(m.last_measured_index(), Some(1));
    assert_eq!(
        m.size_and_position_for_index(1).unwrap(),
        ItemPosition {
            offset: 10,
            size: 20
        }
    );
    assert_eq!(
        m.size_and_position_for_index(4).unwrap(),
        ItemPosition {
            offset: 140,
            size: 50
        }
    );
}

#[test]
fn empty_list_has_no_range_and_zero_size() {
    let mut m = fixed(0, 50);
    assert_eq!(m.total_size(), 0);
    assert_eq!(
        m.visible_range(VisibleRangeQuery {
            container_size: 500,
            offset: 0,
            overscan_count: 3,
        }),
        None
    );
    assert_eq!(m.find_nearest_item(0), None);
}

#[test]
fn zero_container_has_no_range() {
    let mut m = fixed(100, 10);
    assert_eq!(
        m.visible_range(VisibleRangeQuery {
            container_size: 0,
            offset: 0,
            overscan_count: 0,
        }),
        None
    );
    assert_eq!(m.last_measured_index(), None);
}

#[test]
fn increasing_queries_measure_each_index_once() {
    let sizes: Vec<u32> = (0..200u32).map(|i| 1 + i % 13).collect();
    let (getter, calls) = counting(&sizes);
    let mut m = SizeAndPositionManager::new(ManagerConfig {
        item_count: sizes.len(),
        item_size_getter: getter,
        estimated_item_size: 5,
    })
    .unwrap();

    for index in [0usize, 3, 17, 18, 99] {
        let pos = m.size_and_position_for_index(index).unwrap();
        assert_eq!(pos.offset, expected_offset(&sizes, index));
    }
    // Re-reading cached indexes does not query the source again.
    m.size_and_position_for_index(50).unwrap();
    m.size_and_position_for_index(0).unwrap();

    assert!(m.is_measured(99));
    assert!(!m.is_measured(100));
    let calls = calls_of(&calls);
    assert!(calls[..=99].iter().all(|&c| c == 1));
    assert!(calls[100..].iter().all(|&c| c == 0));
}

#[test]
fn reset_keeps_prefix_and_remeasures_suffix() {
    let sizes: Vec<u32> = (0..50u32).map(|i| 2 + i % 5).collect();
    let (getter, calls) = counting(&sizes);
    let mut m = SizeAndPositionManager::new(ManagerConfig {
        item_count: sizes.len(),
        item_size_getter: getter,
        estimated_item_size: 3,
    })
    .unwrap();

    m.size_and_position_for_index(30).unwrap();
    let before = m.size_and_position_for_index(19).unwrap();

    m.reset_item(20);
    assert_eq!(m.size_and_position_for_index(19).unwrap(), before);
    assert_eq!(calls_of(&calls)[19], 1);

    m.size_and_position_for_index(25).unwrap();
    let calls = calls_of(&calls);
    assert!(calls[20..=25].iter().all(|&c| c == 2));
    assert!(calls[26..=30].iter().all(|&c| c == 1));
}

#[test]
fn reset_past_measured_prefix_is_noop() {
    let mut m = fixed(100, 10);
    m.size_and_position_for_index(10).unwrap();
    m.reset_item(11);
    assert_eq!(m.last_measured_index(), Some(10));
    m.reset_item(50);
    assert_eq!(m.last_measured_index(), Some(10));
    m.reset_item(0);
    assert_eq!(m.last_measured_index(), None);
}

#[test]
fn total_size_extrapolates_linearly_from_last_measured_item() {
    let mut m = from_sizes(&[10; 10], 50);
    assert_eq!(m.total_size(), 500);

    m.size_and_position_for_index(2).unwrap();
    assert_eq!(m.total_size(), 30 + 7 * 50);
}

#[test]
fn total_size_converges_to_exact_sum() {
    let sizes = [3u32, 9, 1, 40, 7, 7, 2, 11];
    let exact: u64 = sizes.iter().map(|&s| s as u64).sum();
    for estimate in [1u32, 10, 1000] {
        let mut m = from_sizes(&sizes, estimate);
        m.size_and_position_for_index(sizes.len() - 1).unwrap();
        assert_eq!(m.total_size(), exact);
    }
}

#[test]
fn total_size_never_shrinks_when_estimates_are_low() {
    let sizes: Vec<u32> = (0..100u32).map(|i| 20 + i % 7).collect();
    let mut m = from_sizes(&sizes, 10);
    let mut prev = m.total_size();
    for i in 0..sizes.len() {
        m.size_and_position_for_index(i).unwrap();
        let total = m.total_size();
        assert!(total >= prev);
        prev = total;
    }
}

#[test]
fn out_of_range_index_is_an_error() {
    let mut m = fixed(10, 10);
    assert_eq!(
        m.size_and_position_for_index(10),
        Err(Error::IndexOutOfRange {
            index: 10,
            count: 10
        })
    );
    assert_eq!(
        m.updated_offset_for_index(OffsetForIndexQuery {
            align: Align::Start,
            container_size: 10,
            current_offset: 0,
            target_index: 42,
        }),
        Err(Error::IndexOutOfRange {
            index: 42,
            count: 10
        })
    );
    assert_eq!(m.last_measured_index(), None);
}

#[test]
fn zero_estimate_is_a_configuration_error() {
    let err = SizeAndPositionManager::new(ManagerConfig::new(10, |_| 1, 0)).unwrap_err();
    assert_eq!(err, Error::InvalidEstimatedItemSize);

    let mut m = fixed(10, 10);
    assert_eq!(
        m.update_config(
            ConfigUpdate::default()
                .with_item_count(20)
                .with_estimated_item_size(0)
        ),
        Err(Error::InvalidEstimatedItemSize)
    );
    assert_eq!(m.item_count(), 10);
    assert_eq!(m.estimated_item_size(), 10);
}

#[test]
fn update_config_keeps_omitted_fields() {
    let mut m = fixed(10, 10);
    m.update_config(ConfigUpdate::default().with_estimated_item_size(25))
        .unwrap();
    assert_eq!(m.item_count(), 10);
    assert_eq!(m.estimated_item_size(), 25);
    assert_eq!(m.total_size(), 250);

    assert!(ConfigUpdate::default().is_empty());
    assert!(!ConfigUpdate::default().with_item_count(3).is_empty());
    m.update_config(ConfigUpdate::default()).unwrap();
    assert_eq!(m.item_count(), 10);
    assert_eq!(m.estimated_item_size(), 25);
}

#[test]
fn shrinking_count_truncates_cache_and_growing_extends_lazily() {
    let sizes = [4u32, 6, 8, 10, 12, 14, 16, 18, 20, 22];
    let mut m = from_sizes(&sizes, 5);
    m.size_and_position_for_index(9).unwrap();

    m.update_config(ConfigUpdate::default().with_item_count(4))
        .unwrap();
    assert_eq!(m.last_measured_index(), Some(3));
    assert_eq!(m.total_size(), 4 + 6 + 8 + 10);

    m.update_config(ConfigUpdate::default().with_item_count(8))
        .unwrap();
    assert_eq!(m.last_measured_index(), Some(3));
    assert_eq!(m.total_size(), 28 + 4 * 5);
    assert_eq!(m.size_and_position_for_index(7).unwrap().offset, 28 + 12 + 14 + 16);
}

#[test]
fn visible_range_pads_with_overscan_and_clamps() {
    let mut m = fixed(1000, 50);
    let q = |offset| VisibleRangeQuery {
        container_size: 500,
        offset,
        overscan_count: 3,
    };
    assert_eq!(
        m.visible_range(q(1000)),
        Some(VisibleRange {
            start: 17,
            stop: 32
        })
    );
    assert_eq!(m.visible_range(q(0)), Some(VisibleRange { start: 0, stop: 12 }));
    assert_eq!(
        m.visible_range(q(49_500)),
        Some(VisibleRange {
            start: 987,
            stop: 999
        })
    );
}

#[test]
fn visible_range_far_into_unmeasured_list() {
    let mut m = fixed(1_000_000, 1);
    let r = m
        .visible_range(VisibleRangeQuery {
            container_size: 10,
            offset: 123_456,
            overscan_count: 0,
        })
        .unwrap();
    assert_eq!(
        r,
        VisibleRange {
            start: 123_456,
            stop: 123_465
        }
    );
    assert_eq!(r.len(), 10);
    assert!(r.contains(123_460));
}

#[test]
fn visible_range_past_end_resolves_to_last_item() {
    let mut m = fixed(10, 10);
    assert_eq!(
        m.visible_range(VisibleRangeQuery {
            container_size: 30,
            offset: 10_000,
            overscan_count: 0,
        }),
        Some(VisibleRange { start: 9, stop: 9 })
    );
}

#[test]
fn find_nearest_item_uses_measured_prefix() {
    let sizes = [10u32, 20, 10, 10, 50, 10, 10, 10, 10, 10];
    let mut m = from_sizes(&sizes, 50);
    m.size_and_position_for_index(9).unwrap();
    assert_eq!(m.find_nearest_item(0), Some(0));
    assert_eq!(m.find_nearest_item(29), Some(1));
    assert_eq!(m.find_nearest_item(30), Some(2));
    assert_eq!(m.find_nearest_item(99), Some(4));
    assert_eq!(m.find_nearest_item(100), Some(5));
    assert_eq!(m.find_nearest_item(1_000), Some(9));
}

#[test]
fn alignment_modes() {
    let mut m = fixed(1000, 50);
    let mut at = |align, current_offset, target_index| {
        m.updated_offset_for_index(OffsetForIndexQuery {
            align,
            container_size: 500,
            current_offset,
            target_index,
        })
        .unwrap()
    };

    assert_eq!(at(Align::End, 0, 20), 550);
    assert_eq!(at(Align::Center, 0, 20), 775);
    // Fully visible: auto is a no-op.
    assert_eq!(at(Align::Auto, 1000, 25), 1000);
    // Above the window: behaves like start.
    assert_eq!(at(Align::Auto, 1000, 10), 500);
    // Below the window: behaves like end.
    assert_eq!(at(Align::Auto, 1000, 40), 1550);
}

#[test]
fn auto_alignment_end_aligns_items_larger_than_viewport() {
    let mut m = fixed(10, 1000);
    let mut at = |current_offset, target_index| {
        m.updated_offset_for_index(OffsetForIndexQuery {
            align: Align::Auto,
            container_size: 500,
            current_offset,
            target_index,
        })
        .unwrap()
    };
    // Window 1200..1700 sits inside item 1 (1000..2000).
    assert_eq!(at(1200, 1), 1500);
    // Item starts above the window.
    assert_eq!(at(2500, 1), 1500);
    // Item starts below the window.
    assert_eq!(at(0, 1), 1500);
    // Already showing the item's tail: no movement.
    assert_eq!(at(1500, 1), 1500);
}

#[test]
fn zero_size_runs_resolve_to_last_item_at_offset() {
    let sizes = [10u32, 0, 0, 10, 0, 10];
    for measure_first in [false, true] {
        let mut m = from_sizes(&sizes, 7);
        if measure_first {
            m.size_and_position_for_index(sizes.len() - 1).unwrap();
        }
        assert_eq!(m.find_nearest_item(0), Some(0), "measured={measure_first}");
        assert_eq!(m.find_nearest_item(9), Some(0), "measured={measure_first}");
        assert_eq!(m.find_nearest_item(10), Some(3), "measured={measure_first}");
        assert_eq!(m.find_nearest_item(15), Some(3), "measured={measure_first}");
        assert_eq!(m.find_nearest_item(20), Some(5), "measured={measure_first}");
        assert_eq!(m.find_nearest_item(99), Some(5), "measured={measure_first}");
    }

    // An exact hit on the last measured offset keeps walking the unmeasured zero-size tail.
    let mut m = from_sizes(&sizes, 7);
    m.size_and_position_for_index(1).unwrap();
    assert_eq!(m.find_nearest_item(10), Some(3));
}

#[test]
fn random_queries_with_zero_size_items_match_naive_model() {
    for seed in 1..=40u64 {
        let mut rng = Lcg::new(seed ^ 0x5eed);
        let count = rng.gen_range_usize(1, 300);
        let mut sizes: Vec<u32> = (0..count)
            .map(|_| {
                // Roughly a third of the items take no space.
                if rng.gen_range_u32(0, 3) == 0 {
                    0
                } else {
                    rng.gen_range_u32(0, 60)
                }
            })
            .collect();
        sizes[count - 1] = sizes[count - 1].max(1);
        let total: u64 = sizes.iter().map(|&s| s as u64).sum();
        let mut m = from_sizes(&sizes, rng.gen_range_u32(1, 80));

        for _ in 0..60 {
            let offset = rng.gen_range_u64(0, total + 20);
            match rng.gen_range_usize(0, 3) {
                0 => {
                    let nearest = m.find_nearest_item(offset).unwrap();
                    assert_eq!(
                        nearest,
                        expected_nearest_item(&sizes, offset),
                        "seed={seed} offset={offset}"
                    );
                    let pos = m.size_and_position_for_index(nearest).unwrap();
                    assert!(pos.offset <= offset, "seed={seed} offset={offset}");
                    assert!(
                        nearest == count - 1
                            || m.size_and_position_for_index(nearest + 1).unwrap().offset > offset,
                        "seed={seed} offset={offset}"
                    );
                }
                1 => {
                    let container_size = rng.gen_range_u32(1, 200);
                    let r = m.visible_range(VisibleRangeQuery {
                        container_size,
                        offset,
                        overscan_count: 0,
                    });
                    assert_eq!(
                        r,
                        Some(expected_visible_range(&sizes, offset, container_size, 0)),
                        "seed={seed} offset={offset} container={container_size}"
                    );
                }
                _ => m.reset_item(rng.gen_range_usize(0, count + 1)),
            }
        }
    }
}

#[test]
fn alignment_result_is_clamped() {
    let mut m = fixed(1000, 50);
    let start_of_last = m
        .updated_offset_for_index(OffsetForIndexQuery {
            align: Align::Start,
            container_size: 500,
            current_offset: 0,
            target_index: 999,
        })
        .unwrap();
    assert_eq!(start_of_last, 49_500);

    let end_of_first = m
        .updated_offset_for_index(OffsetForIndexQuery {
            align: Align::End,
            container_size: 500,
            current_offset: 300,
            target_index: 0,
        })
        .unwrap();
    assert_eq!(end_of_first, 0);

    let mut short = fixed(3, 50);
    let off = short
        .updated_offset_for_index(OffsetForIndexQuery {
            align: Align::Start,
            container_size: 500,
            current_offset: 0,
            target_index: 2,
        })
        .unwrap();
    assert_eq!(off, 0);
}

#[test]
fn zero_container_aligns_to_zero() {
    let mut m = fixed(100, 10);
    let off = m
        .updated_offset_for_index(OffsetForIndexQuery {
            align: Align::Start,
            container_size: 0,
            current_offset: 40,
            target_index: 50,
        })
        .unwrap();
    assert_eq!(off, 0);
}

#[test]
fn item_size_sources_resolve_to_getters() {
    let fixed = ItemSize::Fixed(7);
    assert_eq!((fixed.getter())(123), 7);
    assert_eq!(fixed.default_estimate(), 7);
    assert_eq!(ItemSize::Fixed(0).default_estimate(), DEFAULT_ESTIMATED_ITEM_SIZE);

    let list = ItemSize::from(alloc::vec![1u32, 2, 3]);
    assert_eq!((list.getter())(2), 3);
    assert_eq!(list.default_estimate(), DEFAULT_ESTIMATED_ITEM_SIZE);
    assert_eq!(
        list.validate(4),
        Err(Error::SizeListTooShort { len: 3, count: 4 })
    );
    assert_eq!(list.validate(3), Ok(()));

    let dynamic = ItemSize::dynamic(|i| i as u32 * 2);
    assert_eq!((dynamic.getter())(21), 42);
    assert!(dynamic.same_source(&dynamic.clone()));
    assert!(!dynamic.same_source(&ItemSize::dynamic(|i| i as u32 * 2)));
    assert!(ItemSize::Fixed(3).same_source(&ItemSize::Fixed(3)));
    assert!(!ItemSize::Fixed(3).same_source(&ItemSize::Fixed(4)));
}

#[test]
fn property_random_queries_match_naive_model() {
    for seed in 1..=40u64 {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(1, 300);
        let sizes: Vec<u32> = (0..count).map(|_| rng.gen_range_u32(1, 60)).collect();
        let estimate = rng.gen_range_u32(1, 80);
        let mut m = from_sizes(&sizes, estimate);
        let total: u64 = sizes.iter().map(|&s| s as u64).sum();

        for _ in 0..60 {
            match rng.gen_range_usize(0, 4) {
                0 => {
                    let index = rng.gen_range_usize(0, count);
                    let pos = m.size_and_position_for_index(index).unwrap();
                    assert_eq!(pos.offset, expected_offset(&sizes, index), "seed={seed}");
                    assert_eq!(pos.size, sizes[index], "seed={seed}");
                }
                1 => {
                    let offset = rng.gen_range_u64(0, total + 100);
                    assert_eq!(
                        m.find_nearest_item(offset),
                        Some(expected_nearest_item(&sizes, offset)),
                        "seed={seed} offset={offset}"
                    );
                }
                2 => {
                    let offset = rng.gen_range_u64(0, total + 1);
                    let container_size = rng.gen_range_u32(1, 400);
                    let overscan_count = rng.gen_range_usize(0, 5);
                    let r = m.visible_range(VisibleRangeQuery {
                        container_size,
                        offset,
                        overscan_count,
                    });
                    assert_eq!(
                        r,
                        Some(expected_visible_range(
                            &sizes,
                            offset,
                            container_size,
                            overscan_count
                        )),
                        "seed={seed} offset={offset} container={container_size}"
                    );
                }
                _ => {
                    m.reset_item(rng.gen_range_usize(0, count + 1));
                }
            }

            // The measured prefix never disagrees with the model.
            if let Some(last) = m.last_measured_index() {
                let rec = m.size_and_position_of_last_measured_item();
                assert_eq!(rec.offset, expected_offset(&sizes, last), "seed={seed}");
            }
        }
    }
}

proptest! {
    #[test]
    fn measured_offsets_are_contiguous(
        sizes in proptest::collection::vec(0u32..500, 1..200),
        probes in proptest::collection::vec(any::<prop::sample::Index>(), 1..20),
    ) {
        let mut m = from_sizes(&sizes, 40);
        for probe in probes {
            m.size_and_position_for_index(probe.index(sizes.len())).unwrap();
        }
        let last = m.last_measured_index().unwrap();
        for i in 0..last {
            let a = m.size_and_position_for_index(i).unwrap();
            let b = m.size_and_position_for_index(i + 1).unwrap();
            prop_assert_eq!(a.end(), b.offset);
        }
    }

    #[test]
    fn aligned_offset_stays_within_scrollable_range(
        sizes in proptest::collection::vec(1u32..200, 1..200),
        container_size in 1u32..2_000,
        current_offset in 0u64..50_000,
        target in any::<prop::sample::Index>(),
        align in prop_oneof![
            Just(Align::Auto),
            Just(Align::Start),
            Just(Align::Center),
            Just(Align::End),
        ],
    ) {
        let mut m = from_sizes(&sizes, 30);
        let off = m.updated_offset_for_index(OffsetForIndexQuery {
            align,
            container_size,
            current_offset,
            target_index: target.index(sizes.len()),
        }).unwrap();
        let max = m.total_size().saturating_sub(container_size as u64);
        prop_assert!(off <= max);
    }

    #[test]
    fn auto_alignment_is_idempotent_when_visible(
        sizes in proptest::collection::vec(1u32..100, 2..200),
        target in any::<prop::sample::Index>(),
        slack in 0u64..100,
    ) {
        let mut m = from_sizes(&sizes, 30);
        // Fully measure so the clamp bound is exact.
        m.size_and_position_for_index(sizes.len() - 1).unwrap();
        let index = target.index(sizes.len());
        let item = m.size_and_position_for_index(index).unwrap();
        let container_size = item.size + 100;
        let current_offset = item.offset.saturating_sub(slack);
        prop_assume!(current_offset <= m.total_size().saturating_sub(container_size as u64));

        let off = m.updated_offset_for_index(OffsetForIndexQuery {
            align: Align::Auto,
            container_size,
            current_offset,
            target_index: index,
        }).unwrap();
        prop_assert_eq!(off, current_offset);
    }
}
