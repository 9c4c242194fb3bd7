// Example: variable sizes, estimates, and invalidation after a size change.
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use virtual_list::{ManagerConfig, SizeAndPositionManager, VisibleRangeQuery};

fn main() -> Result<(), virtual_list::Error> {
    // Item 2 "reflows" later in the example.
    let third = Arc::new(AtomicU32::new(10));
    let sizes = [10u32, 20, 10, 10, 50, 10, 10, 10, 10, 10];

    let mut m = SizeAndPositionManager::new(ManagerConfig::new(
        sizes.len(),
        {
            let third = Arc::clone(&third);
            move |i| {
                if i == 2 {
                    third.load(Ordering::Relaxed)
                } else {
                    sizes[i]
                }
            }
        },
        15,
    ))?;

    println!("estimated total={}", m.total_size());
    println!("item 4={:?}", m.size_and_position_for_index(4)?);
    println!(
        "after measuring 0..=4: total={} last_measured={:?}",
        m.total_size(),
        m.last_measured_index()
    );

    // The size source changed for index 2: drop cached records from there on.
    third.store(100, Ordering::Relaxed);
    m.reset_item(2);
    println!("item 4 after reset={:?}", m.size_and_position_for_index(4)?);

    let range = m.visible_range(VisibleRangeQuery {
        container_size: 60,
        offset: 120,
        overscan_count: 0,
    });
    println!("visible_range={range:?} total={}", m.total_size());
    Ok(())
}
