// Example: minimal usage and scroll-to helper.
use virtual_list::{
    Align, ManagerConfig, OffsetForIndexQuery, SizeAndPositionManager, VisibleRangeQuery,
};

fn main() -> Result<(), virtual_list::Error> {
    let mut m = SizeAndPositionManager::new(ManagerConfig::new(1_000_000, |_| 1, 1))?;

    let range = m.visible_range(VisibleRangeQuery {
        container_size: 10,
        offset: 123_456,
        overscan_count: 3,
    });
    println!("total_size={}", m.total_size());
    println!("visible_range={range:?}");
    println!("last_measured_index={:?}", m.last_measured_index());

    let off = m.updated_offset_for_index(OffsetForIndexQuery {
        align: Align::End,
        container_size: 10,
        current_offset: 123_456,
        target_index: 999_999,
    })?;
    println!("offset for last item (end aligned)={off}");
    Ok(())
}
