use virtual_list_controller::{Controller, ItemSize, ListOptions, RenderedRange};

fn main() -> Result<(), virtual_list_controller::Error> {
    // Example: section headers that stay rendered while the body scrolls past them.
    let headers = [0usize, 250, 500, 750];
    let mut c = Controller::new(
        ListOptions::new(
            1_000,
            ItemSize::dynamic(move |i| if headers.contains(&i) { 32 } else { 24 }),
            300,
        )
        .with_scroll_offset(Some(6_100))
        .with_sticky_indices(headers)
        .with_on_items_rendered(Some(|r: RenderedRange| {
            println!("rendered {}..={}", r.start_index, r.stop_index);
        })),
    )?;

    c.render(|item| {
        let p = item.placement;
        println!(
            "#{:<4} {:?} start={} size={} margin_end={} z={}",
            item.index, p.positioning, p.start, p.size, p.margin_end, p.z_index
        );
    })?;
    println!("content_size={}", c.content_size());
    Ok(())
}
