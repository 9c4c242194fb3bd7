use virtual_list_controller::{
    Align, Controller, Easing, ListOptions, ScrollDirection, ScrollEvent, Transition, Viewport,
    ViewportId,
};

// Stand-in for a real scroll container.
struct Pane {
    offset: i64,
}

impl Viewport for Pane {
    fn id(&self) -> ViewportId {
        ViewportId(1)
    }

    fn scroll_offset(&self, _direction: ScrollDirection) -> i64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, _direction: ScrollDirection, offset: u64) {
        self.offset = offset as i64;
    }
}

fn main() -> Result<(), virtual_list_controller::Error> {
    // Example: a programmatic jump eased by the compensation transition.
    //
    // An adapter would:
    // - call commit() after changing options or requesting a scroll
    // - call tick(now_ms) in a frame loop and translate the content by the returned value
    // - render the items the controller emits
    let mut c = Controller::new(
        ListOptions::new(10_000, 20u32, 400)
            .with_scroll_to_transition(Some(Transition::new(240).with_easing(Easing::SmoothStep))),
    )?;
    let mut pane = Pane { offset: 0 };
    c.mount(&mut pane);

    let target = c.scroll_to_index(2_000, Align::Center)?;
    println!("target_offset={target}");
    c.commit(&mut pane, 0);

    let mut now_ms = 0u64;
    while let Some(translate) = c.tick(now_ms) {
        if now_ms % 80 == 0 {
            println!("t={now_ms} translate={translate}");
        }
        now_ms += 16;
    }

    // The user scrolls a bit; observed offsets are never pushed back.
    pane.offset += 35;
    c.on_scroll(ScrollEvent::from_viewport(&pane, ScrollDirection::Vertical));
    println!("committed={}", c.commit(&mut pane, now_ms));
    println!("done: offset={} range={:?}", c.offset(), c.visible_range());
    Ok(())
}
