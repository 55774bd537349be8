// Banner row layout
// All-day and multi-day events packed into whole-day lanes with a visible
// lane capacity; the rest becomes per-day overflow.

use super::grid::grid_span;
use super::packing::{assign_lanes, Span};
use crate::models::event::CalendarEvent;
use crate::models::layout::{
    BannerGeometry, OverflowSet, Placement, PositionedEvent, TimedInterval,
};
use crate::models::window::Window;

struct BannerSlot<'a> {
    event: &'a CalendarEvent,
    interval: TimedInterval,
    column: usize,
    span: usize,
}

impl Span for BannerSlot<'_> {
    type Point = usize;

    fn start(&self) -> usize {
        self.column
    }

    fn end(&self) -> usize {
        self.column + self.span
    }

    fn tiebreak(&self) -> &str {
        &self.event.id
    }
}

#[derive(Debug, Default)]
pub struct BannerLayout<'a> {
    /// Visible events in placement order
    pub placed: Vec<PositionedEvent<'a>>,
    /// Lanes holding visible events
    pub lane_count: usize,
    pub overflow: OverflowSet<'a>,
}

/// Pack banner events into lanes over `window`.
///
/// Events landing in lane `capacity` or above are hidden and counted in
/// the overflow of every window day they cover, so for each day the
/// visible events plus the overflow count equal the events on that day.
pub fn layout_banner<'a>(
    resolved: &[(&'a CalendarEvent, TimedInterval)],
    window: &Window,
    capacity: usize,
) -> BannerLayout<'a> {
    let Some((lo, hi)) = window.bounds() else {
        return BannerLayout::default();
    };

    let slots: Vec<BannerSlot<'a>> = resolved
        .iter()
        .filter_map(|(event, interval)| {
            let position = grid_span(interval, window)?;
            let interval = interval.clip(lo, hi)?;
            Some(BannerSlot {
                event: *event,
                interval,
                column: position.column,
                span: position.span,
            })
        })
        .collect();

    let lanes = assign_lanes(&slots);
    let mut layout = BannerLayout {
        lane_count: lanes.lane_count().min(capacity),
        ..BannerLayout::default()
    };

    for &index in &lanes.order {
        let slot = &slots[index];
        let lane = lanes.lane_of[index];

        if lane < capacity {
            layout.placed.push(PositionedEvent {
                event: slot.event,
                interval: slot.interval,
                placement: Placement::Banner(BannerGeometry {
                    lane,
                    column: slot.column,
                    span: slot.span,
                    continues_before: slot.interval.clipped_start,
                    continues_after: slot.interval.clipped_end,
                }),
            });
            continue;
        }

        log::trace!(
            "Banner event {} hidden in lane {} (capacity {})",
            slot.event.id,
            lane,
            capacity
        );
        for (offset, day) in window.days()[slot.column..slot.column + slot.span]
            .iter()
            .enumerate()
        {
            let entry = layout.overflow.entry(*day).or_default();
            entry.count += 1;
            entry.events.push(slot.event);
            if offset == 0 {
                entry.starting_here += 1;
            }
        }
    }

    layout
}
