//! Acceptance scenarios for the window controller.
//!
//! The lettered scenarios use a 500-unit viewport over items that all
//! measure 50, so the average estimate is exact and spacer sizes can be
//! checked precisely. The mismatched-estimate scenarios mix two item sizes so
//! the estimate is badly off in one region of the list.

use crate::config::WindowConfig;
use crate::state::{UpdateMode, WindowController};
use crate::surface::{StackSurface, Viewport};
use crate::view_state::{SpacerSizes, WindowRange};

const VIEWPORT: f64 = 500.0;
const EXTENT: f64 = 50.0;
const COUNT: usize = 1000;

type Controller = WindowController<f64, StackSurface<f64>>;

fn empty_controller() -> Controller {
    WindowController::new(
        StackSurface::new(VIEWPORT),
        |extent: &f64| *extent,
        WindowConfig::default(),
    )
}

fn initialized() -> Controller {
    let mut list = empty_controller();
    list.initialize(vec![EXTENT; COUNT], |extent: &f64| *extent);
    list
}

fn scroll_to(list: &mut Controller, offset: f64) -> Vec<Option<UpdateMode>> {
    list.surface_mut().set_scroll_offset(offset);
    let mut modes = Vec::new();
    while list.surface_mut().take_scroll_notification() {
        modes.push(list.on_scroll());
    }
    modes
}

/// Window and spacer invariants that hold after every completed update.
fn assert_consistent(list: &mut Controller) {
    let range = list.window_range();
    let len = list.len();
    assert!(range.start <= range.end && range.end <= len, "{range:?} out of 0..{len}");

    let estimate = list.estimated_extent();
    let spacers = list.spacer_sizes();
    assert_eq!(spacers.top, estimate * range.start as f64);
    assert_eq!(spacers.bottom, estimate * (len - range.end) as f64);
    assert_eq!(list.surface().node_count(), range.len());
}

/// Snapshot of everything observable about a controller's window.
fn observed(list: &Controller) -> (WindowRange, SpacerSizes, f64, Vec<(f64, f64)>) {
    let nodes = list
        .surface()
        .placed_nodes()
        .map(|placed| (placed.offset, placed.extent))
        .collect();
    (
        list.window_range(),
        list.spacer_sizes(),
        list.surface().scroll_offset(),
        nodes,
    )
}

#[test]
fn scenario_a_initialize_fills_first_screen() {
    let mut list = initialized();

    assert_eq!(list.top_index(), 0);
    assert_eq!(list.bottom_index(), Some(9));
    assert_eq!(list.spacer_sizes().bottom, (1000.0 - 10.0) * 50.0);
    assert_consistent(&mut list);
}

#[test]
fn scenario_b_small_forward_delta_expands_and_contracts() {
    let mut list = initialized();

    let modes = scroll_to(&mut list, 60.0);

    assert_eq!(modes, vec![Some(UpdateMode::Forward)]);
    // Rendered below until the last bottom edge reaches 500 + 3 × 50.
    let last = list.surface().placed_nodes().last().map(|placed| placed.offset + placed.extent);
    assert_eq!(last, Some(690.0));
    assert_eq!(list.bottom_index(), Some(14));
    // Item 0's bottom edge sits at -10, beyond the -5 tolerance.
    assert_eq!(list.top_index(), 1);
    assert_consistent(&mut list);
}

#[test]
fn scenario_c_jump_rebuilds_once() {
    let mut list = initialized();

    // Reach mid-list incrementally.
    for step in 1..=250 {
        scroll_to(&mut list, f64::from(step) * 100.0);
    }
    scroll_to(&mut list, 25_010.0);
    assert_eq!(list.stats().jumps, 0);
    assert_consistent(&mut list);

    let modes = scroll_to(&mut list, 25_610.0);

    // Fraction 0.5122 of 1000 items → top 512; offset corrected to the top
    // spacer, and that correction's notification is swallowed.
    assert_eq!(modes, vec![Some(UpdateMode::Jump), None]);
    assert_eq!(list.window_range(), WindowRange::new(512, 522));
    assert_eq!(list.surface().scroll_offset(), 512.0 * 50.0);
    let stats = list.stats();
    assert_eq!(stats.jumps, 1);
    assert_eq!(stats.suppressed, 1);
    assert!(!list.is_ignoring_next_scroll());
    assert_consistent(&mut list);
}

#[test]
fn scenario_d_append_to_uninitialized_matches_initialize() {
    let mut appended = empty_controller();
    appended.append_item(EXTENT);

    let mut initialized = empty_controller();
    initialized.initialize(vec![EXTENT], |extent: &f64| *extent);

    assert!(appended.is_initialized());
    assert_eq!(appended.items(), initialized.items());
    assert_eq!(observed(&appended), observed(&initialized));
    assert_eq!(appended.window_range(), WindowRange::new(0, 1));
}

#[test]
fn prepend_to_uninitialized_matches_initialize() {
    let mut prepended = empty_controller();
    prepended.prepend_items(vec![EXTENT; 3]);

    let mut initialized = empty_controller();
    initialized.set_items(vec![EXTENT; 3]);

    assert_eq!(observed(&prepended), observed(&initialized));
}

#[test]
fn forward_step_past_margin_is_noop() {
    let mut list = initialized();
    scroll_to(&mut list, 60.0);
    let before = observed(&list);

    list.update(-1.0);

    assert_eq!(observed(&list), before);
}

#[test]
fn set_items_twice_matches_once() {
    let items: Vec<f64> = (0..200).map(|i| f64::from(20 + (i % 4) * 10)).collect();

    let mut once = empty_controller();
    once.set_items(items.clone());

    let mut twice = empty_controller();
    twice.set_items(items.clone());
    scroll_to(&mut twice, 300.0);
    twice.set_items(items.clone());
    twice.set_items(items);

    assert_eq!(observed(&twice), observed(&once));
    assert_eq!(twice.estimated_extent(), once.estimated_extent());
}

#[test]
fn degenerate_inputs_degrade_to_sentinels() {
    let mut list = empty_controller();
    list.set_items(Vec::new());
    assert_eq!(list.estimated_extent(), 1.0);
    assert!(list.window_range().is_empty());
    assert_eq!(list.spacer_sizes(), SpacerSizes::default());

    let mut zero = WindowController::new(
        StackSurface::<f64>::new(0.0),
        |extent: &f64| *extent,
        WindowConfig::default(),
    );
    zero.set_items(vec![EXTENT; 10]);
    assert_eq!(zero.window_range(), WindowRange::new(0, 1));
}

// ===== Mismatched estimates =====

/// Controller over 1000 items: those below `split` measure `head`, the rest
/// measure `tail`.
fn two_sizes(split: usize, head: f64, tail: f64) -> Controller {
    let mut list = empty_controller();
    list.set_items((0..COUNT).map(|i| if i < split { head } else { tail }).collect());
    list
}

fn scroll_up_to_top(list: &mut Controller) {
    for _ in 0..10_000 {
        let offset = list.surface().scroll_offset();
        if offset <= 0.0 {
            return;
        }
        scroll_to(list, offset - 100.0);
    }
    panic!("offset never reached 0");
}

fn scroll_down_to_end(list: &mut Controller) {
    for _ in 0..10_000 {
        let surface = list.surface();
        let max = surface.scroll_extent() - surface.viewport_extent();
        let offset = surface.scroll_offset();
        if offset >= max && list.window_range().end == list.len() {
            return;
        }
        scroll_to(list, offset + 100.0);
    }
    panic!("end of the list never reached");
}

fn assert_at_top(list: &mut Controller) {
    assert_eq!(list.top_index(), 0);
    assert_eq!(list.spacer_sizes().top, 0.0);
    let first = list.surface().placed_nodes().next().map(|placed| placed.offset);
    assert_eq!(first, Some(0.0));
    let last = list.surface().placed_nodes().last();
    assert!(last.is_some_and(|placed| placed.offset + placed.extent >= VIEWPORT));
    assert!(!list.is_ignoring_next_scroll());
    assert_consistent(list);
}

#[test]
fn overestimated_head_leaves_no_blank_above_first_item() {
    // The jump memoizes an estimate of 55 from 50 items of 10 and 50 of 100;
    // items 0..300 then use up less top spacer than it stood in for.
    let mut list = two_sizes(300, 10.0, 100.0);
    assert_eq!(scroll_to(&mut list, 5_000.0), vec![Some(UpdateMode::Jump), None]);
    assert_eq!(list.window_range(), WindowRange::new(500, 550));
    assert_eq!(list.estimated_extent(), 55.0);

    scroll_up_to_top(&mut list);

    assert_at_top(&mut list);
}

#[test]
fn underestimated_head_stays_reachable() {
    // The estimate settles at 14.5 while items 0..300 measure 100, so the
    // top spacer runs out long before item 0 is mounted.
    let mut list = two_sizes(300, 100.0, 10.0);
    assert_eq!(scroll_to(&mut list, 50_000.0), vec![Some(UpdateMode::Jump), None]);
    // Items 500..505 span 50 units, so the jump keeps mounting to fill 500.
    assert_eq!(list.window_range(), WindowRange::new(500, 550));

    scroll_up_to_top(&mut list);

    assert_at_top(&mut list);
    assert_eq!(list.estimated_extent(), 14.5);
}

#[test]
fn overestimated_tail_leaves_no_blank_below_last_item() {
    // Items 700.. measure 10 against an estimate of 100.
    let mut list = two_sizes(700, 100.0, 10.0);
    assert_eq!(scroll_to(&mut list, 50_000.0), vec![Some(UpdateMode::Jump)]);

    scroll_down_to_end(&mut list);

    assert_eq!(list.window_range().end, COUNT);
    assert_eq!(list.spacer_sizes().bottom, 0.0);
    let mut placed = list.surface().placed_nodes();
    let first = placed.next().map(|placed| placed.offset);
    assert!(first.is_some_and(|top| top <= 0.0), "{first:?}");
    let last = placed.last().map(|placed| placed.offset + placed.extent);
    assert!(last.is_some_and(|bottom| (bottom - VIEWPORT).abs() < 1e-6), "{last:?}");
    assert!(!list.is_ignoring_next_scroll());
    assert_consistent(&mut list);
}
