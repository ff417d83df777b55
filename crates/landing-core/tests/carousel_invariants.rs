//! Property invariants for the carousel controller.
//!
//! Random operation streams are applied to a carousel over a deterministic
//! timer host; after each step the suite asserts:
//!
//! 1. the current index is always inside `0..slide_count`;
//! 2. at most one autoplay timer is live, and none while paused or dragging;
//! 3. exactly one indicator dot is active and it matches the current index;
//! 4. a carousel without slides never schedules a timer.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use landing_core::capture::PointerButton;
use landing_core::{
    CarouselBuilder, CarouselPhase, DragRelease, IndicatorSurface, ManualTimerHost,
    PointerPosition, SlideStrip,
};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Strip {
    offset: f64,
}

impl SlideStrip for Strip {
    fn set_offset_percent(&mut self, percent: f64) {
        self.offset = percent;
    }

    fn set_transitions_enabled(&mut self, _enabled: bool) {}

    fn width_px(&self) -> f64 {
        360.0
    }
}

struct Dots(Rc<RefCell<Vec<bool>>>);

impl IndicatorSurface for Dots {
    fn create_dot(&mut self, _index: usize, active: bool) {
        self.0.borrow_mut().push(active);
    }

    fn set_dot_active(&mut self, index: usize, active: bool) {
        self.0.borrow_mut()[index] = active;
    }
}

#[derive(Debug, Clone)]
enum Op {
    GoTo(i64),
    Advance,
    Retreat,
    SelectDot(usize),
    TogglePause,
    HoverEnter,
    HoverLeave,
    Tick(u64),
    Swipe { dx: f64, dy: f64 },
    DragStart,
    DragCancel,
    TouchDown(i32),
    TouchMove(i32, f64),
    TouchUp(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50i64..50).prop_map(Op::GoTo),
        Just(Op::Advance),
        Just(Op::Retreat),
        (0usize..8).prop_map(Op::SelectDot),
        Just(Op::TogglePause),
        Just(Op::HoverEnter),
        Just(Op::HoverLeave),
        (0u64..10_000).prop_map(Op::Tick),
        (-300.0f64..300.0, -300.0f64..300.0).prop_map(|(dx, dy)| Op::Swipe { dx, dy }),
        Just(Op::DragStart),
        Just(Op::DragCancel),
        (0i32..3).prop_map(Op::TouchDown),
        (0i32..3, -200.0f64..200.0).prop_map(|(id, x)| Op::TouchMove(id, x)),
        (0i32..3).prop_map(Op::TouchUp),
    ]
}

proptest! {
    #[test]
    fn operation_streams_preserve_invariants(
        slides in 1usize..7,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let dots = Rc::new(RefCell::new(Vec::new()));
        let mut carousel = CarouselBuilder::new(ManualTimerHost::new())
            .strip(Strip::default(), slides)
            .indicators(Dots(Rc::clone(&dots)))
            .build();

        for op in ops {
            match op {
                Op::GoTo(target) => carousel.go_to(target),
                Op::Advance => carousel.advance(),
                Op::Retreat => carousel.retreat(),
                Op::SelectDot(dot) => carousel.select_dot(dot),
                Op::TogglePause => carousel.toggle_paused(),
                Op::HoverEnter => carousel.hover_enter(),
                Op::HoverLeave => carousel.hover_leave(),
                Op::Tick(ms) => {
                    carousel.advance_time(Duration::from_millis(ms));
                }
                Op::Swipe { dx, dy } => {
                    carousel.on_drag_start(100.0, 100.0);
                    let _ = carousel.on_drag_move(100.0 + dx, 100.0 + dy);
                    let _ = carousel.on_drag_end();
                }
                Op::DragStart => carousel.on_drag_start(50.0, 50.0),
                Op::DragCancel => {
                    let _ = carousel.on_drag_cancel();
                }
                Op::TouchDown(id) => {
                    let _ = carousel.pointer_down(
                        id,
                        PointerButton::Primary,
                        PointerPosition::new(0.0, 0.0),
                    );
                }
                Op::TouchMove(id, x) => {
                    let _ = carousel.pointer_move(id, PointerPosition::new(x, 0.0));
                }
                Op::TouchUp(id) => {
                    let _ = carousel.pointer_up(id);
                }
            }

            prop_assert!(carousel.current_index() < slides);

            let live = carousel.timer_host().live_count();
            prop_assert!(live <= 1);
            if carousel.is_paused() || carousel.is_dragging() {
                prop_assert_eq!(live, 0);
            }
            if carousel.phase() == CarouselPhase::Playing {
                prop_assert_eq!(live, 1);
            }

            let states = dots.borrow();
            prop_assert_eq!(states.len(), slides);
            prop_assert_eq!(states.iter().filter(|active| **active).count(), 1);
            prop_assert!(states[carousel.current_index()]);
        }
    }

    #[test]
    fn go_to_normalizes_any_target(slides in 1usize..12, target in any::<i32>()) {
        let mut carousel = CarouselBuilder::new(ManualTimerHost::new())
            .strip(Strip::default(), slides)
            .build();
        carousel.go_to(i64::from(target));
        let expected = i64::from(target).rem_euclid(slides as i64) as usize;
        prop_assert_eq!(carousel.current_index(), expected);
        prop_assert_eq!(carousel.strip().map(|s| s.offset), Some(-(expected as f64) * 100.0));
    }

    #[test]
    fn advance_then_retreat_is_identity(slides in 1usize..12, start in 0i64..12) {
        let mut carousel = CarouselBuilder::new(ManualTimerHost::new())
            .strip(Strip::default(), slides)
            .build();
        carousel.go_to(start);
        let before = carousel.current_index();
        carousel.advance();
        carousel.retreat();
        prop_assert_eq!(carousel.current_index(), before);
    }

    #[test]
    fn horizontal_release_follows_threshold(dx in -400.0f64..400.0) {
        let mut carousel = CarouselBuilder::new(ManualTimerHost::new())
            .strip(Strip::default(), 4)
            .build();
        carousel.go_to(1);
        carousel.on_drag_start(200.0, 100.0);
        let _ = carousel.on_drag_move(200.0 + dx, 100.0);
        let release = carousel.on_drag_end();
        let (expected_release, expected_index) = if dx == 0.0 {
            // No horizontal travel: the move is left to the page scroll.
            (DragRelease::Ignored, 1)
        } else if dx.abs() <= 50.0 {
            (DragRelease::SnappedBack, 1)
        } else if dx < 0.0 {
            (DragRelease::Advanced, 2)
        } else {
            (DragRelease::Retreated, 0)
        };
        prop_assert_eq!(release, expected_release);
        prop_assert_eq!(carousel.current_index(), expected_index);
        prop_assert_eq!(carousel.timer_host().live_count(), 1);
    }

    #[test]
    fn carousel_without_slides_never_schedules(ops in prop::collection::vec(0u8..6, 0..40)) {
        let mut carousel = CarouselBuilder::<Strip, _>::new(ManualTimerHost::new()).build();
        for op in ops {
            match op {
                0 => carousel.advance(),
                1 => carousel.toggle_paused(),
                2 => carousel.hover_leave(),
                3 => carousel.on_drag_start(0.0, 0.0),
                4 => {
                    let _ = carousel.on_drag_end();
                }
                _ => {
                    carousel.advance_time(Duration::from_millis(5_000));
                }
            }
        }
        prop_assert_eq!(carousel.phase(), CarouselPhase::Inert);
        prop_assert_eq!(carousel.timer_host().scheduled_total(), 0);
    }
}
