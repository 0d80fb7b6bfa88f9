use crate::gesture::GestureOutput;
use crate::input::{Direction, PointerEvent, PointerPhase, WheelEvent};

use super::messages::{CarouselMessage, CarouselOutcome};
use super::state::Carousel;

impl Carousel {
    /// Apply one message. This is the whole state machine: hosts feed input
    /// and timer expiries in, then read [`Carousel::state`] and
    /// [`Carousel::frame`] back out.
    pub fn update(&mut self, message: CarouselMessage) -> CarouselOutcome {
        match message {
            CarouselMessage::Pointer(event) => self.handle_pointer(&event),
            CarouselMessage::Wheel(wheel) => self.handle_wheel(&wheel),
            CarouselMessage::RequestPage { page } => self.request_page(page),
            CarouselMessage::Next => self.step(Direction::Next),
            CarouselMessage::Previous => self.step(Direction::Previous),
            CarouselMessage::TransitionSettled => {
                if self.transition.settle() {
                    log::trace!(
                        "Transition settled on page {}",
                        self.state.current_page
                    );
                }
                self.state.is_transitioning = false;
                CarouselOutcome::default()
            }
            CarouselMessage::PointerLost => {
                if !self.tracker.is_idle() {
                    log::debug!("Dropping tracked pointer without release");
                    self.tracker.reset();
                }
                self.sync_gesture();
                CarouselOutcome::default()
            }
            CarouselMessage::SetItemCount { total_items } => {
                self.total_items = total_items;
                self.recompute_pages();
                CarouselOutcome::default()
            }
            CarouselMessage::SetViewportWidth { width } => {
                self.viewport_width = width.max(0.0);
                CarouselOutcome::default()
            }
        }
    }

    /// Request a 1-based page. Out-of-range targets are clamped; requests
    /// during a transition or while dragging are dropped.
    pub fn request_page(&mut self, target: usize) -> CarouselOutcome {
        if self.state.is_dragging {
            return CarouselOutcome::default();
        }

        let committed = self.transition.request(
            target,
            self.state.current_page,
            self.state.total_pages,
        );
        if let Some(page) = committed {
            log::debug!(
                "Carousel page {} -> {} of {}",
                self.state.current_page,
                page,
                self.state.total_pages
            );
            self.state.current_page = page;
            self.state.is_transitioning = true;
        }

        CarouselOutcome {
            gesture: None,
            committed_page: committed,
        }
    }

    fn step(&mut self, direction: Direction) -> CarouselOutcome {
        let target = direction
            .target_from(self.state.current_page, self.state.total_pages);
        self.request_page(target)
    }

    fn handle_pointer(&mut self, event: &PointerEvent) -> CarouselOutcome {
        // A running transition blocks anything that could start a new drag.
        if self.transition.is_transitioning() && !self.tracker.is_dragging() {
            match event.phase {
                PointerPhase::Down | PointerPhase::Move => {
                    if !self.tracker.is_idle() {
                        self.tracker.reset();
                    }
                    return CarouselOutcome {
                        gesture: Some(GestureOutput::Ignored),
                        committed_page: None,
                    };
                }
                PointerPhase::Up | PointerPhase::Cancel => {}
            }
        }

        let output = self.tracker.handle(event, self.bounds());
        self.sync_gesture();

        let committed_page = match output {
            GestureOutput::Released(release) => self
                .policy
                .target_page(
                    &release,
                    self.state.current_page,
                    self.state.total_pages,
                )
                .and_then(|target| self.request_page(target).committed_page),
            _ => None,
        };

        CarouselOutcome {
            gesture: Some(output),
            committed_page,
        }
    }

    fn handle_wheel(&mut self, wheel: &WheelEvent) -> CarouselOutcome {
        match self.policy.wheel_direction(wheel) {
            Some(direction) => self.step(direction),
            None => CarouselOutcome::default(),
        }
    }
}
