use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use yew::Callback;

use digibloom_core::GardenState;

/// Drives edge autopan. Holds at most one pending animation frame; the
/// handle cancels on drop, so clearing the slot is the cancellation. This is
/// the only suspended operation in the app: it must start exactly when the
/// edge speed becomes nonzero while browsing and stop exactly when the speed
/// returns to zero or the mode leaves browsing.
pub(crate) struct AutopanLoop {
    frame: Rc<RefCell<Option<AnimationFrame>>>,
}

impl AutopanLoop {
    pub(crate) fn new() -> Self {
        Self {
            frame: Rc::new(RefCell::new(None)),
        }
    }

    /// Reconcile the loop with the current garden state.
    pub(crate) fn sync(&self, garden: &Rc<RefCell<GardenState>>, redraw: &Callback<()>) {
        let wanted = {
            let garden = garden.borrow();
            garden.mode().is_browsing() && garden.scroll_speed() != 0.0
        };
        if wanted {
            let already_running = self.frame.borrow().is_some();
            if !already_running {
                schedule(self.frame.clone(), garden.clone(), redraw.clone());
            }
        } else {
            self.cancel();
        }
    }

    pub(crate) fn cancel(&self) {
        self.frame.borrow_mut().take();
    }
}

fn schedule(
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    garden: Rc<RefCell<GardenState>>,
    redraw: Callback<()>,
) {
    let slot = frame.clone();
    let handle = request_animation_frame(move |_timestamp| {
        slot.borrow_mut().take();
        let keep_running = {
            let mut garden_mut = garden.borrow_mut();
            garden_mut.scroll_frame();
            garden_mut.mode().is_browsing() && garden_mut.scroll_speed() != 0.0
        };
        redraw.emit(());
        if keep_running {
            schedule(slot.clone(), garden, redraw);
        }
    });
    *frame.borrow_mut() = Some(handle);
}
