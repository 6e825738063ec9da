//! `requestAnimationFrame` driver for an [`Animator`].
//!
//! The animator only knows how to advance to a timestamp; this module owns the
//! browser side: one pending frame request at a time, re-requested while
//! [`Animator::tick`] reports more work, and cancelled on drop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::animator::Animator;
use crate::style::StyleTarget;

/// Frame loop errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FrameError {
    #[error("window is not available")]
    WindowNotAvailable,

    #[error("failed to request animation frame: {0}")]
    RequestFailed(String),
}

type RafClosure = RefCell<Option<Closure<dyn FnMut(f64)>>>;

struct LoopState<T> {
    window: Window,
    animator: Rc<RefCell<Animator<T>>>,
    pending: Cell<Option<i32>>,
    callback: RafClosure,
}

impl<T> LoopState<T> {
    fn request(&self) -> Result<(), FrameError> {
        if self.pending.get().is_some() {
            return Ok(());
        }
        let callback = self.callback.borrow();
        let Some(cb) = callback.as_ref() else {
            return Ok(());
        };
        let id = self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| FrameError::RequestFailed(format!("{e:?}")))?;
        self.pending.set(Some(id));
        Ok(())
    }

    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("failed to cancel animation frame: {e:?}");
            }
        }
    }
}

/// Host-owned frame loop. Dropping it cancels any pending frame.
pub struct FrameLoop<T: 'static> {
    state: Rc<LoopState<T>>,
}

impl<T: StyleTarget + 'static> FrameLoop<T> {
    /// Bind a loop to `animator`. No frame is requested until [`FrameLoop::wake`].
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::WindowNotAvailable`] outside a browser window.
    pub fn new(animator: Rc<RefCell<Animator<T>>>) -> Result<Self, FrameError> {
        let window = web_sys::window().ok_or(FrameError::WindowNotAvailable)?;
        let state = Rc::new(LoopState {
            window,
            animator,
            pending: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak: Weak<LoopState<T>> = Rc::downgrade(&state);
        let cb = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.pending.set(None);
            // A borrowed animator means a callback is mutating it; try next frame.
            let more = match state.animator.try_borrow_mut() {
                Ok(mut animator) => animator.tick(timestamp),
                Err(_) => true,
            };
            if more {
                if let Err(e) = state.request() {
                    log::error!("{e}");
                }
            }
        });
        *state.callback.borrow_mut() = Some(cb);

        Ok(Self { state })
    }

    /// Create a loop and immediately wake it.
    ///
    /// # Errors
    ///
    /// See [`FrameLoop::new`] and [`FrameLoop::wake`].
    pub fn run(animator: Rc<RefCell<Animator<T>>>) -> Result<Self, FrameError> {
        let frame_loop = Self::new(animator)?;
        frame_loop.wake()?;
        Ok(frame_loop)
    }

    /// Request a frame if the animator has started work and none is pending.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::RequestFailed`] if the browser rejects the request.
    pub fn wake(&self) -> Result<(), FrameError> {
        let needs_frame = self.state.animator.try_borrow().map_or(true, |a| a.needs_frame());
        if needs_frame { self.state.request() } else { Ok(()) }
    }

    /// Cancel the pending frame, if any. Records keep their status.
    pub fn cancel(&self) {
        self.state.cancel();
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.pending.get().is_some()
    }

    /// The animator this loop drives.
    #[must_use]
    pub fn animator(&self) -> &Rc<RefCell<Animator<T>>> {
        &self.state.animator
    }
}

impl<T: 'static> Drop for FrameLoop<T> {
    fn drop(&mut self) {
        self.state.cancel();
    }
}
