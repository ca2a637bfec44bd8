/*
 * Frame Loop Module
 *
 * Models "run once before the next repaint" chaining as an explicit scheduler.
 * The scheduler hands out one FrameRequest at a time; running a request is only
 * allowed while it is the outstanding one and the loop has not been cancelled.
 * Cancellation is shared through a token so a request that outlives teardown
 * can still tell it is dead.
 *
 * Everything here lives on the UI thread, hence Rc/Cell rather than atomics.
 */

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

// Handle for one scheduled frame
#[derive(Debug)]
pub struct FrameRequest {
    id: u64,
    token: CancelToken,
}

impl FrameRequest {
    pub fn id(&self) -> u64 {
        self.id
    }

    // False once the loop that issued this request has been cancelled
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    token: CancelToken,
    next_id: u64,
    pending: Option<u64>,
    frames_run: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // Schedule the next frame. Returns None once the loop is cancelled.
    pub fn request(&mut self) -> Option<FrameRequest> {
        if self.token.is_cancelled() {
            return None;
        }

        self.next_id += 1;
        self.pending = Some(self.next_id);
        Some(FrameRequest {
            id: self.next_id,
            token: self.token.clone(),
        })
    }

    // Claim a request for execution. Stale or cancelled requests are refused.
    pub fn begin(&mut self, request: &FrameRequest) -> bool {
        if !request.is_live() || self.pending != Some(request.id) {
            return false;
        }
        self.pending = None;
        self.frames_run += 1;
        true
    }

    pub fn cancel(&mut self) {
        self.token.cancel();
        self.pending = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}
