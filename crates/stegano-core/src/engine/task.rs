use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::RemoteHandle;
use futures::FutureExt;

use crate::cancel::CancellationToken;
use crate::result::Result;

/// A running encode or decode.
///
/// Awaiting it yields the task's result. Dropping it, or calling [`TaskHandle::cancel`],
/// asks the task to stop at its next checkpoint. The carrier of the request is never
/// touched either way.
#[must_use = "a dropped task handle cancels its task"]
pub struct TaskHandle<T> {
    handle: RemoteHandle<Result<T>>,
    cancel: CancellationToken,
}

impl<T: Send + 'static> TaskHandle<T> {
    pub(crate) fn new(handle: RemoteHandle<Result<T>>, cancel: CancellationToken) -> Self {
        Self { handle, cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// blocks the current thread until the task is done
    pub fn wait(self) -> Result<T> {
        futures::executor::block_on(self)
    }
}

impl<T: Send + 'static> Future for TaskHandle<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.handle.poll_unpin(cx)
    }
}

impl<T> Drop for TaskHandle<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
