/// Receives coarse progress milestones in percent. Informational only.
pub trait ProgressSink: Send + Sync {
    fn report(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

pub(crate) fn milestone(sink: Option<&dyn ProgressSink>, percent: u8) {
    if let Some(sink) = sink {
        sink.report(percent);
    }
}

pub(crate) mod encode {
    pub const LOADED: u8 = 10;
    pub const SEALED: u8 = 30;
    pub const FITS: u8 = 50;
    pub const EMBEDDED: u8 = 80;
    pub const DONE: u8 = 100;
}

pub(crate) mod decode {
    pub const LOADED: u8 = 20;
    pub const EXTRACTED: u8 = 60;
    pub const DONE: u8 = 100;
}
