// Request line capture module
// Records the raw request line while hyper reads the connection

use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// Longest request line kept; anything longer falls back to the parsed URI
const MAX_REQUEST_LINE: usize = 64 * 1024;

#[derive(Debug, Default)]
struct LineState {
    bytes: Vec<u8>,
    complete: bool,
    overflowed: bool,
}

/// Handle to the request line recorded by a [`RequestLineRecorder`]
#[derive(Debug, Clone, Default)]
pub struct RecordedLine {
    state: Arc<Mutex<LineState>>,
}

impl RecordedLine {
    /// The request-target exactly as it appeared on the request line.
    ///
    /// `None` until the whole line has been read, or when it was too long
    /// to keep.
    pub fn target(&self) -> Option<String> {
        let state = self.state.lock().ok()?;
        if !state.complete || state.overflowed {
            return None;
        }
        let line = std::str::from_utf8(&state.bytes).ok()?;
        line.trim_end_matches('\r')
            .split(' ')
            .nth(1)
            .filter(|target| !target.is_empty())
            .map(ToString::to_string)
    }

    fn record(&self, chunk: &[u8]) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if state.complete {
            return;
        }

        state.bytes.extend_from_slice(chunk);

        // Empty lines ahead of the request line are tolerated by the parser
        let leading = state
            .bytes
            .iter()
            .take_while(|b| matches!(b, b'\r' | b'\n'))
            .count();
        state.bytes.drain(..leading);

        let newline = state.bytes.iter().position(|&b| b == b'\n');
        match newline {
            Some(end) if end <= MAX_REQUEST_LINE => {
                state.bytes.truncate(end);
                state.complete = true;
            }
            Some(_) => overflow(&mut state),
            None if state.bytes.len() > MAX_REQUEST_LINE => overflow(&mut state),
            None => {}
        }
    }

    fn is_complete(&self) -> bool {
        self.state.lock().map_or(true, |state| state.complete)
    }
}

fn overflow(state: &mut LineState) {
    state.bytes.clear();
    state.complete = true;
    state.overflowed = true;
}

/// Transport wrapper copying the first request line aside as it is read
pub struct RequestLineRecorder<T> {
    inner: T,
    line: RecordedLine,
    done: bool,
}

impl<T> RequestLineRecorder<T> {
    pub fn new(inner: T) -> (Self, RecordedLine) {
        let line = RecordedLine::default();
        let recorder = Self {
            inner,
            line: line.clone(),
            done: false,
        };
        (recorder, line)
    }
}

impl<T: AsyncRead + Unpin> AsyncRead for RequestLineRecorder<T> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let result = Pin::new(&mut this.inner).poll_read(cx, buf);

        if !this.done && matches!(result, Poll::Ready(Ok(()))) {
            this.line.record(&buf.filled()[before..]);
            this.done = this.line.is_complete();
        }
        result
    }
}

impl<T: AsyncWrite + Unpin> AsyncWrite for RequestLineRecorder<T> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write_vectored(cx, bufs)
    }

    fn is_write_vectored(&self) -> bool {
        self.inner.is_write_vectored()
    }
}
