//! Single-shot fake node for exercising HTTP round trips in tests.
//!
//! [`FakeNode`] binds an ephemeral loopback port, answers exactly one request
//! with a canned status and body, and records what it received.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// How long the fake node waits for its single connection.
const ACCEPT_DEADLINE: Duration = Duration::from_secs(5);

/// A request captured by [`FakeNode`].
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Request target including any query string.
    pub target: String,
    /// Header names and values in arrival order.
    pub headers: Vec<(String, String)>,
    /// Request body decoded lossily as UTF-8.
    pub body: String,
}

impl RecordedRequest {
    /// First header called `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serves exactly one HTTP request with a canned response.
#[derive(Debug)]
pub struct FakeNode {
    port: u16,
    request: Arc<Mutex<Option<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FakeNode {
    /// Starts listening and answers the first request with `status` and `body`.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the loopback listener cannot be
    /// bound or configured.
    pub fn spawn(status: u16, body: &str) -> io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        listener.set_nonblocking(true)?;
        let port = listener.local_addr()?.port();
        let request = Arc::new(Mutex::new(None));
        let request_clone = Arc::clone(&request);
        let body = body.to_owned();
        let handle = thread::spawn(move || {
            if let Ok(Some(stream)) = accept_with_deadline(&listener)
                && let Ok(recorded) = serve(stream, status, &body)
            {
                *request_clone.lock().unwrap_or_else(PoisonError::into_inner) = Some(recorded);
            }
        });
        Ok(Self {
            port,
            request,
            handle: Some(handle),
        })
    }

    /// Port the fake node listens on.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Base URL of the fake node, with a trailing slash.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    /// Waits for the server thread and returns the request it recorded, if
    /// any arrived before the accept deadline.
    ///
    /// # Errors
    ///
    /// Returns an error when the server thread panicked.
    pub fn take_request(&mut self) -> io::Result<Option<RecordedRequest>> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| io::Error::other("fake node thread panicked"))?;
        }
        Ok(self
            .request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take())
    }
}

fn accept_with_deadline(listener: &TcpListener) -> io::Result<Option<TcpStream>> {
    let deadline = Instant::now() + ACCEPT_DEADLINE;
    loop {
        match listener.accept() {
            Ok((stream, _)) => {
                stream.set_nonblocking(false)?;
                return Ok(Some(stream));
            }
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    return Ok(None);
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(error) => return Err(error),
        }
    }
}

fn serve(stream: TcpStream, status: u16, body: &str) -> io::Result<RecordedRequest> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let target = parts.next().unwrap_or_default().to_owned();

    let mut headers = Vec::new();
    loop {
        line.clear();
        reader.read_line(&mut line)?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((key, value)) = trimmed.split_once(':') {
            headers.push((key.trim().to_owned(), value.trim().to_owned()));
        }
    }

    let length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut payload = vec![0_u8; length];
    reader.read_exact(&mut payload)?;

    let mut writer = stream;
    write!(
        writer,
        "HTTP/1.1 {status} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    writer.flush()?;

    Ok(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&payload).into_owned(),
    })
}
