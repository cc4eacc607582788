//! One-shot HTTP server on the loopback interface for exercising the real
//! `reqwest` clients.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// What the server saw: the request head with header names lowercased, and
/// the raw body.
pub struct Captured {
    pub head: String,
    pub body: String,
}

impl Captured {
    /// Value of header `name` (lowercase), if sent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            (key == name).then(|| value.trim())
        })
    }

    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }
}

/// Accept a single connection, answer it with `status` and `body`, and hand
/// back what was received.  Returns the base URL (`http://127.0.0.1:<port>`).
pub fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            let line = match line.split_once(':') {
                Some((key, value)) => {
                    let key = key.trim().to_ascii_lowercase();
                    if key == "content-length" {
                        content_length = value.trim().parse().unwrap();
                    }
                    format!("{key}: {}", value.trim())
                }
                None => line.to_string(),
            };
            head.push_str(&line);
            head.push('\n');
        }

        let mut raw = vec![0u8; content_length];
        reader.read_exact(&mut raw).unwrap();

        let response = format!(
            "HTTP/1.1 {status} Test\r\n\
             Content-Type: text/plain\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        Captured {
            head,
            body: String::from_utf8(raw).unwrap(),
        }
    });

    (format!("http://{addr}"), handle)
}
