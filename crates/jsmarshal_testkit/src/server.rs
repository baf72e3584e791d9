use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

/// Request seen by a [`FakeWebDriver`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
	/// HTTP method, e.g. `POST`.
	pub method: String,
	/// Request target, e.g. `/session/abc/execute/sync`.
	pub path: String,
	/// Raw request body.
	pub body: Vec<u8>,
}

impl CapturedRequest {
	/// Body parsed as JSON.
	pub fn json(&self) -> serde_json::Value {
		serde_json::from_slice(&self.body).expect("request body should be valid json")
	}
}

/// Loopback HTTP server that answers exactly one request with a canned reply.
pub struct FakeWebDriver {
	url: String,
	handle: JoinHandle<CapturedRequest>,
}

impl FakeWebDriver {
	/// Start serving `body` as `application/json` with `status_line`, e.g. `200 OK`.
	pub fn start(status_line: &str, body: &str) -> Self {
		Self::start_with_content_type(status_line, "application/json; charset=utf-8", body)
	}

	/// Start serving `body` with an explicit content type.
	pub fn start_with_content_type(status_line: &str, content_type: &str, body: &str) -> Self {
		let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
		let addr = listener.local_addr().expect("local_addr");

		let response = format!(
			"HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
			body.len()
		);

		let handle = std::thread::spawn(move || {
			let (mut stream, _) = listener.accept().expect("accept");
			let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
			let request = read_request(&mut stream);
			stream.write_all(response.as_bytes()).expect("write response");
			let _ = stream.flush();
			request
		});

		Self {
			url: format!("http://{addr}"),
			handle,
		}
	}

	/// Base URL to hand to the transport.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Wait for the request to be served and return it.
	pub fn finish(self) -> CapturedRequest {
		self.handle.join().expect("fake server thread")
	}
}

fn read_request(stream: &mut impl Read) -> CapturedRequest {
	let mut buf = Vec::new();
	let mut tmp = [0u8; 4096];
	let mut header_end = None;
	let mut content_length = 0;

	loop {
		if let Some(end) = header_end
			&& buf.len() >= end + content_length
		{
			break;
		}
		match stream.read(&mut tmp) {
			Ok(0) | Err(_) => break,
			Ok(n) => buf.extend_from_slice(&tmp[..n]),
		}
		if header_end.is_none()
			&& let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n")
		{
			header_end = Some(pos + 4);
			content_length = parse_content_length(&buf[..pos]);
		}
	}

	let end = header_end.unwrap_or(buf.len());
	let head = String::from_utf8_lossy(&buf[..end]).into_owned();
	let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
	CapturedRequest {
		method: request_line.next().unwrap_or_default().to_owned(),
		path: request_line.next().unwrap_or_default().to_owned(),
		body: buf[end..].to_vec(),
	}
}

fn parse_content_length(head: &[u8]) -> usize {
	String::from_utf8_lossy(head)
		.lines()
		.filter_map(|line| line.split_once(':'))
		.find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
		.and_then(|(_, value)| value.trim().parse().ok())
		.unwrap_or(0)
}
