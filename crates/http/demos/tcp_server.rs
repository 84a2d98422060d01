use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use micro_http_parser::connection::StreamReader;
use micro_http_parser::protocol::{ParseError, Request};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const PORT: u16 = 42069;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(port = PORT, "start listening");
    let tcp_listener = match TcpListener::bind(("127.0.0.1", PORT)) {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    for tcp_stream in tcp_listener.incoming() {
        let tcp_stream = match tcp_stream {
            Ok(tcp_stream) => tcp_stream,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        thread::spawn(move || match handle_connection(tcp_stream) {
            Ok(()) => info!("finished process, connection shutdown"),
            Err(e) => error!(cause = %e, "failed to write response, connection shutdown"),
        });
    }
}

fn handle_connection(mut tcp_stream: TcpStream) -> std::io::Result<()> {
    tcp_stream.set_read_timeout(Some(Duration::from_secs(10)))?;

    let mut reader = StreamReader::new();
    let response = match reader.read_request(&mut tcp_stream) {
        Ok(request) => {
            log_request(&request);
            ok_response(&request)
        }
        Err(e) => {
            warn!(cause = %e, "can't receive request");
            bad_request_response(&e)
        }
    };

    tcp_stream.write_all(&response)?;
    tcp_stream.flush()
}

fn log_request(request: &Request) {
    info!(method = request.method(), target = request.target(), version = request.request_line().http_version(), "request line");
    for (name, value) in request.headers() {
        info!(name = name.as_str(), value = ?value, "header");
    }
    info!(body = %String::from_utf8_lossy(request.body()), "body");
}

fn ok_response(request: &Request) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        request.body().len()
    )
    .into_bytes();
    response.extend_from_slice(request.body());
    response
}

fn bad_request_response(e: &ParseError) -> Vec<u8> {
    let body = format!("{e}\n");
    format!(
        "HTTP/1.1 400 Bad Request\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes()
}
