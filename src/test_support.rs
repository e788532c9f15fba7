//! Local network stand-ins for the speech listener.

use std::io::Read;
use std::net::TcpListener;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Accepts connections forever and forwards everything each one wrote.
///
/// Returns the port and a receiver yielding one byte vector per connection.
pub fn spawn_tcp_sink() -> (u16, Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (sender, receiver) = channel();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else {
                continue;
            };
            let mut bytes = Vec::new();
            let _ = stream.read_to_end(&mut bytes);
            if sender.send(bytes).is_err() {
                return;
            }
        }
    });

    (port, receiver)
}

/// A local port with nothing listening on it.
pub fn unused_local_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
