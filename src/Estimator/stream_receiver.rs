//! # Stream Receiver
//!
//! Owns the TCP connection to the estimation service for one request/response cycle.
//! The protocol has no length prefix and no terminator: the payload is sent in full and the
//! response is whatever arrives until the service closes its side of the stream.
//!
//! The connection is a local of `exchange`, so it is closed on every exit path.
//! Connection failures and timeouts become `EstimatorError::ServiceUnavailable`, a response
//! that is not valid UTF-8 is an `EstimatorError::ProtocolError`.
//!
//! `ServiceConnection` is the seam used by `KineticsService`: tests plug in a canned
//! connection instead of a socket.

use super::errors::EstimatorError;
use crate::settings::ServiceConfig;
use log::{debug, info};
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// size of a single read from the socket
pub const CHUNK_SIZE: usize = 512;

/// one send-then-receive-until-close exchange with the estimation service
pub trait ServiceConnection {
    fn address(&self) -> String;
    fn exchange(&self, payload: &str) -> Result<String, EstimatorError>;
}

#[derive(Debug, Clone)]
pub struct StreamReceiver {
    pub host: String,
    pub port: u16,
    /// connect, write and per-read timeout
    pub timeout: Duration,
    /// upper bound on the whole response, measured from the first read
    pub response_deadline: Option<Duration>,
}

impl StreamReceiver {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.to_string(),
            port,
            timeout,
            response_deadline: None,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            timeout: Duration::from_secs(config.timeout_secs),
            response_deadline: config.response_deadline_secs.map(Duration::from_secs),
        }
    }

    fn unavailable(&self, reason: impl ToString) -> EstimatorError {
        EstimatorError::ServiceUnavailable {
            address: self.address(),
            reason: reason.to_string(),
        }
    }

    fn connect(&self) -> Result<TcpStream, EstimatorError> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| self.unavailable(format!("cannot resolve host: {}", e)))?
            .collect();
        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!("connection to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }
        Err(match last_error {
            Some(e) => self.unavailable(e),
            None => self.unavailable("host resolved to no addresses"),
        })
    }

    fn read_until_closed(&self, stream: &mut TcpStream) -> Result<Vec<u8>, EstimatorError> {
        let started = Instant::now();
        let mut response = Vec::new();
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let read_timeout = match self.response_deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_sub(started.elapsed());
                    if remaining.is_zero() {
                        return Err(self.unavailable(format!(
                            "response not complete within {:?}",
                            deadline
                        )));
                    }
                    remaining.min(self.timeout)
                }
                None => self.timeout,
            };
            stream
                .set_read_timeout(Some(read_timeout))
                .map_err(|e| self.unavailable(e))?;
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    debug!("received {} bytes", n);
                    response.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(self.unavailable(format!("read timed out: {}", e)));
                }
                Err(e) => return Err(self.unavailable(e)),
            }
        }
        Ok(response)
    }
}

impl Default for StreamReceiver {
    fn default() -> Self {
        Self::from_config(&ServiceConfig::default())
    }
}

impl ServiceConnection for StreamReceiver {
    fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn exchange(&self, payload: &str) -> Result<String, EstimatorError> {
        let mut stream = self.connect()?;
        stream
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| self.unavailable(e))?;
        info!("sending request for reaction search to {}", self.address());
        stream
            .write_all(payload.as_bytes())
            .map_err(|e| self.unavailable(e))?;
        debug!("sent {} bytes", payload.len());
        let response = self.read_until_closed(&mut stream)?;
        drop(stream);
        info!(
            "finished request, closed connection to {} ({} bytes received)",
            self.address(),
            response.len()
        );
        String::from_utf8(response).map_err(|e| {
            EstimatorError::ProtocolError(format!("response is not valid UTF-8: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    /// serves one connection: reads the request up to END, writes `chunks` with a pause
    /// between them, then closes
    fn serve_once(chunks: Vec<Vec<u8>>, pause: Duration) -> (u16, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 64];
            while !request.ends_with(b"END\n") {
                let n = socket.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            for chunk in chunks {
                // the client may already have given up
                if socket.write_all(&chunk).is_err() {
                    break;
                }
                thread::sleep(pause);
            }
            String::from_utf8(request).unwrap()
        });
        (port, handle)
    }

    fn receiver(port: u16) -> StreamReceiver {
        StreamReceiver::new("127.0.0.1", port, Duration::from_secs(5))
    }

    #[test]
    fn test_reassembles_chunks_until_close() {
        let body = "R1\n1 C 1\n\n\nheader\n\nR1 --> R1\t1\t0\t0\tx".repeat(40);
        let chunks: Vec<Vec<u8>> = body.as_bytes().chunks(97).map(|c| c.to_vec()).collect();
        let (port, server) = serve_once(chunks, Duration::from_millis(1));
        let response = receiver(port).exchange("reactant1 (molecule/cm3) 1\n1 C 1\n\nEND\n");
        assert_eq!(response.unwrap(), body);
        assert_eq!(
            server.join().unwrap(),
            "reactant1 (molecule/cm3) 1\n1 C 1\n\nEND\n"
        );
    }

    #[test]
    fn test_refused_port_is_unavailable() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let result = receiver(port).exchange("END\n");
        assert!(matches!(
            result,
            Err(EstimatorError::ServiceUnavailable { .. })
        ));
    }

    #[test]
    fn test_response_deadline() {
        let chunks = vec![b"partial".to_vec(), b" rest".to_vec()];
        let (port, server) = serve_once(chunks, Duration::from_millis(1500));
        let mut slow = receiver(port);
        slow.response_deadline = Some(Duration::from_millis(300));
        let result = slow.exchange("END\n");
        assert!(matches!(
            result,
            Err(EstimatorError::ServiceUnavailable { .. })
        ));
        server.join().unwrap();
    }

    #[test]
    fn test_invalid_utf8_is_protocol_error() {
        let (port, server) = serve_once(vec![vec![0xff, 0xfe, 0x00]], Duration::from_millis(1));
        let result = receiver(port).exchange("END\n");
        assert!(matches!(result, Err(EstimatorError::ProtocolError(_))));
        server.join().unwrap();
    }

    #[test]
    fn test_address_from_config() {
        let config = ServiceConfig {
            host: "estimator.local".to_string(),
            port: 5050,
            ..ServiceConfig::default()
        };
        let receiver = StreamReceiver::from_config(&config);
        assert_eq!(receiver.address(), "estimator.local:5050");
        assert_eq!(receiver.timeout, Duration::from_secs(10));
        assert_eq!(receiver.response_deadline, None);
    }
}
