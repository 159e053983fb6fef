use std::net::TcpStream;

use gomoku::{ClientMessage, HubMessage};
use tracing::{debug, trace};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};
use url::Url;

use crate::ClientError;

/// A duplex message channel to the hub.
///
/// Messages in each direction are strictly ordered. There is no timeout:
/// `receive()` blocks until the hub sends something.
pub trait Transport {
    /// Sends a message without waiting for any acknowledgement.
    fn send(&mut self, msg: &ClientMessage) -> Result<(), ClientError>;

    /// Blocks until the next message arrives.
    fn receive(&mut self) -> Result<HubMessage, ClientError>;
}

/// A WebSocket connection to the hub at `ws://<host>/game`.
///
/// The connection is only established on first use, and never re-established
/// after it broke down.
pub struct HubConnection {
    url: Url,
    websocket: Option<WebSocket<MaybeTlsStream<TcpStream>>>,
}

impl HubConnection {
    /// `host` may include a port, e.g. `localhost:8080`.
    pub fn new(host: &str) -> Result<Self, ClientError> {
        let url = Url::parse(&format!("ws://{}/game", host)).map_err(ClientError::InvalidAddress)?;
        Ok(Self {
            url,
            websocket: None,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_connected(&self) -> bool {
        self.websocket.is_some()
    }

    /// Returns the WebSocket, connecting first if that hasn't happened yet.
    pub fn connect(&mut self) -> Result<&mut WebSocket<MaybeTlsStream<TcpStream>>, ClientError> {
        let websocket = match self.websocket.take() {
            Some(websocket) => websocket,
            None => {
                debug!(url = %self.url, "Connecting to hub");
                let (websocket, _response) = tungstenite::connect(&self.url)?;
                websocket
            }
        };
        Ok(self.websocket.insert(websocket))
    }
}

impl Transport for HubConnection {
    fn send(&mut self, msg: &ClientMessage) -> Result<(), ClientError> {
        let msg_json = serde_json::to_string(msg).map_err(ClientError::Encode)?;
        trace!(name: "Sending message", url = %self.url, message = %msg_json);
        self.connect()?.write_message(Message::Text(msg_json))?;
        Ok(())
    }

    fn receive(&mut self) -> Result<HubMessage, ClientError> {
        let msg_json = match self.connect()?.read_message()? {
            Message::Text(text) => text,
            other => {
                return Err(ClientError::ProtocolFraming {
                    frame_kind: frame_kind(&other),
                })
            }
        };
        trace!(name: "Received message", url = %self.url, message = %msg_json);
        serde_json::from_str(&msg_json).map_err(ClientError::Decode)
    }
}

fn frame_kind(msg: &Message) -> &'static str {
    match msg {
        Message::Text(_) => "text",
        Message::Binary(_) => "binary",
        Message::Ping(_) => "ping",
        Message::Pong(_) => "pong",
        Message::Close(_) => "close",
        Message::Frame(_) => "raw",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_endpoint_url() {
        let conn = HubConnection::new("localhost:8080").unwrap();
        assert_eq!(conn.url().as_str(), "ws://localhost:8080/game");
        assert!(!conn.is_connected());
    }

    #[test]
    fn invalid_host() {
        assert!(matches!(
            HubConnection::new("local host"),
            Err(ClientError::InvalidAddress(_))
        ));
    }
}
