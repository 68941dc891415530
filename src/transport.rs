use serde_json::Value;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SendOptions {
    pub ackable: bool,
}

// Outbound half of the socket. Sends are fire-and-forget from this layer's
// perspective; acknowledgment handling lives in the host transport.
pub trait Transport {
    fn send(&self, msg_type: &str, data: Value, options: SendOptions);
}
