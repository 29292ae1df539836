use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use super::envelope::{FindMatchRequest, FindMatchResponse, Incoming, Outgoing, OutgoingBody};
use super::{ChannelError, MatchChannel, Session};
use crate::config::{GameMode, ServerConfig};
use crate::protocol::{OpCode, encode_move};
use crate::util::{clog, cwarn};

const FIND_MATCH_RPC: &str = "find_match";

pub type MatchDataHandler = Rc<dyn Fn(i64, Vec<u8>)>;

type Reply = Result<Incoming, ChannelError>;

#[allow(dead_code)]
struct WsHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
struct Inner {
    ws: RefCell<Option<WebSocket>>,
    handlers: RefCell<Option<WsHandlers>>,
    pending: RefCell<HashMap<String, oneshot::Sender<Reply>>>,
    next_cid: Cell<u64>,
    match_id: RefCell<Option<String>>,
    closing: Cell<bool>,
}

fn detach(ws: &WebSocket) {
    ws.set_onopen(None);
    ws.set_onmessage(None);
    ws.set_onerror(None);
    ws.set_onclose(None);
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(ws) = self.ws.get_mut().take() {
            detach(&ws);
            let _ = ws.close();
        }
    }
}

impl Inner {
    fn release(&self) {
        self.ws.borrow_mut().take();
        self.handlers.borrow_mut().take();
        // Dropping the senders wakes every waiter with `Closed`.
        self.pending.borrow_mut().clear();
        self.match_id.borrow_mut().take();
    }

    fn route(&self, text: &str, on_match_data: &MatchDataHandler) {
        let mut frame: Incoming = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(err) => {
                cwarn(&format!("unreadable socket frame: {err}"));
                return;
            }
        };
        if let Some(cid) = frame.cid.take() {
            let waiter = self.pending.borrow_mut().remove(&cid);
            let Some(waiter) = waiter else {
                return;
            };
            let reply = match frame.error.take() {
                Some(err) => Err(ChannelError::Server {
                    code: err.code,
                    message: err.message,
                }),
                None => Ok(frame),
            };
            let _ = waiter.send(reply);
            return;
        }
        if let Some(err) = frame.error {
            cwarn(&format!("server error {}: {}", err.code, err.message));
            return;
        }
        if let Some(data) = frame.match_data {
            let stale = self
                .match_id
                .borrow()
                .as_deref()
                .is_some_and(|current| current != data.match_id);
            if stale {
                return;
            }
            match data.bytes() {
                Ok(bytes) => on_match_data(data.op_code, bytes),
                Err(err) => cwarn(&format!("undecodable match data: {err}")),
            }
        }
    }
}

/// Realtime socket to the game server. Cheap to clone; clones share the
/// same connection.
#[derive(Clone)]
pub struct NakamaChannel {
    inner: Rc<Inner>,
}

impl PartialEq for NakamaChannel {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl NakamaChannel {
    /// Opens the socket and resolves once it is usable. `on_close` fires only
    /// for connections that were up and then dropped by the other side.
    pub async fn connect(
        config: &ServerConfig,
        session: &Session,
        on_match_data: MatchDataHandler,
        on_close: Rc<dyn Fn()>,
    ) -> Result<Self, ChannelError> {
        let endpoint = config.http_base();
        let ws = WebSocket::new(&config.socket_url(&session.token))
            .map_err(|_| ChannelError::Connect(endpoint.clone()))?;
        let inner = Rc::new(Inner::default());
        *inner.ws.borrow_mut() = Some(ws.clone());

        let (open_tx, open_rx) = oneshot::channel::<bool>();
        let open_tx = Rc::new(RefCell::new(Some(open_tx)));
        let opened = Rc::new(Cell::new(false));

        let onopen = {
            let open_tx = open_tx.clone();
            let opened = opened.clone();
            let endpoint = endpoint.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                opened.set(true);
                clog(&format!("socket connected to {endpoint}"));
                if let Some(tx) = open_tx.borrow_mut().take() {
                    let _ = tx.send(true);
                }
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = {
            let weak: Weak<Inner> = Rc::downgrade(&inner);
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let Some(text) = event.data().as_string() else {
                    return;
                };
                inner.route(&text, &on_match_data);
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let endpoint = endpoint.clone();
            Closure::wrap(Box::new(move |_event: ErrorEvent| {
                cwarn(&format!("socket error on {endpoint}"));
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            let weak: Weak<Inner> = Rc::downgrade(&inner);
            let open_tx = open_tx.clone();
            let opened = opened.clone();
            Closure::wrap(Box::new(move |event: Event| {
                if let Some(tx) = open_tx.borrow_mut().take() {
                    let _ = tx.send(false);
                }
                let closing = weak.upgrade().is_none_or(|inner| {
                    let closing = inner.closing.get();
                    inner.release();
                    closing
                });
                if closing || !opened.get() {
                    return;
                }
                match event.dyn_ref::<CloseEvent>() {
                    Some(close) => clog(&format!(
                        "socket closed ({}) {}",
                        close.code(),
                        close.reason()
                    )),
                    None => clog("socket closed"),
                }
                on_close();
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        *inner.handlers.borrow_mut() = Some(WsHandlers {
            onopen,
            onmessage,
            onerror,
            onclose,
        });

        match open_rx.await {
            Ok(true) => Ok(Self { inner }),
            _ => {
                if let Some(ws) = inner.ws.borrow_mut().take() {
                    detach(&ws);
                }
                inner.release();
                Err(ChannelError::Connect(endpoint))
            }
        }
    }

    pub fn disconnect(&self) {
        self.inner.closing.set(true);
        let ws = self.inner.ws.borrow_mut().take();
        self.inner.release();
        if let Some(ws) = ws {
            detach(&ws);
            let _ = ws.close();
        }
    }

    fn next_cid(&self) -> String {
        let cid = self.inner.next_cid.get() + 1;
        self.inner.next_cid.set(cid);
        cid.to_string()
    }

    fn send_frame(&self, frame: &Outgoing<'_>) -> Result<(), ChannelError> {
        let ws = self
            .inner
            .ws
            .borrow()
            .clone()
            .ok_or(ChannelError::NotConnected)?;
        if ws.ready_state() != WebSocket::OPEN {
            return Err(ChannelError::NotConnected);
        }
        let text = serde_json::to_string(frame)?;
        ws.send_with_str(&text).map_err(|_| ChannelError::Closed)
    }

    async fn request(&self, body: OutgoingBody<'_>) -> Result<Incoming, ChannelError> {
        let cid = self.next_cid();
        let (tx, rx) = oneshot::channel();
        self.inner.pending.borrow_mut().insert(cid.clone(), tx);
        let frame = Outgoing {
            cid: Some(cid.clone()),
            body,
        };
        if let Err(err) = self.send_frame(&frame) {
            self.inner.pending.borrow_mut().remove(&cid);
            return Err(err);
        }
        rx.await.map_err(|_| ChannelError::Closed)?
    }
}

impl MatchChannel for NakamaChannel {
    fn match_id(&self) -> Option<String> {
        self.inner.match_id.borrow().clone()
    }

    fn send_move(&self, cell: usize) -> Result<(), ChannelError> {
        let match_id = self.match_id().ok_or(ChannelError::NoMatch)?;
        let bytes = encode_move(cell)?;
        self.send_frame(&Outgoing {
            cid: None,
            body: OutgoingBody::match_data(&match_id, OpCode::Move.wire(), &bytes),
        })
    }

    async fn find_match(&self, mode: GameMode) -> Result<Option<String>, ChannelError> {
        let payload = serde_json::to_string(&FindMatchRequest {
            fast: mode.is_fast(),
        })?;
        let reply = self
            .request(OutgoingBody::Rpc {
                id: FIND_MATCH_RPC,
                payload,
            })
            .await?;
        let Some(rpc) = reply.rpc else {
            return Ok(None);
        };
        let found: FindMatchResponse = if rpc.payload.is_empty() {
            FindMatchResponse::default()
        } else {
            serde_json::from_str(&rpc.payload)?
        };
        let Some(candidate) = found.match_ids.into_iter().next() else {
            return Ok(None);
        };
        let joined = self
            .request(OutgoingBody::MatchJoin {
                match_id: &candidate,
            })
            .await?;
        let match_id = joined.joined.map(|m| m.match_id).unwrap_or(candidate);
        clog(&format!("joined match {match_id}"));
        *self.inner.match_id.borrow_mut() = Some(match_id.clone());
        Ok(Some(match_id))
    }

    async fn leave_match(&self, match_id: &str) -> Result<(), ChannelError> {
        {
            let mut current = self.inner.match_id.borrow_mut();
            if current.as_deref() == Some(match_id) {
                current.take();
            }
        }
        self.request(OutgoingBody::MatchLeave { match_id }).await?;
        Ok(())
    }
}
