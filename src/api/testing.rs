//! In-memory transport and token store for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use super::{ApiRequest, ApiResponse, HttpTransport, TokenStore};
use crate::error::ApiError;

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

struct Scripted {
    reply: Result<ApiResponse, ApiError>,
    delayed: bool,
}

/// Returns `Pending` once before completing.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Replays scripted responses in order and records every request it sees.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Scripted>>>,
    sent: Rc<RefCell<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, reply: Result<ApiResponse, ApiError>, delayed: bool) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Scripted { reply, delayed });
        self
    }

    pub fn reply(&self, status: u16, body: &str) -> &Self {
        let response = ApiResponse {
            status,
            body: body.to_string(),
        };
        self.push(Ok(response), false)
    }

    /// Like `reply`, but the request stays in flight for one extra poll.
    /// The reply is claimed when the request is sent, so later requests
    /// get later replies regardless of completion order.
    pub fn reply_delayed(&self, status: u16, body: &str) -> &Self {
        let response = ApiResponse {
            status,
            body: body.to_string(),
        };
        self.push(Ok(response), true)
    }

    pub fn fail(&self, err: ApiError) -> &Self {
        self.push(Err(err), false)
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        let next = self.replies.borrow_mut().pop_front();
        let Some(Scripted { reply, delayed }) = next else {
            return Err(ApiError::Transport("no scripted reply".into()));
        };
        if delayed {
            YieldOnce(false).await;
        }
        reply
    }
}

/// Shared-handle token store; clones see the same slot.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.token.borrow_mut() = Some(token.to_string());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set_token(&self, token: &str) -> Result<(), ApiError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), ApiError> {
        self.token.borrow_mut().take();
        Ok(())
    }
}
