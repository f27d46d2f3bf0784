//! Test doubles for the client ports.

#![allow(dead_code)]

use std::collections::VecDeque;

use product_core::{
    HttpRequest, HttpResponse, Notice, Product, Prompter, RenderPort, Transport, TransportError,
};

pub fn product(id: u64) -> Product {
    Product {
        id,
        title: format!("product {id}"),
        body: format!("body {id}"),
        user_id: 1,
    }
}

pub fn products(ids: impl IntoIterator<Item = u64>) -> Vec<Product> {
    ids.into_iter().map(product).collect()
}

pub fn json_response(status: u16, value: &impl serde::Serialize) -> HttpResponse {
    HttpResponse::new(status, serde_json::to_string(value).unwrap())
}

/// Replays queued responses and records every request it was handed.
#[derive(Default)]
pub struct ScriptedTransport {
    pub replies: VecDeque<Result<HttpResponse, TransportError>>,
    pub sent: Vec<HttpRequest>,
}

impl ScriptedTransport {
    pub fn reply(mut self, response: HttpResponse) -> Self {
        self.replies.push_back(Ok(response));
        self
    }

    pub fn fail(mut self, message: &str) -> Self {
        self.replies.push_back(Err(TransportError(message.to_string())));
        self
    }
}

impl Transport for ScriptedTransport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.push(request);
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())))
    }
}

/// Keeps the displayed list the way a page would.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub shown: Vec<Product>,
    pub notices: Vec<Notice>,
    pub form_clears: usize,
}

impl RecordingView {
    pub fn ids(&self) -> Vec<u64> {
        self.shown.iter().map(|p| p.id).collect()
    }
}

impl RenderPort for RecordingView {
    fn render(&mut self, items: &[Product]) {
        self.shown = items.to_vec();
    }

    fn append(&mut self, items: &[Product]) {
        self.shown.extend_from_slice(items);
    }

    fn prepend(&mut self, item: &Product) {
        self.shown.insert(0, item.clone());
    }

    fn patch(&mut self, id: u64, item: &Product) {
        if let Some(slot) = self.shown.iter_mut().find(|p| p.id == id) {
            *slot = item.clone();
        }
    }

    fn remove(&mut self, id: u64) {
        if let Some(pos) = self.shown.iter().position(|p| p.id == id) {
            self.shown.remove(pos);
        }
    }

    fn clear_form(&mut self) {
        self.form_clears += 1;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Answers prompts from a queue and confirmations with a fixed value.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: VecDeque<Option<String>>,
    pub confirm: bool,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
            ..Self::default()
        }
    }

    pub fn confirming(confirm: bool) -> Self {
        Self {
            confirm,
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, label: &str, _default: &str) -> Option<String> {
        self.asked.push(label.to_string());
        self.answers.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirm
    }
}
