//! Terminal rendering of the product list and line-based prompts.
//!
//! A terminal cannot patch lines it already printed, so every render-port
//! call prints what changed and the view keeps its own copy of the displayed
//! list for lookups and `list`.

use std::io::Write;
use std::sync::mpsc::Receiver;

use product_core::{Notice, Product, Prompter, RenderPort};

pub struct TerminalView<W> {
    out: W,
    shown: Vec<Product>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: Vec::new(),
        }
    }

    pub fn shown(&self) -> &[Product] {
        &self.shown
    }

    pub fn find(&self, id: u64) -> Option<&Product> {
        self.shown.iter().find(|p| p.id == id)
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Reprint every displayed product.
    pub fn print_all(&mut self) {
        if self.shown.is_empty() {
            self.line("(no products shown)");
            return;
        }
        let text: String = self.shown.iter().map(block).collect();
        self.emit(&text);
    }

    pub fn line(&mut self, text: &str) {
        self.emit(&format!("{text}\n"));
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }
}

fn block(product: &Product) -> String {
    format!("#{} {}\n    {}\n", product.id, product.title, product.body.replace('\n', "\n    "))
}

impl<W: Write> RenderPort for TerminalView<W> {
    fn render(&mut self, items: &[Product]) {
        self.shown = items.to_vec();
        self.line("---");
        self.print_all();
    }

    fn append(&mut self, items: &[Product]) {
        self.shown.extend_from_slice(items);
        let text: String = items.iter().map(block).collect();
        self.emit(&text);
    }

    fn prepend(&mut self, item: &Product) {
        self.shown.insert(0, item.clone());
        self.emit(&format!("+ {}", block(item)));
    }

    fn patch(&mut self, id: u64, item: &Product) {
        if let Some(slot) = self.shown.iter_mut().find(|p| p.id == id) {
            *slot = item.clone();
            self.emit(&format!("~ {}", block(item)));
        }
    }

    fn remove(&mut self, id: u64) {
        if let Some(pos) = self.shown.iter().position(|p| p.id == id) {
            self.shown.remove(pos);
            self.line(&format!("- #{id}"));
        }
    }

    fn clear_form(&mut self) {}

    fn notify(&mut self, notice: Notice) {
        let tag = if notice.is_failure() { "error" } else { "ok" };
        self.line(&format!("[{tag}] {notice}"));
    }
}

/// Answers prompts from the same line stream the command loop reads.
///
/// A blank answer keeps the suggested value and a lone `.` cancels, the way
/// dismissing a browser prompt would.
pub struct Console<'a, W> {
    lines: &'a Receiver<String>,
    out: W,
}

impl<'a, W: Write> Console<'a, W> {
    pub fn new(lines: &'a Receiver<String>, out: W) -> Self {
        Self { lines, out }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        if let Err(err) = write!(self.out, "{question} ").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %err, "failed to write prompt");
        }
        let answer = self.lines.recv().ok()?;
        Some(answer.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<W: Write> Prompter for Console<'_, W> {
    fn prompt(&mut self, label: &str, default: &str) -> Option<String> {
        let answer = self.ask(&format!("{label} [{default}]"))?;
        match answer.trim() {
            "." => None,
            "" => Some(default.to_string()),
            _ => Some(answer.trim().to_string()),
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{message} [y/N]"))
            .is_some_and(|a| matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}
