//! Line-oriented terminal prompter.
//!
//! Questions are written to an output stream and answers read one line at a
//! time. At any prompt:
//!
//! * `<` or `back` goes back one step
//! * `q`, `quit` or end of input cancels the wizard
//! * an empty line accepts the default, when there is one

use crate::prompt::{Choice, Prompter, Reply};
use async_trait::async_trait;
use cloudwiz_core::Context;
use parking_lot::Mutex;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

enum Line {
    Text(String),
    Back,
    Cancel,
    Interrupted,
    Failed(std::io::Error),
}

pub struct TerminalPrompter<R, W> {
    lines: tokio::sync::Mutex<Lines<BufReader<R>>>,
    out: Mutex<W>,
}

impl TerminalPrompter<tokio::io::Stdin, std::io::Stdout> {
    /// Prompter over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), std::io::stdout())
    }
}

impl<R, W> TerminalPrompter<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            lines: tokio::sync::Mutex::new(BufReader::new(input).lines()),
            out: Mutex::new(output),
        }
    }

    /// Recover the output stream.
    pub fn into_output(self) -> W {
        self.out.into_inner()
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock();
        // A broken terminal surfaces on the next read.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    async fn read_line(&self, ctx: &Context) -> Line {
        let mut lines = self.lines.lock().await;
        let read = tokio::select! {
            _ = ctx.cancelled() => return Line::Interrupted,
            read = lines.next_line() => read,
        };
        match read {
            Ok(Some(line)) => {
                let line = line.trim();
                match line {
                    "<" | "back" => Line::Back,
                    "q" | "quit" => Line::Cancel,
                    _ => Line::Text(line.to_string()),
                }
            }
            Ok(None) => Line::Cancel,
            Err(error) => Line::Failed(error),
        }
    }
}

fn control<T>(line: Line) -> Result<String, Reply<T>> {
    match line {
        Line::Text(text) => Ok(text),
        Line::Back => Err(Reply::Back),
        Line::Cancel => Err(Reply::Cancel),
        Line::Interrupted => Err(Reply::Interrupted),
        Line::Failed(error) => Err(Reply::Failed(anyhow::Error::new(error).context("reading answer"))),
    }
}

#[async_trait]
impl<R, W> Prompter for TerminalPrompter<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: Write + Send,
{
    async fn input(&self, ctx: &Context, label: &str, default: Option<&str>) -> Reply<String> {
        loop {
            match default {
                Some(default) => self.write(&format!("{} [{}]: ", label, default)),
                None => self.write(&format!("{}: ", label)),
            }
            let text = match control(self.read_line(ctx).await) {
                Ok(text) => text,
                Err(reply) => return reply,
            };
            if !text.is_empty() {
                return Reply::Answer(text);
            }
            if let Some(default) = default {
                return Reply::Answer(default.to_string());
            }
            self.write("  A value is required.\n");
        }
    }

    async fn select(
        &self,
        ctx: &Context,
        label: &str,
        choices: &[Choice],
        default: Option<usize>,
    ) -> Reply<usize> {
        let mut menu = format!("{}\n", label);
        for (i, choice) in choices.iter().enumerate() {
            let marker = if default == Some(i) { '*' } else { ' ' };
            match &choice.detail {
                Some(detail) => menu.push_str(&format!("{} {:>2}) {}  ({})\n", marker, i + 1, choice.label, detail)),
                None => menu.push_str(&format!("{} {:>2}) {}\n", marker, i + 1, choice.label)),
            }
        }
        self.write(&menu);

        loop {
            match default {
                Some(d) => self.write(&format!("Choose 1-{} [{}]: ", choices.len(), d + 1)),
                None => self.write(&format!("Choose 1-{}: ", choices.len())),
            }
            let text = match control(self.read_line(ctx).await) {
                Ok(text) => text,
                Err(reply) => return reply,
            };
            if text.is_empty() {
                if let Some(d) = default {
                    return Reply::Answer(d);
                }
            }
            match text.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Reply::Answer(n - 1),
                _ => self.write(&format!("  Please enter a number between 1 and {}.\n", choices.len())),
            }
        }
    }

    async fn confirm(&self, ctx: &Context, label: &str, default: bool) -> Reply<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            self.write(&format!("{} [{}]: ", label, hint));
            let text = match control(self.read_line(ctx).await) {
                Ok(text) => text,
                Err(reply) => return reply,
            };
            match text.to_ascii_lowercase().as_str() {
                "" => return Reply::Answer(default),
                "y" | "yes" => return Reply::Answer(true),
                "n" | "no" => return Reply::Answer(false),
                _ => self.write("  Please answer y or n.\n"),
            }
        }
    }

    fn notify(&self, message: &str) {
        self.write(&format!("{}\n", message));
    }
}
