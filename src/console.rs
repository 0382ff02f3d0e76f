//! 终端控制台
//!
//! 逐行读取命令，驱动 [`FormController`]，并把表单、flash 消息和结果表格打印出来。

use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::app::product::{
    Button, Field, FormController, FormState, MemoryForm, MemoryNotifier, MemoryResults,
    ProductApi,
};
use crate::core::error::Result;

const HELP: &str = "\
commands:
  set <field> <value...>   fill a form field (id, name, description, price, likes)
  show                     print the form
  press <button>           create | update | retrieve | delete | clear | search | like
  <button>                 same as press <button>
  copy <field>             copy a field into the clipboard
  paste <field>            paste the clipboard into a field
  results                  print the last search as a table
  html                     print the last search as html
  history                  print every flash message shown so far
  health                   probe the service
  help                     this text
  quit                     leave the console";

/// 控制台命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Show,
    Press(Button),
    Copy(Field),
    Paste(Field),
    Results,
    Html,
    History,
    Health,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入；空行与 `#` 注释返回 `Ok(None)`
    pub fn parse(line: &str) -> std::result::Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err("usage: set <field> <value...>".to_string());
                }
                Command::Set(field.parse()?, value.to_string())
            }
            "show" => Command::Show,
            "press" => Command::Press(rest.parse()?),
            "copy" => Command::Copy(rest.parse()?),
            "paste" => Command::Paste(rest.parse()?),
            "results" => Command::Results,
            "html" => Command::Html,
            "history" => Command::History,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => match Button::from_str(other) {
                Ok(button) => Command::Press(button),
                Err(_) => return Err(format!("unknown command: {}", word)),
            },
        };
        Ok(Some(command))
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

/// 控制台会话
pub struct Console<W: Write> {
    controller: FormController,
    form: Arc<MemoryForm>,
    notifier: Arc<MemoryNotifier>,
    results: Arc<MemoryResults>,
    clipboard: Option<String>,
    echo_form: bool,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(api: Arc<dyn ProductApi>, echo_form: bool, out: W) -> Result<Self> {
        let form = Arc::new(MemoryForm::new());
        let notifier = Arc::new(MemoryNotifier::new());
        let results = Arc::new(MemoryResults::new());
        let controller =
            FormController::new(api, form.clone(), notifier.clone(), results.clone())?;

        Ok(Self {
            controller,
            form,
            notifier,
            results,
            clipboard: None,
            echo_form,
            out,
        })
    }

    pub fn form(&self) -> &MemoryForm {
        &self.form
    }

    pub fn notifier(&self) -> &MemoryNotifier {
        &self.notifier
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// 执行一条命令；返回 `false` 表示会话结束
    pub async fn execute(&mut self, command: Command) -> io::Result<bool> {
        debug!("console command: {:?}", command);
        match command {
            Command::Set(field, value) => self.form.set_value(field, &value),
            Command::Show => self.print_form()?,
            Command::Press(button) => {
                let outcome = self.controller.press(button).await;
                debug!("{} -> {:?}", button, outcome);
                self.print_flash()?;
                if self.echo_form {
                    self.print_form()?;
                }
            }
            Command::Copy(field) => {
                let value = self.form.value(field);
                writeln!(self.out, "copied {} = {:?}", field, value)?;
                self.clipboard = Some(value);
            }
            Command::Paste(field) => match &self.clipboard {
                Some(value) => self.form.set_value(field, value),
                None => writeln!(self.out, "clipboard is empty")?,
            },
            Command::Results => match self.results.last() {
                Some(results) => writeln!(self.out, "{}", results.to_text())?,
                None => writeln!(self.out, "no search results yet")?,
            },
            Command::Html => match self.results.last() {
                Some(results) => writeln!(self.out, "{}", results.html)?,
                None => writeln!(self.out, "no search results yet")?,
            },
            Command::History => {
                for entry in self.notifier.history() {
                    writeln!(
                        self.out,
                        "{} {}",
                        entry.shown_at.format("%H:%M:%S%.3f"),
                        entry.message
                    )?;
                }
            }
            Command::Health => {
                self.controller.health().await;
                self.print_flash()?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// 读取输入直到 EOF 或 quit；`prompt` 为 `Some` 时在每行前打印提示符
    pub async fn run<R>(&mut self, input: R, prompt: Option<&str>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = prompt {
                write!(self.out, "{}", prompt)?;
                self.out.flush()?;
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match Command::parse(&line) {
                Ok(Some(command)) => {
                    if !self.execute(command).await? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(msg) => writeln!(self.out, "error: {} (type `help` for commands)", msg)?,
            }
        }
        self.out.flush()
    }

    fn print_flash(&mut self) -> io::Result<()> {
        let message = self.notifier.current();
        if !message.is_empty() {
            writeln!(self.out, "[flash] {}", message)?;
        }
        Ok(())
    }

    fn print_form(&mut self) -> io::Result<()> {
        let snapshot = self.form.snapshot();
        for field in Field::ALL {
            writeln!(self.out, "  {:<12}: {}", field.name(), snapshot.get(field))?;
        }
        let like = if snapshot.like_enabled { "enabled" } else { "disabled" };
        writeln!(self.out, "  {:<12}: {}", "like button", like)
    }
}
