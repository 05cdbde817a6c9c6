use crate::domain::models::{JsonErr, JsonOut};
use serde::Serialize;

/// Text rows or a `{ "ok": ..., "data": ... }` envelope, chosen once per run.
#[derive(Clone, Copy, Debug)]
pub struct Printer {
    pub json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn rows<T: Serialize>(&self, data: &[T], row: impl Fn(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOut { ok: true, data })?);
        } else if data.is_empty() {
            println!("(none)");
        } else {
            for d in data {
                println!("{}", row(d));
            }
        }
        Ok(())
    }

    pub fn one<T: Serialize>(&self, data: T, line: impl Fn(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOut { ok: true, data })?);
        } else {
            println!("{}", line(&data));
        }
        Ok(())
    }

    /// Reports a terminating error on stderr, with its cause chain.
    pub fn error(&self, err: &anyhow::Error) {
        if self.json {
            let causes = err.chain().skip(1).map(|c| c.to_string()).collect();
            let body = JsonErr {
                ok: false,
                error: err.to_string(),
                causes,
            };
            match serde_json::to_string_pretty(&body) {
                Ok(s) => eprintln!("{}", s),
                Err(_) => eprintln!("error: {:?}", err),
            }
        } else {
            eprintln!("error: {:?}", err);
        }
    }
}
