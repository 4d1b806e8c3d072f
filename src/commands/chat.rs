use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use strategic_analyst::adapters::{FileDocumentReader, TextReportExporter};
use strategic_analyst::application::{
    LoadDocumentHandler, ResolvePendingHandler, SubmitMessageCommand, SubmitMessageHandler,
};
use strategic_analyst::domain::session::AnalystSession;
use strategic_analyst::ports::{ExportFormat, ReportExporter, UploadedDocument};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{AppContext, Client};
use crate::cli::ChatArgs;

const HELP: &str = "Команды: /attach PATH, /clear, /short, /long, /export PATH, /quit";

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Attach(&'a str),
    Clear,
    Short,
    Long,
    Export(&'a str),
    Quit,
    Help,
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };
    match command {
        "/attach" => Input::Attach(arg),
        "/clear" => Input::Clear,
        "/short" => Input::Short,
        "/long" => Input::Long,
        "/export" => Input::Export(arg),
        "/quit" | "/exit" => Input::Quit,
        "/help" => Input::Help,
        _ => Input::Message(line),
    }
}

struct Repl {
    session: AnalystSession,
    submit: SubmitMessageHandler,
    resolve: ResolvePendingHandler<Client>,
    loader: LoadDocumentHandler<FileDocumentReader>,
}

pub async fn handle(args: &ChatArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let mut session = ctx.session();
    if args.short {
        session.set_short_mode(true);
    }
    if !session.has_credential() {
        anyhow::bail!("Введите API ключ (--api-key или STRATEGIC_ANALYST__AI__API_KEY)");
    }

    let mut repl = Repl {
        session,
        submit: SubmitMessageHandler::new(),
        resolve: ResolvePendingHandler::new(
            ctx.client.clone(),
            ctx.base_url(),
            ctx.config.consultant.clone(),
        ),
        loader: LoadDocumentHandler::new(
            Arc::new(FileDocumentReader::new()),
            ctx.config.consultant.max_context_chars,
        ),
    };

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        if !repl.step(&line).await? {
            break;
        }
    }
    Ok(())
}

impl Repl {
    /// Handles one input line; returns false on quit.
    async fn step(&mut self, line: &str) -> anyhow::Result<bool> {
        match parse_input(line) {
            Input::Quit => return Ok(false),
            Input::Help => println!("{HELP}"),
            Input::Clear => {
                self.session.clear_conversation();
                println!("Диалог очищен");
            }
            Input::Short => {
                self.session.set_short_mode(true);
                println!("Краткий режим");
            }
            Input::Long => {
                self.session.set_short_mode(false);
                println!("Подробный режим");
            }
            Input::Attach("") => {
                self.session.detach_context();
                println!("Файл откреплён");
            }
            Input::Attach(path) => self.attach(Path::new(path)),
            Input::Export(path) => self.export(Path::new(path))?,
            Input::Message(text) => self.converse(text).await,
        }
        Ok(true)
    }

    fn attach(&mut self, path: &Path) {
        match UploadedDocument::from_path(path) {
            Ok(document) => {
                let chars = self.loader.attach_context(&mut self.session, &document);
                println!("Прикреплено символов: {chars}");
            }
            Err(e) => println!("{e}"),
        }
    }

    fn export(&self, path: &Path) -> anyhow::Result<()> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or(ExportFormat::Text);
        let text = TextReportExporter::new()
            .export_conversation(self.session.consultation().conversation(), format)?;
        std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Сохранено: {}", path.display());
        Ok(())
    }

    /// Submits, shows the placeholder, then resolves it on the next pass.
    async fn converse(&mut self, text: &str) {
        if let Err(e) = self.submit.handle(&mut self.session, SubmitMessageCommand::new(text)) {
            println!("{e}");
            return;
        }
        if let Some(placeholder) = self.session.consultation().conversation().last() {
            println!("Аналитик: {}", placeholder.content());
        }

        match self.resolve.handle(&mut self.session).await {
            Ok(Some(reply)) => println!("\nАналитик:\n{reply}\n"),
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }
    }
}
