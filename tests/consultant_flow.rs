//! Integration tests for the two-phase consultant chat.
//!
//! Drives submit → resolve through the application handlers with a scripted
//! transport, checking the conversation after each pass.

use std::sync::Arc;

use strategic_analyst::adapters::ai::{
    ChatClient, ChatClientConfig, MockChatTransport, RecordingSleeper,
};
use strategic_analyst::adapters::export::TextReportExporter;
use strategic_analyst::application::{
    ConsultantError, ResolvePendingHandler, SubmitMessageCommand, SubmitMessageHandler,
};
use strategic_analyst::config::ConsultantConfig;
use strategic_analyst::domain::conversation::{ConsultationState, PLACEHOLDER_CONTENT};
use strategic_analyst::domain::session::AnalystSession;
use strategic_analyst::ports::{ExportFormat, ReportExporter, TransportError};

type TestClient = ChatClient<MockChatTransport, RecordingSleeper>;

fn resolver(transport: &MockChatTransport) -> ResolvePendingHandler<TestClient> {
    let client = ChatClient::with_sleeper(
        transport.clone(),
        RecordingSleeper::new(),
        ChatClientConfig::default(),
    );
    ResolvePendingHandler::new(Arc::new(client), "http://mock", ConsultantConfig::default())
}

fn keyed_session() -> AnalystSession {
    let mut session = AnalystSession::new();
    session.set_credential("sk-or-test");
    session
}

#[tokio::test]
async fn placeholder_is_visible_between_passes() {
    let transport = MockChatTransport::new().with_success("Начните с пилота.");
    let mut session = keyed_session();

    SubmitMessageHandler::new()
        .handle(&mut session, SubmitMessageCommand::new("Запускать новый продукт?"))
        .unwrap();

    // first pass: nothing sent yet
    assert_eq!(transport.call_count(), 0);
    let last = session.consultation().conversation().last().unwrap();
    assert_eq!(last.content(), PLACEHOLDER_CONTENT);

    let reply = resolver(&transport).handle(&mut session).await.unwrap();

    assert_eq!(reply.as_deref(), Some("Начните с пилота."));
    assert_eq!(transport.call_count(), 1);
    assert_eq!(session.consultation().state(), ConsultationState::Idle);
    assert!(session
        .consultation()
        .conversation()
        .messages()
        .iter()
        .all(|m| !m.is_placeholder()));
}

#[tokio::test]
async fn missing_credential_adds_no_turns() {
    let mut session = AnalystSession::new();

    let result =
        SubmitMessageHandler::new().handle(&mut session, SubmitMessageCommand::new("Вопрос"));

    assert!(matches!(result, Err(ConsultantError::MissingCredential)));
    assert_eq!(session.consultation().conversation().len(), 0);
    assert_eq!(session.consultation().state(), ConsultationState::Idle);
}

#[tokio::test]
async fn failed_turn_is_discarded_and_chat_continues() {
    let transport = MockChatTransport::new()
        .with_status(401)
        .with_success("Второй ответ");
    let mut session = keyed_session();
    let submit = SubmitMessageHandler::new();
    let resolve = resolver(&transport);

    submit
        .handle(&mut session, SubmitMessageCommand::new("Первый"))
        .unwrap();
    let err = resolve.handle(&mut session).await.unwrap_err();
    assert!(matches!(
        err,
        ConsultantError::Transport(TransportError::InvalidCredential)
    ));
    assert!(session.consultation().conversation().is_empty());

    submit
        .handle(&mut session, SubmitMessageCommand::new("Второй"))
        .unwrap();
    resolve.handle(&mut session).await.unwrap();

    let messages = session.consultation().conversation().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content(), "Второй");
    assert_eq!(messages[1].content(), "Второй ответ");
}

#[tokio::test]
async fn attached_context_is_sent_with_the_question() {
    let transport = MockChatTransport::new().with_success("ok");
    let mut session = keyed_session();
    session.attach_context("Выручка 10 млн");

    SubmitMessageHandler::new()
        .handle(&mut session, SubmitMessageCommand::new("Расширяться?"))
        .unwrap();
    resolver(&transport).handle(&mut session).await.unwrap();

    let sent = transport.calls()[0].request.messages[0].content().to_string();
    assert!(sent.starts_with("Контекст из прикреплённого файла:\n\nВыручка 10 млн"));
    assert!(sent.ends_with("Вопрос/ситуация:\nРасширяться?"));
}

#[tokio::test]
async fn history_grows_across_turns() {
    let transport = MockChatTransport::new()
        .with_success("Ответ 1")
        .with_success("Ответ 2");
    let mut session = keyed_session();
    let submit = SubmitMessageHandler::new();
    let resolve = resolver(&transport);

    for question in ["Вопрос 1", "Вопрос 2"] {
        submit
            .handle(&mut session, SubmitMessageCommand::new(question))
            .unwrap();
        resolve.handle(&mut session).await.unwrap();
    }

    let calls = transport.calls();
    assert_eq!(calls[0].request.messages.len(), 1);
    assert_eq!(calls[1].request.messages.len(), 3);

    let text = TextReportExporter::new()
        .export_conversation(session.consultation().conversation(), ExportFormat::Text)
        .unwrap();
    assert!(text.contains("Вы:\nВопрос 2"));
    assert!(text.contains("Аналитик:\nОтвет 2"));
}

#[tokio::test]
async fn clear_resets_a_pending_consultation() {
    let transport = MockChatTransport::new();
    let mut session = keyed_session();

    SubmitMessageHandler::new()
        .handle(&mut session, SubmitMessageCommand::new("Вопрос"))
        .unwrap();
    session.clear_conversation();

    assert_eq!(session.consultation().state(), ConsultationState::Idle);
    assert_eq!(resolver(&transport).handle(&mut session).await.unwrap(), None);
    assert_eq!(transport.call_count(), 0);
}
