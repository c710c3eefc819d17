use std::time::{Duration, Instant};

use super::*;
use crate::api::{ChatReply, ChatRequest, HealthReply, PredictionSet, RiskPrediction};
use crate::core::constants::{
    CHAT_FAILED_MESSAGE, HEALTH_FAILED_MESSAGE, NOTIFICATION_TTL, SERVER_UNREACHABLE_MESSAGE,
};
use crate::core::health_form::HealthField;
use crate::core::message::{Message, TranscriptRole};
use crate::core::predictions::RiskLevel;
use crate::core::tabs::Tab;
use crate::utils::test_utils::{capture_logs, create_test_app, create_test_error};

fn apply(app: &mut App, action: AppAction) -> Option<AppCommand> {
    apply_action(app, action, AppActionContext::default())
}

fn banners(app: &App, tab: Tab) -> Vec<String> {
    app.ui
        .notifications
        .for_tab(tab)
        .map(|entry| entry.message.clone())
        .collect()
}

fn reply_with(text: &str) -> ChatReply {
    ChatReply {
        response: Some(text.to_string()),
        ..Default::default()
    }
}

#[test]
fn whitespace_only_chat_input_is_ignored() {
    for input in ["", "   ", "\n\t \n"] {
        let mut app = create_test_app();
        app.ui.set_composer_text(input);

        assert_eq!(apply(&mut app, AppAction::SubmitChat), None);
        assert!(app.ui.messages.is_empty());
        assert!(!app.is_busy());
    }
}

#[test]
fn successful_chat_appends_user_then_system_message() {
    let mut app = create_test_app();
    app.ui.set_composer_text("  What is a normal heart rate?  ");

    let command = apply(&mut app, AppAction::SubmitChat);
    assert_eq!(
        command,
        Some(AppCommand::SendChat(ChatRequest::new(
            "What is a normal heart rate?"
        )))
    );
    assert_eq!(app.ui.composer_text(), "");
    assert!(app.is_busy());

    apply(
        &mut app,
        AppAction::ChatSucceeded {
            reply: ChatReply {
                response: Some("60 to 100 bpm.".to_string()),
                model_used: Some("gpt-4".to_string()),
                error: None,
            },
        },
    );

    let messages: Vec<Message> = app.ui.messages.iter().cloned().collect();
    assert_eq!(
        messages,
        vec![
            Message::user("What is a normal heart rate?"),
            Message::system("60 to 100 bpm."),
        ]
    );
    assert_eq!(app.session.last_model_used.as_deref(), Some("gpt-4"));
    assert!(!app.is_busy());
}

#[test]
fn chat_reply_without_text_appends_nothing() {
    let mut app = create_test_app();
    app.ui.set_composer_text("hello");
    apply(&mut app, AppAction::SubmitChat);

    apply(
        &mut app,
        AppAction::ChatSucceeded {
            reply: ChatReply::default(),
        },
    );
    apply(
        &mut app,
        AppAction::ChatSucceeded {
            reply: reply_with(""),
        },
    );

    assert_eq!(app.ui.messages.len(), 1);
    assert_eq!(app.ui.messages[0].role, TranscriptRole::User);
}

#[test]
fn failed_chat_shows_banner_and_clears_loading() {
    let mut app = create_test_app();
    app.ui.set_composer_text("hello");
    apply(&mut app, AppAction::SubmitChat);

    apply(
        &mut app,
        AppAction::ChatFailed {
            error: create_test_error("/chat"),
        },
    );

    assert!(!app.is_busy());
    assert_eq!(banners(&app, Tab::Chat), vec![CHAT_FAILED_MESSAGE]);
    assert_eq!(app.ui.messages.len(), 1);
}

#[test]
fn overlapping_requests_keep_loading_until_last_finishes() {
    let mut app = create_test_app();
    app.ui.set_composer_text("first");
    apply(&mut app, AppAction::SubmitChat);
    apply(&mut app, AppAction::SubmitHealthForm);
    assert_eq!(app.ui.loading.in_flight(), 2);

    apply(
        &mut app,
        AppAction::ChatSucceeded {
            reply: reply_with("ok"),
        },
    );
    assert!(app.is_busy());

    apply(
        &mut app,
        AppAction::HealthFailed {
            error: create_test_error("/health"),
        },
    );
    assert!(!app.is_busy());
}

#[test]
fn health_submission_uses_parse_or_null_policy() {
    let mut app = create_test_app();
    let form = &mut app.ui.health_form;
    form.set_value(HealthField::BloodGlucose, "135");
    form.set_value(HealthField::SystolicBp, "one-twenty");
    form.set_value(HealthField::Age, "52");
    form.set_value(HealthField::MedicalHistory, "a, b ,,c");

    let Some(AppCommand::SendHealth(submission)) = apply(&mut app, AppAction::SubmitHealthForm)
    else {
        panic!("expected a health submission");
    };

    assert_eq!(submission.blood_glucose, Some(135.0));
    assert_eq!(submission.systolic_bp, None);
    assert_eq!(submission.age, Some(52));
    assert_eq!(submission.medical_history, vec!["a", "b", "c"]);
    assert!(app.is_busy());
    // The form keeps its values after submitting
    assert_eq!(app.ui.health_form.value(HealthField::Age), "52");
}

#[test]
fn health_results_replace_previous_cards() {
    let mut app = create_test_app();

    apply(&mut app, AppAction::SubmitHealthForm);
    apply(
        &mut app,
        AppAction::HealthSucceeded {
            reply: HealthReply {
                predictions: PredictionSet(vec![
                    (
                        "diabetes".to_string(),
                        RiskPrediction {
                            risk_score: 70.0,
                            recommendation: "Consult a provider.".to_string(),
                        },
                    ),
                    (
                        "hypertension".to_string(),
                        RiskPrediction {
                            risk_score: 39.9,
                            recommendation: "Keep it up.".to_string(),
                        },
                    ),
                ]),
                error: None,
            },
        },
    );

    let cards = app.ui.results.cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].title, "Diabetes");
    assert_eq!(cards[0].level, RiskLevel::High);
    assert_eq!(cards[1].level, RiskLevel::Low);
    assert!(app.ui.results.take_reveal_request());
    assert!(!app.is_busy());

    apply(&mut app, AppAction::SubmitHealthForm);
    apply(
        &mut app,
        AppAction::HealthSucceeded {
            reply: HealthReply::default(),
        },
    );
    assert!(app.ui.results.cards().is_empty());
}

#[test]
fn reply_error_fields_are_logged_as_warnings() {
    let mut app = create_test_app();
    app.ui.set_composer_text("hello");
    let logs = capture_logs(|| {
        apply(&mut app, AppAction::SubmitChat);
        apply(
            &mut app,
            AppAction::ChatSucceeded {
                reply: ChatReply {
                    response: Some("Partial answer".to_string()),
                    error: Some("model fallback".to_string()),
                    ..Default::default()
                },
            },
        );
        apply(&mut app, AppAction::SubmitHealthForm);
        apply(
            &mut app,
            AppAction::HealthSucceeded {
                reply: HealthReply {
                    predictions: PredictionSet::default(),
                    error: Some("stale model".to_string()),
                },
            },
        );
    });

    assert!(logs
        .lines()
        .any(|line| line.contains("WARN") && line.contains("chat reply carried an error field")));
    assert!(logs
        .lines()
        .any(|line| line.contains("WARN") && line.contains("health reply carried an error field")));
    assert_eq!(app.ui.messages.len(), 2);
    assert!(app.ui.notifications.is_empty());
    assert!(!app.is_busy());
}

#[test]
fn failed_health_request_shows_banner_on_active_tab() {
    let mut app = create_test_app();
    apply(&mut app, AppAction::SelectTab { tab: Tab::Health });
    apply(&mut app, AppAction::SubmitHealthForm);
    apply(
        &mut app,
        AppAction::HealthFailed {
            error: create_test_error("/health"),
        },
    );

    assert_eq!(banners(&app, Tab::Health), vec![HEALTH_FAILED_MESSAGE]);
    assert!(banners(&app, Tab::Chat).is_empty());
    assert!(!app.is_busy());
}

#[test]
fn selecting_a_tab_activates_only_that_tab() {
    let mut app = create_test_app();
    assert_eq!(app.ui.tabs.active(), Tab::Chat);

    apply(&mut app, AppAction::SelectTab { tab: Tab::Health });
    let active: Vec<Tab> = Tab::ALL
        .into_iter()
        .filter(|tab| app.ui.tabs.is_active(*tab))
        .collect();
    assert_eq!(active, vec![Tab::Health]);

    apply(&mut app, AppAction::CycleTab { forward: true });
    assert_eq!(app.ui.tabs.active(), Tab::Chat);
    apply(&mut app, AppAction::CycleTab { forward: false });
    assert_eq!(app.ui.tabs.active(), Tab::Health);
}

#[test]
fn banners_expire_unless_dismissed_first() {
    let mut app = create_test_app();
    let start = Instant::now();
    let first = app.notify_error("first");
    let second = app.notify_error("second");

    apply(&mut app, AppAction::DismissLatestNotification);
    assert!(!app.ui.notifications.contains(second));
    assert!(app.ui.notifications.contains(first));

    apply(
        &mut app,
        AppAction::ExpireNotifications {
            now: start + NOTIFICATION_TTL + Duration::from_millis(50),
        },
    );
    assert!(app.ui.notifications.is_empty());

    // Nothing left to close; must not panic or remove anything else
    apply(&mut app, AppAction::DismissLatestNotification);
    assert!(app.ui.notifications.is_empty());
}

#[test]
fn probe_failure_marks_backend_unreachable() {
    let mut app = create_test_app();
    assert_eq!(
        apply(&mut app, AppAction::ProbeRequested),
        Some(AppCommand::ProbeBackend)
    );
    assert_eq!(app.session.server_status, ServerStatus::Checking);
    // The probe never drives the loading overlay
    assert!(!app.is_busy());

    apply(
        &mut app,
        AppAction::ProbeFailed {
            error: create_test_error("/health-check"),
        },
    );
    assert_eq!(app.session.server_status, ServerStatus::Unreachable);
    assert_eq!(banners(&app, Tab::Chat), vec![SERVER_UNREACHABLE_MESSAGE]);
}

#[test]
fn degraded_probe_reports_components() {
    let mut app = create_test_app();
    let report: crate::api::HealthCheckReport = serde_json::from_str(
        r#"{"status": "error", "chatbot": "not responding", "ml_model": "unknown"}"#,
    )
    .unwrap();

    apply(&mut app, AppAction::ProbeSucceeded { report });

    assert!(matches!(
        app.session.server_status,
        ServerStatus::Degraded(_)
    ));
    assert_eq!(
        banners(&app, Tab::Chat),
        vec!["Server reported a problem: chatbot not responding, risk model unknown"]
    );

    apply(
        &mut app,
        AppAction::ProbeSucceeded {
            report: Default::default(),
        },
    );
    assert_eq!(app.session.server_status, ServerStatus::Online);
}

#[test]
fn apply_actions_collects_commands_in_order() {
    let mut app = create_test_app();
    app.ui.set_composer_text("hi");
    let envelopes = vec![
        AppActionEnvelope {
            action: AppAction::SubmitChat,
            context: AppActionContext::default(),
        },
        AppActionEnvelope {
            action: AppAction::SelectTab { tab: Tab::Health },
            context: AppActionContext::default(),
        },
        AppActionEnvelope {
            action: AppAction::SubmitHealthForm,
            context: AppActionContext::default(),
        },
    ];

    let commands = apply_actions(&mut app, envelopes);
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::SendChat(_)));
    assert!(matches!(commands[1], AppCommand::SendHealth(_)));
}

#[tokio::test]
async fn dispatcher_delivers_actions_to_receiver() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let dispatcher = AppActionDispatcher::new(tx);
    dispatcher.dispatch_many(
        [AppAction::SubmitChat, AppAction::DismissLatestNotification],
        AppActionContext::default(),
    );

    let first = rx.recv().await.expect("first action");
    assert!(matches!(first.action, AppAction::SubmitChat));
    let second = rx.recv().await.expect("second action");
    assert!(matches!(second.action, AppAction::DismissLatestNotification));
}
