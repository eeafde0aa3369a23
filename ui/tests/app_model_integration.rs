mod common;

use claims::{assert_matches, assert_none, assert_some};
use common::{Behavior, FakeApi, template};
use mailroom::app::application_lifecycle::{ApplicationLifecycle, LoopExit};
use mailroom::app::model::{Model, Popup};
use mailroom::components::common::{
    DispatchActivityMsg, Msg, SearchActivityMsg, SelectionActivityMsg, TemplateActivityMsg,
};
use mailroom::config::AppConfig;
use mailroom::dispatch::{DispatchPhase, PrerenderedHtml};
use mailroom_server::model::Recipient;
use std::sync::Arc;
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(2);

fn model_with(api: Arc<FakeApi>) -> Model {
    Model::new(
        AppConfig::default(),
        api,
        Arc::new(PrerenderedHtml::new("<p>Hello</p>")),
    )
}

fn dispatch(model: &mut Model, msg: DispatchActivityMsg) {
    model.handle(Msg::DispatchActivity(msg));
}

fn send_finished(model: &Model) -> bool {
    model.send_dialog().is_some_and(|dialog| {
        matches!(
            dialog.orchestrator().phase(),
            DispatchPhase::Succeeded { .. } | DispatchPhase::Failed { .. }
        )
    })
}

#[tokio::test]
async fn test_send_flow_through_model() {
    let api = Arc::new(FakeApi::new());
    let mut model = model_with(api.clone());

    dispatch(&mut model, DispatchActivityMsg::OpenDialog);
    dispatch(&mut model, DispatchActivityMsg::SubjectChanged("Hi".to_string()));
    model.handle(Msg::SelectionActivity(SelectionActivityMsg::RecipientToggled(
        Recipient::new("u1", "Ana", "ana@example.com"),
    )));
    dispatch(&mut model, DispatchActivityMsg::Submit);
    dispatch(&mut model, DispatchActivityMsg::Submit);

    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, send_finished).await;
    assert_eq!(exit, LoopExit::ConditionMet);
    assert_eq!(api.sent().len(), 1);

    let dialog = assert_some!(model.send_dialog());
    assert_eq!(
        dialog.orchestrator().message().as_deref(),
        Some("Email sent! Batch ID: batch-1, Sent: 1, Failed: 0")
    );

    let later = Instant::now() + Duration::from_secs(3);
    let follow_up = model.tick_at(later);
    assert_eq!(
        follow_up,
        Some(Msg::DispatchActivity(DispatchActivityMsg::CloseDialog))
    );
    model.handle(follow_up.unwrap_or_default());
    assert_none!(model.send_dialog());
}

#[tokio::test(start_paused = true)]
async fn test_stalled_send_times_out_and_can_be_retried() {
    let api = Arc::new(FakeApi::new().with_stalled_sends(1));
    let mut model = model_with(api.clone());

    dispatch(&mut model, DispatchActivityMsg::OpenDialog);
    dispatch(&mut model, DispatchActivityMsg::SubjectChanged("Hi".to_string()));
    model.handle(Msg::SelectionActivity(SelectionActivityMsg::RecipientToggled(
        Recipient::new("u1", "Ana", "ana@example.com"),
    )));
    dispatch(&mut model, DispatchActivityMsg::Submit);

    let exit =
        ApplicationLifecycle::run_until(&mut model, Duration::from_secs(200), send_finished).await;
    assert_eq!(exit, LoopExit::ConditionMet);
    let dialog = assert_some!(model.send_dialog());
    assert_eq!(
        dialog.orchestrator().phase(),
        &DispatchPhase::Failed {
            message: "Failed to send email. Please try again.".to_string()
        }
    );
    assert!(dialog.can_send());
    assert_none!(model.loading_message());

    dispatch(&mut model, DispatchActivityMsg::Submit);
    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, |model| {
        model.send_dialog().is_some_and(|dialog| {
            matches!(dialog.orchestrator().phase(), DispatchPhase::Succeeded { .. })
        })
    })
    .await;

    assert_eq!(exit, LoopExit::ConditionMet);
    assert_eq!(api.sent().len(), 2);
}

#[tokio::test]
async fn test_unknown_country_blocks_send() {
    let api = Arc::new(FakeApi::new());
    let mut model = model_with(api.clone());

    dispatch(&mut model, DispatchActivityMsg::OpenDialog);
    dispatch(&mut model, DispatchActivityMsg::SubjectChanged("Hi".to_string()));
    model.handle(Msg::SelectionActivity(SelectionActivityMsg::RecipientToggled(
        Recipient::new("u1", "Ana", "ana@example.com"),
    )));
    dispatch(
        &mut model,
        DispatchActivityMsg::CountriesChanged(vec!["XX".to_string()]),
    );
    dispatch(&mut model, DispatchActivityMsg::Submit);

    assert_eq!(
        model.popup(),
        Some(&Popup::Warning("Unknown country code: XX".to_string()))
    );
    assert_none!(model.loading_message());
    let dialog = assert_some!(model.send_dialog());
    assert_eq!(dialog.orchestrator().phase(), &DispatchPhase::Idle);

    dispatch(
        &mut model,
        DispatchActivityMsg::CountriesChanged(vec!["DE".to_string()]),
    );
    dispatch(&mut model, DispatchActivityMsg::Submit);
    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, send_finished).await;

    assert_eq!(exit, LoopExit::ConditionMet);
    let sent = api.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].country_code.as_deref(), Some("DE"));
}

#[tokio::test]
async fn test_closing_dialog_discards_form_state() {
    let api = Arc::new(FakeApi::new());
    let mut model = model_with(api);

    dispatch(&mut model, DispatchActivityMsg::OpenDialog);
    dispatch(&mut model, DispatchActivityMsg::SubjectChanged("Hi".to_string()));
    dispatch(
        &mut model,
        DispatchActivityMsg::CountriesChanged(vec!["DE".to_string()]),
    );
    dispatch(&mut model, DispatchActivityMsg::CloseDialog);
    dispatch(&mut model, DispatchActivityMsg::OpenDialog);

    let dialog = assert_some!(model.send_dialog());
    assert_eq!(dialog.subject(), "");
    assert!(dialog.filters().countries().is_empty());
    assert!(dialog.ledger().is_empty());
}

#[tokio::test]
async fn test_debounced_search_loads_rows() {
    let api = Arc::new(FakeApi::new());
    let mut model = model_with(api.clone());
    dispatch(&mut model, DispatchActivityMsg::OpenDialog);

    for text in ["u", "us", "user"] {
        model.handle(Msg::SearchActivity(SearchActivityMsg::QueryChanged(
            text.to_string(),
        )));
    }

    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, |model| {
        model
            .send_dialog()
            .is_some_and(|dialog| !dialog.search().rows().is_empty())
    })
    .await;
    assert_eq!(exit, LoopExit::ConditionMet);

    let searches = api.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query, "user");

    model.handle(Msg::SelectionActivity(SelectionActivityMsg::PageToggled(true)));
    let dialog = assert_some!(model.send_dialog());
    assert_eq!(dialog.ledger().len(), 20);
}

#[tokio::test]
async fn test_empty_template_list_is_seeded_once() {
    let api = Arc::new(FakeApi::new());
    let mut model = model_with(api.clone());

    model.handle(Msg::TemplateActivity(TemplateActivityMsg::Load));
    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, |model| {
        model.templates().templates().len() == 8
    })
    .await;

    assert_eq!(exit, LoopExit::ConditionMet);
    assert_eq!(api.list_calls(), 2);
    assert_eq!(model.templates().current_template_id(), None);
}

#[tokio::test]
async fn test_requested_template_is_opened_after_load() {
    let api = Arc::new(FakeApi::new().with_templates(vec![
        template(1, "Welcome"),
        template(2, "Reset password"),
    ]));
    let mut model = model_with(api).with_requested_template(Some("2".to_string()));

    model.handle(Msg::TemplateActivity(TemplateActivityMsg::Load));
    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, |model| {
        model.templates().current_template_id().is_some()
    })
    .await;

    assert_eq!(exit, LoopExit::ConditionMet);
    assert_eq!(model.templates().current_template_id(), Some(2));
}

#[tokio::test]
async fn test_save_as_new_shows_success_and_keeps_current_template() {
    let api = Arc::new(FakeApi::new().with_templates(vec![template(1, "Welcome")]));
    let mut model = model_with(api.clone()).with_requested_template(Some("1".to_string()));

    model.handle(Msg::TemplateActivity(TemplateActivityMsg::Load));
    ApplicationLifecycle::run_until(&mut model, WAIT, |model| {
        model.templates().current_template_id().is_some()
    })
    .await;

    model.handle(Msg::TemplateActivity(TemplateActivityMsg::SaveAsNew {
        name: "Welcome copy".to_string(),
        description: String::new(),
    }));
    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, |model| {
        matches!(model.popup(), Some(Popup::Success(_)))
    })
    .await;

    assert_eq!(exit, LoopExit::ConditionMet);
    assert_eq!(
        model.popup(),
        Some(&Popup::Success("Template saved successfully".to_string()))
    );
    assert_eq!(model.templates().current_template_id(), Some(1));
    assert_eq!(model.templates().templates().len(), 2);
}

#[tokio::test]
async fn test_invalid_template_name_warns_without_request() {
    let api = Arc::new(FakeApi::new());
    let mut model = model_with(api);

    model.handle(Msg::TemplateActivity(TemplateActivityMsg::SaveAsNew {
        name: "   ".to_string(),
        description: String::new(),
    }));

    assert_eq!(
        model.popup(),
        Some(&Popup::Warning("Name is required".to_string()))
    );
    assert_none!(model.loading_message());
}

#[tokio::test]
async fn test_rejected_session_latches_application() {
    let api = Arc::new(FakeApi::new().with_template_behavior(Behavior::Unauthorized));
    let mut model = model_with(api.clone());
    dispatch(&mut model, DispatchActivityMsg::OpenDialog);

    model.handle(Msg::TemplateActivity(TemplateActivityMsg::Load));
    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, |_| false).await;

    assert_eq!(exit, LoopExit::AuthenticationRequired);
    assert!(model.auth().is_authentication_required().await);
    assert_some!(model.auth_required());
    assert_none!(model.send_dialog());
    assert_none!(model.popup());

    dispatch(&mut model, DispatchActivityMsg::OpenDialog);
    assert_none!(model.send_dialog());
}

#[tokio::test]
async fn test_failed_template_load_shows_generic_error() {
    let api = Arc::new(FakeApi::new().with_template_behavior(Behavior::ServerError));
    let mut model = model_with(api);

    model.handle(Msg::TemplateActivity(TemplateActivityMsg::Load));
    let exit = ApplicationLifecycle::run_until(&mut model, WAIT, |model| {
        model.popup().is_some()
    })
    .await;

    assert_eq!(exit, LoopExit::ConditionMet);
    assert_matches!(model.popup(), Some(Popup::Error(_)));
    assert_none!(model.auth_required());
}
