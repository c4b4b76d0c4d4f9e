use chrono::NaiveDate;
use std::cell::RefCell;
use uuid::Uuid;
use wellness_core::service::assistant::FALLBACK_REPLY;
use wellness_core::{
    AppContext, AssistantClient, AssistantConfig, AssistantError, OpenAiAssistantClient,
    ProfileUpdate, WaterInput, WellnessConfig,
};

/// Records the context it receives and answers with a canned result.
struct ScriptedClient {
    reply: Result<String, AssistantError>,
    seen_context: RefCell<Option<String>>,
}

impl ScriptedClient {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen_context: RefCell::new(None),
        }
    }

    fn failing(err: AssistantError) -> Self {
        Self {
            reply: Err(err),
            seen_context: RefCell::new(None),
        }
    }
}

impl AssistantClient for &ScriptedClient {
    fn complete(&self, system_context: &str, _user_message: &str) -> Result<String, AssistantError> {
        *self.seen_context.borrow_mut() = Some(system_context.to_string());
        self.reply.clone()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

#[test]
fn blank_message_is_rejected_without_calling_client() {
    let ctx = AppContext::open_in_memory(WellnessConfig::default()).unwrap();
    let client = ScriptedClient::replying("unused");
    let service = ctx.assistant_service(&client).unwrap();

    let err = service.chat(Uuid::new_v4(), "   ", today()).unwrap_err();

    assert_eq!(err, AssistantError::EmptyMessage);
    assert_eq!(err.to_string(), "Message is required");
    assert!(client.seen_context.borrow().is_none());
}

#[test]
fn reply_is_relayed_with_owner_metrics_in_context() {
    let ctx = AppContext::open_in_memory(WellnessConfig::default()).unwrap();
    let owner = Uuid::new_v4();
    let entries = ctx.entry_service().unwrap();
    entries
        .update_profile(
            owner,
            &ProfileUpdate {
                name: Some("Robin".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();
    entries
        .add_water(
            owner,
            &WaterInput {
                date: None,
                amount_ml: 750,
            },
            today(),
        )
        .unwrap();

    let client = ScriptedClient::replying("Keep drinking water!");
    let reply = ctx
        .assistant_service(&client)
        .unwrap()
        .chat(owner, "How am I doing?", today())
        .unwrap();

    assert!(reply.delivered);
    assert_eq!(reply.reply, "Keep drinking water!");
    let context = client.seen_context.borrow().clone().unwrap();
    assert!(context.contains("- Name: Robin"));
    assert!(context.contains("- Today's water intake: 750 ml"));
    assert!(context.contains("- Current weight: Not recorded"));
}

#[test]
fn upstream_failure_yields_fallback_reply() {
    let ctx = AppContext::open_in_memory(WellnessConfig::default()).unwrap();
    let client = ScriptedClient::failing(AssistantError::Upstream("HTTP 500".to_string()));

    let reply = ctx
        .assistant_service(&client)
        .unwrap()
        .chat(Uuid::new_v4(), "Hello", today())
        .unwrap();

    assert!(!reply.delivered);
    assert_eq!(reply.reply, FALLBACK_REPLY);
}

#[test]
fn unconfigured_openai_client_falls_back() {
    let config = WellnessConfig {
        assistant: AssistantConfig {
            api_key: None,
            ..AssistantConfig::default()
        },
        ..WellnessConfig::default()
    };
    let ctx = AppContext::open_in_memory(config).unwrap();
    let client: OpenAiAssistantClient = ctx.openai_client().unwrap();

    let reply = ctx
        .assistant_service(client)
        .unwrap()
        .chat(Uuid::new_v4(), "Hello", today())
        .unwrap();

    assert!(!reply.delivered);
    assert_eq!(reply.reply, FALLBACK_REPLY);
}
