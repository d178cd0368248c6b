//! Two-phase Telegram binding handshake.
//!
//! Phase 1 issues a short pairing code to the acting user; the user sends
//! that code to the bot, and phase 2, driven by the inbound chat webhook,
//! resolves the code back to the binding and records the chat identity.
//! Bad input in phase 2 is answered over the chat transport, never raised.

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crescendo_core::error::AppError;
use crescendo_core::result::AppResult;
use crescendo_core::traits::{ChannelBindingRepository, ChatTransport, NotificationConfigRepository};
use crescendo_entity::notification::{ChannelBinding, NotificationChannel, NotificationConfig};

use crate::context::RequestContext;

/// Lower bound of the pairing code space (inclusive).
const REGISTRATION_ID_MIN: i32 = 100_000;
/// Upper bound of the pairing code space (exclusive).
const REGISTRATION_ID_MAX: i32 = 1_000_000;
/// Collision re-rolls before generation is declared failed.
const MAX_GENERATION_ATTEMPTS: usize = 100;

/// Reply when the inbound text is not a number.
const MSG_UNREADABLE: &str =
    "Could not read that. Please send the six-digit code exactly as shown in your settings.";
/// Reply when no binding holds the submitted code.
const MSG_UNKNOWN_CODE: &str =
    "That code is not known. Please generate a new one in your settings and try again.";
/// Reply when the handshake completed.
const MSG_BOUND: &str = "You are all set. Release notifications will be sent to this chat.";

/// Issues pairing codes and completes the chat binding handshake.
pub struct ChannelBindingService {
    configs: Arc<dyn NotificationConfigRepository>,
    bindings: Arc<dyn ChannelBindingRepository>,
    chat: Arc<dyn ChatTransport>,
}

impl ChannelBindingService {
    /// Creates a new binding service.
    pub fn new(
        configs: Arc<dyn NotificationConfigRepository>,
        bindings: Arc<dyn ChannelBindingRepository>,
        chat: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            configs,
            bindings,
            chat,
        }
    }

    /// Phase 1: issue a fresh pairing code for the acting user.
    ///
    /// Creates the Telegram config and its binding on first use. An already
    /// bound chat identity is left in place; only completion replaces it.
    pub async fn start_registration(&self, ctx: &RequestContext) -> AppResult<i32> {
        let config = self.telegram_config_for(ctx.user_id).await?;

        let mut binding = match self.bindings.find_by_config(config.id).await? {
            Some(existing) => existing,
            None => ChannelBinding::new_unbound(config.id),
        };

        let code = self.generate_code().await?;
        binding.begin_registration(code);
        self.bindings.upsert(&binding).await?;

        info!(user_id = %ctx.user_id, "Issued chat pairing code");
        Ok(code)
    }

    /// Phase 2: handle an inbound chat message carrying a pairing code.
    ///
    /// Every outcome is reported back to the chat; only transport failures
    /// and repository failures surface as errors.
    pub async fn complete_registration(&self, text: &str, chat_id: i64) -> AppResult<()> {
        let code = match text.trim().parse::<i32>() {
            Ok(code) => code,
            Err(_) => {
                warn!(chat_id, "Unreadable pairing code received");
                return self.chat.send_message(chat_id, MSG_UNREADABLE).await;
            }
        };

        match self.bindings.claim_registration(code, chat_id).await? {
            Some(_) => {
                info!(chat_id, "Chat binding completed");
                self.chat.send_message(chat_id, MSG_BOUND).await
            }
            None => {
                warn!(chat_id, code, "Unknown pairing code received");
                self.chat.send_message(chat_id, MSG_UNKNOWN_CODE).await
            }
        }
    }

    /// Explicitly remove the acting user's chat bindings. The only way back
    /// from `Bound` to `Unbound`.
    pub async fn remove_binding(&self, ctx: &RequestContext) -> AppResult<u64> {
        let removed = self.bindings.delete_by_user(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, removed, "Removed chat bindings");
        Ok(removed)
    }

    /// A code that no current binding holds.
    ///
    /// Uniform re-roll over the six-digit space, bounded at
    /// [`MAX_GENERATION_ATTEMPTS`]; running out of attempts means the space
    /// is effectively exhausted and is a fatal configuration error.
    async fn generate_code(&self) -> AppResult<i32> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = rand::thread_rng().gen_range(REGISTRATION_ID_MIN..REGISTRATION_ID_MAX);
            if !self.bindings.registration_id_in_use(candidate).await? {
                return Ok(candidate);
            }
        }

        Err(AppError::configuration(format!(
            "No free pairing code after {MAX_GENERATION_ATTEMPTS} attempts"
        )))
    }

    async fn telegram_config_for(&self, user_id: Uuid) -> AppResult<NotificationConfig> {
        if let Some(existing) = self
            .configs
            .find_by_user_and_channel(user_id, NotificationChannel::Telegram)
            .await?
        {
            return Ok(existing);
        }

        let config = NotificationConfig::new_default(user_id, NotificationChannel::Telegram);
        self.configs.insert(&config).await?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use crescendo_core::error::ErrorKind;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryConfigs {
        rows: Mutex<HashMap<(Uuid, NotificationChannel), NotificationConfig>>,
    }

    #[async_trait]
    impl NotificationConfigRepository for InMemoryConfigs {
        async fn find_all_active(&self) -> AppResult<Vec<NotificationConfig>> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_user_and_channel(
            &self,
            user_id: Uuid,
            channel: NotificationChannel,
        ) -> AppResult<Option<NotificationConfig>> {
            Ok(self.rows.lock().unwrap().get(&(user_id, channel)).cloned())
        }

        async fn insert(&self, config: &NotificationConfig) -> AppResult<()> {
            self.rows
                .lock()
                .unwrap()
                .insert((config.user_id, config.channel), config.clone());
            Ok(())
        }

        async fn update(&self, config: &NotificationConfig) -> AppResult<()> {
            self.rows
                .lock()
                .unwrap()
                .insert((config.user_id, config.channel), config.clone());
            Ok(())
        }

        async fn advance_last_notification(
            &self,
            _config_id: Uuid,
            _date: NaiveDate,
        ) -> AppResult<()> {
            Ok(())
        }

        async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|(owner, _), _| *owner != user_id);
            Ok((before - rows.len()) as u64)
        }
    }

    #[derive(Default)]
    struct InMemoryBindings {
        rows: Mutex<Vec<ChannelBinding>>,
    }

    #[async_trait]
    impl ChannelBindingRepository for InMemoryBindings {
        async fn find_by_config(&self, config_id: Uuid) -> AppResult<Option<ChannelBinding>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.notification_config_id == config_id)
                .cloned())
        }

        async fn registration_id_in_use(&self, code: i32) -> AppResult<bool> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .any(|b| b.registration_id == Some(code)))
        }

        async fn upsert(&self, binding: &ChannelBinding) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            rows.retain(|b| b.notification_config_id != binding.notification_config_id);
            rows.push(binding.clone());
            Ok(())
        }

        async fn claim_registration(
            &self,
            code: i32,
            chat_id: i64,
        ) -> AppResult<Option<ChannelBinding>> {
            let mut rows = self.rows.lock().unwrap();
            for binding in rows.iter_mut() {
                if binding.registration_id == Some(code) {
                    binding.complete_registration(chat_id);
                    return Ok(Some(binding.clone()));
                }
            }
            Ok(None)
        }

        async fn delete_by_user(&self, _user_id: Uuid) -> AppResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            let removed = rows.len();
            rows.clear();
            Ok(removed as u64)
        }
    }

    /// Reports the first `collisions` probes as taken, then free.
    struct CollidingBindings {
        collisions: usize,
        probes: AtomicUsize,
        inner: InMemoryBindings,
    }

    impl CollidingBindings {
        fn new(collisions: usize) -> Self {
            Self {
                collisions,
                probes: AtomicUsize::new(0),
                inner: InMemoryBindings::default(),
            }
        }
    }

    #[async_trait]
    impl ChannelBindingRepository for CollidingBindings {
        async fn find_by_config(&self, config_id: Uuid) -> AppResult<Option<ChannelBinding>> {
            self.inner.find_by_config(config_id).await
        }

        async fn registration_id_in_use(&self, _code: i32) -> AppResult<bool> {
            let probe = self.probes.fetch_add(1, Ordering::SeqCst);
            Ok(probe < self.collisions)
        }

        async fn upsert(&self, binding: &ChannelBinding) -> AppResult<()> {
            self.inner.upsert(binding).await
        }

        async fn claim_registration(
            &self,
            code: i32,
            chat_id: i64,
        ) -> AppResult<Option<ChannelBinding>> {
            self.inner.claim_registration(code, chat_id).await
        }

        async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64> {
            self.inner.delete_by_user(user_id).await
        }
    }

    #[derive(Default)]
    struct RecordingChat {
        sent: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl ChatTransport for RecordingChat {
        async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()> {
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    fn service_with(
        bindings: Arc<dyn ChannelBindingRepository>,
    ) -> (ChannelBindingService, Arc<RecordingChat>) {
        let chat = Arc::new(RecordingChat::default());
        let service = ChannelBindingService::new(
            Arc::new(InMemoryConfigs::default()),
            bindings,
            Arc::clone(&chat) as Arc<dyn ChatTransport>,
        );
        (service, chat)
    }

    #[tokio::test]
    async fn test_full_handshake_binds_chat_and_confirms() {
        let bindings = Arc::new(InMemoryBindings::default());
        let (service, chat) =
            service_with(Arc::clone(&bindings) as Arc<dyn ChannelBindingRepository>);
        let ctx = RequestContext::new(Uuid::new_v4());

        let code = service.start_registration(&ctx).await.unwrap();
        assert!((REGISTRATION_ID_MIN..REGISTRATION_ID_MAX).contains(&code));

        service
            .complete_registration(&code.to_string(), 555)
            .await
            .unwrap();

        let rows = bindings.rows.lock().unwrap();
        assert_eq!(rows[0].chat_id, Some(555));
        assert_eq!(rows[0].registration_id, None);

        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], (555, MSG_BOUND.to_string()));
    }

    #[tokio::test]
    async fn test_reregistration_issues_fresh_code_and_keeps_chat() {
        let bindings = Arc::new(InMemoryBindings::default());
        let (service, _) = service_with(Arc::clone(&bindings) as Arc<dyn ChannelBindingRepository>);
        let ctx = RequestContext::new(Uuid::new_v4());

        let first = service.start_registration(&ctx).await.unwrap();
        service
            .complete_registration(&first.to_string(), 555)
            .await
            .unwrap();

        service.start_registration(&ctx).await.unwrap();

        let rows = bindings.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].registration_id.is_some());
        assert_eq!(rows[0].chat_id, Some(555));
    }

    #[tokio::test]
    async fn test_unreadable_code_answers_without_mutation() {
        let bindings = Arc::new(InMemoryBindings::default());
        let (service, chat) =
            service_with(Arc::clone(&bindings) as Arc<dyn ChannelBindingRepository>);
        let ctx = RequestContext::new(Uuid::new_v4());
        service.start_registration(&ctx).await.unwrap();

        service.complete_registration("abc", 555).await.unwrap();

        let rows = bindings.rows.lock().unwrap();
        assert_eq!(rows[0].chat_id, None);
        assert!(rows[0].registration_id.is_some());

        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent[0], (555, MSG_UNREADABLE.to_string()));
    }

    #[tokio::test]
    async fn test_unknown_code_answers_without_mutation() {
        let (service, chat) = service_with(Arc::new(InMemoryBindings::default()));

        service.complete_registration("999999", 555).await.unwrap();

        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent[0], (555, MSG_UNKNOWN_CODE.to_string()));
    }

    #[tokio::test]
    async fn test_generation_survives_ninety_nine_collisions() {
        let bindings = Arc::new(CollidingBindings::new(99));
        let (service, _) = service_with(Arc::clone(&bindings) as Arc<dyn ChannelBindingRepository>);
        let ctx = RequestContext::new(Uuid::new_v4());

        let code = service.start_registration(&ctx).await.unwrap();
        assert!((REGISTRATION_ID_MIN..REGISTRATION_ID_MAX).contains(&code));
        assert_eq!(bindings.probes.load(Ordering::SeqCst), 100);
    }

    #[tokio::test]
    async fn test_generation_fails_after_hundred_collisions() {
        let bindings = Arc::new(CollidingBindings::new(usize::MAX));
        let (service, _) = service_with(Arc::clone(&bindings) as Arc<dyn ChannelBindingRepository>);
        let ctx = RequestContext::new(Uuid::new_v4());

        let err = service.start_registration(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert_eq!(bindings.probes.load(Ordering::SeqCst), 100);
    }
}
